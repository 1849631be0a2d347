//! Mapping raw node and edge kinds onto the document vocabulary

use std::sync::LazyLock;

use graphldi_core::{EdgeKind, NodeKind, TypeSchema};
use regex::Regex;

use crate::config::KindFilter;

/// Element type for files whose name ends in a header extension.
pub const HEADER_FILE: &str = "Header_File";
/// Element type for every other file.
pub const SOURCE_FILE: &str = "Source_File";
/// Relation kind the type-usage family collapses to.
pub const TYPE_REFERENCE: &str = "Type.Reference";

static HEADER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*\.(h|hpp|hxx|hh|inc|inl)$").unwrap());
static MENTIONS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(h|hpp|hxx|hh|inc|inl)").unwrap());
static MENTIONS_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(c|cpp)").unwrap());

/// Explicit renames from raw relation kinds to document kinds.
fn remap(kind: &EdgeKind) -> Option<&'static str> {
    use EdgeKind::*;
    let mapped = match kind {
        Dispatching_Call => "Invokes.Virtual",
        Implicit_Static_Call | Static_Call => "Invokes.Static",
        Implicit_Dispatching_Call => "Invokes.Dispatch_Call",
        Member_Address => "Member.Address",
        Member_Set => "Member.Set",
        Member_Use => "Member.Use",
        Variable_Address => "Variable.Address",
        Variable_Deref => "Variable.Deref",
        Variable_Set => "Variable.Set",
        Variable_Use => "Variable.Use",
        Inherit => "Type.Inherit",
        Implementation_Of => "Type.Implementation",
        Instantiate | New_Of_Type => "Type.Instantiate",
        Override => "Type.Override",
        Extend => "Type.Extends",
        Template_Argument | Throw | Specialization_Of | Catch | Enumerator_Use
        | Friend_Declare | Grant_Friendship_To => TYPE_REFERENCE,
        _ => return None,
    };
    Some(mapped)
}

fn is_type_usage(kind: &EdgeKind) -> bool {
    use EdgeKind::*;
    matches!(
        kind,
        Local_Var_Of_Type
            | Alignof_Of_Type
            | Cast_Of_Type
            | Of_Type
            | Parameter_Of_Type
            | Return_Type
            | Sizeof_Of_Type
            | Type_Synonym_To
            | Typeid_Of_Type
    )
}

fn is_dropped(kind: &EdgeKind) -> bool {
    use EdgeKind::*;
    matches!(kind, Declare | Declared_In | Method_Address | Routine_Address)
}

/// The document kind for a raw relation kind, ignoring containment.
/// `None` means the relation is never written.
pub fn canonical_kind(kind: &EdgeKind) -> Option<&str> {
    if is_dropped(kind) {
        return None;
    }
    if let Some(mapped) = remap(kind) {
        return Some(mapped);
    }
    if is_type_usage(kind) {
        return Some(TYPE_REFERENCE);
    }
    Some(kind.as_str())
}

/// Classifies relation kinds. Containment relations (`Belongs_To` and its
/// subtypes) are always dropped; names already encode them.
pub struct EdgeClassifier<'g> {
    schema: &'g TypeSchema,
}

impl<'g> EdgeClassifier<'g> {
    pub fn new(schema: &'g TypeSchema) -> Self {
        EdgeClassifier { schema }
    }

    pub fn classify<'k>(&self, kind: &'k EdgeKind) -> Option<&'k str> {
        if self.schema.edge_is_a(kind, &EdgeKind::Belongs_To) {
            return None;
        }
        canonical_kind(kind)
    }
}

/// Whether an edge leads from a header back to a compiled source file.
/// Applies to `Override` and `Inherit` only, judged on the resolved names
/// of both ends.
pub fn is_header_to_source(kind: &EdgeKind, source_name: &str, target_name: &str) -> bool {
    matches!(kind, EdgeKind::Override | EdgeKind::Inherit)
        && MENTIONS_HEADER.is_match(source_name)
        && MENTIONS_SOURCE.is_match(target_name)
}

/// Decides which nodes become elements, and with which element type.
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    kinds: Option<KindFilter>,
}

impl NodeFilter {
    pub fn new(kinds: Option<KindFilter>) -> Self {
        NodeFilter { kinds }
    }

    /// The element type for a node of `kind` resolved to `name`, or `None`
    /// if the node is not written as an element.
    pub fn classify<'k>(&self, kind: &'k NodeKind, name: &str) -> Option<&'k str> {
        if let Some(filter) = &self.kinds {
            if !filter.admits(kind) {
                return None;
            }
        }
        match kind {
            NodeKind::File if HEADER_NAME.is_match(name) => Some(HEADER_FILE),
            NodeKind::File => Some(SOURCE_FILE),
            NodeKind::Directory | NodeKind::Namespace | NodeKind::System => None,
            other => Some(other.as_str()),
        }
    }
}

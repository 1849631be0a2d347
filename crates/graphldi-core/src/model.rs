//! Core data structures for the attributed dependency graph

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute holding the entity's own (unqualified) name.
pub const SOURCE_NAME: &str = "Source.Name";
/// Attribute holding the file name an entity or relation was found in.
pub const SOURCE_FILE: &str = "Source.File";
/// Attribute holding the directory of [`SOURCE_FILE`].
pub const SOURCE_PATH: &str = "Source.Path";
/// Attribute holding the line a relation was found on.
pub const SOURCE_LINE: &str = "Source.Line";

/// Stable identifier for a node within one loaded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

/// Stable identifier for an edge within one loaded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// Declares a closed kind vocabulary with an `Other` fallback for tags the
/// vocabulary does not know. Variant names are the raw tags verbatim.
macro_rules! kind_vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident, )+
        }
    ) => {
        $(#[$meta])*
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A tag outside the known vocabulary, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Parse a raw tag. Unknown tags become `Other`.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $( stringify!($variant) => $name::$variant, )+
                    other => $name::Other(other.to_string()),
                }
            }

            /// The raw tag as it appears in the graph.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => stringify!($variant), )+
                    $name::Other(name) => name,
                }
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                match $name::from_name(&name) {
                    $name::Other(_) => $name::Other(name),
                    known => known,
                }
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                $name::from_name(name)
            }
        }

        impl From<$name> for String {
            fn from(kind: $name) -> Self {
                match kind {
                    $name::Other(name) => name,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

kind_vocabulary! {
    /// What kind of code entity a node represents.
    pub enum NodeKind {
        // ── Structural containers ───────────────────────────────
        System,
        Directory,
        Namespace,
        File,

        // ── Types ───────────────────────────────────────────────
        Class,
        Class_Template,
        Type,
        Typedef,
        Union,
        Enum,
        Enumerator,

        // ── Routines ────────────────────────────────────────────
        Routine,
        Routine_Template,
        Method,
        Method_Template,
        Constructor,
        Destructor,

        // ── Data ────────────────────────────────────────────────
        Member,
        Variable,
        Constant,
    }
}

kind_vocabulary! {
    /// What kind of relation an edge represents.
    pub enum EdgeKind {
        // ── Containment ─────────────────────────────────────────
        Belongs_To,
        Enclosing,
        Part_Of,

        // ── Calls ───────────────────────────────────────────────
        Dispatching_Call,
        Implicit_Dispatching_Call,
        Static_Call,
        Implicit_Static_Call,

        // ── Data access ─────────────────────────────────────────
        Member_Address,
        Member_Set,
        Member_Use,
        Variable_Address,
        Variable_Deref,
        Variable_Set,
        Variable_Use,
        Method_Address,
        Routine_Address,

        // ── Type relations ──────────────────────────────────────
        Inherit,
        Implementation_Of,
        Instantiate,
        Override,
        New_Of_Type,
        Extend,
        Template_Argument,
        Throw,
        Specialization_Of,
        Catch,
        Enumerator_Use,
        Friend_Declare,
        Grant_Friendship_To,

        // ── Type usages ─────────────────────────────────────────
        Local_Var_Of_Type,
        Alignof_Of_Type,
        Cast_Of_Type,
        Of_Type,
        Parameter_Of_Type,
        Return_Type,
        Sizeof_Of_Type,
        Type_Synonym_To,
        Typeid_Of_Type,

        // ── Declarations ────────────────────────────────────────
        Declare,
        Declared_In,
    }
}

/// A single attribute value. The graph carries text, numbers and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl AttrValue {
    /// `false`, `0` and the empty string carry no information.
    pub fn is_blank(&self) -> bool {
        match self {
            AttrValue::Bool(b) => !b,
            AttrValue::Int(i) => *i == 0,
            AttrValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Named attributes of a node or edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(HashMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up an attribute. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key).filter(|v| !v.is_blank())
    }

    /// Look up an attribute rendered as text. Blank values count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

/// A single node in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Identity as written in the graph document.
    pub key: String,
    pub kind: NodeKind,
    pub attributes: Attributes,
}

impl GraphNode {
    pub fn new(key: impl Into<String>, kind: impl Into<NodeKind>) -> Self {
        GraphNode {
            key: key.into(),
            kind: kind.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// The entity's own name, without any qualification.
    pub fn source_name(&self) -> Option<String> {
        self.attributes.text(SOURCE_NAME)
    }
}

/// A directed edge in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub attributes: Attributes,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId, kind: impl Into<EdgeKind>) -> Self {
        GraphEdge {
            source,
            target,
            kind: kind.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

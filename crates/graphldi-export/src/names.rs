//! Qualified display names for graph nodes
//!
//! A node's name is built from, in order of preference, the structured
//! signature held by the secondary source (routines and methods only) or
//! the node's own `Source.Name`. The result is qualified with the raw names
//! of its ancestors in the hierarchy view and escaped for the document.
//! Names are memoized for the lifetime of one [`NameResolver`].

use std::collections::{HashMap, HashSet};

use graphldi_core::{Graph, GraphNode, NodeId, NodeKind, SignatureSource, View};

/// Name used when a node carries no `Source.Name`.
pub const UNKNOWN_NAME: &str = "?";

/// Entity escapes, in application order. `&` runs first so the entities
/// produced by later replacements are left alone.
const ESCAPES: [(&str, &str); 4] = [("&", "&amp;"), ("<", "&lt;"), (">", "&gt;"), ("\"", "&quot;")];

/// Keywords the secondary source puts in front of a signature.
const SIGNATURE_KEYWORDS: [&str; 2] = ["routine ", "inline "];

/// Module tag trailer; a tag runs from a `@` through the next occurrence.
const MODULE_TAG_END: &str = "dll.ir";

/// Escape text for use inside the document.
pub fn escape(text: &str) -> String {
    let mut escaped = text.to_string();
    for (from, to) in ESCAPES {
        escaped = escaped.replace(from, to);
    }
    escaped
}

/// Remove every `@...dll.ir` module tag. Scanning stops at the first `@`
/// that has no tag end after it; the rest is kept as is.
pub fn strip_module_tags(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('@') {
        let after = &rest[at + 1..];
        match after.find(MODULE_TAG_END) {
            Some(end) => {
                stripped.push_str(&rest[..at]);
                rest = &after[end + MODULE_TAG_END.len()..];
            }
            None => break,
        }
    }
    stripped.push_str(rest);
    stripped
}

/// Turn a raw signature into a display name: leading keyword dropped, the
/// return type (if any) moved in front of the parameter list, anything
/// after the parameter list discarded, and module tags removed.
///
/// `routine f(int)->int-throw(E)` becomes `int f(int)`.
pub fn format_signature(full_name: &str) -> String {
    let text = SIGNATURE_KEYWORDS
        .iter()
        .find_map(|keyword| full_name.strip_prefix(keyword))
        .unwrap_or(full_name)
        .trim();

    let (head, return_type) = match text.find(')') {
        Some(close) => {
            let (head, tail) = text.split_at(close + 1);
            let return_type = tail
                .find("->")
                .map(|arrow| {
                    let fragment = &tail[arrow + 2..];
                    let fragment = fragment
                        .find("-throw(")
                        .map_or(fragment, |throw| &fragment[..throw]);
                    format!("{} ", fragment)
                })
                .unwrap_or_default();
            (head, return_type)
        }
        None => (text, String::new()),
    };

    strip_module_tags(&format!("{}{}", return_type, head))
}

fn raw_name(node: &GraphNode) -> String {
    node.source_name()
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Resolves and memoizes node names for one export run.
pub struct NameResolver<'g> {
    graph: &'g Graph,
    hierarchy: View<'g>,
    signatures: Option<&'g SignatureSource>,
    delimiter: char,
    cache: HashMap<NodeId, String>,
}

impl<'g> NameResolver<'g> {
    pub fn new(
        graph: &'g Graph,
        hierarchy: View<'g>,
        signatures: Option<&'g SignatureSource>,
        delimiter: char,
    ) -> Self {
        NameResolver {
            graph,
            hierarchy,
            signatures,
            delimiter,
            cache: HashMap::new(),
        }
    }

    /// The escaped, qualified name of `node`. Never fails; a node the
    /// graph does not know resolves to [`UNKNOWN_NAME`].
    pub fn resolve(&mut self, node: NodeId) -> String {
        if let Some(name) = self.cache.get(&node) {
            return name.clone();
        }
        let name = self.compute(node);
        self.cache.insert(node, name.clone());
        name
    }

    /// Number of names resolved so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn compute(&self, node: NodeId) -> String {
        let Some(data) = self.graph.node(node) else {
            tracing::debug!("Node #{} not in graph, using {}", node.0, UNKNOWN_NAME);
            return UNKNOWN_NAME.to_string();
        };
        let base = self
            .signature_name(node, data)
            .unwrap_or_else(|| raw_name(data));
        escape(&self.qualify(node, base))
    }

    fn signature_name(&self, node: NodeId, data: &GraphNode) -> Option<String> {
        let signatures = self.signatures?;
        let schema = self.graph.schema();
        if !schema.node_is_a(&data.kind, &NodeKind::Routine)
            && !schema.node_is_a(&data.kind, &NodeKind::Method)
        {
            return None;
        }
        let signature = signatures.record(node)?.signature()?;
        tracing::trace!(
            "Signature for {}: {}",
            signature.name.map_or_else(|| raw_name(data), str::to_string),
            signature.full_name
        );
        Some(format_signature(signature.full_name))
    }

    /// Prefix `name` with the raw names of all hierarchy ancestors.
    fn qualify(&self, node: NodeId, name: String) -> String {
        let mut segments = vec![name];
        let mut seen = HashSet::from([node]);
        let mut current = node;
        while let Some(parent) = self.hierarchy.parent(current) {
            if !seen.insert(parent) {
                tracing::warn!(
                    "Cycle in hierarchy view {} at node #{}",
                    self.hierarchy.name(),
                    parent.0
                );
                break;
            }
            segments.push(
                self.graph
                    .node(parent)
                    .map_or_else(|| UNKNOWN_NAME.to_string(), raw_name),
            );
            current = parent;
        }
        segments.reverse();
        segments.join(&self.delimiter.to_string())
    }
}

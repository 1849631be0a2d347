//! Subtype relations between node kinds and between edge kinds

use std::collections::{HashMap, HashSet};

use crate::model::{EdgeKind, NodeKind};

/// Parent links for node and edge kinds. `is_a` queries follow the links
/// transitively, so a `Constructor` is a `Method` and an `Enclosing` edge
/// is a `Belongs_To` edge.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    node_parents: HashMap<String, String>,
    edge_parents: HashMap<String, String>,
}

impl TypeSchema {
    /// A schema holding only the built-in parent links.
    pub fn new() -> Self {
        let mut schema = TypeSchema {
            node_parents: HashMap::new(),
            edge_parents: HashMap::new(),
        };
        schema.declare_node_type(NodeKind::Constructor.as_str(), NodeKind::Method.as_str());
        schema.declare_node_type(NodeKind::Destructor.as_str(), NodeKind::Method.as_str());
        schema.declare_edge_type(EdgeKind::Enclosing.as_str(), EdgeKind::Belongs_To.as_str());
        schema.declare_edge_type(EdgeKind::Part_Of.as_str(), EdgeKind::Belongs_To.as_str());
        schema
    }

    /// Declare `parent` as the direct supertype of node kind `child`.
    /// Replaces any earlier declaration for `child`.
    pub fn declare_node_type(&mut self, child: &str, parent: &str) {
        self.node_parents.insert(child.to_string(), parent.to_string());
    }

    /// Declare `parent` as the direct supertype of edge kind `child`.
    pub fn declare_edge_type(&mut self, child: &str, parent: &str) {
        self.edge_parents.insert(child.to_string(), parent.to_string());
    }

    /// Whether `kind` is `ancestor` or one of its subtypes.
    pub fn node_is_a(&self, kind: &NodeKind, ancestor: &NodeKind) -> bool {
        is_a(&self.node_parents, kind.as_str(), ancestor.as_str())
    }

    /// Whether `kind` is `ancestor` or one of its subtypes.
    pub fn edge_is_a(&self, kind: &EdgeKind, ancestor: &EdgeKind) -> bool {
        is_a(&self.edge_parents, kind.as_str(), ancestor.as_str())
    }
}

impl Default for TypeSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn is_a(parents: &HashMap<String, String>, kind: &str, ancestor: &str) -> bool {
    let mut seen = HashSet::new();
    let mut current = kind;
    loop {
        if current == ancestor {
            return true;
        }
        if !seen.insert(current) {
            tracing::warn!("Cycle in type hierarchy at {}", current);
            return false;
        }
        match parents.get(current) {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

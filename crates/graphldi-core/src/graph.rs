//! Graph wrapper using petgraph::StableDiGraph with named views

use crate::error::{GraphError, Result};
use crate::model::*;
use crate::schema::TypeSchema;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Membership of one named view. Node order is insertion order.
#[derive(Debug, Default)]
struct ViewData {
    nodes: Vec<NodeId>,
    node_set: HashSet<NodeId>,
    edges: HashSet<EdgeId>,
}

/// The attributed dependency graph: a directed multigraph with stable
/// indices, a type schema, and named views selecting subgraphs.
pub struct Graph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    schema: TypeSchema,
    keys: HashMap<String, NodeId>,
    views: BTreeMap<String, ViewData>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_schema(TypeSchema::new())
    }

    pub fn with_schema(schema: TypeSchema) -> Self {
        Graph {
            inner: StableDiGraph::new(),
            schema,
            keys: HashMap::new(),
            views: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// Add a node to graph. Returns assigned NodeId.
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeId> {
        if self.keys.contains_key(&node.key) {
            return Err(GraphError::DuplicateNode(node.key));
        }
        let key = node.key.clone();
        let idx = self.inner.add_node(node);
        let id = NodeId(idx.index() as u64);
        self.keys.insert(key, id);
        Ok(id)
    }

    /// Add an edge to graph. Returns assigned EdgeId.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<EdgeId> {
        for end in [edge.source, edge.target] {
            if self.node(end).is_none() {
                return Err(GraphError::UnknownNode(format!("#{}", end.0)));
            }
        }
        let source = NodeIndex::new(edge.source.0 as usize);
        let target = NodeIndex::new(edge.target.0 as usize);
        let idx = self.inner.add_edge(source, target, edge);
        Ok(EdgeId(idx.index() as u64))
    }

    /// Make a node a member of the named view, creating the view if needed.
    /// Adding a node twice keeps its first position.
    pub fn add_node_to_view(&mut self, view: &str, node: NodeId) {
        let data = self.views.entry(view.to_string()).or_default();
        if data.node_set.insert(node) {
            data.nodes.push(node);
        }
    }

    /// Create the named view with no members if it does not exist yet.
    pub fn declare_view(&mut self, view: &str) {
        self.views.entry(view.to_string()).or_default();
    }

    /// Make an edge a member of the named view, creating the view if needed.
    pub fn add_edge_to_view(&mut self, view: &str, edge: EdgeId) {
        self.views
            .entry(view.to_string())
            .or_default()
            .edges
            .insert(edge);
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        let idx = NodeIndex::new(id.0 as usize);
        self.inner.node_weight(idx)
    }

    /// Find a node by its document key.
    pub fn find_node_by_key(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Get all outgoing edges from a node, in insertion order.
    pub fn edges_from(&self, source: NodeId) -> Vec<(EdgeId, &GraphEdge)> {
        let idx = NodeIndex::new(source.0 as usize);
        let mut edges: Vec<(EdgeId, &GraphEdge)> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge_ref| (EdgeId(edge_ref.id().index() as u64), edge_ref.weight()))
            .collect();
        // petgraph yields the newest edge first
        edges.sort_by_key(|(id, _)| *id);
        edges
    }

    pub fn is_view_name(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Resolve a view by name.
    pub fn view(&self, name: &str) -> Result<View<'_>> {
        let (name, data) = self
            .views
            .get_key_value(name)
            .ok_or_else(|| GraphError::ViewNotFound(name.to_string()))?;
        Ok(View {
            graph: self,
            name,
            data,
        })
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// A named subgraph: an ordered node set plus the edges it selects.
#[derive(Clone, Copy)]
pub struct View<'g> {
    graph: &'g Graph,
    name: &'g str,
    data: &'g ViewData,
}

impl<'g> View<'g> {
    pub fn name(&self) -> &'g str {
        self.name
    }

    /// Member nodes in view order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + 'g {
        self.data.nodes.iter().copied()
    }

    pub fn node_count(&self) -> usize {
        self.data.nodes.len()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.data.node_set.contains(&node)
    }

    /// Outgoing edges of `node` that belong to this view, in insertion order.
    pub fn outgoing(&self, node: NodeId) -> Vec<(EdgeId, &'g GraphEdge)> {
        let data = self.data;
        self.graph
            .edges_from(node)
            .into_iter()
            .filter(|(id, _)| data.edges.contains(id))
            .collect()
    }

    /// The parent of `node` when this view is used as a hierarchy: the
    /// target of its first containment edge in the view, else the target
    /// of its first view edge of any kind.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let edges = self.outgoing(node);
        let schema = self.graph.schema();
        edges
            .iter()
            .find(|(_, e)| schema.edge_is_a(&e.kind, &EdgeKind::Belongs_To))
            .or_else(|| edges.first())
            .map(|(_, e)| e.target)
    }
}

impl std::fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("node_count", &self.data.nodes.len())
            .field("edge_count", &self.data.edges.len())
            .finish()
    }
}

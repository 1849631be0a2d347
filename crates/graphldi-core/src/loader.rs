//! Loading the graph and signature documents from JSON

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::{Attributes, EdgeKind, GraphEdge, GraphNode, NodeKind};
use crate::schema::TypeSchema;
use crate::signatures::{SignatureRecord, SignatureSource};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    node_types: BTreeMap<String, String>,
    #[serde(default)]
    edge_types: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NodeDocument {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    views: Vec<String>,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct EdgeDocument {
    source: String,
    target: String,
    #[serde(rename = "type")]
    kind: EdgeKind,
    #[serde(default)]
    views: Vec<String>,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    schema: SchemaDocument,
    /// Views that exist even if nothing is a member of them.
    #[serde(default)]
    views: Vec<String>,
    #[serde(default)]
    nodes: Vec<NodeDocument>,
    #[serde(default)]
    edges: Vec<EdgeDocument>,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a graph document from disk.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let json_str = read(path)?;
    let graph = parse_graph(&json_str, &path.display().to_string())?;
    tracing::debug!(
        "Graph loaded from {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Build a graph from document text. `origin` names the text in errors.
pub fn parse_graph(json_str: &str, origin: &str) -> Result<Graph> {
    let doc: GraphDocument = serde_json::from_str(json_str).map_err(|source| GraphError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let mut schema = TypeSchema::new();
    for (child, parent) in &doc.schema.node_types {
        schema.declare_node_type(child, parent);
    }
    for (child, parent) in &doc.schema.edge_types {
        schema.declare_edge_type(child, parent);
    }

    let mut graph = Graph::with_schema(schema);
    for view in &doc.views {
        graph.declare_view(view);
    }
    for node in doc.nodes {
        let id = graph.add_node(GraphNode {
            key: node.id,
            kind: node.kind,
            attributes: node.attributes,
        })?;
        for view in &node.views {
            graph.add_node_to_view(view, id);
        }
    }

    for edge in doc.edges {
        let source = graph
            .find_node_by_key(&edge.source)
            .ok_or_else(|| GraphError::UnknownNode(edge.source.clone()))?;
        let target = graph
            .find_node_by_key(&edge.target)
            .ok_or_else(|| GraphError::UnknownNode(edge.target.clone()))?;
        let id = graph.add_edge(GraphEdge {
            source,
            target,
            kind: edge.kind,
            attributes: edge.attributes,
        })?;
        for view in &edge.views {
            graph.add_edge_to_view(view, id);
        }
    }

    Ok(graph)
}

/// Load a signature document and attach its records to `graph`'s nodes.
pub fn load_signatures(path: &Path, graph: &Graph) -> Result<SignatureSource> {
    let json_str = read(path)?;
    let source = parse_signatures(&json_str, &path.display().to_string(), graph)?;
    tracing::debug!(
        "Signatures loaded from {}: {} records",
        path.display(),
        source.len()
    );
    Ok(source)
}

/// Build a signature source from document text.
pub fn parse_signatures(json_str: &str, origin: &str, graph: &Graph) -> Result<SignatureSource> {
    let doc: HashMap<String, SignatureRecord> =
        serde_json::from_str(json_str).map_err(|source| GraphError::Parse {
            origin: origin.to_string(),
            source,
        })?;

    let mut signatures = SignatureSource::new();
    for (key, record) in doc {
        match graph.find_node_by_key(&key) {
            Some(node) => signatures.insert(node, record),
            None => tracing::debug!("Signature record for unknown node {} ignored", key),
        }
    }
    Ok(signatures)
}

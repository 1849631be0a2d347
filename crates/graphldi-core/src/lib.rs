//! graphldi core — attributed dependency graph model, named views and loaders

pub mod error;
pub mod graph;
pub mod loader;
pub mod model;
pub mod schema;
pub mod signatures;


#[cfg(test)]
pub mod test_utils;

pub use error::{GraphError, Result};
pub use graph::{Graph, View};
pub use loader::{load_graph, load_signatures, parse_graph, parse_signatures};
pub use model::{
    AttrValue, Attributes, EdgeId, EdgeKind, GraphEdge, GraphNode, NodeId, NodeKind, SOURCE_FILE,
    SOURCE_LINE, SOURCE_NAME, SOURCE_PATH,
};
pub use schema::TypeSchema;
pub use signatures::{LogicalName, PhysicalRecord, Signature, SignatureRecord, SignatureSource};

//! Test utilities for graphldi-core

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small C++ project: a directory holding a header and its source file,
/// a namespace with two classes and a method, and the relations between them.
pub const SAMPLE_GRAPH: &str = r#"{
    "nodes": [
        { "id": "dir",    "type": "Directory", "views": ["Module Hierarchy"], "attributes": { "Source.Name": "src" } },
        { "id": "hdr",    "type": "File",      "views": ["Code Facts"], "attributes": { "Source.Name": "shape.h", "Source.File": "shape.h", "Source.Path": "src" } },
        { "id": "impl",   "type": "File",      "views": ["Code Facts"], "attributes": { "Source.Name": "shape.cpp", "Source.File": "shape.cpp", "Source.Path": "src" } },
        { "id": "ns",     "type": "Namespace", "views": ["Code Facts"], "attributes": { "Source.Name": "geo" } },
        { "id": "shape",  "type": "Class",     "views": ["Code Facts"], "attributes": { "Source.Name": "Shape", "Source.File": "shape.h" } },
        { "id": "circle", "type": "Class",     "views": ["Code Facts"], "attributes": { "Source.Name": "Circle", "Source.File": "shape.h" } },
        { "id": "area",   "type": "Method",    "views": ["Code Facts"], "attributes": { "Source.Name": "area", "Source.File": "shape.cpp" } }
    ],
    "edges": [
        { "source": "hdr",    "target": "dir",   "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "impl",   "target": "dir",   "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "shape",  "target": "ns",    "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "circle", "target": "ns",    "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "area",   "target": "circle", "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "circle", "target": "shape", "type": "Inherit", "views": ["Code Facts"], "attributes": { "Source.File": "shape.h", "Source.Path": "src", "Source.Line": 7 } },
        { "source": "area",   "target": "shape", "type": "Member_Use", "views": ["Code Facts"] },
        { "source": "area",   "target": "circle", "type": "Belongs_To", "views": ["Code Facts"] }
    ]
}"#;

/// Create a temporary directory holding the given documents.
pub fn create_documents(documents: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    for (name, content) in documents {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }

    temp_dir
}

/// Write [`SAMPLE_GRAPH`] to a temporary directory and return its path.
pub fn create_sample_graph() -> (TempDir, PathBuf) {
    let temp_dir = create_documents(&[("graph.json", SAMPLE_GRAPH)]);
    let path = temp_dir.path().join("graph.json");
    (temp_dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sample_graph() {
        let (_dir, path) = create_sample_graph();
        assert!(path.exists());
        assert!(fs::read_to_string(&path).unwrap().contains("Code Facts"));
    }
}

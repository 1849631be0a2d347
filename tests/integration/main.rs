//! Integration tests for graphldi
//!
//! These tests load graph documents from disk and run whole exports, both
//! through the library and through the `graphldi` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use graphldi_export::{ExportConfig, Exporter, KindFilter};
use tempfile::TempDir;

const GRAPH: &str = r#"{
    "views": ["Module Hierarchy"],
    "nodes": [
        { "id": "a",     "type": "Namespace", "views": ["Module Hierarchy"], "attributes": { "Source.Name": "A" } },
        { "id": "b",     "type": "Namespace", "views": ["Module Hierarchy"], "attributes": { "Source.Name": "B" } },
        { "id": "leaf",  "type": "Class",     "views": ["Code Facts"], "attributes": { "Source.Name": "leaf", "Source.File": "leaf.h", "Source.Path": "inc" } },
        { "id": "run",   "type": "Method",    "views": ["Code Facts"], "attributes": { "Source.Name": "run" } },
        { "id": "foo_h", "type": "File",      "views": ["Code Facts"], "attributes": { "Source.Name": "foo.h" } },
        { "id": "foo_c", "type": "File",      "views": ["Code Facts"], "attributes": { "Source.Name": "foo.cpp" } },
        { "id": "bar_h", "type": "File",      "views": ["Code Facts"], "attributes": { "Source.Name": "bar.h" } },
        { "id": "amp",   "type": "Variable",  "views": ["Code Facts"], "attributes": { "Source.Name": "a & <b" } }
    ],
    "edges": [
        { "source": "b",     "target": "a",     "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "leaf",  "target": "b",     "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "run",   "target": "leaf",  "type": "Enclosing", "views": ["Module Hierarchy"] },
        { "source": "run",   "target": "leaf",  "type": "Belongs_To", "views": ["Code Facts"] },
        { "source": "run",   "target": "amp",   "type": "Variable_Use", "views": ["Code Facts"], "attributes": { "Source.Line": 12, "Source.File": "leaf.cpp" } },
        { "source": "foo_h", "target": "foo_c", "type": "Inherit", "views": ["Code Facts"] },
        { "source": "foo_h", "target": "bar_h", "type": "Inherit", "views": ["Code Facts"] },
        { "source": "foo_h", "target": "bar_h", "type": "Declare", "views": ["Code Facts"] },
        { "source": "foo_h", "target": "bar_h", "type": "Dispatching_Call", "views": ["Code Facts"] }
    ]
}"#;

const SIGNATURES: &str = r#"{
    "run": { "Logical": { "Full_Name": "routine run(int)->bool", "Name": "run" } }
}"#;

fn workspace(documents: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in documents {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn graphldi(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphldi"))
        .args(args)
        .output()
        .expect("failed to run graphldi")
}

fn export_with(dir: &TempDir, config: ExportConfig, signatures: bool) -> String {
    let graph = graphldi_core::load_graph(&dir.path().join("graph.json")).unwrap();
    let source = signatures
        .then(|| graphldi_core::load_signatures(&dir.path().join("sigs.json"), &graph).unwrap());
    let mut exporter = Exporter::new(&graph, config);
    if let Some(source) = &source {
        exporter = exporter.with_signatures(source);
    }
    let out = dir.path().join("out.ldi");
    exporter
        .export_to_path("Code Facts", "Module Hierarchy", &out)
        .unwrap();
    fs::read_to_string(out).unwrap()
}

#[test]
fn test_single_header_document() {
    let dir = workspace(&[(
        "graph.json",
        r#"{
            "views": ["Module Hierarchy"],
            "nodes": [ { "id": "a", "type": "File", "views": ["Code Facts"], "attributes": { "Source.Name": "a.h" } } ]
        }"#,
    )]);
    let out = export_with(&dir, ExportConfig::default(), false);
    assert_eq!(
        out,
        "<?xml version=\"1.0\" ?>\n\
         <ldi delimiter=\"@\">\n\
         \x20   <element\n\
         \x20       name=\"a.h\"\n\
         \x20       type=\"Header_File\"\n\
         \x20   >\n\
         \x20   </element>\n\
         </ldi>\n"
    );
}

#[test]
fn test_hierarchy_qualifies_names() {
    let dir = workspace(&[("graph.json", GRAPH)]);
    let out = export_with(&dir, ExportConfig::default(), false);

    assert!(out.contains("name=\"A@B@leaf\""));
    assert!(out.contains("<property name=\"sourcefile\">inc/leaf.h</property>"));
    assert!(out.contains("name=\"A@B@leaf@run\""));
    // Belongs_To is containment and never becomes a dependency
    assert!(!out.contains("provider=\"A@B@leaf\""));
}

#[test]
fn test_escaping_and_edge_locations() {
    let dir = workspace(&[("graph.json", GRAPH)]);
    let out = export_with(&dir, ExportConfig::default(), false);

    assert!(out.contains("name=\"a &amp; &lt;b\""));
    assert!(!out.contains("&amp;amp;"));
    assert!(out.contains(
        "            provider=\"a &amp; &lt;b\"\n            kind=\"Variable.Use\"\n        >\n            <property name=\"linenumber\">12</property>\n            <property name=\"sourcefile\">leaf.cpp</property>\n"
    ));
}

#[test]
fn test_edge_kinds_and_header_to_source_suppression() {
    let dir = workspace(&[("graph.json", GRAPH)]);
    let out = export_with(&dir, ExportConfig::default(), false);

    assert!(out.contains("type=\"Header_File\""));
    assert!(out.contains("name=\"foo.cpp\"\n        type=\"Source_File\""));
    assert!(!out.contains("provider=\"foo.cpp\""));
    assert!(out.contains("provider=\"bar.h\"\n            kind=\"Type.Inherit\""));
    assert!(out.contains("provider=\"bar.h\"\n            kind=\"Invokes.Virtual\""));
    assert!(!out.contains("Declare"));
}

#[test]
fn test_signatures_name_methods() {
    let dir = workspace(&[("graph.json", GRAPH), ("sigs.json", SIGNATURES)]);
    let out = export_with(&dir, ExportConfig::default(), true);
    assert!(out.contains("name=\"A@B@leaf@bool run(int)\""));

    let without = export_with(&dir, ExportConfig::default(), false);
    assert!(without.contains("name=\"A@B@leaf@run\""));
}

#[test]
fn test_kind_filter_and_delimiter() {
    let dir = workspace(&[("graph.json", GRAPH)]);
    let config = ExportConfig {
        delimiter: '/',
        filter: Some(KindFilter::include(["Class"])),
    };
    let out = export_with(&dir, config, false);

    assert!(out.starts_with("<?xml version=\"1.0\" ?>\n<ldi delimiter=\"/\">\n"));
    assert_eq!(out.matches("<element").count(), 1);
    assert!(out.contains("name=\"A/B/leaf\""));
}

#[test]
fn test_cli_export() {
    let dir = workspace(&[("graph.json", GRAPH), ("sigs.json", SIGNATURES)]);
    let out = dir.path().join("out.ldi");
    let graph = dir.path().join("graph.json");
    let sigs = dir.path().join("sigs.json");

    let output = Command::new(env!("CARGO_BIN_EXE_graphldi"))
        .arg(&graph)
        .arg("-i")
        .arg(&sigs)
        .args(["Code Facts", "Module Hierarchy"])
        .arg(&out)
        .output()
        .expect("failed to run graphldi");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let document = fs::read_to_string(&out).unwrap();
    assert!(document.ends_with("</ldi>\n"));
    assert!(document.contains("name=\"A@B@leaf@bool run(int)\""));
}

#[test]
fn test_cli_config_file_and_overrides() {
    let dir = workspace(&[
        ("graph.json", GRAPH),
        ("graphldi.toml", "delimiter = \"/\"\n\n[filter]\nmode = \"include\"\nkinds = [\"File\"]\n"),
    ]);
    let out = dir.path().join("out.ldi");

    let output = Command::new(env!("CARGO_BIN_EXE_graphldi"))
        .arg(dir.path().join("graph.json"))
        .args(["Code Facts", "Module Hierarchy"])
        .arg(&out)
        .arg("--config")
        .arg(dir.path().join("graphldi.toml"))
        .args(["--delimiter", ":", "--exclude-kind", "File"])
        .output()
        .expect("failed to run graphldi");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let document = fs::read_to_string(&out).unwrap();
    assert!(document.contains("<ldi delimiter=\":\">"));
    assert!(document.contains("name=\"A:B:leaf\""));
    assert!(!document.contains("Header_File"));
}

#[test]
fn test_cli_unknown_view_writes_nothing() {
    let dir = workspace(&[("graph.json", GRAPH)]);
    let out = dir.path().join("out.ldi");

    let output = Command::new(env!("CARGO_BIN_EXE_graphldi"))
        .arg(dir.path().join("graph.json"))
        .args(["No Such View", "Module Hierarchy"])
        .arg(&out)
        .output()
        .expect("failed to run graphldi");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Such View"));
    assert!(!out.exists());
    let leftovers: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(leftovers, vec![dir.path().join("graph.json")]);
}

#[test]
fn test_cli_missing_arguments() {
    let dir = workspace(&[("graph.json", GRAPH)]);
    let output = graphldi(&[&dir.path().join("graph.json")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

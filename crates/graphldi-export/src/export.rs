//! Export driver: walks the export view and streams the document

use std::io::{BufWriter, Write};
use std::path::Path;

use graphldi_core::{Graph, SignatureSource, View};

use crate::classify::{EdgeClassifier, NodeFilter, is_header_to_source};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::names::NameResolver;
use crate::writer::{DocumentWriter, Location};

/// Counts for one finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Element blocks written.
    pub elements: usize,
    /// Dependency records written.
    pub dependencies: usize,
    /// Export-view nodes not written as elements.
    pub skipped_nodes: usize,
    /// Outgoing edges of written elements that were dropped.
    pub skipped_edges: usize,
}

/// Exports views of one graph. Each call to [`Exporter::export`] is an
/// independent run with its own name cache.
pub struct Exporter<'g> {
    graph: &'g Graph,
    signatures: Option<&'g SignatureSource>,
    config: ExportConfig,
}

impl<'g> Exporter<'g> {
    pub fn new(graph: &'g Graph, config: ExportConfig) -> Self {
        Exporter {
            graph,
            signatures: None,
            config,
        }
    }

    /// Attach the secondary source used to name routines and methods.
    pub fn with_signatures(mut self, signatures: &'g SignatureSource) -> Self {
        self.signatures = Some(signatures);
        self
    }

    fn resolve_view(&self, name: &str) -> Result<View<'g>> {
        self.graph
            .view(name)
            .map_err(|_| ExportError::ViewNotFound(name.to_string()))
    }

    /// Write the document for `export_view`, qualifying names through
    /// `hierarchy_view`. Both views are resolved before anything is written.
    pub fn export<W: Write>(
        &self,
        export_view: &str,
        hierarchy_view: &str,
        out: W,
    ) -> Result<ExportStats> {
        let view = self.resolve_view(export_view)?;
        let hierarchy = self.resolve_view(hierarchy_view)?;

        let mut names =
            NameResolver::new(self.graph, hierarchy, self.signatures, self.config.delimiter);
        let edges = EdgeClassifier::new(self.graph.schema());
        let filter = NodeFilter::new(self.config.filter.clone());
        let mut doc = DocumentWriter::begin(out, self.config.delimiter)?;
        let mut stats = ExportStats::default();

        for node_id in view.nodes() {
            let Some(node) = self.graph.node(node_id) else {
                continue;
            };
            // resolved even when skipped, so providers find it cached
            let name = names.resolve(node_id);
            let Some(element_kind) = filter.classify(&node.kind, &name) else {
                tracing::trace!("Skipping {} ({})", name, node.kind);
                stats.skipped_nodes += 1;
                continue;
            };

            doc.start_element(&name, element_kind, &Location::of_node(&node.attributes))?;
            for (_, edge) in view.outgoing(node_id) {
                let Some(kind) = edges.classify(&edge.kind) else {
                    stats.skipped_edges += 1;
                    continue;
                };
                let provider = names.resolve(edge.target);
                if is_header_to_source(&edge.kind, &name, &provider) {
                    tracing::debug!("Dropping {} from {} to {}", edge.kind, name, provider);
                    stats.skipped_edges += 1;
                    continue;
                }
                doc.write_uses(&provider, kind, &Location::of_edge(&edge.attributes))?;
                stats.dependencies += 1;
            }
            doc.end_element()?;
            stats.elements += 1;
        }
        doc.finish()?;

        tracing::info!(
            "Exported view {}: {} elements, {} dependencies ({} nodes and {} edges skipped, {} names resolved)",
            view.name(),
            stats.elements,
            stats.dependencies,
            stats.skipped_nodes,
            stats.skipped_edges,
            names.cached()
        );
        Ok(stats)
    }

    /// Export into the file at `path`. The document is written to a
    /// temporary file beside it and moved into place only when complete;
    /// on error the destination is left untouched.
    pub fn export_to_path(
        &self,
        export_view: &str,
        hierarchy_view: &str,
        path: &Path,
    ) -> Result<ExportStats> {
        self.resolve_view(export_view)?;
        self.resolve_view(hierarchy_view)?;

        let output_error = |source| ExportError::Output {
            path: path.to_path_buf(),
            source,
        };
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(output_error)?;

        let stats = self.export(
            export_view,
            hierarchy_view,
            BufWriter::new(staged.as_file_mut()),
        )?;
        staged.persist(path).map_err(|e| output_error(e.error))?;

        tracing::info!("Document written to {}", path.display());
        Ok(stats)
    }
}

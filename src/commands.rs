//! CLI command implementations

use anyhow::Context;
use graphldi_export::{ExportConfig, Exporter, KindFilter};
use std::path::PathBuf;

/// Positional layout: `<graph> [-i <signatures>] <export-view> <hierarchy-view> <output>`.
#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Graph document (JSON)
    pub graph: PathBuf,

    /// View whose nodes and edges are exported
    pub export_view: String,

    /// View whose containment edges qualify names
    pub hierarchy_view: String,

    /// Document to write
    pub output: PathBuf,

    /// Signature document naming routines and methods
    #[arg(short = 'i', long = "signatures", value_name = "FILE")]
    pub signatures: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Hierarchy delimiter (overrides the configuration)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Only export nodes of this kind (repeatable)
    #[arg(long = "include-kind", value_name = "KIND", conflicts_with = "exclude_kinds")]
    pub include_kinds: Vec<String>,

    /// Never export nodes of this kind (repeatable)
    #[arg(long = "exclude-kind", value_name = "KIND")]
    pub exclude_kinds: Vec<String>,
}

/// Defaults, then the configuration file, then command-line flags.
fn build_config(args: &ExportArgs) -> anyhow::Result<ExportConfig> {
    let mut config = match &args.config {
        Some(path) => ExportConfig::load(path)?,
        None => ExportConfig::default(),
    };
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    if !args.include_kinds.is_empty() {
        config.filter = Some(KindFilter::include(args.include_kinds.iter().cloned()));
    } else if !args.exclude_kinds.is_empty() {
        config.filter = Some(KindFilter::exclude(args.exclude_kinds.iter().cloned()));
    }
    Ok(config)
}

pub fn export(args: &ExportArgs) -> anyhow::Result<()> {
    tracing::info!("Graph: {}", args.graph.display());
    if let Some(signatures) = &args.signatures {
        tracing::info!("Signatures: {}", signatures.display());
    }
    tracing::info!(
        "Views: export {:?}, hierarchy {:?}",
        args.export_view,
        args.hierarchy_view
    );
    tracing::info!("Output: {}", args.output.display());

    let config = build_config(args)?;
    let graph = graphldi_core::load_graph(&args.graph)?;
    tracing::info!(
        "Loaded {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let signatures = args
        .signatures
        .as_deref()
        .map(|path| graphldi_core::load_signatures(path, &graph))
        .transpose()?;

    let mut exporter = Exporter::new(&graph, config);
    if let Some(signatures) = &signatures {
        exporter = exporter.with_signatures(signatures);
    }
    exporter
        .export_to_path(&args.export_view, &args.hierarchy_view, &args.output)
        .with_context(|| format!("export to {} failed", args.output.display()))?;

    Ok(())
}

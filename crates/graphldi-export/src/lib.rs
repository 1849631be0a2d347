//! graphldi export — turns a view of the dependency graph into an LDI
//! interchange document
//!
//! ```text
//! Graph ──> Exporter (one pass over the export view)
//!             ├─ NodeFilter        element type, or skip
//!             ├─ NameResolver      qualified, escaped, memoized names
//!             ├─ EdgeClassifier    document relation kind, or skip
//!             ├─ header→source     drop Inherit/Override back into sources
//!             └─ DocumentWriter    streamed tags
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod names;
pub mod writer;

pub use classify::{EdgeClassifier, NodeFilter, canonical_kind, is_header_to_source};
pub use config::{ExportConfig, FilterMode, KindFilter};
pub use error::{ExportError, Result};
pub use export::{ExportStats, Exporter};
pub use names::{NameResolver, UNKNOWN_NAME, escape, format_signature, strip_module_tags};
pub use writer::{DocumentWriter, Location};

//! Output formats for parsed trees
//!
//! - treeviz: one line per syntax tree node, for reading
//! - json, yaml: the serializable syntax tree snapshot
//! - document: the document model as JSON

pub mod registry;
pub mod serialized;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{DocumentFormatter, JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_options, TreevizFormatter, TreevizOptions};

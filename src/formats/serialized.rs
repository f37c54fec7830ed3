//! Serde-backed formats
//!
//! `json` and `yaml` dump the [`AstSnapshot`](crate::ast::AstSnapshot) of the syntax tree.
//! `document` dumps the [`Document`](crate::document::Document) built from it as JSON.

use super::registry::{FormatError, Formatter};
use crate::ast::{snapshot_from_element, Element};
use crate::document::{build_with, BuildOptions};

fn serialization_error(error: impl std::fmt::Display) -> FormatError {
    FormatError::SerializationError(error.to_string())
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, root: &Element, _source: &str) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&snapshot_from_element(root)).map_err(serialization_error)
    }

    fn description(&self) -> &str {
        "Syntax tree snapshot as JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, root: &Element, _source: &str) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_from_element(root)).map_err(serialization_error)
    }

    fn description(&self) -> &str {
        "Syntax tree snapshot as YAML"
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFormatter {
    pub options: BuildOptions,
}

impl DocumentFormatter {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }
}

impl Formatter for DocumentFormatter {
    fn name(&self) -> &str {
        "document"
    }

    fn serialize(&self, root: &Element, _source: &str) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&build_with(root, &self.options)).map_err(serialization_error)
    }

    fn description(&self) -> &str {
        "Document model (names, ids, classes, attributes, text) as JSON"
    }
}

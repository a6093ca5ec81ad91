use super::conversion::{IntoForm, RawForm};
use super::definition::{FormField, FormModel};
use super::logic::LogicRule;
use crate::compiler::Diagnostic;
use crate::error::{ArtifactError, ImportError};
use ahash::AHashMap;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;

/// A validated, normalized snapshot of a form's fields and rules.
///
/// Produced by the compiler and consumed by the evaluator. Can be stored in
/// a compact binary form and loaded again without recompiling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompiledLogic {
    pub fields: Vec<FormField>,
    pub rules: Vec<LogicRule>,
    pub field_index: AHashMap<String, usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledLogic {
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.field_index.get(id).and_then(|&i| self.fields.get(i))
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.field_index.contains_key(id)
    }

    /// Saves the compiled logic to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard()).map_err(|e| ArtifactError::Serialization(e.to_string()))
    }

    /// Loads compiled logic from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let bytes = fs::read(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes compiled logic from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(logic, _)| logic) // bincode 2 returns (data, bytes_read)
            .map_err(|e| ArtifactError::Deserialization(e.to_string()))
    }
}

/// The JSON document written when a form is exported as a template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormExport {
    pub name: String,
    pub description: String,
    pub fields: Vec<FormField>,
    pub logic: Vec<LogicRule>,
    pub settings: serde_json::Value,
    pub is_template: bool,
    pub exported_at: Option<String>,
    pub export_version: String,
}

impl FormExport {
    pub const VERSION: &'static str = "1.0";

    /// Builds an export document. Owner, sharing and id are left out.
    pub fn from_form(form: &FormModel, exported_at: Option<String>) -> Self {
        Self {
            name: form.name.clone(),
            description: form.description.clone(),
            fields: form.fields.clone(),
            logic: form.logic.clone(),
            settings: form.settings.clone(),
            is_template: true,
            exported_at,
            export_version: Self::VERSION.to_string(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ArtifactError> {
        serde_json::to_string_pretty(self).map_err(|e| ArtifactError::Serialization(e.to_string()))
    }

    /// Imports an exported document (or a bare form document) into a `FormModel`.
    ///
    /// Documents from a different major export version are rejected.
    pub fn import(json: &str) -> Result<FormModel, ImportError> {
        let document: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ImportError::JsonParseError(e.to_string()))?;

        if let Some(version) = document.get("exportVersion") {
            let version = version
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| version.to_string());
            let major = version.split('.').next().unwrap_or_default();
            if major != "1" {
                return Err(ImportError::UnsupportedVersion(version));
            }
        }

        let raw: RawForm = serde_json::from_value(document)
            .map_err(|e| ImportError::JsonParseError(e.to_string()))?;
        raw.into_form()
    }
}

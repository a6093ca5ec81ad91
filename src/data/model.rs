use crate::ast::{Answers, Value};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;

/// An answer snapshot as stored on disk: field id to JSON value, plus the
/// fields the user has edited.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SampleAnswers {
    pub values: Answers,
    #[serde(default)]
    pub touched: Vec<String>,
}

impl SampleAnswers {
    /// Load sample answers from a JSON file.
    ///
    /// Accepts either `{ "values": {...}, "touched": [...] }` or a bare
    /// `{ fieldId: value }` object.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// A document is read as the wrapped shape only when it has a `values`
    /// object and no keys besides `values` and `touched`; anything else is a
    /// bare answer map, so a field with the id `values` still loads.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        if let Ok(wrapped) = serde_json::from_value::<SampleAnswers>(document.clone()) {
            return Ok(wrapped);
        }
        let values: Answers = serde_json::from_value(document)?;
        Ok(Self {
            values,
            touched: Vec::new(),
        })
    }

    pub fn values(&self) -> &Answers {
        &self.values
    }

    pub fn touched(&self) -> AHashSet<String> {
        self.touched.iter().cloned().collect()
    }

    pub fn insert(&mut self, field_id: &str, value: impl Into<Value>) {
        self.values.insert(field_id.to_string(), value.into());
    }
}

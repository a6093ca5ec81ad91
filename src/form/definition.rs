use super::logic::LogicRule;
use crate::ast::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of control a field renders as.
///
/// Kinds the engine does not know are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Email,
    Phone,
    Checkbox,
    Radio,
    Select,
    Date,
    Time,
    File,
    Signature,
    Heading,
    Divider,
    Image,
    PageBreak,
    MultipleChoice,
    PictureChoice,
    Rating,
    OpinionScale,
    YesNo,
    DateRange,
    PhoneNumber,
    InputTable,
    Payment,
    Group,
    ShortText,
    LongText,
    FullName,
    Statement,
    Custom(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Select => "select",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::File => "file",
            FieldKind::Signature => "signature",
            FieldKind::Heading => "heading",
            FieldKind::Divider => "divider",
            FieldKind::Image => "image",
            FieldKind::PageBreak => "page_break",
            FieldKind::MultipleChoice => "multiple_choice",
            FieldKind::PictureChoice => "picture_choice",
            FieldKind::Rating => "rating",
            FieldKind::OpinionScale => "opinion_scale",
            FieldKind::YesNo => "yes_no",
            FieldKind::DateRange => "date_range",
            FieldKind::PhoneNumber => "phone_number",
            FieldKind::InputTable => "input_table",
            FieldKind::Payment => "payment",
            FieldKind::Group => "group",
            FieldKind::ShortText => "short_text",
            FieldKind::LongText => "long_text",
            FieldKind::FullName => "full_name",
            FieldKind::Statement => "statement",
            FieldKind::Custom(name) => name,
        }
    }

    /// Display-only kinds never collect an answer.
    pub fn collects_input(&self) -> bool {
        !matches!(
            self,
            FieldKind::Heading
                | FieldKind::Divider
                | FieldKind::Image
                | FieldKind::PageBreak
                | FieldKind::Statement
        )
    }

    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldKind::Checkbox
                | FieldKind::Radio
                | FieldKind::Select
                | FieldKind::MultipleChoice
                | FieldKind::PictureChoice
                | FieldKind::YesNo
        )
    }

    /// Kinds whose answers must be numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Number | FieldKind::Rating | FieldKind::OpinionScale
        )
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "text" => FieldKind::Text,
            "textarea" => FieldKind::Textarea,
            "number" => FieldKind::Number,
            "email" => FieldKind::Email,
            "phone" => FieldKind::Phone,
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "select" => FieldKind::Select,
            "date" => FieldKind::Date,
            "time" => FieldKind::Time,
            "file" => FieldKind::File,
            "signature" => FieldKind::Signature,
            "heading" => FieldKind::Heading,
            "divider" => FieldKind::Divider,
            "image" => FieldKind::Image,
            "page_break" => FieldKind::PageBreak,
            "multiple_choice" => FieldKind::MultipleChoice,
            "picture_choice" => FieldKind::PictureChoice,
            "rating" => FieldKind::Rating,
            "opinion_scale" => FieldKind::OpinionScale,
            "yes_no" => FieldKind::YesNo,
            "date_range" => FieldKind::DateRange,
            "phone_number" => FieldKind::PhoneNumber,
            "input_table" => FieldKind::InputTable,
            "payment" => FieldKind::Payment,
            "group" => FieldKind::Group,
            "short_text" => FieldKind::ShortText,
            "long_text" => FieldKind::LongText,
            "full_name" => FieldKind::FullName,
            "statement" => FieldKind::Statement,
            _ => FieldKind::Custom(name),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length, range and pattern limits checked at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldValidation {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// A regex the whole text answer must match.
    pub pattern: Option<String>,
}

/// A single field of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub validations: FieldValidation,
}

impl FormField {
    pub fn new(id: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            required: false,
            options: Vec::new(),
            default_value: None,
            placeholder: None,
            validations: FieldValidation::default(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A form: its fields, its logic rules and opaque settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub logic: Vec<LogicRule>,
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl FormModel {
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Zero-based page index of a field. Pages are delimited by `page_break` fields.
    pub fn page_of(&self, field_id: &str) -> Option<usize> {
        page_of(&self.fields, field_id)
    }
}

pub(crate) fn page_of(fields: &[FormField], field_id: &str) -> Option<usize> {
    let mut page = 0;
    for field in fields {
        if field.id == field_id {
            return Some(page);
        }
        if field.kind == FieldKind::PageBreak {
            page += 1;
        }
    }
    None
}

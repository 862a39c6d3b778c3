//! Purpose: Hold the ordered catalog of question types offered by form editors.
//! Exports: `QuestionType`, `QuestionTypes`, `DEFAULT_QUESTION_TYPE`.
//! Role: Configuration collaborator for editors; the codec treats types as opaque.
//! Invariants: Catalog order is presentation order and is preserved on load.
//! Invariants: Decode/encode never consult this catalog.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};
pub use crate::core::model::DEFAULT_QUESTION_TYPE;

const CHOICE_TYPES: [&str; 3] = ["radio", "checkbox", "select"];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuestionType {
    pub value: String,
    pub label: String,
}

impl QuestionType {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Whether editors should offer an option list for this type.
    pub fn uses_options(&self) -> bool {
        uses_options(&self.value)
    }
}

pub fn uses_options(value: &str) -> bool {
    CHOICE_TYPES.contains(&value)
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionTypes {
    types: Vec<QuestionType>,
}

impl QuestionTypes {
    pub fn new(types: Vec<QuestionType>) -> Self {
        Self { types }
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let types: Vec<QuestionType> = serde_json::from_str(raw).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("question types must be a JSON array of {value, label}")
                .with_source(err)
        })?;
        if types.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("question type list is empty"));
        }
        Ok(Self::new(types))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            let kind = if err.kind() == std::io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message(format!("failed to read question types from {}", path.display()))
                .with_source(err)
        })?;
        Self::from_json(&raw)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionType> {
        self.types.iter()
    }

    pub fn get(&self, value: &str) -> Option<&QuestionType> {
        self.types.iter().find(|t| t.value == value)
    }

    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.get(value).map(|t| t.label.as_str()).unwrap_or(value)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for QuestionTypes {
    fn default() -> Self {
        Self::new(vec![
            QuestionType::new("text", "Short answer"),
            QuestionType::new("textarea", "Paragraph"),
            QuestionType::new("number", "Number"),
            QuestionType::new("date", "Date"),
            QuestionType::new("radio", "Multiple choice"),
            QuestionType::new("checkbox", "Checkboxes"),
            QuestionType::new("select", "Dropdown"),
            QuestionType::new("file", "File upload"),
        ])
    }
}

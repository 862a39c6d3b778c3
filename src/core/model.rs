// Editable form document tree: sections own questions, questions own options.
// Equality is structural and ignores ids; ids are regenerated on every decode.
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};
use crate::core::id::Id;

pub const DEFAULT_QUESTION_TYPE: &str = "text";
pub const FALLBACK_SECTION_TITLE: &str = "Error parsing sections";
pub const SKELETON_SECTION_TITLE: &str = "Section 1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(default = "Id::generate")]
    pub id: Id,
    pub value: String,
    pub label: String,
}

impl QuestionOption {
    /// Option whose label mirrors its value, as in the flat encoding.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            id: Id::generate(),
            label: value.clone(),
            value,
        }
    }
}

impl PartialEq for QuestionOption {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.label == other.label
    }
}

impl Eq for QuestionOption {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    #[serde(default = "Id::generate")]
    pub id: Id,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub required: bool,
}

impl Question {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            text: text.into(),
            kind: kind.into(),
            options: Vec::new(),
            required: false,
        }
    }

    pub fn blank() -> Self {
        Self::new("", DEFAULT_QUESTION_TYPE)
    }

    pub fn with_options<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = values.into_iter().map(QuestionOption::new).collect();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.value.as_str()).collect()
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.kind == other.kind
            && self.options == other.options
            && self.required == other.required
    }
}

impl Eq for Question {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    #[serde(default = "Id::generate")]
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            title: title.into(),
            description: String::new(),
            questions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn add_question(&mut self, question: Question) -> &mut Question {
        self.questions.push(question);
        let last = self.questions.len() - 1;
        &mut self.questions[last]
    }

    pub fn remove_question(&mut self, id: &Id) -> Option<Question> {
        let index = self.questions.iter().position(|q| &q.id == id)?;
        Some(self.questions.remove(index))
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.questions == other.questions
    }
}

impl Eq for Section {}

/// An ordered list of sections describing one form.
///
/// Decoding may yield zero sections for a degenerate `[]` input; editing
/// helpers never remove the last remaining section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Starting point for a brand new form.
    pub fn skeleton() -> Self {
        Self::new(vec![
            Section::new(SKELETON_SECTION_TITLE).with_question(Question::blank()),
        ])
    }

    /// Returned by the decoder when stored sections cannot be read.
    pub fn fallback() -> Self {
        Self::new(vec![
            Section::new(FALLBACK_SECTION_TITLE).with_question(Question::blank()),
        ])
    }

    pub fn add_section(&mut self, section: Section) -> &mut Section {
        self.sections.push(section);
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn remove_section(&mut self, id: &Id) -> Result<Section, Error> {
        let index = self
            .sections
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| {
                Error::new(ErrorKind::NotFound).with_message(format!("no section with id {id}"))
            })?;
        if self.sections.len() == 1 {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("cannot remove the last section")
                .with_hint("Add another section first, or edit this one instead."));
        }
        Ok(self.sections.remove(index))
    }

    pub fn section_mut(&mut self, id: &Id) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_ids() {
        let a = Section::new("A").with_question(Question::new("Name", "text"));
        let b = Section::new("A").with_question(Question::new("Name", "text"));
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
        assert_ne!(a.questions[0].id, b.questions[0].id);
    }

    #[test]
    fn equality_sees_content_changes() {
        let a = Question::new("Pick", "radio").with_options(["YES", "NO"]);
        let b = Question::new("Pick", "radio").with_options(["NO", "YES"]);
        assert_ne!(a, b);
        assert_ne!(a.clone(), a.clone().with_required(true));
    }

    #[test]
    fn fallback_has_one_blank_question() {
        let doc = Document::fallback();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, FALLBACK_SECTION_TITLE);
        let question = &doc.sections[0].questions[0];
        assert_eq!(doc.question_count(), 1);
        assert_eq!(question.text, "");
        assert_eq!(question.kind, DEFAULT_QUESTION_TYPE);
        assert!(question.options.is_empty());
        assert!(!question.required);
        assert_ne!(doc, Document::skeleton());
    }

    #[test]
    fn last_section_cannot_be_removed() {
        let mut doc = Document::skeleton();
        let only = doc.sections[0].id.clone();
        let err = doc.remove_section(&only).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let second = doc.add_section(Section::new("Second")).id.clone();
        let removed = doc.remove_section(&only).expect("remove first");
        assert_eq!(removed.title, SKELETON_SECTION_TITLE);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].id, second);

        let missing = doc.remove_section(&Id::generate()).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn questions_can_be_added_and_removed() {
        let mut doc = Document::skeleton();
        let section_id = doc.sections[0].id.clone();
        let section = doc.section_mut(&section_id).expect("section");
        let added = section
            .add_question(Question::new("Colour", "select").with_options(["Red", "Blue"]))
            .id
            .clone();
        assert_eq!(doc.question_count(), 2);

        let section = doc.section_mut(&section_id).expect("section");
        let removed = section.remove_question(&added).expect("removed");
        assert_eq!(removed.option_values(), vec!["Red", "Blue"]);
        assert!(section.remove_question(&added).is_none());
    }

    #[test]
    fn editor_json_fills_missing_ids_and_defaults() {
        let doc: Document = serde_json::from_str(
            r#"{"sections":[{"title":"A","questions":[{"text":"Q","type":"radio","options":[{"value":"Y","label":"Y"}]}]}]}"#,
        )
        .expect("editor json");
        let section = &doc.sections[0];
        assert_eq!(section.description, "");
        assert_eq!(section.id.as_str().len(), 16);
        let question = &section.questions[0];
        assert!(!question.required);
        assert_eq!(question.options[0], QuestionOption::new("Y"));

        let value = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(value["sections"][0]["questions"][0]["type"], "radio");
        assert!(value["sections"][0]["id"].is_string());
    }
}

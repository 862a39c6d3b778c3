// Stored section string to editable document.
// Parses as JSON first, then retries with normalized quotes; any failure
// past that point is recovered with `Document::fallback()` by `decode`.
use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::fields::{field, flag_field, text_field, type_name};
use crate::core::model::{DEFAULT_QUESTION_TYPE, Document, Question, Section};
use crate::core::normalize::normalize_quotes;
use crate::core::options::decode_option_value;
use crate::core::report::{DecodeFailure, FailureReporter, TracingReporter};

/// Never fails; failures are logged and the fallback document is returned.
pub fn decode(raw: &str) -> Document {
    decode_with(raw, &TracingReporter)
}

pub fn decode_with(raw: &str, reporter: &dyn FailureReporter) -> Document {
    match try_decode(raw) {
        Ok(document) => document,
        Err(err) => {
            reporter.report(&DecodeFailure::from_error(&err, raw.len()));
            Document::fallback()
        }
    }
}

pub fn try_decode(raw: &str) -> Result<Document, Error> {
    if raw.trim().is_empty() {
        return Err(Error::new(ErrorKind::Malformed).with_message("sections input is empty"));
    }
    let value = parse_sections(raw)?;
    decode_value(&value)
}

/// Decodes an already parsed value. A JSON string holding the encoded
/// sections is unwrapped once.
pub fn decode_value(value: &Value) -> Result<Document, Error> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| decode_section(index, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Document::new),
        Value::String(inner) if !inner.trim().is_empty() => {
            let nested = parse_sections(inner)?;
            if nested.is_string() {
                return Err(shape_error("sections are encoded more than once"));
            }
            decode_value(&nested)
        }
        other => Err(shape_error(format!(
            "sections must be an array, found {}",
            type_name(other)
        ))),
    }
}

fn parse_sections(raw: &str) -> Result<Value, Error> {
    let first = match serde_json::from_str::<Value>(raw) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    let normalized = match normalize_quotes(raw) {
        Cow::Borrowed(_) => return Err(malformed(first)),
        Cow::Owned(normalized) => normalized,
    };
    debug!(error = %first, "sections are not json as stored; retrying with normalized quotes");
    serde_json::from_str::<Value>(&normalized).map_err(malformed)
}

fn decode_section(index: usize, raw: &Value) -> Result<Section, Error> {
    let object = as_object(raw, || format!("section {index}"))?;
    let questions = match field(object, "questions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => map
            .values()
            .enumerate()
            .map(|(q, item)| decode_question(index, q, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(q, item)| decode_question(index, q, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(shape_error(format!(
                "questions of section {index} must be an object or array, found {}",
                type_name(other)
            )));
        }
    };

    let mut section = Section::new(text_field(object, "title", ""))
        .with_description(text_field(object, "description", ""));
    section.questions = questions;
    Ok(section)
}

fn decode_question(section: usize, index: usize, raw: &Value) -> Result<Question, Error> {
    let object = as_object(raw, || format!("question {index} of section {section}"))?;
    let options = field(object, "question_option")
        .map(decode_option_value)
        .unwrap_or_default();
    let mut question = Question::new(
        text_field(object, "question", ""),
        text_field(object, "question_type", DEFAULT_QUESTION_TYPE),
    )
    .with_required(flag_field(object, "is_required"));
    question.options = options;
    Ok(question)
}

fn as_object<'a>(
    raw: &'a Value,
    what: impl FnOnce() -> String,
) -> Result<&'a Map<String, Value>, Error> {
    raw.as_object().ok_or_else(|| {
        shape_error(format!("{} must be an object, found {}", what(), type_name(raw)))
    })
}

fn shape_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::UnexpectedShape).with_message(message)
}

fn malformed(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Malformed)
        .with_message("sections are not valid json")
        .with_hint("Stored sections must be a JSON array, optionally with single-quoted keys.")
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::CollectingReporter;

    const DEBIT_NOTE: &str = r#"[{"'title'":"DEBIT NOTE","'questions'":{"0":{"'question'":"COMPANY NAME","'question_type'":"radio","'question_option'":"YES,NO"}}}]"#;

    #[test]
    fn decodes_artifact_quoted_document() {
        let doc = try_decode(DEBIT_NOTE).expect("decode");
        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.title, "DEBIT NOTE");
        assert_eq!(section.description, "");
        assert_eq!(section.questions.len(), 1);
        let question = &section.questions[0];
        assert_eq!(question.text, "COMPANY NAME");
        assert_eq!(question.kind, "radio");
        assert_eq!(question.option_values(), vec!["YES", "NO"]);
        assert!(!question.required);
    }

    #[test]
    fn single_quoted_input_is_normalized() {
        let raw = "[{'title': 'Intake', 'description': 'First visit', 'questions': [{'question': 'Name', 'question_type': 'text', 'question_option': null, 'is_required': true}]}]";
        let doc = try_decode(raw).expect("decode");
        let section = &doc.sections[0];
        assert_eq!(section.title, "Intake");
        assert_eq!(section.description, "First visit");
        assert!(section.questions[0].required);
        assert!(section.questions[0].options.is_empty());
    }

    #[test]
    fn missing_questions_decode_to_empty_list() {
        let doc = try_decode(r#"[{"title":"Empty"},{"title":"Null","questions":null}]"#)
            .expect("decode");
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections.iter().all(|s| s.questions.is_empty()));
    }

    #[test]
    fn keys_are_resolved_per_field() {
        let raw = r#"[
            {"title":"Plain","questions":[{"question":"Q1","question_type":"text"}]},
            {"'title'":"Quoted","'questions'":{"0":{"'question'":"Q2","'question_type'":"text"}}}
        ]"#;
        let doc = try_decode(raw).expect("decode");
        assert_eq!(doc.sections[0].title, "Plain");
        assert_eq!(doc.sections[1].title, "Quoted");
        assert_eq!(doc.sections[0].questions[0].text, "Q1");
        assert_eq!(doc.sections[1].questions[0].text, "Q2");
    }

    #[test]
    fn question_map_keeps_source_order() {
        let mut entries = Vec::new();
        for i in 0..12 {
            entries.push(format!(r#""{i}":{{"question":"Q{i}","question_type":"text"}}"#));
        }
        let raw = format!(r#"[{{"title":"Many","questions":{{{}}}}}]"#, entries.join(","));
        let doc = try_decode(&raw).expect("decode");
        let texts: Vec<&str> = doc.sections[0]
            .questions
            .iter()
            .map(|q| q.text.as_str())
            .collect();
        let expected: Vec<String> = (0..12).map(|i| format!("Q{i}")).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn missing_question_type_defaults() {
        let doc = try_decode(r#"[{"title":"A","questions":[{"question":"Q"}]}]"#).expect("decode");
        assert_eq!(doc.sections[0].questions[0].kind, DEFAULT_QUESTION_TYPE);
    }

    #[test]
    fn string_wrapped_sections_are_unwrapped_once() {
        let wrapped = serde_json::to_string(DEBIT_NOTE).expect("wrap");
        let doc = try_decode(&wrapped).expect("decode");
        assert_eq!(doc.sections[0].title, "DEBIT NOTE");

        let twice = serde_json::to_string(&wrapped).expect("wrap twice");
        let err = try_decode(&twice).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedShape);
    }

    #[test]
    fn empty_array_is_an_empty_document() {
        assert!(try_decode("[]").expect("decode").sections.is_empty());
    }

    #[test]
    fn malformed_and_blank_input_are_errors() {
        for raw in ["{not valid at all", "", "   "] {
            assert_eq!(try_decode(raw).unwrap_err().kind(), ErrorKind::Malformed);
        }
    }

    #[test]
    fn unexpected_shapes_are_errors() {
        let cases = [
            r#"{"title":"not an array"}"#,
            r#"[1]"#,
            r#"[{"title":"A","questions":"oops"}]"#,
            r#"[{"title":"A","questions":[5]}]"#,
        ];
        for raw in cases {
            assert_eq!(
                try_decode(raw).unwrap_err().kind(),
                ErrorKind::UnexpectedShape,
                "input: {raw}"
            );
        }
    }

    #[test]
    fn scalar_text_fields_keep_sibling_sections() {
        let reporter = CollectingReporter::new();
        let raw = r#"[
            {"title":2024,"description":false,"questions":[{"question":7,"question_type":"number"}]},
            {"title":"Keep"}
        ]"#;
        let doc = decode_with(raw, &reporter);
        assert!(reporter.is_empty());
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "2024");
        assert_eq!(doc.sections[0].description, "false");
        assert_eq!(doc.sections[0].questions[0].text, "7");
        assert_eq!(doc.sections[1].title, "Keep");
    }

    #[test]
    fn container_text_fields_default() {
        let doc = try_decode(r#"[{"title":["A"],"questions":[{"question":{"x":1},"question_type":[]}]}]"#)
            .expect("decode");
        assert_eq!(doc.sections[0].title, "");
        assert_eq!(doc.sections[0].questions[0].text, "");
        assert_eq!(doc.sections[0].questions[0].kind, DEFAULT_QUESTION_TYPE);
    }

    #[test]
    fn decode_with_reports_and_falls_back() {
        let reporter = CollectingReporter::new();
        let doc = decode_with(r#"[{"title":"A","questions":7}]"#, &reporter);
        assert_eq!(doc, Document::fallback());
        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind, ErrorKind::UnexpectedShape);

        let ok = decode_with(DEBIT_NOTE, &reporter);
        assert_eq!(ok.sections[0].title, "DEBIT NOTE");
        assert!(reporter.is_empty());
    }

    #[test]
    fn decode_never_panics_on_garbage() {
        for raw in ["{not valid at all", "'", "[{'a':}]", "null", "true", "\"\""] {
            let doc = decode(raw);
            assert_eq!(doc.sections.len(), 1);
            assert_eq!(doc.sections[0].questions.len(), 1);
        }
    }
}

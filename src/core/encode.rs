// Editable document to the stored section string.
// Keys use the artifact-quoted convention the storage layer reads back;
// questions are an index-keyed object in document order.
use serde_json::{Map, Value, json};

use crate::core::fields::artifact_key;
use crate::core::model::{Document, Question, Section};
use crate::core::options::encode_options;

pub const REQUIRED_KEY: &str = "is_required";

pub fn encode(document: &Document) -> String {
    serde_json::to_string(&encode_value(document)).unwrap_or_else(|_| "[]".to_string())
}

pub fn encode_pretty(document: &Document) -> String {
    serde_json::to_string_pretty(&encode_value(document)).unwrap_or_else(|_| "[]".to_string())
}

pub fn encode_value(document: &Document) -> Value {
    Value::Array(document.sections.iter().map(section_value).collect())
}

fn section_value(section: &Section) -> Value {
    let mut questions = Map::new();
    for (index, question) in section.questions.iter().enumerate() {
        questions.insert(index.to_string(), question_value(question));
    }

    let mut map = Map::new();
    map.insert(artifact_key("title"), json!(section.title));
    map.insert(artifact_key("description"), json!(section.description));
    map.insert(artifact_key("questions"), Value::Object(questions));
    Value::Object(map)
}

fn question_value(question: &Question) -> Value {
    let mut map = Map::new();
    map.insert(artifact_key("question"), json!(question.text));
    map.insert(artifact_key("question_type"), json!(question.kind));
    map.insert(
        artifact_key("question_option"),
        json!(encode_options(&question.options)),
    );
    map.insert(REQUIRED_KEY.to_string(), json!(question.required));
    Value::Object(map)
}

// Flat option strings ("YES,NO") to ordered options and back.
use serde_json::Value;

use crate::core::model::QuestionOption;

pub const OPTION_SEPARATOR: char = ',';

/// Splits a comma-separated option string; blank tokens are dropped.
pub fn decode_options(raw: Option<&str>) -> Vec<QuestionOption> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(OPTION_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(QuestionOption::new)
        .collect()
}

/// Anything other than a JSON string means "no options".
pub fn decode_option_value(raw: &Value) -> Vec<QuestionOption> {
    decode_options(raw.as_str())
}

/// `None` for an empty list so "no options" stays distinct from `""`.
pub fn encode_options(options: &[QuestionOption]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let values: Vec<&str> = options.iter().map(|option| option.value.as_str()).collect();
    Some(values.join(","))
}

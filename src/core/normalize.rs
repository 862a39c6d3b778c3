// Quote normalization for stored sections written with single quotes.
// Every `'` becomes `"`, including apostrophes inside content.
use std::borrow::Cow;

pub fn normalize_quotes(raw: &str) -> Cow<'_, str> {
    if raw.contains('\'') {
        Cow::Owned(raw.replace('\'', "\""))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_quotes;
    use std::borrow::Cow;

    #[test]
    fn single_quoted_mapping_becomes_json() {
        let raw = "[{'title': 'Intake', 'questions': []}]";
        let normalized = normalize_quotes(raw);
        assert_eq!(normalized, r#"[{"title": "Intake", "questions": []}]"#);
        let value: serde_json::Value = serde_json::from_str(&normalized).expect("json");
        assert_eq!(value[0]["title"], "Intake");
    }

    #[test]
    fn input_without_single_quotes_is_borrowed() {
        let raw = r#"[{"title":"A"}]"#;
        assert!(matches!(normalize_quotes(raw), Cow::Borrowed(_)));
    }

    #[test]
    fn apostrophes_in_content_are_substituted_too() {
        assert_eq!(normalize_quotes("'Owner's name'"), r#""Owner"s name""#);
    }
}

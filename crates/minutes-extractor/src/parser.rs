//! Parse sanitized model output into action items

use crate::error::ElementShapeError;
use crate::types::ExtractionOutcome;
use minutes_domain::ExtractedItem;
use serde_json::{Map, Value};
use tracing::{debug, warn};

const TASK_KEYS: &[&str] = &["task", "description", "title"];
const OWNER_KEYS: &[&str] = &["owner", "assignee", "responsible"];
const DUE_DATE_KEYS: &[&str] = &["due_date", "dueDate", "deadline", "due"];

/// Items recovered from one completion
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItems {
    /// Normalized items, in model order
    pub items: Vec<ExtractedItem>,
    /// Which path produced them
    pub outcome: ExtractionOutcome,
    /// Elements that became placeholders
    pub shape_errors: Vec<ElementShapeError>,
}

impl ParsedItems {
    fn empty(outcome: ExtractionOutcome) -> Self {
        Self {
            items: Vec::new(),
            outcome,
            shape_errors: Vec::new(),
        }
    }
}

/// Parse cleaned model output
///
/// Tries the whole text as JSON first, then the greedy span from the first
/// `[` to the last `]`. Never fails: anything unusable yields an empty list
/// with the matching [`ExtractionOutcome`].
pub fn parse_action_items(cleaned: &str) -> ParsedItems {
    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        Err(_) => {
            debug!("Direct parse failed, looking for a bracketed span");
            let Some(span) = bracketed_span(cleaned) else {
                debug!("No JSON array span in model output");
                return ParsedItems::empty(ExtractionOutcome::NoJsonSpan);
            };
            match serde_json::from_str::<Value>(span) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Bracketed span failed to parse: {}", e);
                    return ParsedItems::empty(ExtractionOutcome::Unparsable);
                }
            }
        }
    };

    let Value::Array(elements) = value else {
        debug!("Model output is JSON but not an array");
        return ParsedItems::empty(ExtractionOutcome::NotAnArray);
    };

    let mut items = Vec::with_capacity(elements.len());
    let mut shape_errors = Vec::new();

    for (idx, element) in elements.iter().enumerate() {
        let position = idx + 1;
        match normalize_element(element, position) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!("Using placeholder: {}", e);
                items.push(placeholder(position));
                shape_errors.push(e);
            }
        }
    }

    ParsedItems {
        items,
        outcome: ExtractionOutcome::Parsed,
        shape_errors,
    }
}

/// First `[` through last `]`, inclusive
fn bracketed_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

fn normalize_element(element: &Value, position: usize) -> Result<ExtractedItem, ElementShapeError> {
    let obj = element.as_object().ok_or(ElementShapeError::NotAnObject {
        position,
        found: json_type(element),
    })?;

    let task = first_text(obj, TASK_KEYS).ok_or(ElementShapeError::MissingTask { position })?;

    Ok(ExtractedItem::new(
        task,
        first_text(obj, OWNER_KEYS),
        first_text(obj, DUE_DATE_KEYS),
    ))
}

fn placeholder(position: usize) -> ExtractedItem {
    ExtractedItem::new(format!("Untitled task {}", position), None, None)
}

/// First alias holding usable text; scalars are rendered, blanks skipped
fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| obj.get(*key).and_then(scalar_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(task: &str, owner: Option<&str>, due: Option<&str>) -> ExtractedItem {
        ExtractedItem::new(task, owner.map(str::to_string), due.map(str::to_string))
    }

    #[test]
    fn test_parse_full_item() {
        let parsed =
            parse_action_items(r#"[{"task":"Send report","owner":"Sam","due_date":"Friday"}]"#);
        assert_eq!(parsed.outcome, ExtractionOutcome::Parsed);
        assert_eq!(parsed.items, vec![item("Send report", Some("Sam"), Some("Friday"))]);
        assert!(parsed.shape_errors.is_empty());
    }

    #[test]
    fn test_parse_empty_array() {
        let parsed = parse_action_items("[]");
        assert_eq!(parsed.outcome, ExtractionOutcome::Parsed);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_span_inside_prose() {
        let parsed = parse_action_items(r#"Sure! Here you go: [{"task":"Y"}] Hope that helps."#);
        assert_eq!(parsed.outcome, ExtractionOutcome::Parsed);
        assert_eq!(parsed.items, vec![item("Y", None, None)]);
    }

    #[test]
    fn test_no_span() {
        let parsed = parse_action_items("No action items.");
        assert_eq!(parsed.outcome, ExtractionOutcome::NoJsonSpan);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_reversed_brackets_is_no_span() {
        assert_eq!(parse_action_items("] nothing [").outcome, ExtractionOutcome::NoJsonSpan);
    }

    #[test]
    fn test_unparsable_span() {
        let parsed = parse_action_items(r#"Items: [{"task": "A",}] and [oops]"#);
        assert_eq!(parsed.outcome, ExtractionOutcome::Unparsable);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_not_an_array() {
        let parsed = parse_action_items(r#"{"task": "A"}"#);
        assert_eq!(parsed.outcome, ExtractionOutcome::NotAnArray);
        assert!(parsed.items.is_empty());

        assert_eq!(parse_action_items("42").outcome, ExtractionOutcome::NotAnArray);
    }

    #[test]
    fn test_non_object_element_becomes_placeholder() {
        let parsed = parse_action_items(r#"["just a string", {"task":"Real task"}]"#);
        assert_eq!(
            parsed.items,
            vec![item("Untitled task 1", None, None), item("Real task", None, None)]
        );
        assert_eq!(
            parsed.shape_errors,
            vec![ElementShapeError::NotAnObject {
                position: 1,
                found: "string"
            }]
        );
    }

    #[test]
    fn test_missing_task_becomes_positional_placeholder() {
        let parsed = parse_action_items(r#"[{"task":"A"},{"owner":"Sam","task":"  "},{"task":null}]"#);
        assert_eq!(parsed.items[1], item("Untitled task 2", None, None));
        assert_eq!(parsed.items[2].task, "Untitled task 3");
        assert_eq!(parsed.shape_errors.len(), 2);
    }

    #[test]
    fn test_aliases() {
        let parsed = parse_action_items(
            r#"[
                {"description":"Book venue","assignee":"Lee","dueDate":"Monday"},
                {"title":"Draft agenda","responsible":"Kim","deadline":"2025-03-01"},
                {"task":"Call vendor","due":"tomorrow"}
            ]"#,
        );
        assert_eq!(
            parsed.items,
            vec![
                item("Book venue", Some("Lee"), Some("Monday")),
                item("Draft agenda", Some("Kim"), Some("2025-03-01")),
                item("Call vendor", None, Some("tomorrow")),
            ]
        );
    }

    #[test]
    fn test_blank_alias_falls_through_to_next() {
        let parsed = parse_action_items(r#"[{"task":"","description":"Fallback"}]"#);
        assert_eq!(parsed.items[0].task, "Fallback");
    }

    #[test]
    fn test_scalars_rendered_as_text() {
        let parsed = parse_action_items(r#"[{"task": 42, "owner": true, "due_date": 2025}]"#);
        assert_eq!(parsed.items, vec![item("42", Some("true"), Some("2025"))]);
    }

    #[test]
    fn test_whitespace_values_trimmed_or_absent() {
        let parsed = parse_action_items(r#"[{"task":"  Ship it  ","owner":"   ","due_date":null}]"#);
        assert_eq!(parsed.items, vec![item("Ship it", None, None)]);
    }

    #[test]
    fn test_nested_values_are_absent() {
        let parsed = parse_action_items(r#"[{"task":"A","owner":{"name":"Sam"},"due_date":["Fri"]}]"#);
        assert_eq!(parsed.items, vec![item("A", None, None)]);
    }
}

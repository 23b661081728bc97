use crate::geometry::{Attributes, value_to_text};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("static pattern"))
}

/// Renders `template` against a feature's attributes.
///
/// Non-string templates are returned as they are. In string templates each
/// `{key}` naming an attribute is replaced by that attribute as text, and
/// placeholders without a matching attribute stay verbatim. The template is
/// scanned once, so substituted text is never expanded again.
pub fn render(template: &Value, attributes: &Attributes) -> Value {
    match template {
        Value::String(text) => Value::String(render_str(text, attributes)),
        other => other.clone(),
    }
}

pub fn render_str(template: &str, attributes: &Attributes) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures| match attributes.get(&caps[1]) {
            Some(value) => value_to_text(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

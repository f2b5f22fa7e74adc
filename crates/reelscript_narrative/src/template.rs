//! `{name}` placeholder templates.

use regex::{Captures, Regex};
use reelscript_error::TemplateError;
use std::collections::HashMap;

const PLACEHOLDER_PATTERN: &str = r"\{([A-Za-z0-9_]+)\}";

/// A prompt with `{identifier}` placeholders.
///
/// Braces that do not enclose an identifier are left alone.
///
/// # Examples
///
/// ```
/// use reelscript_narrative::PromptTemplate;
/// use std::collections::HashMap;
///
/// let template = PromptTemplate::new("请为'{subject}'创作标题").unwrap();
/// assert_eq!(template.variables(), ["subject"]);
///
/// let values = HashMap::from([("subject", "sora模型".to_string())]);
/// assert_eq!(template.render(&values).unwrap(), "请为'sora模型'创作标题");
/// ```
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
    pattern: Regex,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Returns a template error if the placeholder pattern fails to compile.
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        let pattern = Regex::new(PLACEHOLDER_PATTERN)
            .map_err(|e| TemplateError::new(format!("Invalid placeholder pattern: {}", e)))?;

        let mut variables: Vec<String> = Vec::new();
        for cap in pattern.captures_iter(&text) {
            let name = &cap[1];
            if !variables.iter().any(|v| v == name) {
                variables.push(name.to_string());
            }
        }

        Ok(Self {
            text,
            pattern,
            variables,
        })
    }

    /// Placeholder names in order of first appearance.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Substitute every placeholder.
    ///
    /// Values for names the template does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns a template error naming the first placeholder without a value.
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|name| !values.contains_key(name.as_str()))
        {
            return Err(TemplateError::missing_variable(missing));
        }

        let rendered = self.pattern.replace_all(&self.text, |caps: &Captures| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        });
        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_each_variable_once() {
        let template = PromptTemplate::new("{a} and {b}, then {a} again").unwrap();
        assert_eq!(template.variables(), ["a", "b"]);
    }

    #[test]
    fn missing_variable_is_named() {
        let template = PromptTemplate::new("{title} / {word_count}").unwrap();
        let values = HashMap::from([("title", "t".to_string())]);
        let err = template.render(&values).unwrap_err();
        assert!(err.message.contains("word_count"));
    }

    #[test]
    fn extra_values_are_ignored() {
        let template = PromptTemplate::new("Hi {name}").unwrap();
        let values = HashMap::from([
            ("name", "Ada".to_string()),
            ("unused", "x".to_string()),
        ]);
        assert_eq!(template.render(&values).unwrap(), "Hi Ada");
    }

    #[test]
    fn non_identifier_braces_survive() {
        let template = PromptTemplate::new("{ not a var } {x-y} {ok}").unwrap();
        assert_eq!(template.variables(), ["ok"]);
        let values = HashMap::from([("ok", "✓".to_string())]);
        assert_eq!(
            template.render(&values).unwrap(),
            "{ not a var } {x-y} ✓"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let template = PromptTemplate::new("{a}").unwrap();
        let values = HashMap::from([("a", "{b}".to_string())]);
        assert_eq!(template.render(&values).unwrap(), "{b}");
    }
}

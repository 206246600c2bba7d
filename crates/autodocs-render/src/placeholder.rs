//! `{{ name }}` substitution over WordprocessingML parts.
//!
//! Word freely splits typed text into several runs, so a placeholder typed as
//! `{{ first_name }}` can reach us as
//! `{{ </w:t></w:r><w:r><w:t>first_name }}`, or even split the delimiter
//! itself as `{</w:t></w:r><w:r><w:t>{`. Delimiters are joined first, then
//! markup between the braces is dropped before the name is read; the dropped
//! span is always a run close/open sequence, so the surrounding XML stays
//! balanced.

use std::borrow::Cow;
use std::sync::LazyLock;

use autodocs_model::NormalizedContext;
use quick_xml::escape::escape;
use regex::Regex;

use crate::error::{RenderError, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const STATEMENT: &str = "{%";

/// Any XML tag.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid markup regex"));
/// `{`, markup, then `{` or `%`.
static SPLIT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?:<[^>]*>)+([{%])").expect("Invalid split open regex"));
/// `}` or `%`, markup, then `}`.
static SPLIT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([}%])(?:<[^>]*>)+\}").expect("Invalid split close regex"));
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex")
});

/// How unknown placeholder names are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownNames {
    /// Render nothing.
    #[default]
    Empty,
    /// Fail with [`RenderError::UnknownPlaceholder`].
    Reject,
}

/// Substitute every placeholder in one XML part.
pub fn fill_placeholders(
    xml: &str,
    part: &str,
    context: &NormalizedContext,
    unknown: UnknownNames,
) -> Result<String> {
    let joined = join_split_delimiters(xml);
    let xml: &str = &joined;
    let mut out = String::with_capacity(xml.len());
    let mut offset = 0;

    while let Some(found) = next_tag(&xml[offset..]) {
        let start = offset + found;
        if xml[start..].starts_with(STATEMENT) {
            return Err(RenderError::UnsupportedStatement {
                part: part.to_string(),
                offset: start,
            });
        }
        out.push_str(&xml[offset..start]);

        let body_start = start + OPEN.len();
        let Some(len) = xml[body_start..].find(CLOSE) else {
            return Err(RenderError::UnclosedPlaceholder {
                part: part.to_string(),
                offset: start,
            });
        };
        let raw = &xml[body_start..body_start + len];
        let name = placeholder_name(raw);
        if !IDENTIFIER.is_match(&name) {
            return Err(RenderError::InvalidExpression {
                part: part.to_string(),
                expression: name,
            });
        }

        match context.get(&name) {
            Some(value) => out.push_str(&escape(value)),
            None if unknown == UnknownNames::Reject => {
                return Err(RenderError::UnknownPlaceholder {
                    part: part.to_string(),
                    name,
                });
            }
            None => {
                tracing::debug!(part, placeholder = %name, "unknown placeholder rendered empty");
            }
        }

        offset = body_start + len + CLOSE.len();
    }

    out.push_str(&xml[offset..]);
    Ok(out)
}

/// Names of every placeholder in a part, in document order.
pub fn placeholder_names(xml: &str) -> Vec<String> {
    let joined = join_split_delimiters(xml);
    let mut names = Vec::new();
    let mut rest: &str = &joined;
    while let Some(start) = rest.find(OPEN) {
        let body = &rest[start + OPEN.len()..];
        let Some(len) = body.find(CLOSE) else {
            break;
        };
        names.push(placeholder_name(&body[..len]));
        rest = &body[len + CLOSE.len()..];
    }
    names
}

/// Pull split `{{`, `{%`, `}}` and `%}` back together.
fn join_split_delimiters(xml: &str) -> Cow<'_, str> {
    match SPLIT_OPEN.replace_all(xml, "{$1") {
        Cow::Borrowed(_) => SPLIT_CLOSE.replace_all(xml, "$1}"),
        Cow::Owned(joined) => Cow::Owned(SPLIT_CLOSE.replace_all(&joined, "$1}").into_owned()),
    }
}

fn next_tag(haystack: &str) -> Option<usize> {
    match (haystack.find(OPEN), haystack.find(STATEMENT)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn placeholder_name(raw: &str) -> String {
    MARKUP.replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> NormalizedContext {
        NormalizedContext {
            first_name: "Jane".to_string(),
            last_name: "O'Neil & Sons".to_string(),
            right: "☑".to_string(),
            ..NormalizedContext::default()
        }
    }

    fn fill(xml: &str) -> Result<String> {
        fill_placeholders(xml, "word/document.xml", &context(), UnknownNames::Empty)
    }

    #[test]
    fn test_simple_substitution() {
        let out = fill("<w:t>Hello {{ first_name }}!</w:t>").unwrap();
        assert_eq!(out, "<w:t>Hello Jane!</w:t>");
    }

    #[test]
    fn test_no_spaces_and_checkbox_alias() {
        let out = fill("<w:t>{{R}}{{first_name}}</w:t>").unwrap();
        assert_eq!(out, "<w:t>☑Jane</w:t>");
    }

    #[test]
    fn test_values_are_escaped() {
        let out = fill("<w:t>{{ last_name }}</w:t>").unwrap();
        assert_eq!(out, "<w:t>O&apos;Neil &amp; Sons</w:t>");
    }

    #[test]
    fn test_split_runs_are_joined() {
        let xml = "<w:r><w:t>{{ first_</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>name }}</w:t></w:r>";
        let out = fill(xml).unwrap();
        assert_eq!(out, "<w:r><w:t>Jane</w:t></w:r>");
    }

    #[test]
    fn test_split_opening_braces_are_joined() {
        let xml = "<w:r><w:t>{</w:t></w:r><w:r><w:t>{ first_name }}</w:t></w:r>";
        let out = fill(xml).unwrap();
        assert_eq!(out, "<w:r><w:t>Jane</w:t></w:r>");
    }

    #[test]
    fn test_split_closing_braces_are_joined() {
        let xml = "<w:r><w:t>{{ first_name }</w:t></w:r><w:r><w:t>} and {{ R }}</w:t></w:r>";
        let out = fill(xml).unwrap();
        assert_eq!(out, "<w:r><w:t>Jane and ☑</w:t></w:r>");
    }

    #[test]
    fn test_split_statement_is_still_rejected() {
        let result = fill("<w:t>{</w:t><w:t>% if L %}x</w:t>");
        assert!(matches!(result, Err(RenderError::UnsupportedStatement { .. })));
    }

    #[test]
    fn test_unknown_names_lenient_and_strict() {
        assert_eq!(fill("<w:t>[{{ nickname }}]</w:t>").unwrap(), "<w:t>[]</w:t>");

        let strict = fill_placeholders(
            "<w:t>{{ nickname }}</w:t>",
            "word/document.xml",
            &context(),
            UnknownNames::Reject,
        );
        assert!(matches!(
            strict,
            Err(RenderError::UnknownPlaceholder { ref name, .. }) if name == "nickname"
        ));
    }

    #[test]
    fn test_unclosed_placeholder() {
        let result = fill("<w:t>{{ first_name</w:t>");
        assert!(matches!(
            result,
            Err(RenderError::UnclosedPlaceholder { offset: 5, .. })
        ));
    }

    #[test]
    fn test_filters_rejected() {
        let result = fill("<w:t>{{ first_name|upper }}</w:t>");
        assert!(matches!(result, Err(RenderError::InvalidExpression { .. })));
    }

    #[test]
    fn test_statements_rejected() {
        let result = fill("<w:t>{% if L %}x{% endif %}</w:t>");
        assert!(matches!(result, Err(RenderError::UnsupportedStatement { .. })));
    }

    #[test]
    fn test_text_without_placeholders_unchanged() {
        let xml = "<w:t>{ single } braces and 100%</w:t>";
        assert_eq!(fill(xml).unwrap(), xml);
    }

    #[test]
    fn test_placeholder_names() {
        let names = placeholder_names(
            "<w:t>{{ date }}</w:t><w:t>{{ L</w:t><w:t> }}</w:t><w:t>{</w:t><w:t>{R}}</w:t>",
        );
        assert_eq!(names, vec!["date", "L", "R"]);
    }
}

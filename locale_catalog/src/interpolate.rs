//! Placeholder substitution for catalogue templates.
//!
//! Templates are trusted text: inline markup such as `<b>` or `<a href="…">`
//! is copied through untouched. Argument values are not trusted, so with
//! [`Escaping::Markup`] every substituted value is escaped for embedding in
//! markup before it is written out.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::Template;
use crate::error::{CatalogError, CatalogResult};

/// How argument values are written into rendered templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escaping {
    /// Escape `&`, `<`, `>`, `"`, and `'` in argument values.
    #[default]
    Markup,
    /// Insert argument values exactly as supplied.
    Verbatim,
}

/// Runtime value bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue<'a> {
    /// Untrusted text, escaped according to the active [`Escaping`].
    Text(Cow<'a, str>),
    /// Integer rendered in decimal.
    Integer(i64),
    /// Floating-point number rendered with `Display`.
    Float(f64),
    /// Trusted markup, never escaped.
    Markup(Cow<'a, str>),
}

impl fmt::Display for ArgValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Markup(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl<'a> From<&'a str> for ArgValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for ArgValue<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<i64> for ArgValue<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ArgValue<'_> {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ArgValue<'_> {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ArgValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Arguments forwarded to template rendering, keyed by placeholder name.
pub type TemplateArgs<'a> = HashMap<&'a str, ArgValue<'a>>;

/// Substitutes every placeholder in `template` with its argument.
///
/// The template is scanned once from left to right. Only `{identifier}`
/// tokens, where the identifier matches `[A-Za-z_][A-Za-z0-9_]*`, are
/// placeholders; any other brace is literal text.
///
/// # Examples
///
/// ```rust
/// use locale_catalog::{ArgValue, Escaping, Template, TemplateArgs, render};
///
/// let template = Template::new("Logged as <b>{username}</b>");
/// let args = TemplateArgs::from([("username", ArgValue::from("alice & bob"))]);
/// let rendered = render(&template, &args, Escaping::Markup).expect("username supplied");
/// assert_eq!(rendered, "Logged as <b>alice &amp; bob</b>");
/// ```
///
/// # Errors
///
/// Returns [`CatalogError::MissingParam`] naming the first placeholder that
/// has no argument.
pub fn render(
    template: &Template,
    args: &TemplateArgs<'_>,
    escaping: Escaping,
) -> CatalogResult<String> {
    let text = template.as_str();
    let mut out = String::with_capacity(text.len());
    for token in Tokens::new(text) {
        match token {
            Token::Literal(literal) => out.push_str(literal),
            Token::Placeholder(name) => {
                let value = args.get(name).ok_or_else(|| CatalogError::MissingParam {
                    name: name.to_owned(),
                })?;
                write_value(&mut out, value, escaping);
            }
        }
    }
    Ok(out)
}

/// Renders each template independently with the same arguments.
///
/// # Errors
///
/// Returns the first [`CatalogError::MissingParam`] raised by any item.
pub fn render_all<'t, I>(
    templates: I,
    args: &TemplateArgs<'_>,
    escaping: Escaping,
) -> CatalogResult<Vec<String>>
where
    I: IntoIterator<Item = &'t Template>,
{
    templates
        .into_iter()
        .map(|template| render(template, args, escaping))
        .collect()
}

pub(crate) fn placeholder_names(text: &str) -> impl Iterator<Item = &str> {
    Tokens::new(text).filter_map(|token| match token {
        Token::Placeholder(name) => Some(name),
        Token::Literal(_) => None,
    })
}

fn write_value(out: &mut String, value: &ArgValue<'_>, escaping: Escaping) {
    match (value, escaping) {
        (ArgValue::Text(text), Escaping::Markup) => escape_markup_into(out, text),
        (ArgValue::Text(text) | ArgValue::Markup(text), _) => out.push_str(text),
        (ArgValue::Integer(_) | ArgValue::Float(_), _) => out.push_str(&value.to_string()),
    }
}

fn escape_markup_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let Some((before, after_open)) = self.rest.split_once('{') else {
            let literal = self.rest;
            self.rest = "";
            return Some(Token::Literal(literal));
        };
        if !before.is_empty() {
            // Emit the text up to the brace; the brace itself is handled on
            // the next call.
            let (literal, remainder) = self.rest.split_at(before.len());
            self.rest = remainder;
            return Some(Token::Literal(literal));
        }
        if let Some((name, after_close)) = after_open.split_once('}')
            && is_identifier(name)
        {
            self.rest = after_close;
            return Some(Token::Placeholder(name));
        }
        let (brace, remainder) = self.rest.split_at(1);
        self.rest = remainder;
        Some(Token::Literal(brace))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

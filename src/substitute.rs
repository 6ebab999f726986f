//! Flat `{{ name }}` placeholder substitution in file contents.
//! Not a templating language: a single pass of plain key to value
//! replacement, no expressions and no control flow.

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Variable assignments for one run.
///
/// Built once from CLI-supplied pairs and built-in defaults, immutable for
/// the duration of the run. Insertion order is preserved so logs list
/// variables the way the user supplied them.
pub type VariableMap = IndexMap<String, String>;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap())
}

/// Replaces every `{{ name }}` placeholder whose name is present in the map.
///
/// Whitespace around the name is trimmed; names are matched verbatim. A
/// placeholder whose name is absent from the map is left verbatim in the
/// output, so templates can carry documentation-only placeholders for
/// variables a given invocation does not set.
pub fn substitute_text(content: &str, variables: &VariableMap) -> String {
    placeholder_regex()
        .replace_all(content, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitutes placeholders in text content; binary content passes through.
///
/// Content that does not decode as UTF-8 is returned unchanged so images and
/// other artifacts accidentally included in a template are copied
/// byte-for-byte instead of being corrupted.
pub fn substitute_content<'a>(bytes: &'a [u8], variables: &VariableMap) -> Cow<'a, [u8]> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Owned(substitute_text(text, variables).into_bytes()),
        Err(_) => Cow::Borrowed(bytes),
    }
}

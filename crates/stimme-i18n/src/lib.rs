//! Static German/English copy with dotted-path lookup.
//!
//! `lookup(lang, "voices.form.title")` walks the copy tree and returns the
//! string or string list found there. A path that leads nowhere returns the
//! path itself, so a missing translation shows up literally in the UI
//! instead of crashing or rendering blank.

mod copy;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    De,
    En,
}

impl Lang {
    pub const fn as_str(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    /// Pick a language from an `Accept-Language` header value. Only the
    /// first tag matters; anything that is not English means German, the
    /// platform default.
    pub fn from_accept_language(header: Option<&str>) -> Lang {
        let first = header
            .unwrap_or("")
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .as_bytes();
        if first.len() >= 2 && first[..2].eq_ignore_ascii_case(b"en") {
            Lang::En
        } else {
            Lang::De
        }
    }
}

/// A resolved copy entry: either a plain string or a list (bullet points).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Str(String),
    List(Vec<String>),
}

impl Text {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Text::Str(s) => Some(s),
            Text::List(_) => None,
        }
    }
}

/// Walk the copy tree for `lang` along the dotted `path`.
pub fn lookup(lang: Lang, path: &str) -> Text {
    let mut node: &Value = copy::tree(lang);
    for key in path.split('.') {
        match node.get(key) {
            Some(next) => node = next,
            None => return Text::Str(path.to_string()),
        }
    }
    match node {
        Value::String(s) => Text::Str(s.clone()),
        Value::Array(items) => Text::List(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        // Landed on an inner object: treat as missing.
        _ => Text::Str(path.to_string()),
    }
}

/// Convenience for call sites that want a single string. Lists are joined
/// with a space; a miss yields the path, same as `lookup`.
pub fn text(lang: Lang, path: &str) -> String {
    match lookup(lang, path) {
        Text::Str(s) => s,
        Text::List(items) => items.join(" "),
    }
}

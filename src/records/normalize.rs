use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Toggles for [`normalize`]. Defaults strip special characters and upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub remove_special_chars: bool,
    pub remove_whitespace: bool,
    pub uppercase: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_special_chars: true,
            remove_whitespace: false,
            uppercase: true,
        }
    }
}

impl NormalizeOptions {
    /// Case-folds and trims but keeps punctuation, for text that is split on a delimiter later.
    pub fn keep_special_chars() -> Self {
        Self {
            remove_special_chars: false,
            ..Self::default()
        }
    }
}

fn special_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9\s]").expect("static pattern compiles"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static pattern compiles"))
}

/// Canonicalizes spreadsheet text for comparison.
///
/// Steps run in a fixed order: strip characters outside `[A-Za-z0-9]` and
/// whitespace, collapse whitespace runs to one space, upper-case, then trim.
/// Reordering them changes results. Absent input stays absent.
pub fn normalize(text: Option<&str>, options: &NormalizeOptions) -> Option<String> {
    let mut out = text?.to_string();
    if options.remove_special_chars {
        out = special_chars().replace_all(&out, "").into_owned();
    }
    if options.remove_whitespace {
        out = whitespace_runs().replace_all(&out, " ").into_owned();
    }
    if options.uppercase {
        out = out.to_uppercase();
    }
    Some(out.trim().to_string())
}

/// [`normalize`] with default options.
pub fn normalize_default(text: Option<&str>) -> Option<String> {
    normalize(text, &NormalizeOptions::default())
}

/// Normalized text, with empty results folded into `None`.
pub(crate) fn normalized_non_empty(text: Option<&str>) -> Option<String> {
    normalize_default(text).filter(|t| !t.is_empty())
}

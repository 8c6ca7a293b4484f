use std::sync::LazyLock;

use eyre::Result;
use regex::Regex;
use serde::Serialize;

static NON_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid id regex"));

/// Joins `parts` with `_` and replaces everything outside `[A-Za-z0-9_]` by `_`
pub fn element_id(parts: &[&str]) -> String {
    NON_ID_CHARS.replace_all(&parts.join("_"), "_").into_owned()
}

/// Serializes `value` to JSON that can be embedded verbatim in a `<script>` element
pub fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?
        .replace("</", "<\\/")
        .replace("<!--", "<\\u0021--"))
}

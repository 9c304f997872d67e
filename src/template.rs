//! Placeholder substitution over JSON snapshots.
//!
//! Templates are literal text with `{key}` or `{key.subkey}` placeholders. Each
//! placeholder is looked up in a [`serde_json::Value`] and replaced with its text
//! form. There are no loops, conditionals or escapes.
//!
//! ```
//! use serde_json::json;
//!
//! let view = json!({"event": "Launch", "slice": {"remaining": 42}});
//! let text = countdown_keeper::template::render("{event} in {slice.remaining} ms", &view);
//! assert_eq!(text, "Launch in 42 ms");
//! ```

use alloc::string::{String, ToString};
use serde_json::Value;

/// Maximum number of path segments in a placeholder (`key.subkey`).
pub const MAX_PATH_DEPTH: usize = 2;

/// Replaces every resolvable placeholder in `template` with its value from `view`.
///
/// Single left-to-right pass. Unresolved placeholders (unknown key, deeper path,
/// lookup through a non-object) are kept verbatim. A `{` not closed before the
/// next `{` or the end of input is literal text.
pub fn render(template: &str, view: &Value) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after[close..].starts_with('}') => {
                let path = &after[..close];
                match resolve(view, path) {
                    Some(value) => push_value(&mut output, value),
                    None => {
                        log::trace!("leaving unresolved placeholder {{{}}}", path);
                        output.push('{');
                        output.push_str(path);
                        output.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Looks up a dotted path of at most [`MAX_PATH_DEPTH`] segments.
pub fn resolve<'v>(view: &'v Value, path: &str) -> Option<&'v Value> {
    let mut segments: heapless::Vec<&str, MAX_PATH_DEPTH> = heapless::Vec::new();
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        segments.push(segment).ok()?;
    }

    segments
        .iter()
        .try_fold(view, |current, segment| current.as_object()?.get(*segment))
}

fn push_value(output: &mut String, value: &Value) {
    match value {
        Value::String(text) => output.push_str(text),
        other => output.push_str(&other.to_string()),
    }
}

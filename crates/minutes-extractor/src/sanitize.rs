//! Strip markdown code fences from model output

use once_cell::sync::Lazy;
use regex::Regex;

// Triple backtick with a language tag only when the tag ends the line;
// otherwise the bare marker and an optional newline.
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:[A-Za-z0-9_+\-]*[ \t]*(?:\r?\n|$)|\r?\n?)")
        .expect("static fence regex compiles")
});

/// Trim, remove every fence marker, trim again
///
/// Never fails; text without fences is only trimmed.
pub fn sanitize_response(raw: &str) -> String {
    let stripped = FENCE.replace_all(raw.trim(), "");
    stripped.trim().to_string()
}

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Prefix used when the input has no alphanumeric characters at all.
pub const FALLBACK_PREFIX: &str = "target";

/// Lower-case `input` and collapse every run of non-alphanumerics into a
/// single hyphen, trimming hyphens at both ends.
///
/// Input with nothing left after that (e.g. `"!!!"`) gets a time-seeded
/// `target-<micros>` placeholder, so the result is never empty but is not
/// deterministic in that one case.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let slug = NON_ALNUM_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("{}-{}", FALLBACK_PREFIX, Utc::now().timestamp_micros())
    } else {
        slug.to_string()
    }
}

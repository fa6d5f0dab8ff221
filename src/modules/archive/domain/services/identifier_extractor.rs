use regex::Regex;
use std::sync::LazyLock;

static UID_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ihas\.(\d+)").unwrap());

/// Digit run following `ihas.` anywhere in a long-form identifier.
///
/// `http://www.loc.gov/item/ihas.100010366/` yields `100010366`. Absent,
/// empty or non-matching input yields `None`.
pub fn extract_uid(identifier: Option<&str>) -> Option<String> {
    let identifier = identifier?;
    UID_PATTERN
        .captures(identifier)
        .and_then(|captures| captures.get(1))
        .map(|digits| digits.as_str().to_string())
}

/// Whether `identifier` is already a bare UID.
pub fn is_bare_uid(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit())
}

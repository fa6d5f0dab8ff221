use super::identifier_extractor::is_bare_uid;
use crate::shared::errors::{AppError, AppResult};

/// Canonical item URL (trailing slash, no query) for an identifier.
///
/// Accepts a full `http(s)://` locator, a bare UID (rebuilt with the
/// `ihas.<uid>` convention) or an item slug such as `ihas.100010366`.
pub fn canonical_item_url(identifier: &str, base_url: &str) -> AppResult<String> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(AppError::InvalidInput("Empty item identifier".to_string()));
    }

    let base_url = base_url.trim_end_matches('/');

    if identifier.starts_with("http://") || identifier.starts_with("https://") {
        let without_query = identifier
            .split(['?', '#'])
            .next()
            .unwrap_or(identifier);
        return Ok(format!("{}/", without_query.trim_end_matches('/')));
    }

    if is_bare_uid(identifier) {
        return Ok(format!("{}/item/ihas.{}/", base_url, identifier));
    }

    let slug = identifier
        .trim_start_matches("/item/")
        .trim_matches('/');
    if slug.is_empty() || slug.contains('/') {
        return Err(AppError::InvalidInput(format!(
            "Unrecognised item identifier: {}",
            identifier
        )));
    }

    Ok(format!("{}/item/{}/", base_url, slug))
}

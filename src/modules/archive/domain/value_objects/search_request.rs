use serde::{Deserialize, Serialize};

/// Query for the archive search endpoint. A request without a query is the
/// broad, audio-filtered scan used to build the years index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
}

impl SearchRequest {
    pub fn broad() -> Self {
        Self { query: None }
    }

    pub fn query(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: (!query.trim().is_empty()).then(|| query.trim().to_string()),
        }
    }

    /// Query for a year, optionally narrowed by a (percent-decoded) title hint.
    pub fn for_year(year: i32, title_hint: Option<&str>) -> Self {
        match title_hint.map(str::trim).filter(|hint| !hint.is_empty()) {
            Some(hint) => Self::query(format!("{} {}", year, hint)),
            None => Self::query(year.to_string()),
        }
    }

    pub fn is_broad(&self) -> bool {
        self.query.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_queries() {
        assert_eq!(SearchRequest::for_year(1940, None).query.as_deref(), Some("1940"));
        assert_eq!(
            SearchRequest::for_year(1940, Some(" swing band ")).query.as_deref(),
            Some("1940 swing band")
        );
        assert_eq!(SearchRequest::for_year(1940, Some("")).query.as_deref(), Some("1940"));
    }

    #[test]
    fn test_blank_query_is_broad() {
        assert!(SearchRequest::query("  ").is_broad());
        assert!(SearchRequest::broad().is_broad());
    }
}

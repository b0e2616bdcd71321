use newsdesk_core::PageRequest;

// -------------------------
// Request DTOs
// -------------------------

/// Query parameters of `GET /news`.
///
/// Built from raw key/value pairs so duplicate or malformed parameters never
/// reject the request; the first occurrence of each key wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListNewsParams {
    /// Search text; `None` when missing or empty.
    pub q: Option<String>,
    pub page: PageRequest,
}

impl ListNewsParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            q: first("q").filter(|q| !q.is_empty()).map(str::to_string),
            page: PageRequest::from_raw(first("page"), first("limit")),
        }
    }
}

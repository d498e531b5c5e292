use super::{ApiError, ListQuery};
use crate::constants::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_SEARCH_PATTERN_LEN};
use crate::models::Page;

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(limit)
}

/// Builds the page window from `?skip=&limit=`.
pub fn page_from_query(query: &ListQuery) -> Result<Page, ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_PAGE_SIZE))?;
    Ok(Page::new(query.skip.unwrap_or(0), limit))
}

/// An empty pattern means "no search".
pub fn validate_search_pattern(pattern: Option<&str>) -> Result<Option<&str>, ApiError> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) if p.chars().count() > MAX_SEARCH_PATTERN_LEN => Err(ApiError::validation(
            format!("Search pattern must be {MAX_SEARCH_PATTERN_LEN} characters or less"),
        )),
        Some(p) => Ok(Some(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(100).is_ok());
        assert!(validate_limit(1000).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1001).is_err());
    }

    #[test]
    fn test_page_defaults() {
        let page = page_from_query(&ListQuery::default()).unwrap();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 100);

        let query = ListQuery {
            skip: Some(20),
            limit: Some(5),
            ..ListQuery::default()
        };
        let page = page_from_query(&query).unwrap();
        assert_eq!((page.offset, page.limit), (20, 5));
    }

    #[test]
    fn test_search_pattern() {
        assert_eq!(validate_search_pattern(None).unwrap(), None);
        assert_eq!(validate_search_pattern(Some("")).unwrap(), None);
        assert_eq!(validate_search_pattern(Some("Bre")).unwrap(), Some("Bre"));
        assert!(validate_search_pattern(Some("x".repeat(51).as_str())).is_err());
    }
}

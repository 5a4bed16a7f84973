//! Query parameters for the product list endpoint

use serde::{Deserialize, Serialize};

use crate::repository::{PageRequest, PageRequestError};

/// `?page=&limit=` for `GET /products`
///
/// Values are signed so that zero and negative numbers reach validation
/// instead of failing deserialization.
///
/// # Example
///
/// ```rust
/// use catalog_service::handlers::ListQuery;
///
/// let query = ListQuery { page: Some(2), limit: None };
/// let request = query.page_request().unwrap();
/// assert_eq!(request.page.get(), 2);
/// assert_eq!(request.limit.get(), 10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-indexed page number, defaults to 1
    pub page: Option<i64>,
    /// Page size, defaults to 10
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page_request(&self) -> Result<PageRequest, PageRequestError> {
        PageRequest::parse(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_deserialization() {
        let query: ListQuery = serde_json::from_str(r#"{"page": 3, "limit": 25}"#).unwrap();
        assert_eq!(query.page, Some(3));

        let request = query.page_request().unwrap();
        assert_eq!(request.pagination().offset, 50);
    }

    #[test]
    fn test_query_validation() {
        let query = ListQuery {
            page: Some(1),
            limit: Some(-1),
        };
        assert_eq!(query.page_request(), Err(PageRequestError::Limit));
        assert_eq!(ListQuery::default().page_request(), Ok(PageRequest::default()));
    }
}

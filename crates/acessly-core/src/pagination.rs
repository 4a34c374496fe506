//! Page requests and page envelopes for listing endpoints.
//!
//! Listings are page-based with a 0-indexed page number:
//!
//! - `page`: page index (default 0, negative values clamp to 0)
//! - `size`: items per page (1-100, default 10)
//! - `sort`: `<field>[,asc|desc]` (default: primary key ascending)
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "items": [...],
//!   "page": 2,
//!   "size": 10,
//!   "totalElements": 45,
//!   "totalPages": 5
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;
use crate::serde::{deserialize_optional_i64, deserialize_optional_string};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters selecting one page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page index, starting at 0
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    /// Sort order, e.g. `title,desc`
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort: Option<String>,
}

impl PageParams {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: None,
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    #[must_use]
    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        self.page().saturating_mul(self.size())
    }

    /// Parses the `sort` parameter. `None` means the caller's default order.
    pub fn sort(&self) -> Result<Option<SortSpec>, AppError> {
        self.sort.as_deref().map(str::parse).transpose()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A requested ordering: an API field name and a direction.
///
/// The field is not trusted; the query executor resolves it against the
/// entity's list of sortable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let field = parts.next().unwrap_or_default();
        if field.is_empty() {
            return Err(AppError::validation("sort field required"));
        }

        let direction = match parts.next() {
            None | Some("") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(dir) => {
                return Err(AppError::validation(format!(
                    "invalid sort direction: {}",
                    dir
                )));
            }
        };

        if parts.next().is_some() {
            return Err(AppError::validation(format!("invalid sort: {}", s)));
        }

        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.field, dir)
    }
}

/// One page of results plus the totals of the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        Self {
            items,
            page,
            size,
            total_elements,
            total_pages: total_pages(total_elements, size),
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed to hold `total` items, `size` per page.
pub fn total_pages(total: i64, size: i64) -> i64 {
    if total <= 0 || size <= 0 {
        return 0;
    }
    (total + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 0);
        assert_eq!(params.size(), 10);
        assert_eq!(params.offset(), 0);
        assert!(params.sort().unwrap().is_none());
    }

    #[test]
    fn test_page_params_clamping() {
        let params = PageParams::new(-3, 0);
        assert_eq!(params.page(), 0);
        assert_eq!(params.size(), 1);

        let params = PageParams::new(2, 500);
        assert_eq!(params.size(), 100);
        assert_eq!(params.offset(), 200);
    }

    #[test]
    fn test_page_params_offset() {
        let params = PageParams::new(3, 20);
        assert_eq!(params.offset(), 60);
    }

    #[test]
    fn test_page_params_deserialize_blank_values() {
        let json = r#"{"page":"","size":"","sort":"  "}"#;
        let params: PageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.size, None);
        assert_eq!(params.sort, None);
    }

    #[test]
    fn test_page_params_deserialize_values() {
        let json = r#"{"page":"1","size":"25","sort":"title,desc"}"#;
        let params: PageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.size(), 25);
        assert_eq!(params.sort().unwrap(), Some(SortSpec::desc("title")));
    }

    #[test]
    fn test_sort_spec_parsing() {
        assert_eq!("id".parse::<SortSpec>().unwrap(), SortSpec::asc("id"));
        assert_eq!("name,ASC".parse::<SortSpec>().unwrap(), SortSpec::asc("name"));
        assert_eq!(
            "name, desc".parse::<SortSpec>().unwrap(),
            SortSpec::desc("name")
        );
    }

    #[test]
    fn test_sort_spec_rejects_garbage() {
        assert!("name,sideways".parse::<SortSpec>().is_err());
        assert!(",asc".parse::<SortSpec>().is_err());
        assert!("a,asc,b".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 4), 7);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(vec![1, 2, 3], 0, 3, 7);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 7);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_page_map_keeps_totals() {
        let page = Page::new(vec![1, 2], 1, 2, 5).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 1);
    }
}

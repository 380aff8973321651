pub mod admin;
pub mod auth;
pub mod catalog;
pub mod notification;
pub mod order;

use serde::Deserialize;

use crate::domain::filter::{DateRange, OrderBy, OrderFilter};
use crate::domain::{pricing, OrderStatus};
use crate::error::{AppError, AppResult};
use crate::response::{ApiResponse, Meta};
use crate::services::view::{Page, Paging};

/// Query string shared by the order listings.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub rating_class: Option<i32>,
    pub order_by: Option<String>,
}

impl OrderListQuery {
    pub fn paging(&self) -> Paging {
        Paging::new(self.page, self.limit)
    }

    pub fn filter(&self) -> AppResult<OrderFilter> {
        let date_range = match (non_empty(&self.date_start), non_empty(&self.date_end)) {
            (None, None) => None,
            (start, end) => {
                let start = start.map(pricing::parse_date).transpose()?;
                let end = end.map(pricing::parse_date).transpose()?;
                if let (Some(start), Some(end)) = (start, end) {
                    if end < start {
                        return Err(AppError::Validation(
                            "date_end must not be before date_start".to_string(),
                        ));
                    }
                }
                Some(DateRange::from_query(start, end))
            }
        };

        let order_by = match non_empty(&self.order_by) {
            Some(raw) => raw.parse::<OrderBy>().map_err(AppError::Validation)?,
            None => OrderBy::default(),
        };

        Ok(OrderFilter {
            status: parse_status(self.status.as_deref())?,
            date_range,
            search: non_empty(&self.search).map(str::to_string),
            min_rating_class: self.rating_class.filter(|class| *class > 0),
            order_by,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Unknown status strings are rejected here, before reaching the services.
pub(crate) fn parse_status(raw: Option<&str>) -> AppResult<Option<OrderStatus>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(Some(raw.parse::<OrderStatus>()?)),
        None => Ok(None),
    }
}

pub(crate) fn required_id(value: Option<i32>, name: &str) -> AppResult<i32> {
    value
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
}

pub(crate) fn page_response<T: serde::Serialize>(
    message: &str,
    page: Page<T>,
) -> ApiResponse<Vec<T>> {
    ApiResponse::ok(message, page.items).with_meta(Meta {
        page: page.page,
        limit: page.limit,
        total: page.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_query() {
        let query = OrderListQuery {
            status: Some("pending".to_string()),
            search: Some("  be ".to_string()),
            date_start: Some("2024-02-04".to_string()),
            date_end: Some("2024-02-10".to_string()),
            rating_class: Some(4),
            order_by: Some("highest_price".to_string()),
            ..Default::default()
        };
        let filter = query.filter().unwrap();

        assert_eq!(filter.status, Some(OrderStatus::Unpaid));
        assert_eq!(filter.search.as_deref(), Some("be"));
        assert_eq!(filter.min_rating_class, Some(4));
        assert_eq!(filter.order_by, OrderBy::HighestPrice);
        let range = filter.date_range.unwrap();
        assert_eq!(range.start, pricing::parse_date("2024-02-03").ok());
        assert_eq!(range.end, pricing::parse_date("2024-02-10").ok());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let query = OrderListQuery {
            status: Some("shipped".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.filter(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_reversed_date_range_rejected() {
        let query = OrderListQuery {
            date_start: Some("2024-02-10".to_string()),
            date_end: Some("2024-02-04".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.filter(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_required_id() {
        assert_eq!(required_id(Some(3), "hotel_order_id").unwrap(), 3);
        assert!(required_id(None, "hotel_order_id").is_err());
        assert!(required_id(Some(0), "hotel_order_id").is_err());
    }
}

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::domain::status::OrderStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    Latest,
    Oldest,
    HighestPrice,
    LowestPrice,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "latest" => Ok(OrderBy::Latest),
            "oldest" => Ok(OrderBy::Oldest),
            "highest_price" => Ok(OrderBy::HighestPrice),
            "lowest_price" => Ok(OrderBy::LowestPrice),
            other => Err(format!("Unknown order_by: {}", other)),
        }
    }
}

/// Inclusive calendar-date window over an order's check-in date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Window for the admin listing: the requested start is moved back one
    /// day, the end is kept as given.
    pub fn from_query(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(|day| day - Duration::days(1)),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub date_range: Option<DateRange>,
    pub search: Option<String>,
    pub min_rating_class: Option<i32>,
    pub order_by: OrderBy,
}

/// What the admin pipeline needs to know about a hydrated order.
pub trait FilterableOrder {
    fn status(&self) -> OrderStatus;
    fn created_at(&self) -> DateTimeWithTimeZone;
    fn price(&self) -> i64;
    /// Check-in date; `None` for orders without one.
    fn date_start(&self) -> Option<NaiveDate>;
    /// Hotel star class; `None` for orders without a hotel.
    fn rating_class(&self) -> Option<i32>;
    fn search_fields(&self) -> Vec<&str>;
}

pub fn apply<T: FilterableOrder>(orders: Vec<T>, filter: &OrderFilter) -> Vec<T> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut kept: Vec<T> = orders
        .into_iter()
        .filter(|o| filter.status.is_none_or(|status| o.status() == status))
        .filter(|o| match (&filter.date_range, o.date_start()) {
            (Some(range), Some(date)) => range.contains(date),
            (Some(range), None) => range.is_unbounded(),
            (None, _) => true,
        })
        .filter(|o| match &needle {
            Some(needle) => o
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .filter(|o| match (filter.min_rating_class, o.rating_class()) {
            (Some(min), Some(class)) => class >= min,
            (Some(_), None) => false,
            (None, _) => true,
        })
        .collect();

    sort(&mut kept, filter.order_by);
    kept
}

pub fn sort<T: FilterableOrder>(orders: &mut [T], order_by: OrderBy) {
    match order_by {
        OrderBy::Latest => orders.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        OrderBy::Oldest => orders.sort_by_key(|o| o.created_at()),
        OrderBy::HighestPrice => orders.sort_by(|a, b| b.price().cmp(&a.price())),
        OrderBy::LowestPrice => orders.sort_by_key(|o| o.price()),
    }
}

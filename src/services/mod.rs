//! Use cases. Each function takes the store capability and the calling
//! [`Actor`](crate::domain::Actor) explicitly; handlers stay thin.

pub mod account;
pub mod booking;
pub mod catalog;
pub mod notification;
pub mod view;

use crate::error::{AppError, AppResult};

/// Turns an absent lookup into `NotFound`.
pub(crate) fn found<T>(row: Option<T>, what: &str, id: i32) -> AppResult<T> {
    row.ok_or_else(|| AppError::NotFound(format!("{} {} not found", what, id)))
}

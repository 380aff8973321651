use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle shared by hotel and ticket orders.
///
/// ```text
/// unpaid --pay--> paid --complete--> done
///   |               |
///   cancel          refund
///   v               v
/// canceled        refund
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[sea_orm(string_value = "unpaid")]
    #[serde(alias = "pending")]
    Unpaid,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "done")]
    Done,
    #[sea_orm(string_value = "canceled")]
    Canceled,
    #[sea_orm(string_value = "refund")]
    Refund,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTransition {
    #[error("Order status cannot change from {from} to {to}")]
    NotAllowed { from: OrderStatus, to: OrderStatus },
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
}

/// Canonical template message ids, seeded by the migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTemplate {
    OrderUnpaid,
    OrderPaid,
    OrderCanceled,
}

impl NotificationTemplate {
    pub fn template_message_id(self) -> i32 {
        match self {
            NotificationTemplate::OrderUnpaid => 4,
            NotificationTemplate::OrderPaid => 5,
            NotificationTemplate::OrderCanceled => 6,
        }
    }
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Unpaid => "unpaid",
            OrderStatus::Paid => "paid",
            OrderStatus::Done => "done",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Refund => "refund",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Done | OrderStatus::Canceled | OrderStatus::Refund
        )
    }

    /// Whether seats held by an order in this status are still taken.
    pub fn holds_inventory(self) -> bool {
        !matches!(self, OrderStatus::Canceled | OrderStatus::Refund)
    }

    /// The notification written when an order enters this status.
    pub fn notification_template(self) -> Option<NotificationTemplate> {
        match self {
            OrderStatus::Unpaid => Some(NotificationTemplate::OrderUnpaid),
            OrderStatus::Paid => Some(NotificationTemplate::OrderPaid),
            OrderStatus::Canceled => Some(NotificationTemplate::OrderCanceled),
            OrderStatus::Done | OrderStatus::Refund => None,
        }
    }
}

/// Checks a single step of the order lifecycle. Staying in place is not a step.
pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<(), InvalidTransition> {
    use OrderStatus::*;

    match (from, to) {
        (Unpaid, Paid) | (Unpaid, Canceled) | (Paid, Done) | (Paid, Refund) => Ok(()),
        _ => Err(InvalidTransition::NotAllowed { from, to }),
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidTransition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" | "pending" => Ok(OrderStatus::Unpaid),
            "paid" => Ok(OrderStatus::Paid),
            "done" => Ok(OrderStatus::Done),
            "canceled" => Ok(OrderStatus::Canceled),
            "refund" => Ok(OrderStatus::Refund),
            other => Err(InvalidTransition::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_allowed_transitions() {
        assert!(transition(OrderStatus::Unpaid, OrderStatus::Paid).is_ok());
        assert!(transition(OrderStatus::Unpaid, OrderStatus::Canceled).is_ok());
        assert!(transition(OrderStatus::Paid, OrderStatus::Done).is_ok());
        assert!(transition(OrderStatus::Paid, OrderStatus::Refund).is_ok());
    }

    #[test]
    fn test_skipping_payment_is_rejected() {
        assert!(transition(OrderStatus::Unpaid, OrderStatus::Done).is_err());
        assert!(transition(OrderStatus::Unpaid, OrderStatus::Refund).is_err());
        assert!(transition(OrderStatus::Paid, OrderStatus::Canceled).is_err());
    }

    #[test]
    fn test_terminal_states_never_move() {
        for from in [OrderStatus::Done, OrderStatus::Canceled, OrderStatus::Refund] {
            assert!(from.is_terminal());
            for to in OrderStatus::iter() {
                assert!(transition(from, to).is_err(), "{from} -> {to} must fail");
            }
        }
    }

    #[test]
    fn test_parse_accepts_pending_alias() {
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Unpaid));
        assert_eq!("PAID".parse::<OrderStatus>(), Ok(OrderStatus::Paid));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_round_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Canceled).unwrap(),
            "\"canceled\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, OrderStatus::Unpaid);
    }

    #[test]
    fn test_notification_templates() {
        assert_eq!(
            OrderStatus::Paid
                .notification_template()
                .map(NotificationTemplate::template_message_id),
            Some(5)
        );
        assert_eq!(OrderStatus::Done.notification_template(), None);
        assert_eq!(OrderStatus::Refund.notification_template(), None);
    }
}

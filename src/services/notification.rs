use std::collections::HashMap;

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use crate::domain::template::{RenderContext, Template};
use crate::domain::{Actor, OrderStatus};
use crate::entities::{notification, template_message};
use crate::error::{AppError, AppResult};
use crate::store::{NewNotification, OrderTransaction, Store};

/// The order a notification talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRef {
    Hotel(i32),
    Ticket(i32),
}

/// Appends the notification for an order entering `status`, if that status has one.
pub(crate) async fn record(
    tx: &mut dyn OrderTransaction,
    actor: &Actor,
    order: OrderRef,
    status: OrderStatus,
) -> AppResult<Option<notification::Model>> {
    let Some(template) = status.notification_template() else {
        return Ok(None);
    };

    let (hotel_order_id, ticket_order_id) = match order {
        OrderRef::Hotel(id) => (Some(id), None),
        OrderRef::Ticket(id) => (None, Some(id)),
    };

    let row = tx
        .create_notification(NewNotification {
            user_id: actor.user_id,
            template_message_id: template.template_message_id(),
            hotel_order_id,
            ticket_order_id,
        })
        .await?;

    tracing::debug!(
        notification_id = row.id,
        user_id = actor.user_id,
        template_message_id = row.template_message_id,
        "Notification recorded"
    );
    Ok(Some(row))
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: i32,
    pub template_message_id: i32,
    pub title: String,
    pub message: String,
    pub hotel_order_id: Option<i32>,
    pub ticket_order_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

/// The caller's notifications, newest first, rendered through their templates.
pub async fn list_notifications(store: &dyn Store, actor: &Actor) -> AppResult<Vec<NotificationView>> {
    let user = store
        .get_user(actor.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    let rows = store.list_notifications(actor.user_id).await?;
    let mut templates: HashMap<i32, (template_message::Model, Template)> = HashMap::new();
    let mut views = Vec::with_capacity(rows.len());

    for row in rows {
        if !templates.contains_key(&row.template_message_id) {
            let message = store
                .get_template_message(row.template_message_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "Template message {} is missing",
                        row.template_message_id
                    ))
                })?;
            let parsed = Template::parse(&message.content);
            templates.insert(row.template_message_id, (message, parsed));
        }
        let Some((message, template)) = templates.get(&row.template_message_id) else {
            continue;
        };

        let order_code = order_code(store, actor, &row).await?;
        let rendered = template.render(&RenderContext {
            user_name: &user.full_name,
            order_code: order_code.as_deref(),
        });

        views.push(NotificationView {
            id: row.id,
            template_message_id: row.template_message_id,
            title: message.title.clone(),
            message: rendered,
            hotel_order_id: row.hotel_order_id,
            ticket_order_id: row.ticket_order_id,
            created_at: row.created_at,
        });
    }

    Ok(views)
}

async fn order_code(
    store: &dyn Store,
    actor: &Actor,
    row: &notification::Model,
) -> AppResult<Option<String>> {
    if let Some(id) = row.hotel_order_id.filter(|id| *id > 0) {
        return Ok(store
            .get_hotel_order(id, actor)
            .await?
            .map(|o| o.hotel_order_code));
    }
    if let Some(id) = row.ticket_order_id.filter(|id| *id > 0) {
        return Ok(store
            .get_ticket_order(id, actor)
            .await?
            .map(|o| o.ticket_order_code));
    }
    Ok(None)
}

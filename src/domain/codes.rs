use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    HotelOrder,
    TicketOrder,
    BoardingTicket,
}

impl CodeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            CodeKind::HotelOrder => "hotel-order-",
            CodeKind::TicketOrder => "ticket-order-",
            CodeKind::BoardingTicket => "boarding-ticket-",
        }
    }
}

/// Opaque code: type prefix plus a random (v4) UUID in its 36-char dashed form.
pub fn generate(kind: CodeKind) -> String {
    format!("{}{}", kind.prefix(), Uuid::new_v4())
}

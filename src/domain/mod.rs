pub mod actor;
pub mod codes;
pub mod filter;
pub mod pricing;
pub mod status;
pub mod template;

pub use actor::Actor;
pub use status::OrderStatus;

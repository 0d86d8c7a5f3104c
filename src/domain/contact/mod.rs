//! Contact module - visitor submissions and their delivery outcome.

mod delivery;
mod message;

pub use delivery::{Channel, DeliveryResult};
pub use message::{escape_html, ContactMessage};

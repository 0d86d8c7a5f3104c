//! Contact handlers - the public contact form.

mod send_contact_message;

pub use send_contact_message::{
    SendContactMessageCommand, SendContactMessageHandler, SendContactMessageResult,
};

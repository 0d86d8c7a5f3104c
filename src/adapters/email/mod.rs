//! Email adapter - SMTP delivery via lettre.

mod smtp_mailer;

pub use smtp_mailer::{SmtpMailer, SmtpMailerConfig};

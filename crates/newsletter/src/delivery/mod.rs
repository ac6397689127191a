//! Concrete [`Mailer`](crate::Mailer) transports.

pub mod resend;
pub mod smtp;

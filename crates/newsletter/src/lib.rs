//! Outgoing email for The Code Times newsletter.
//!
//! - [`Mailer`] is the transport seam; [`delivery`] holds the Resend HTTP and
//!   SMTP implementations.
//! - [`templates`] renders HTML and plain-text bodies.
//! - [`Newsletter`] sends welcome, digest and new-post emails in batches.
//! - [`NotifyScheduler`] periodically announces posts nobody has been told
//!   about yet.

pub mod config;
pub mod delivery;
pub mod mailer;
pub mod notify;
pub mod service;
pub mod templates;

pub use config::{MailConfig, TransportConfig};
pub use mailer::{MailError, Mailer, OutgoingEmail};
pub use notify::NotifyScheduler;
pub use service::{DigestRequest, Newsletter, NewsletterError, NotifyOutcome, SendReport};

//! Delivery over SMTP with `lettre`.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::mailer::{MailError, Mailer, OutgoingEmail};

/// Sends multipart (plain + HTML) messages through a STARTTLS relay.
pub struct SmtpMailer {
    host: String,
    port: u16,
    user: Option<String>,
    password: Option<String>,
}

impl SmtpMailer {
    pub fn new(host: String, port: u16, user: Option<String>, password: Option<String>) -> Self {
        Self {
            host,
            port,
            user,
            password,
        }
    }
}

/// Assemble the MIME message for an [`OutgoingEmail`].
pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(email.from.parse::<Mailbox>()?)
        .subject(email.subject.as_str());

    for to in &email.to {
        builder = builder.to(to.parse::<Mailbox>()?);
    }
    for bcc in &email.bcc {
        builder = builder.bcc(bcc.parse::<Mailbox>()?);
    }
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(reply_to.parse::<Mailbox>()?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?.port(self.port);

        if let (Some(user), Some(pass)) = (&self.user, &self.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(message).await?;

        tracing::debug!(subject = %email.subject, host = %self.host, "Email sent over SMTP");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "Dr. Odera Ezenna <news@drcodezenna.com>".into(),
            to: vec!["news@drcodezenna.com".into()],
            bcc: vec!["a@example.com".into(), "b@example.com".into()],
            reply_to: None,
            subject: "Digest".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
        }
    }

    #[test]
    fn builds_multipart_message_with_display_name_sender() {
        assert!(build_message(&email()).is_ok());
    }

    #[test]
    fn rejects_unparseable_recipient() {
        let mut bad = email();
        bad.bcc.push("not-an-email".into());
        assert_matches!(build_message(&bad), Err(MailError::Address(_)));
    }
}

//! Newsletter configuration loaded from environment variables.

use std::sync::Arc;

use crate::delivery::resend::ResendMailer;
use crate::delivery::smtp::SmtpMailer;
use crate::mailer::Mailer;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM: &str = "Dr. Odera Ezenna <news@drcodezenna.com>";
const DEFAULT_SITE_URL: &str = "https://drcodezenna.com";

/// Which transport to deliver through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Resend {
        api_key: String,
    },
    Smtp {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
    },
    /// No transport configured; sends are skipped.
    Disabled,
}

/// Sender identity, public site URL and transport.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from: String,
    pub reply_to: Option<String>,
    /// Public site origin used in links (`<site>/blog/<id>`).
    pub site_url: String,
    pub transport: TransportConfig,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable         | Default                                    |
    /// |------------------|--------------------------------------------|
    /// | `MAIL_FROM`      | `Dr. Odera Ezenna <news@drcodezenna.com>`  |
    /// | `MAIL_REPLY_TO`  | none                                       |
    /// | `SITE_URL`       | `https://drcodezenna.com`                  |
    /// | `RESEND_API_KEY` | none; selects the Resend transport         |
    /// | `SMTP_HOST`      | none; selects SMTP when no Resend key      |
    /// | `SMTP_PORT`      | `587`                                      |
    /// | `SMTP_USER`      | none                                       |
    /// | `SMTP_PASSWORD`  | none                                       |
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let transport = if let Some(api_key) = non_empty("RESEND_API_KEY") {
            TransportConfig::Resend { api_key }
        } else if let Some(host) = non_empty("SMTP_HOST") {
            TransportConfig::Smtp {
                host,
                port: non_empty("SMTP_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                user: non_empty("SMTP_USER"),
                password: non_empty("SMTP_PASSWORD"),
            }
        } else {
            TransportConfig::Disabled
        };

        Self {
            from: non_empty("MAIL_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
            reply_to: non_empty("MAIL_REPLY_TO"),
            site_url: non_empty("SITE_URL")
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            transport,
        }
    }

    /// Build the configured transport, or `None` when email is disabled.
    pub fn build_mailer(&self) -> Option<Arc<dyn Mailer>> {
        match &self.transport {
            TransportConfig::Resend { api_key } => Some(Arc::new(ResendMailer::new(api_key))),
            TransportConfig::Smtp {
                host,
                port,
                user,
                password,
            } => Some(Arc::new(SmtpMailer::new(
                host.clone(),
                *port,
                user.clone(),
                password.clone(),
            ))),
            TransportConfig::Disabled => {
                tracing::warn!("No RESEND_API_KEY or SMTP_HOST set, email features are disabled");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_transport_builds_no_mailer() {
        let config = MailConfig {
            from: DEFAULT_FROM.to_string(),
            reply_to: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            transport: TransportConfig::Disabled,
        };
        assert!(config.build_mailer().is_none());
    }

    #[test]
    fn resend_transport_builds_a_mailer() {
        let config = MailConfig {
            from: DEFAULT_FROM.to_string(),
            reply_to: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            transport: TransportConfig::Resend {
                api_key: "re_test".to_string(),
            },
        };
        assert_eq!(config.build_mailer().map(|m| m.name()), Some("resend"));
    }
}

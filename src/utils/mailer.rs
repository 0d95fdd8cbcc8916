use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound notifications. Delivery itself lives outside this service.
pub trait Mailer: Send + Sync {
    fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Writes every message to the log instead of delivering it.
pub struct LogMailer {
    pub from: String,
}

impl Mailer for LogMailer {
    fn send(&self, email: Email) -> Result<(), MailError> {
        log::info!(
            "Mail from {} to {}: {}\n{}",
            self.from,
            email.to,
            email.subject,
            email.html
        );
        Ok(())
    }
}

/// Keeps sent mail in memory; used by tests to inspect notifications.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
}

impl MemoryMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, email: Email) -> Result<(), MailError> {
        self.sent
            .lock()
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .push(email);
        Ok(())
    }
}

pub fn verification_email(to: &str, verification_url: &str) -> Email {
    Email {
        to: to.to_string(),
        subject: "Please verify your email".to_string(),
        html: format!(
            "<p>Thank you for registering!</p>\
             <p>Please click <a href=\"{}\">this link</a> to verify your email and activate your account.</p>",
            verification_url
        ),
    }
}

pub fn subscription_email(
    admin_email: &str,
    user_email: &str,
    plan: &str,
    price: &str,
    category: &str,
) -> Email {
    Email {
        to: admin_email.to_string(),
        subject: "New Subscription Chosen".to_string(),
        html: format!(
            "<p>User <strong>{}</strong> has chosen a new subscription plan.</p>\
             <p><strong>Training Category:</strong> {}</p>\
             <p><strong>Plan:</strong> {}</p>\
             <p><strong>Price:</strong> {}</p>",
            user_email, category, plan, price
        ),
    }
}

/// Failures are logged; callers never fail a request over a notification.
pub fn notify(mailer: &dyn Mailer, email: Email) {
    let to = email.to.clone();
    if let Err(e) = mailer.send(email) {
        log::error!("Could not notify {}: {}", to, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingMailer;

    impl Mailer for FailingMailer {
        fn send(&self, _email: Email) -> Result<(), MailError> {
            Err(MailError::Delivery("smtp down".into()))
        }
    }

    #[test]
    fn verification_email_contains_link() {
        let mail = verification_email("u@example.com", "http://api/verify?token=abc");
        assert_eq!(mail.to, "u@example.com");
        assert!(mail.html.contains("http://api/verify?token=abc"));
    }

    #[test]
    fn memory_mailer_records() {
        let mailer = MemoryMailer::default();
        notify(&mailer, subscription_email("coach@x", "u@x", "Gold", "49", "Strength"));
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "coach@x");
        assert!(sent[0].html.contains("Strength"));
    }

    #[test]
    fn notify_swallows_failures() {
        notify(&FailingMailer, verification_email("u@x", "link"));
    }
}

// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Outbound email via the provider's HTTP API. One call per message, no
//! retries; a failed send is reported to the caller and nothing else.

use serde::Serialize;
use thiserror::Error;

const EMAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email provider rejected the message: {0}")]
    Provider(String),
}

#[derive(Debug, Serialize)]
struct EmailMessage<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    text: String,
}

pub struct Mailer {
    http: reqwest::Client,
    api_key: String,
    from_address: String,
}

impl Mailer {
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from_address,
        }
    }

    /// Send an event invitation to a friend's email address.
    pub async fn send_event_invitation(
        &self,
        to: &str,
        friend_name: &str,
        event_name: &str,
        event_date: Option<&str>,
    ) -> Result<(), MailerError> {
        let message = EmailMessage {
            from: &self.from_address,
            to: vec![to],
            subject: format!("You're invited: {}", event_name),
            text: invitation_text(friend_name, event_name, event_date),
        };

        let resp = self
            .http
            .post(EMAIL_API_URL)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MailerError::Provider(body));
        }
        Ok(())
    }
}

fn invitation_text(friend_name: &str, event_name: &str, event_date: Option<&str>) -> String {
    let when = event_date.map(|d| format!(" on {}", d)).unwrap_or_default();
    format!(
        "Hi {},\n\nYou've been invited to {}{}.\n\nSee you there!",
        friend_name, event_name, when
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_body_mentions_event_and_date() {
        let text = invitation_text("Ana", "Picnic", Some("2026-03-15"));
        assert!(text.contains("Ana"));
        assert!(text.contains("Picnic"));
        assert!(text.contains("on 2026-03-15"));
    }

    #[test]
    fn invitation_body_without_date() {
        let text = invitation_text("Ben", "Movie night", None);
        assert!(text.contains("invited to Movie night."));
    }
}

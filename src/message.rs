//! Assembled message representation and the assembly step.

use crate::address::{Address, Mailbox};
use crate::error::{Error, Result};
use crate::mail::Mail;

/// Body content of an assembled message.
///
/// The variant decides the MIME structure: a single part for `Plain` and
/// `Html`, multipart/alternative for `Alternative`. A transport matching on
/// this enum cannot reach an invalid combination such as an alternative
/// body missing one of its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    /// Plain text only (`text/plain`).
    Plain(String),
    /// HTML only (`text/html`).
    Html(String),
    /// Both renderings of the same content. On the wire the text part is
    /// emitted before the HTML part, so clients pick the most capable part
    /// they support.
    Alternative {
        /// Plain text rendering.
        text: String,
        /// HTML rendering.
        html: String,
    },
}

impl Body {
    /// Returns the MIME content type this body renders as.
    #[must_use]
    pub const fn content_kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "text/plain",
            Self::Html(_) => "text/html",
            Self::Alternative { .. } => "multipart/alternative",
        }
    }
}

/// A validated, immutable message ready for handoff to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Sender mailbox.
    pub from: Mailbox,
    /// To recipients, in the order they were added.
    pub to: Vec<Mailbox>,
    /// Cc recipients (may be empty).
    pub cc: Vec<Mailbox>,
    /// Bcc recipients (may be empty, never rendered in headers).
    pub bcc: Vec<Mailbox>,
    /// Subject line. `None` renders as an absent header, not an error.
    pub subject: Option<String>,
    /// Body content.
    pub body: Body,
}

impl Message {
    /// Validates the accumulated builder state and materializes a message.
    ///
    /// Pure and non-consuming: the mail is not mutated, and assembling the
    /// same unmodified mail twice yields field-for-field identical messages.
    ///
    /// # Errors
    ///
    /// Checked in order, first failure reported:
    /// [`Error::MissingSender`] if no sender was set,
    /// [`Error::MissingRecipient`] if no To recipient was added (Cc/Bcc-only
    /// mails are rejected), and [`Error::MissingBody`] if neither body is
    /// present and non-empty.
    pub fn assemble(mail: &Mail) -> Result<Self> {
        let Some(from) = mail.from.clone() else {
            return Err(Error::MissingSender);
        };

        if mail.to.is_empty() {
            return Err(Error::MissingRecipient);
        }

        let body = match (mail.text_body(), mail.html_body()) {
            (Some(text), None) => Body::Plain(text.to_string()),
            (None, Some(html)) => Body::Html(html.to_string()),
            (Some(text), Some(html)) => Body::Alternative {
                text: text.to_string(),
                html: html.to_string(),
            },
            (None, None) => return Err(Error::MissingBody),
        };

        tracing::debug!(
            kind = body.content_kind(),
            recipients = mail.to.len() + mail.cc.len() + mail.bcc.len(),
            "assembled message"
        );

        Ok(Self {
            from,
            to: mail.to.clone(),
            cc: mail.cc.clone(),
            bcc: mail.bcc.clone(),
            subject: mail.subject.clone(),
            body,
        })
    }

    /// Returns every recipient address (to, cc, then bcc) for the SMTP
    /// envelope. Bcc addresses are delivered to even though they never
    /// appear in rendered headers.
    #[must_use]
    pub fn envelope_recipients(&self) -> Vec<Address> {
        self.to
            .iter()
            .chain(&self.cc)
            .chain(&self.bcc)
            .map(|mailbox| mailbox.address.clone())
            .collect()
    }
}

impl Mail {
    /// Validates and assembles this mail into a [`Message`].
    ///
    /// Equivalent to [`Message::assemble`]; provided so builder chains can
    /// end in one call.
    ///
    /// # Errors
    ///
    /// See [`Message::assemble`].
    pub fn assemble(&self) -> Result<Message> {
        Message::assemble(self)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    fn base_mail() -> Mail {
        Mail::new()
            .from("a@x.com")
            .unwrap()
            .to("b@x.com")
            .unwrap()
    }

    #[test]
    fn test_missing_sender() {
        let mail = Mail::new().to("b@x.com").unwrap().text("hello");
        assert!(matches!(mail.assemble(), Err(Error::MissingSender)));
    }

    #[test]
    fn test_missing_sender_takes_priority() {
        // No sender, no recipient, no body: sender is reported first.
        assert!(matches!(Mail::new().assemble(), Err(Error::MissingSender)));
    }

    #[test]
    fn test_cc_only_is_missing_recipient() {
        let mail = Mail::new()
            .from("a@x.com")
            .unwrap()
            .cc("c@x.com")
            .unwrap()
            .text("hello");
        assert!(matches!(mail.assemble(), Err(Error::MissingRecipient)));
    }

    #[test]
    fn test_missing_body() {
        assert!(matches!(base_mail().assemble(), Err(Error::MissingBody)));
    }

    #[test]
    fn test_empty_bodies_are_missing() {
        let mail = base_mail().text("").html("");
        assert!(matches!(mail.assemble(), Err(Error::MissingBody)));
    }

    #[test]
    fn test_plain_text_assembly() {
        let message = base_mail().text("hello").assemble().unwrap();
        assert_eq!(message.from.address.as_str(), "a@x.com");
        assert_eq!(message.to.len(), 1);
        assert_eq!(message.to[0].address.as_str(), "b@x.com");
        assert_eq!(message.body, Body::Plain("hello".to_string()));
    }

    #[test]
    fn test_html_only_assembly() {
        let message = base_mail().html("<p>hi</p>").assemble().unwrap();
        assert_eq!(message.body, Body::Html("<p>hi</p>".to_string()));
    }

    #[test]
    fn test_both_bodies_become_alternative() {
        let message = base_mail().text("hello").html("<p>hi</p>").assemble().unwrap();
        assert_eq!(
            message.body,
            Body::Alternative {
                text: "hello".to_string(),
                html: "<p>hi</p>".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_html_falls_back_to_plain() {
        let message = base_mail().text("hello").html("").assemble().unwrap();
        assert_eq!(message.body, Body::Plain("hello".to_string()));
    }

    #[test]
    fn test_subject_passes_through_absent() {
        let message = base_mail().text("hello").assemble().unwrap();
        assert!(message.subject.is_none());
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let mail = base_mail()
            .cc("c@x.com")
            .unwrap()
            .subject("subj")
            .text("hello")
            .html("<p>hi</p>");
        let first = mail.assemble().unwrap();
        let second = mail.assemble().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_envelope_recipients_union_in_role_order() {
        let message = base_mail()
            .cc("c@x.com")
            .unwrap()
            .bcc("d@x.com")
            .unwrap()
            .text("hello")
            .assemble()
            .unwrap();
        let envelope = message.envelope_recipients();
        let addrs: Vec<&str> = envelope.iter().map(Address::as_str).collect();
        assert_eq!(addrs, vec!["b@x.com", "c@x.com", "d@x.com"]);
    }

    #[test]
    fn test_body_content_kind() {
        assert_eq!(Body::Plain(String::new()).content_kind(), "text/plain");
        assert_eq!(Body::Html(String::new()).content_kind(), "text/html");
        assert_eq!(
            Body::Alternative {
                text: String::new(),
                html: String::new(),
            }
            .content_kind(),
            "multipart/alternative"
        );
    }
}

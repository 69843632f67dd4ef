//! Fluent mail construction.

use crate::address::{IntoMailbox, Mailbox};
use crate::error::Result;

/// Accumulates the parts of an outgoing email through chained calls.
///
/// Sender, subject and bodies have last-write-wins semantics; each recipient
/// role (`to`, `cc`, `bcc`) accumulates in call order. The builder never
/// rejects a call for incompleteness: a `Mail` may sit in any partial state,
/// and required fields are checked only by [`Mail::assemble`]. Address
/// arguments given as raw strings are the one exception, since they are
/// parsed eagerly and fail at the call site.
///
/// ```ignore
/// use outmail::Mail;
///
/// let message = Mail::new()
///     .from("alice@example.com")?
///     .to("bob@example.com")?
///     .subject("Greetings")
///     .text("Hello, Bob!")
///     .assemble()?;
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mail {
    pub(crate) from: Option<Mailbox>,
    pub(crate) to: Vec<Mailbox>,
    pub(crate) cc: Vec<Mailbox>,
    pub(crate) bcc: Vec<Mailbox>,
    pub(crate) subject: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) html: Option<String>,
}

impl Mail {
    /// Creates a new empty mail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender, replacing any previously set sender.
    ///
    /// # Errors
    ///
    /// Returns an error if a raw address string cannot be parsed.
    #[allow(clippy::should_implement_trait)]
    pub fn from(mut self, from: impl IntoMailbox) -> Result<Self> {
        self.from = Some(from.into_mailbox()?);
        Ok(self)
    }

    /// Adds a To recipient. Repeated calls accumulate; earlier recipients
    /// are never replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if a raw address string cannot be parsed.
    pub fn to(mut self, to: impl IntoMailbox) -> Result<Self> {
        self.to.push(to.into_mailbox()?);
        Ok(self)
    }

    /// Adds a Cc recipient. Repeated calls accumulate.
    ///
    /// # Errors
    ///
    /// Returns an error if a raw address string cannot be parsed.
    pub fn cc(mut self, cc: impl IntoMailbox) -> Result<Self> {
        self.cc.push(cc.into_mailbox()?);
        Ok(self)
    }

    /// Adds a Bcc recipient. Repeated calls accumulate.
    ///
    /// # Errors
    ///
    /// Returns an error if a raw address string cannot be parsed.
    pub fn bcc(mut self, bcc: impl IntoMailbox) -> Result<Self> {
        self.bcc.push(bcc.into_mailbox()?);
        Ok(self)
    }

    /// Sets the subject line, replacing any previous value. Any string is
    /// accepted; no escaping or validation happens at this layer.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the plain text body, replacing any previous value. An empty
    /// string counts as no body at assembly.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the HTML body, replacing any previous value. An empty string
    /// counts as no body at assembly.
    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub(crate) fn text_body(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub(crate) fn html_body(&self) -> Option<&str> {
        self.html.as_deref().filter(|h| !h.is_empty())
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
    use crate::error::Error;

    #[test]
    fn test_from_overwrites() {
        let mail = Mail::new()
            .from("first@example.com")
            .unwrap()
            .from("second@example.com")
            .unwrap();
        assert_eq!(
            mail.from.unwrap().address.as_str(),
            "second@example.com"
        );
    }

    #[test]
    fn test_to_accumulates_in_order() {
        let mail = Mail::new()
            .to("a@example.com")
            .unwrap()
            .to("b@example.com")
            .unwrap();
        let addrs: Vec<&str> = mail.to.iter().map(|m| m.address.as_str()).collect();
        assert_eq!(addrs, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_cc_and_bcc_accumulate() {
        let mail = Mail::new()
            .cc("c1@example.com")
            .unwrap()
            .cc("c2@example.com")
            .unwrap()
            .bcc("hidden@example.com")
            .unwrap();
        assert_eq!(mail.cc.len(), 2);
        assert_eq!(mail.bcc.len(), 1);
    }

    #[test]
    fn test_subject_overwrites() {
        let mail = Mail::new().subject("first").subject("second");
        assert_eq!(mail.subject.as_deref(), Some("second"));
    }

    #[test]
    fn test_text_and_html_overwrite() {
        let mail = Mail::new().text("one").text("two").html("<p>1</p>").html("<p>2</p>");
        assert_eq!(mail.text.as_deref(), Some("two"));
        assert_eq!(mail.html.as_deref(), Some("<p>2</p>"));
    }

    #[test]
    fn test_unparseable_from_fails_at_call_site() {
        assert!(matches!(
            Mail::new().from("not-an-email"),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_empty_recipient_fails_at_call_site() {
        assert!(matches!(
            Mail::new().to(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_named_recipient_string() {
        let mail = Mail::new().to("Bob <bob@example.com>").unwrap();
        assert_eq!(mail.to[0].name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_empty_bodies_count_as_absent() {
        let mail = Mail::new().text("").html("");
        assert!(mail.text_body().is_none());
        assert!(mail.html_body().is_none());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn recipients_accumulate_in_call_order(
            locals in proptest::collection::vec("[a-z]{1,10}", 1..8),
        ) {
            let mut mail = Mail::new();
            for local in &locals {
                mail = mail.to(format!("{local}@example.com")).unwrap();
            }
            let got: Vec<String> = mail
                .to
                .iter()
                .map(|m| m.address.as_str().to_string())
                .collect();
            let want: Vec<String> = locals
                .iter()
                .map(|local| format!("{local}@example.com"))
                .collect();
            prop_assert_eq!(got, want);
        }

        #[test]
        fn last_sender_wins(
            locals in proptest::collection::vec("[a-z]{1,10}", 1..6),
        ) {
            let mut mail = Mail::new();
            for local in &locals {
                mail = mail.from(format!("{local}@example.com")).unwrap();
            }
            let last = locals.last().unwrap();
            let got = mail.from.unwrap();
            let want = format!("{last}@example.com");
            prop_assert_eq!(got.address.as_str(), want.as_str());
        }
    }
}

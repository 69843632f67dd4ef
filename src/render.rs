//! RFC 5322 serialization of assembled messages.

use crate::address::Mailbox;
use crate::message::{Body, Message};
use chrono::Utc;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Picks a multipart boundary that occurs in neither body part.
fn boundary_for(text: &str, html: &str) -> String {
    loop {
        let n = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
        let boundary = format!("=_outmail_{}_{n}", std::process::id());
        if !text.contains(&boundary) && !html.contains(&boundary) {
            return boundary;
        }
    }
}

fn mailbox_list(mailboxes: &[Mailbox]) -> String {
    mailboxes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Message {
    /// Serializes the message to RFC 5322 text suitable for an SMTP `DATA`
    /// payload.
    ///
    /// Headers cover `From`, `To`, `Cc` (when non-empty), `Subject` (when
    /// present), `Date` and `MIME-Version`. `Bcc` is never rendered; those
    /// recipients travel only in the envelope
    /// ([`Message::envelope_recipients`]). An [`Body::Alternative`] body is
    /// written as multipart/alternative with the plain text part before the
    /// HTML part.
    #[must_use]
    pub fn to_rfc5322(&self) -> String {
        let mut out = String::new();

        let _ = write!(out, "From: {}\r\n", self.from);
        let _ = write!(out, "To: {}\r\n", mailbox_list(&self.to));

        if !self.cc.is_empty() {
            let _ = write!(out, "Cc: {}\r\n", mailbox_list(&self.cc));
        }

        if let Some(subject) = &self.subject {
            let _ = write!(out, "Subject: {subject}\r\n");
        }

        let _ = write!(out, "Date: {}\r\n", Utc::now().to_rfc2822());
        out.push_str("MIME-Version: 1.0\r\n");

        match &self.body {
            Body::Plain(text) => {
                out.push_str("Content-Type: text/plain; charset=utf-8\r\n\r\n");
                out.push_str(text);
            }
            Body::Html(html) => {
                out.push_str("Content-Type: text/html; charset=utf-8\r\n\r\n");
                out.push_str(html);
            }
            Body::Alternative { text, html } => {
                let boundary = boundary_for(text, html);
                tracing::debug!(%boundary, "rendering multipart/alternative");

                let _ = write!(
                    out,
                    "Content-Type: multipart/alternative; boundary=\"{boundary}\"\r\n\r\n"
                );

                // Least capable rendering first, per multipart/alternative.
                let _ = write!(out, "--{boundary}\r\n");
                out.push_str("Content-Type: text/plain; charset=utf-8\r\n\r\n");
                out.push_str(text);
                let _ = write!(out, "\r\n--{boundary}\r\n");
                out.push_str("Content-Type: text/html; charset=utf-8\r\n\r\n");
                out.push_str(html);
                let _ = write!(out, "\r\n--{boundary}--\r\n");
            }
        }

        out
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
    use crate::mail::Mail;

    fn base_mail() -> Mail {
        Mail::new()
            .from("Alice <a@x.com>")
            .unwrap()
            .to("b@x.com")
            .unwrap()
    }

    #[test]
    fn test_plain_message_headers_and_body() {
        let rendered = base_mail()
            .subject("Hi")
            .text("hello")
            .assemble()
            .unwrap()
            .to_rfc5322();

        assert!(rendered.starts_with("From: Alice <a@x.com>\r\n"));
        assert!(rendered.contains("To: b@x.com\r\n"));
        assert!(rendered.contains("Subject: Hi\r\n"));
        assert!(rendered.contains("MIME-Version: 1.0\r\n"));
        assert!(rendered.contains("Content-Type: text/plain; charset=utf-8\r\n\r\nhello"));
    }

    #[test]
    fn test_html_message_content_type() {
        let rendered = base_mail()
            .html("<p>hi</p>")
            .assemble()
            .unwrap()
            .to_rfc5322();

        assert!(rendered.contains("Content-Type: text/html; charset=utf-8\r\n\r\n<p>hi</p>"));
    }

    #[test]
    fn test_absent_subject_is_omitted() {
        let rendered = base_mail().text("hello").assemble().unwrap().to_rfc5322();
        assert!(!rendered.contains("Subject:"));
    }

    #[test]
    fn test_bcc_never_rendered() {
        let rendered = base_mail()
            .bcc("hidden@x.com")
            .unwrap()
            .text("hello")
            .assemble()
            .unwrap()
            .to_rfc5322();

        assert!(!rendered.contains("hidden@x.com"));
        assert!(!rendered.contains("Bcc:"));
    }

    #[test]
    fn test_cc_rendered_when_present() {
        let rendered = base_mail()
            .cc("c1@x.com")
            .unwrap()
            .cc("c2@x.com")
            .unwrap()
            .text("hello")
            .assemble()
            .unwrap()
            .to_rfc5322();

        assert!(rendered.contains("Cc: c1@x.com, c2@x.com\r\n"));
    }

    #[test]
    fn test_alternative_orders_text_before_html() {
        let rendered = base_mail()
            .text("hello")
            .html("<p>hi</p>")
            .assemble()
            .unwrap()
            .to_rfc5322();

        assert!(rendered.contains("Content-Type: multipart/alternative; boundary="));
        let text_pos = rendered.find("Content-Type: text/plain").unwrap();
        let html_pos = rendered.find("Content-Type: text/html").unwrap();
        assert!(text_pos < html_pos);
        assert!(rendered.ends_with("--\r\n"));
    }

    #[test]
    fn test_alternative_boundary_is_consistent() {
        let rendered = base_mail()
            .text("hello")
            .html("<p>hi</p>")
            .assemble()
            .unwrap()
            .to_rfc5322();

        let start = rendered.find("boundary=\"").unwrap() + "boundary=\"".len();
        let end = rendered[start..].find('"').unwrap() + start;
        let boundary = &rendered[start..end];

        // Two part delimiters plus the closing delimiter.
        assert_eq!(rendered.matches(&format!("--{boundary}")).count(), 3);
        assert!(rendered.contains(&format!("--{boundary}--\r\n")));
    }
}

//! Transport contract for assembled messages.

use crate::address::Address;
use crate::message::Message;

/// A delivery mechanism that accepts assembled messages.
///
/// The envelope lists every address the message should be delivered to
/// (to, cc and bcc), regardless of which headers are rendered. Connection,
/// authentication and TLS concerns live entirely behind this trait; the
/// message model never drives a transport itself.
pub trait Transport {
    /// Error reported on delivery failure.
    type Error;

    /// Delivers one message to the given envelope recipients.
    ///
    /// # Errors
    ///
    /// Returns the transport's own error when delivery fails.
    fn send(&mut self, message: &Message, envelope: &[Address]) -> Result<(), Self::Error>;
}

/// Transport that records messages in memory instead of delivering them.
///
/// Useful in tests and dry runs for inspecting what would have been sent.
#[derive(Debug, Default)]
pub struct StubTransport {
    sent: Vec<(Message, Vec<Address>)>,
}

impl StubTransport {
    /// Creates an empty stub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, with their envelopes.
    #[must_use]
    pub fn sent(&self) -> &[(Message, Vec<Address>)] {
        &self.sent
    }
}

impl Transport for StubTransport {
    type Error = std::convert::Infallible;

    fn send(&mut self, message: &Message, envelope: &[Address]) -> Result<(), Self::Error> {
        self.sent.push((message.clone(), envelope.to_vec()));
        Ok(())
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
    use crate::mail::Mail;

    #[test]
    fn test_stub_records_message_and_envelope() {
        let message = Mail::new()
            .from("a@x.com")
            .unwrap()
            .to("b@x.com")
            .unwrap()
            .cc("c@x.com")
            .unwrap()
            .bcc("d@x.com")
            .unwrap()
            .text("hello")
            .assemble()
            .unwrap();

        let mut transport = StubTransport::new();
        transport
            .send(&message, &message.envelope_recipients())
            .unwrap();

        assert_eq!(transport.sent().len(), 1);
        let (recorded, envelope) = &transport.sent()[0];
        assert_eq!(recorded, &message);
        let addrs: Vec<&str> = envelope.iter().map(Address::as_str).collect();
        assert_eq!(addrs, vec!["b@x.com", "c@x.com", "d@x.com"]);
    }
}

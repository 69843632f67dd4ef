//! # outmail
//!
//! Fluent construction and assembly of outgoing email messages.
//!
//! ## Features
//!
//! - **Fluent building**: Chain `from`, `to`, `cc`, `bcc`, `subject`,
//!   `text` and `html` calls to describe a message
//! - **Deferred validation**: Accumulate freely, validate completeness at
//!   assembly
//! - **Body composition**: Single-part text or HTML, or
//!   multipart/alternative when both are set
//! - **Rendering**: RFC 5322 serialization for an SMTP `DATA` payload
//! - **Transport seam**: A [`Transport`] trait for delivery backends, with
//!   an in-memory stub for tests
//!
//! ## Quick Start
//!
//! ```ignore
//! use outmail::Mail;
//!
//! let message = Mail::new()
//!     .from("Alice <alice@example.com>")?
//!     .to("bob@example.com")?
//!     .cc("carol@example.com")?
//!     .subject("Greetings")
//!     .text("Hello, Bob!")
//!     .html("<p>Hello, <b>Bob</b>!</p>")
//!     .assemble()?; // multipart/alternative
//!
//! let payload = message.to_rfc5322();
//! let envelope = message.envelope_recipients();
//! ```
//!
//! ## Building rules
//!
//! Address arguments accept anything [`IntoMailbox`]: a prebuilt
//! [`Mailbox`], an [`Address`], or a raw string (bare `local@domain` or
//! `Display Name <local@domain>`). Raw strings are parsed eagerly and an
//! unparseable one fails at the builder call, never at assembly.
//!
//! The sender, subject and body setters overwrite; the recipient roles
//! accumulate in call order. Completeness (a sender, at least one To
//! recipient, a non-empty body) is checked only by [`Mail::assemble`].
//!
//! ## Errors
//!
//! ```ignore
//! use outmail::{Error, Mail};
//!
//! // Unparseable addresses fail at the call site.
//! assert!(matches!(Mail::new().from("nope"), Err(Error::InvalidAddress(_))));
//!
//! // Completeness failures surface only at assembly.
//! let mail = Mail::new().from("a@x.com")?.cc("c@x.com")?.text("hi");
//! assert!(matches!(mail.assemble(), Err(Error::MissingRecipient)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod error;
mod mail;
mod message;
mod render;
mod transport;

pub use address::{Address, IntoMailbox, Mailbox};
pub use error::{Error, Result};
pub use mail::Mail;
pub use message::{Body, Message};
pub use transport::{StubTransport, Transport};

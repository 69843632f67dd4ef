//! Email address types.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A syntactically valid email address (`local@domain`).
///
/// Construction validates the string; once built, the address is immutable
/// and guaranteed well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Address(String);

impl Address {
    /// Creates a new address from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the string is empty, or
    /// [`Error::InvalidAddress`] if it is not a valid `local@domain` form.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        Self::validate(&addr)?;
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates an email address (basic validation).
    fn validate(addr: &str) -> Result<()> {
        if addr.is_empty() {
            return Err(Error::InvalidArgument("address must not be empty".into()));
        }

        if addr
            .chars()
            .any(|c| c.is_whitespace() || c == '<' || c == '>')
        {
            return Err(Error::InvalidAddress(
                "Address must not contain whitespace or angle brackets".into(),
            ));
        }

        let parts: Vec<&str> = addr.split('@').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidAddress(
                "Address must have exactly one @".into(),
            ));
        }

        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(Error::InvalidAddress(
                "Local and domain parts cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// Mailbox (optional display name + address).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mailbox {
    /// Display name (optional).
    pub name: Option<String>,
    /// Email address.
    pub address: Address,
}

impl Mailbox {
    /// Creates a new mailbox with just an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: None,
            address: Address::new(address)?,
        })
    }

    /// Creates a new mailbox with a display name and address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty, or an error
    /// if the address is invalid.
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "display name must not be empty".into(),
            ));
        }
        Ok(Self {
            name: Some(name),
            address: Address::new(address)?,
        })
    }

    /// Parses a mailbox from either a bare address or the
    /// `Display Name <local@domain>` form.
    ///
    /// # Errors
    ///
    /// Returns an error if the address portion is invalid.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(rest) = s.strip_suffix('>') {
            let Some((name, addr)) = rest.rsplit_once('<') else {
                return Err(Error::InvalidAddress(
                    "Unbalanced angle brackets in mailbox".into(),
                ));
            };
            let name = name.trim().trim_matches('"').trim();
            return Ok(Self {
                name: (!name.is_empty()).then(|| name.to_string()),
                address: Address::new(addr.trim())?,
            });
        }

        Ok(Self {
            name: None,
            address: Address::new(s)?,
        })
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl FromStr for Mailbox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Conversion into a [`Mailbox`] for builder arguments.
///
/// Implemented for [`Mailbox`], [`Address`], `&str` and `String`. String
/// forms are parsed eagerly, so an unparseable address fails at the builder
/// call that supplied it, not at assembly.
pub trait IntoMailbox {
    /// Converts this value into a mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be parsed as a mailbox.
    fn into_mailbox(self) -> Result<Mailbox>;
}

impl IntoMailbox for Mailbox {
    fn into_mailbox(self) -> Result<Mailbox> {
        Ok(self)
    }
}

impl IntoMailbox for Address {
    fn into_mailbox(self) -> Result<Mailbox> {
        Ok(Mailbox {
            name: None,
            address: self,
        })
    }
}

impl IntoMailbox for &str {
    fn into_mailbox(self) -> Result<Mailbox> {
        Mailbox::parse(self)
    }
}

impl IntoMailbox for String {
    fn into_mailbox(self) -> Result<Mailbox> {
        Mailbox::parse(&self)
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

    #[test]
    fn test_valid_address() {
        let addr = Address::new("user@example.com").unwrap();
        assert_eq!(addr.as_str(), "user@example.com");
    }

    #[test]
    fn test_invalid_address_no_at() {
        assert!(matches!(
            Address::new("userexample.com"),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_empty_address_is_invalid_argument() {
        assert!(matches!(
            Address::new(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_address_empty_local() {
        assert!(Address::new("@example.com").is_err());
    }

    #[test]
    fn test_invalid_address_empty_domain() {
        assert!(Address::new("user@").is_err());
    }

    #[test]
    fn test_invalid_address_whitespace() {
        assert!(Address::new("us er@example.com").is_err());
    }

    #[test]
    fn test_invalid_address_angle_bracket() {
        assert!(Address::new("<user@example.com").is_err());
    }

    #[test]
    fn test_mailbox_new() {
        let mailbox = Mailbox::new("user@example.com").unwrap();
        assert_eq!(mailbox.address.as_str(), "user@example.com");
        assert!(mailbox.name.is_none());
    }

    #[test]
    fn test_mailbox_with_name() {
        let mailbox = Mailbox::with_name("John Doe", "john@example.com").unwrap();
        assert_eq!(mailbox.name.as_deref(), Some("John Doe"));
        assert_eq!(mailbox.address.as_str(), "john@example.com");
    }

    #[test]
    fn test_mailbox_with_empty_name() {
        assert!(matches!(
            Mailbox::with_name("", "john@example.com"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mailbox_parse_bare() {
        let mailbox = Mailbox::parse("user@example.com").unwrap();
        assert!(mailbox.name.is_none());
        assert_eq!(mailbox.address.as_str(), "user@example.com");
    }

    #[test]
    fn test_mailbox_parse_named() {
        let mailbox = Mailbox::parse("John Doe <john@example.com>").unwrap();
        assert_eq!(mailbox.name.as_deref(), Some("John Doe"));
        assert_eq!(mailbox.address.as_str(), "john@example.com");
    }

    #[test]
    fn test_mailbox_parse_quoted_name() {
        let mailbox = Mailbox::parse("\"Doe, John\" <john@example.com>").unwrap();
        assert_eq!(mailbox.name.as_deref(), Some("Doe, John"));
    }

    #[test]
    fn test_mailbox_parse_unbalanced() {
        assert!(Mailbox::parse("John john@example.com>").is_err());
    }

    #[test]
    fn test_mailbox_display_round_trip() {
        let mailbox = Mailbox::with_name("John Doe", "john@example.com").unwrap();
        let parsed = Mailbox::parse(&mailbox.to_string()).unwrap();
        assert_eq!(parsed, mailbox);
    }

    #[test]
    fn test_address_from_str() {
        let addr: Address = "user@example.com".parse().unwrap();
        assert_eq!(addr.as_str(), "user@example.com");
    }

    #[test]
    fn test_into_mailbox_for_address() {
        let addr = Address::new("user@example.com").unwrap();
        let mailbox = addr.into_mailbox().unwrap();
        assert!(mailbox.name.is_none());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_addresses_survive_construction(
            local in "[a-z][a-z0-9.]{0,15}",
            domain in "[a-z]{1,12}\\.[a-z]{2,4}",
        ) {
            let raw = format!("{local}@{domain}");
            let addr = Address::new(raw.clone()).unwrap();
            prop_assert_eq!(addr.as_str(), raw.as_str());
        }

        #[test]
        fn named_mailboxes_round_trip(
            name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            local in "[a-z]{1,10}",
            domain in "[a-z]{1,10}\\.[a-z]{2,3}",
        ) {
            let mailbox = Mailbox::with_name(name, format!("{local}@{domain}")).unwrap();
            let parsed = Mailbox::parse(&mailbox.to_string()).unwrap();
            prop_assert_eq!(parsed, mailbox);
        }
    }
}

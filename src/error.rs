//! Error types for mail construction and assembly.

/// Result type alias for mail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or assembling a mail message.
///
/// Builder-time errors (`InvalidArgument`, `InvalidAddress`) surface at the
/// call that supplied the bad input. Completeness errors (`MissingSender`,
/// `MissingRecipient`, `MissingBody`) surface only at assembly. All errors
/// are returned synchronously; nothing here is retried or logged internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input was empty where a value is mandatory.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A raw string could not be parsed as an email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Assembly requires a sender.
    #[error("Mail has no sender")]
    MissingSender,

    /// Assembly requires at least one To recipient.
    #[error("Mail has no To recipient")]
    MissingRecipient,

    /// Assembly requires a non-empty text or HTML body.
    #[error("Mail has no body content")]
    MissingBody,
}

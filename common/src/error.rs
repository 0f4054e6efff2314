use thiserror::Error;

/// Raised when an input that looks like a CIDR block cannot be expanded.
///
/// Any of these aborts resolution of the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("invalid IP in CIDR '{input}'")]
    InvalidAddress { input: String },

    #[error("invalid prefix in CIDR '{input}': {reason}")]
    InvalidPrefix { input: String, reason: String },

    #[error("CIDR block '{input}' is too large to expand (minimum IPv6 prefix is /{min_prefix})")]
    TooLarge { input: String, min_prefix: u8 },
}

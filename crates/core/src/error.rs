use crate::mismatch::Path;

/// Errors from a depth-limited [`Matcher`](crate::Matcher).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The signature nests deeper than the matcher allows. Reported at the
    /// first node past the limit.
    #[error("signature nesting exceeds depth limit {limit} at {path}")]
    DepthLimitExceeded { limit: usize, path: Path },
}

/// Errors converting JSON into values or signatures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A JSON number that has no exact decimal representation in range.
    #[error("invalid number at {path}: {text}")]
    InvalidNumber { path: Path, text: String },

    /// A directive object naming something other than `any` or `absent`.
    #[error("unknown directive '{name}' at {path}")]
    UnknownDirective { path: Path, name: String },

    /// The `any` directive appeared in data rather than in a signature.
    #[error("wildcard is only allowed in signatures (found at {path})")]
    WildcardInValue { path: Path },
}

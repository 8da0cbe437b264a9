use alloy::primitives::Address;
use alloy::transports::TransportError;

pub type Result<T> = std::result::Result<T, AsofError>;

#[derive(Debug, thiserror::Error)]
pub enum AsofError {
    #[error("Date '{0}' could not be parsed, expected YYYY-MM-DD or RFC 3339.")]
    InvalidDate(String),

    #[error("Address '{0}' is not a valid Ethereum address.")]
    InvalidAddress(String),

    #[error("Failed to parse URL: {0}. (Error: {1:?})")]
    UrlParsingFailed(String, url::ParseError),

    #[error("RPC request '{operation}' failed. (Error: {source})")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("Block {0} is not available on this node, the resolved height would be unreliable.")]
    BlockUnavailable(u64),

    #[error("Call '{call}' to token {token} failed: {reason}")]
    ContractCallFailed {
        call: &'static str,
        token: Address,
        reason: String,
    },

    #[error("Call '{call}' to token {token} returned malformed data. (Error: {source})")]
    MalformedReturnData {
        call: &'static str,
        token: Address,
        #[source]
        source: alloy::sol_types::Error,
    },
}

/// Coarse classification used at the boundary to tell "bad input" apart
/// from "try again later" and "this is not a token contract".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Transport,
    Resolution,
    ContractCall,
}

impl AsofError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate(_) | Self::InvalidAddress(_) | Self::UrlParsingFailed(..) => {
                ErrorKind::Input
            }
            Self::Transport { .. } => ErrorKind::Transport,
            Self::BlockUnavailable(_) => ErrorKind::Resolution,
            Self::ContractCallFailed { .. } | Self::MalformedReturnData { .. } => {
                ErrorKind::ContractCall
            }
        }
    }

    /// Whether a caller may reasonably retry the whole query with backoff.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AsofError::InvalidDate("tomorrow".into()).kind(),
            ErrorKind::Input
        );
        assert_eq!(
            AsofError::InvalidAddress("0x123".into()).kind(),
            ErrorKind::Input
        );
        assert_eq!(AsofError::BlockUnavailable(42).kind(), ErrorKind::Resolution);
        assert_eq!(
            AsofError::ContractCallFailed {
                call: "balanceOf",
                token: Address::ZERO,
                reason: "reverted".into(),
            }
            .kind(),
            ErrorKind::ContractCall
        );
    }

    #[test]
    fn test_only_transport_is_transient() {
        assert!(!AsofError::InvalidDate("x".into()).is_transient());
        assert!(!AsofError::BlockUnavailable(0).is_transient());
        assert!(!AsofError::ContractCallFailed {
            call: "symbol",
            token: Address::ZERO,
            reason: "no code".into(),
        }
        .is_transient());
    }
}

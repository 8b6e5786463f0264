//! Ledger helper errors.

use shimroute_core::StubError;
use thiserror::Error;

/// Failures raised by the ledger helpers.
///
/// These are dependency failures. They are returned to the handler, which
/// decides how to answer the call.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The host stub failed.
    #[error("stub error: {0}")]
    Stub(#[from] StubError),

    /// A value could not be serialised.
    #[error("error marshalling value for key \"{key}\": {source}")]
    Serialize {
        /// The ledger key being written.
        key: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be deserialised.
    #[error("error unmarshalling value of key \"{key}\": {source}")]
    Deserialize {
        /// The ledger key being read.
        key: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Nothing is stored under the key.
    #[error("key \"{0}\" not found")]
    NotFound(String),

    /// The creator bytes are not a serialized identity.
    #[error("error decoding creator identity: {0}")]
    IdentityDecode(#[from] prost::DecodeError),

    /// The creator identity holds no PEM certificate block.
    #[error("no PEM certificate in creator identity")]
    MissingPem,

    /// The PEM data could not be read.
    #[error("error reading creator PEM: {0}")]
    Pem(#[source] std::io::Error),

    /// The certificate is not valid X.509.
    #[error("error parsing creator certificate: {0}")]
    Certificate(String),

    /// The certificate subject has no common name.
    #[error("creator certificate has no common name")]
    MissingCommonName,
}

/// Result alias for ledger helpers.
pub type LedgerResult<T> = Result<T, LedgerError>;

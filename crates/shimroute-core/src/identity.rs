//! Creator identity as encoded by the host.
//!
//! The host hands out the transaction creator as a protobuf
//! `SerializedIdentity`: the membership service provider id plus the
//! creator's PEM-encoded certificate. Decoding the certificate itself is
//! left to `shimroute-ledger`.

/// The encoded identity of a transaction creator.
///
/// # Example
///
/// ```
/// use prost::Message;
/// use shimroute_core::SerializedIdentity;
///
/// let id = SerializedIdentity::new("Org1MSP", b"-----BEGIN CERTIFICATE-----".to_vec());
/// let bytes = id.encode_to_vec();
/// assert_eq!(SerializedIdentity::decode(bytes.as_slice()).unwrap(), id);
/// ```
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct SerializedIdentity {
    /// The membership service provider the identity belongs to.
    #[prost(string, tag = "1")]
    pub mspid: String,
    /// The PEM-encoded certificate.
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

impl SerializedIdentity {
    /// Creates a new identity.
    pub fn new(mspid: impl Into<String>, id_bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mspid: mspid.into(),
            id_bytes: id_bytes.into(),
        }
    }
}

//! Throwaway creator identities.
//!
//! Generates self-signed certificates with [`rcgen`] and wraps them in the
//! host's `SerializedIdentity` encoding, so identity helpers can be tested
//! without a certificate authority.

use prost::Message;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
use shimroute_core::SerializedIdentity;

use crate::error::TestError;

/// Generates a self-signed PEM certificate whose subject has `common_name`.
pub fn self_signed_pem(common_name: &str) -> Result<String, TestError> {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    dn.push(DnType::OrganizationName, "shimroute test");
    pem_for(dn)
}

/// Generates a self-signed PEM certificate whose subject has no common name.
pub fn self_signed_pem_without_cn() -> Result<String, TestError> {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::OrganizationName, "shimroute test");
    pem_for(dn)
}

fn pem_for(dn: DistinguishedName) -> Result<String, TestError> {
    let mut params = CertificateParams::new(Vec::<String>::new())?;
    params.distinguished_name = dn;
    let key = KeyPair::generate()?;
    let cert = params.self_signed(&key)?;
    Ok(cert.pem())
}

/// Encodes an identity the way the host hands it to the stub.
#[must_use]
pub fn serialized_identity(mspid: &str, id_bytes: impl Into<Vec<u8>>) -> Vec<u8> {
    SerializedIdentity::new(mspid, id_bytes).encode_to_vec()
}

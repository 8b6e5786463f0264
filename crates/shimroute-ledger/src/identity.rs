//! Creator identity inspection.
//!
//! The host supplies the transaction creator as a protobuf
//! `SerializedIdentity` whose `id_bytes` hold a PEM certificate. These
//! helpers decode that chain down to the fields handlers use for access
//! decisions.

use chrono::{DateTime, Utc};
use prost::Message;
use shimroute_core::{ChaincodeStub, SerializedIdentity};
use x509_parser::parse_x509_certificate;

use crate::error::{LedgerError, LedgerResult};

/// The decoded certificate of a transaction creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorCert {
    mspid: String,
    der: Vec<u8>,
    subject: String,
    issuer: String,
    common_name: Option<String>,
    serial: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
}

impl CreatorCert {
    /// Returns the membership service provider of the identity.
    #[must_use]
    pub fn mspid(&self) -> &str {
        &self.mspid
    }

    /// Returns the DER encoding of the certificate.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Returns the subject distinguished name.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the issuer distinguished name.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the first subject common name, if any.
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    /// Returns the serial number as colon-separated hex.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Returns the start of the validity period.
    #[must_use]
    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    /// Returns the end of the validity period.
    #[must_use]
    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Parses a DER certificate belonging to `mspid`.
    pub fn from_der(mspid: impl Into<String>, der: Vec<u8>) -> LedgerResult<Self> {
        let (_, cert) =
            parse_x509_certificate(&der).map_err(|e| LedgerError::Certificate(e.to_string()))?;

        let common_name = match cert.subject().iter_common_name().next() {
            Some(cn) => Some(
                cn.as_str()
                    .map_err(|e| LedgerError::Certificate(e.to_string()))?
                    .to_string(),
            ),
            None => None,
        };
        let validity = cert.validity();
        let not_before = timestamp(validity.not_before.timestamp())?;
        let not_after = timestamp(validity.not_after.timestamp())?;
        let subject = cert.subject().to_string();
        let issuer = cert.issuer().to_string();
        let serial = cert.raw_serial_as_string();

        Ok(Self {
            mspid: mspid.into(),
            der,
            subject,
            issuer,
            common_name,
            serial,
            not_before,
            not_after,
        })
    }
}

fn timestamp(secs: i64) -> LedgerResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| LedgerError::Certificate(format!("validity time {secs} out of range")))
}

/// Returns the certificate of the identity that created the transaction.
///
/// The first `CERTIFICATE` block in the identity's PEM data is used.
pub fn creator_cert(stub: &dyn ChaincodeStub) -> LedgerResult<CreatorCert> {
    let creator = stub.creator().map_err(|e| {
        tracing::error!(tx_id = stub.tx_id(), error = %e, "creator unavailable");
        LedgerError::from(e)
    })?;

    let identity = SerializedIdentity::decode(creator.as_slice()).map_err(|e| {
        tracing::error!(tx_id = stub.tx_id(), error = %e, "creator is not a serialized identity");
        LedgerError::from(e)
    })?;
    tracing::debug!(mspid = %identity.mspid, "creator identity decoded");

    let mut pem = identity.id_bytes.as_slice();
    let der = match rustls_pemfile::certs(&mut pem).next() {
        Some(Ok(der)) => der.as_ref().to_vec(),
        Some(Err(e)) => {
            tracing::error!(mspid = %identity.mspid, error = %e, "creator PEM unreadable");
            return Err(LedgerError::Pem(e));
        }
        None => {
            tracing::error!(mspid = %identity.mspid, "creator identity carries no certificate");
            return Err(LedgerError::MissingPem);
        }
    };

    CreatorCert::from_der(identity.mspid, der).map_err(|e| {
        tracing::error!(error = %e, "creator certificate rejected");
        e
    })
}

/// Returns the subject common name of the transaction creator.
///
/// # Example
///
/// ```
/// use shimroute_ledger::creator_common_name;
/// use shimroute_test::MockStub;
///
/// let stub = MockStub::new("cc").with_creator_cn("Org1MSP", "alice").unwrap();
/// assert_eq!(creator_common_name(&stub).unwrap(), "alice");
/// ```
pub fn creator_common_name(stub: &dyn ChaincodeStub) -> LedgerResult<String> {
    let cert = creator_cert(stub)?;
    match cert.common_name {
        Some(cn) => Ok(cn),
        None => {
            tracing::error!(subject = %cert.subject, "creator certificate has no common name");
            Err(LedgerError::MissingCommonName)
        }
    }
}

//! JSON world-state access.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shimroute_core::ChaincodeStub;

use crate::error::{LedgerError, LedgerResult};

/// Serialises `value` as JSON and writes it under `key`.
///
/// Returns the bytes written.
pub fn put_json<T>(stub: &dyn ChaincodeStub, key: &str, value: &T) -> LedgerResult<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(value).map_err(|source| {
        tracing::error!(key, error = %source, "value not serialisable");
        LedgerError::Serialize {
            key: key.to_string(),
            source,
        }
    })?;

    stub.put_state(key, &bytes).map_err(|e| {
        tracing::error!(key, error = %e, "put_state failed");
        LedgerError::from(e)
    })?;

    Ok(bytes)
}

/// Reads the value under `key` and deserialises it from JSON.
///
/// A missing key is [`LedgerError::NotFound`].
pub fn get_json<T: DeserializeOwned>(stub: &dyn ChaincodeStub, key: &str) -> LedgerResult<T> {
    let bytes = stub
        .get_state(key)
        .map_err(|e| {
            tracing::error!(key, error = %e, "get_state failed");
            LedgerError::from(e)
        })?
        .ok_or_else(|| LedgerError::NotFound(key.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|source| {
        tracing::error!(key, error = %source, "stored value is not the expected JSON");
        LedgerError::Deserialize {
            key: key.to_string(),
            source,
        }
    })
}

/// Runs a rich query and renders the results as a JSON array.
///
/// Each entry becomes `{"Key":"<key>", "Record":<value>}`. Values are
/// embedded as stored, so they must already be JSON. The first failing
/// result aborts the query.
///
/// # Example
///
/// ```
/// use shimroute_core::StateEntry;
/// use shimroute_ledger::query_json;
/// use shimroute_test::MockStub;
///
/// let stub = MockStub::new("cc").with_query(
///     r#"{"selector":{"owner":"alice"}}"#,
///     [StateEntry::new("a1", br#"{"owner":"alice"}"#.to_vec())],
/// );
/// let out = query_json(&stub, r#"{"selector":{"owner":"alice"}}"#).unwrap();
/// assert_eq!(out, br#"[{"Key":"a1", "Record":{"owner":"alice"}}]"#);
/// ```
pub fn query_json(stub: &dyn ChaincodeStub, query: &str) -> LedgerResult<Vec<u8>> {
    tracing::debug!(query, "running rich query");

    let results = stub.query(query).map_err(|e| {
        tracing::error!(query, error = %e, "query rejected");
        LedgerError::from(e)
    })?;

    let mut out = Vec::from(&b"["[..]);
    for (i, result) in results.enumerate() {
        let entry = result.map_err(|e| {
            tracing::error!(query, index = i, error = %e, "query result failed");
            LedgerError::from(e)
        })?;
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(b"{\"Key\":");
        serde_json::to_writer(&mut out, &entry.key).map_err(|source| LedgerError::Serialize {
            key: entry.key.clone(),
            source,
        })?;
        out.extend_from_slice(b", \"Record\":");
        out.extend_from_slice(&entry.value);
        out.push(b'}');
    }
    out.push(b']');

    tracing::debug!(query, bytes = out.len(), "query complete");
    Ok(out)
}

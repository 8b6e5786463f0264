//! The host runtime interface.
//!
//! Every call reaches the router through a [`ChaincodeStub`]. The router
//! itself only needs the function name and arguments; the remaining
//! methods serve the built-in middleware and the ledger helpers.

use chrono::{DateTime, Utc};

use crate::error::StubError;

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// A transaction timestamp as supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TxTimestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Nanoseconds; values outside `0..1_000_000_000` carry into `seconds`.
    pub nanos: i32,
}

impl TxTimestamp {
    /// Creates a timestamp from seconds and nanoseconds.
    #[must_use]
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Converts to a UTC date-time.
    ///
    /// `nanos` outside `0..1_000_000_000` is normalised into `seconds`, so
    /// `(10, 1_500_000_000)` is 11.5s and `(10, -1)` is 9.999999999s.
    /// Returns `None` when the result is outside chrono's range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = i64::from(self.nanos);
        let seconds = self.seconds.checked_add(nanos.div_euclid(NANOS_PER_SEC))?;
        let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SEC)).ok()?;
        DateTime::from_timestamp(seconds, subsec)
    }
}

impl From<DateTime<Utc>> for TxTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos() as i32,
        }
    }
}

/// One key/value pair returned by a rich query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    /// The ledger key.
    pub key: String,
    /// The raw stored value.
    pub value: Vec<u8>,
}

impl StateEntry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Iterator over rich query results.
///
/// Each item may fail independently; consumers stop at the first error.
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<StateEntry, StubError>> + 'a>;

/// The host runtime's view of a single call.
///
/// Methods take `&self`: a stub is scoped to one call and implementations
/// use interior mutability for writes.
pub trait ChaincodeStub {
    /// Returns the invoked function name and its ordered string arguments.
    fn function_and_parameters(&self) -> (String, Vec<String>);

    /// Returns the host transaction id.
    fn tx_id(&self) -> &str;

    /// Returns the timestamp the client attached to the transaction.
    fn tx_timestamp(&self) -> Result<TxTimestamp, StubError>;

    /// Returns the encoded identity of the transaction creator.
    fn creator(&self) -> Result<Vec<u8>, StubError>;

    /// Reads a value from the ledger. A missing key is `Ok(None)`.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError>;

    /// Writes a value to the ledger.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StubError>;

    /// Runs a rich query against the state database.
    fn query(&self, query: &str) -> Result<StateIter<'_>, StubError>;
}

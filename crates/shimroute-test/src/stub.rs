//! In-memory host stub.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use shimroute_core::{ChaincodeStub, StateEntry, StateIter, StubError, TxTimestamp};

use crate::error::TestError;
use crate::identity;

/// A host stub that keeps the ledger in memory.
///
/// The stub answers every [`ChaincodeStub`] call from fixtures set with the
/// `with_*` builders. World state lives in a sorted map so tests can assert
/// on it after a call.
///
/// # Example
///
/// ```
/// use shimroute_core::ChaincodeStub;
/// use shimroute_test::MockStub;
///
/// let stub = MockStub::new("assets")
///     .with_args("transfer", ["asset1", "bob"])
///     .with_state("asset1", br#"{"owner":"alice"}"#.to_vec());
///
/// assert_eq!(stub.function_and_parameters().0, "transfer");
/// assert!(stub.get_state("asset1").unwrap().is_some());
/// ```
#[must_use]
pub struct MockStub {
    name: String,
    function: String,
    args: Vec<String>,
    tx_id: String,
    tx_timestamp: Option<TxTimestamp>,
    creator: Option<Vec<u8>>,
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    queries: HashMap<String, Vec<Result<StateEntry, StubError>>>,
    write_error: Option<StubError>,
}

impl MockStub {
    /// Creates an empty stub. `name` seeds the transaction id.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            tx_id: format!("{name}-tx"),
            name,
            function: String::new(),
            args: Vec::new(),
            tx_timestamp: None,
            creator: None,
            state: RwLock::new(BTreeMap::new()),
            queries: HashMap::new(),
            write_error: None,
        }
    }

    /// Sets the invoked function and its arguments.
    pub fn with_args<I, S>(mut self, function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.function = function.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the transaction id.
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = tx_id.into();
        self
    }

    /// Sets the transaction timestamp.
    pub fn with_tx_timestamp(mut self, ts: impl Into<TxTimestamp>) -> Self {
        self.tx_timestamp = Some(ts.into());
        self
    }

    /// Sets the raw creator bytes.
    pub fn with_creator(mut self, creator: impl Into<Vec<u8>>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Sets the creator to a serialized identity holding `pem`.
    pub fn with_identity(self, mspid: &str, pem: impl Into<Vec<u8>>) -> Self {
        self.with_creator(identity::serialized_identity(mspid, pem))
    }

    /// Sets the creator to a fresh self-signed certificate for `common_name`.
    pub fn with_creator_cn(self, mspid: &str, common_name: &str) -> Result<Self, TestError> {
        let pem = identity::self_signed_pem(common_name)?;
        Ok(self.with_identity(mspid, pem))
    }

    /// Seeds one world-state entry.
    pub fn with_state(self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.state.write().insert(key.into(), value.into());
        self
    }

    /// Registers the entries a rich query returns.
    pub fn with_query<I>(self, query: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = StateEntry>,
    {
        self.with_query_results(query, entries.into_iter().map(Ok))
    }

    /// Registers query results that may fail part-way through.
    pub fn with_query_results<I>(mut self, query: impl Into<String>, results: I) -> Self
    where
        I: IntoIterator<Item = Result<StateEntry, StubError>>,
    {
        self.queries
            .insert(query.into(), results.into_iter().collect());
        self
    }

    /// Makes every `put_state` fail with `error`.
    pub fn with_write_error(mut self, error: StubError) -> Self {
        self.write_error = Some(error);
        self
    }

    /// Returns the stub name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stored value under `key`.
    #[must_use]
    pub fn state_value(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().get(key).cloned()
    }

    /// Returns a snapshot of world state.
    #[must_use]
    pub fn state(&self) -> BTreeMap<String, Vec<u8>> {
        self.state.read().clone()
    }
}

impl std::fmt::Debug for MockStub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStub")
            .field("name", &self.name)
            .field("function", &self.function)
            .field("args", &self.args)
            .field("tx_id", &self.tx_id)
            .field("keys", &self.state.read().len())
            .finish_non_exhaustive()
    }
}

impl ChaincodeStub for MockStub {
    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (self.function.clone(), self.args.clone())
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp, StubError> {
        self.tx_timestamp.ok_or(StubError::MissingTimestamp)
    }

    fn creator(&self) -> Result<Vec<u8>, StubError> {
        self.creator.clone().ok_or(StubError::MissingCreator)
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError> {
        Ok(self.state_value(key))
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StubError> {
        if let Some(err) = &self.write_error {
            return Err(err.clone());
        }
        self.state.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn query(&self, query: &str) -> Result<StateIter<'_>, StubError> {
        let results = self
            .queries
            .get(query)
            .ok_or_else(|| StubError::InvalidQuery(query.to_string()))?;
        Ok(Box::new(results.iter().cloned()))
    }
}

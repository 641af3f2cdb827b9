//! Execution contexts: one borrowed connection plus the owning store.

use rusqlite::{Connection, Transaction};

use crate::store::DataStore;

/// Caller-owned handle for running queries.
///
/// A context borrows its connection and cannot outlive it. It runs one
/// statement at a time and does no locking of its own.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'c> {
    conn: &'c Connection,
    transactional: bool,
    store: &'c DataStore,
}

impl<'c> ExecutionContext<'c> {
    pub fn new(conn: &'c Connection, store: &'c DataStore) -> Self {
        Self {
            conn,
            transactional: false,
            store,
        }
    }

    /// A context whose statements run inside `tx`.
    pub fn in_transaction(tx: &'c Transaction<'_>, store: &'c DataStore) -> Self {
        Self {
            conn: tx,
            transactional: true,
            store,
        }
    }

    pub fn conn(&self) -> &'c Connection {
        self.conn
    }

    pub fn store(&self) -> &'c DataStore {
        self.store
    }

    pub fn is_transactional(&self) -> bool {
        self.transactional
    }
}

impl std::fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("target", &self.store.target_name())
            .field("transactional", &self.transactional)
            .finish_non_exhaustive()
    }
}

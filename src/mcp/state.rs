//! MCP Server state management

use ulid::Ulid;

use crate::core::store::DocumentStore;

/// MCP Server state - holds all runtime data
#[derive(Debug)]
pub struct ServerState {
    /// The document being filled in
    pub store: DocumentStore,
    /// Unique session ID for this MCP connection
    pub session_id: String,
}

impl ServerState {
    /// Create new server state around a store
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            session_id: format!("techsol-{}", Ulid::new()),
        }
    }
}

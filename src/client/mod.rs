//! Client side of the REST API: fetchers, their error taxonomy, the
//! blocking/non-blocking fetch policies and persisted client state.

mod api;
mod error;
pub mod policy;
mod storage;

pub use api::ApiClient;
pub use error::{ErrorKind, FetchError};
pub use policy::{fetch_primary, fetch_secondary};
pub use storage::{ClientStorage, FileStorage, MemoryStorage, SharedStorage};

//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod routing;
mod storage;
mod transport;

pub use clock::Clock;
pub use routing::{CatalogLookup, RouteTable};
pub use storage::{KeyValueStorage, StorageError};
pub use transport::{ErpTransport, SearchTransport, TransportError};

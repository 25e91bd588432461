//! Persisting normalized batches.

pub mod coordinator;
pub mod transport;

pub use coordinator::SubmissionCoordinator;
pub use transport::{BasePersistenceTransport, HttpTransport, TransportResponse};

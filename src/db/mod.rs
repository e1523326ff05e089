//! Database layer
//!
//! MongoDB client wrapper, document schemas, and the singleton
//! profile store.

pub mod mongo;
pub mod schemas;
pub mod store;

pub use mongo::MongoClient;
pub use store::ProfileStore;

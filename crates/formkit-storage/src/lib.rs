//! formkit-storage
//!
//! The form/response store contract and its implementations: S3-backed
//! JSON objects for real deployments, an in-memory store for tests.

pub mod bucket;
pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3_store;
pub mod state;
pub mod store;

pub use bucket::{ObjectBucket, S3Bucket};
pub use config::StoreConfig;
pub use error::StorageError;
pub use memory::MemoryFormStore;
pub use s3_store::S3FormStore;
pub use store::{BoxFuture, FormStore};

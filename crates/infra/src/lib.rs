pub mod db;
pub mod error;
pub mod mem;
pub mod models;
pub mod pg;
pub mod repos;
pub mod storage;

pub use error::StorageError;
pub use mem::MemStorage;
pub use pg::PgStorage;
pub use storage::{SessionStore, Storage};

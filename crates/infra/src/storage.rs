use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::error::StorageError;
use crate::models::{
    NewPhoto, NewPlayer, NewUser, PhotoPatch, PhotoRow, PlayerPatch, PlayerRow, SessionRecord,
    UserRow,
};

/// Persistence for session records, handed to the auth layer by the storage
/// gateway. Implementations must treat expired records as absent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, sid: &str) -> Result<Option<SessionRecord>, StorageError>;

    /// Inserts or replaces the record for `sid`.
    async fn insert(&self, sid: &str, user_id: i32, ttl: Duration) -> Result<(), StorageError>;

    /// Idempotent; removing an unknown sid is not an error.
    async fn remove(&self, sid: &str) -> Result<(), StorageError>;
}

/// The single CRUD contract the route layer talks to. Two implementations
/// exist: [`crate::MemStorage`] and [`crate::PgStorage`]; which one backs a
/// process is decided by configuration at startup.
///
/// Absent rows are `None`/`false`, never errors. Uniqueness violations
/// surface as [`StorageError::Conflict`] so callers can distinguish them
/// from I/O failure.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn ping(&self) -> Result<(), StorageError>;

    // User operations
    async fn get_user(&self, id: i32) -> Result<Option<UserRow>, StorageError>;
    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, StorageError>;
    async fn create_user(&self, draft: NewUser) -> Result<UserRow, StorageError>;

    // Player operations
    async fn players(&self) -> Result<Vec<PlayerRow>, StorageError>;
    async fn player_by_id(&self, id: i32) -> Result<Option<PlayerRow>, StorageError>;
    async fn players_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<PlayerRow>, StorageError>;
    async fn create_player(&self, draft: NewPlayer) -> Result<PlayerRow, StorageError>;
    async fn update_player(
        &self,
        id: i32,
        patch: PlayerPatch,
    ) -> Result<Option<PlayerRow>, StorageError>;
    async fn delete_player(&self, id: i32) -> Result<bool, StorageError>;

    // Photo operations
    async fn photos(&self) -> Result<Vec<PhotoRow>, StorageError>;
    async fn photo_by_id(&self, id: i32) -> Result<Option<PhotoRow>, StorageError>;
    async fn photos_by_category(&self, category: &str) -> Result<Vec<PhotoRow>, StorageError>;
    async fn create_photo(&self, draft: NewPhoto) -> Result<PhotoRow, StorageError>;
    async fn update_photo(
        &self,
        id: i32,
        patch: PhotoPatch,
    ) -> Result<Option<PhotoRow>, StorageError>;
    async fn delete_photo(&self, id: i32) -> Result<bool, StorageError>;

    /// Session-store handle backed by the same medium as the entity tables.
    fn sessions(&self) -> Arc<dyn SessionStore>;
}

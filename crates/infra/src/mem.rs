use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::{
    NewPhoto, NewPlayer, NewUser, PhotoPatch, PhotoRow, PlayerPatch, PlayerRow, SessionRecord,
    UserRow,
};
use crate::storage::{SessionStore, Storage};

/// Map-backed table with a monotonically increasing id counter. BTreeMap
/// iteration order is id order, which for serial ids equals insertion order.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory storage gateway. Safe under the single-process deployment it
/// targets; nothing survives a restart.
pub struct MemStorage {
    users: RwLock<Table<UserRow>>,
    players: RwLock<Table<PlayerRow>>,
    photos: RwLock<Table<PhotoRow>>,
    sessions: Arc<MemSessionStore>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
            players: RwLock::new(Table::new()),
            photos: RwLock::new(Table::new()),
            sessions: Arc::new(MemSessionStore::new()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn get_user(&self, id: i32) -> Result<Option<UserRow>, StorageError> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRow>, StorageError> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, draft: NewUser) -> Result<UserRow, StorageError> {
        let mut users = self.users.write().await;
        if users.rows.values().any(|u| u.username == draft.username) {
            return Err(StorageError::Conflict("username"));
        }
        let id = users.allocate();
        let user = UserRow {
            id,
            username: draft.username,
            password: draft.password,
            full_name: draft.full_name,
            is_admin: draft.is_admin,
            created_at: Utc::now(),
        };
        users.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn players(&self) -> Result<Vec<PlayerRow>, StorageError> {
        Ok(self.players.read().await.rows.values().cloned().collect())
    }

    async fn player_by_id(&self, id: i32) -> Result<Option<PlayerRow>, StorageError> {
        Ok(self.players.read().await.rows.get(&id).cloned())
    }

    async fn players_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<PlayerRow>, StorageError> {
        let players = self.players.read().await;
        Ok(players
            .rows
            .values()
            .filter(|p| p.team_category == category)
            .cloned()
            .collect())
    }

    async fn create_player(&self, draft: NewPlayer) -> Result<PlayerRow, StorageError> {
        let mut players = self.players.write().await;
        if players.rows.values().any(|p| p.id_number == draft.id_number) {
            return Err(StorageError::Conflict("id_number"));
        }
        let id = players.allocate();
        let now = Utc::now();
        let player = PlayerRow {
            id,
            first_name: draft.first_name,
            surname: draft.surname,
            id_number: draft.id_number,
            date_of_birth: draft.date_of_birth,
            age: draft.age,
            race: draft.race,
            nationality: draft.nationality,
            safa_id: draft.safa_id,
            preferred_foot: draft.preferred_foot,
            position: draft.position,
            team_category: draft.team_category,
            date_joined: draft.date_joined,
            registration_status: draft.registration_status,
            photo_url: draft.photo_url,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        players.rows.insert(id, player.clone());
        Ok(player)
    }

    async fn update_player(
        &self,
        id: i32,
        patch: PlayerPatch,
    ) -> Result<Option<PlayerRow>, StorageError> {
        let mut players = self.players.write().await;
        if !players.rows.contains_key(&id) {
            return Ok(None);
        }
        if let Some(id_number) = &patch.id_number {
            if players
                .rows
                .values()
                .any(|p| p.id != id && p.id_number == *id_number)
            {
                return Err(StorageError::Conflict("id_number"));
            }
        }
        let Some(player) = players.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = patch.first_name {
            player.first_name = v;
        }
        if let Some(v) = patch.surname {
            player.surname = v;
        }
        if let Some(v) = patch.id_number {
            player.id_number = v;
        }
        if let Some(v) = patch.date_of_birth {
            player.date_of_birth = v;
        }
        if let Some(v) = patch.age {
            player.age = v;
        }
        if let Some(v) = patch.race {
            player.race = Some(v);
        }
        if let Some(v) = patch.nationality {
            player.nationality = v;
        }
        if let Some(v) = patch.safa_id {
            player.safa_id = Some(v);
        }
        if let Some(v) = patch.preferred_foot {
            player.preferred_foot = v;
        }
        if let Some(v) = patch.position {
            player.position = v;
        }
        if let Some(v) = patch.team_category {
            player.team_category = v;
        }
        if let Some(v) = patch.date_joined {
            player.date_joined = v;
        }
        if let Some(v) = patch.registration_status {
            player.registration_status = v;
        }
        if let Some(v) = patch.photo_url {
            player.photo_url = Some(v);
        }
        if let Some(v) = patch.notes {
            player.notes = Some(v);
        }
        player.updated_at = Utc::now();
        Ok(Some(player.clone()))
    }

    async fn delete_player(&self, id: i32) -> Result<bool, StorageError> {
        Ok(self.players.write().await.rows.remove(&id).is_some())
    }

    async fn photos(&self) -> Result<Vec<PhotoRow>, StorageError> {
        Ok(self.photos.read().await.rows.values().cloned().collect())
    }

    async fn photo_by_id(&self, id: i32) -> Result<Option<PhotoRow>, StorageError> {
        Ok(self.photos.read().await.rows.get(&id).cloned())
    }

    async fn photos_by_category(&self, category: &str) -> Result<Vec<PhotoRow>, StorageError> {
        let photos = self.photos.read().await;
        Ok(photos
            .rows
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn create_photo(&self, draft: NewPhoto) -> Result<PhotoRow, StorageError> {
        let mut photos = self.photos.write().await;
        let id = photos.allocate();
        let photo = PhotoRow {
            id,
            title: draft.title,
            image_url: draft.image_url,
            category: draft.category,
            description: draft.description,
            uploaded_by: draft.uploaded_by,
            upload_date: Utc::now(),
        };
        photos.rows.insert(id, photo.clone());
        Ok(photo)
    }

    async fn update_photo(
        &self,
        id: i32,
        patch: PhotoPatch,
    ) -> Result<Option<PhotoRow>, StorageError> {
        let mut photos = self.photos.write().await;
        let Some(photo) = photos.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = patch.title {
            photo.title = v;
        }
        if let Some(v) = patch.image_url {
            photo.image_url = v;
        }
        if let Some(v) = patch.category {
            photo.category = v;
        }
        if let Some(v) = patch.description {
            photo.description = Some(v);
        }
        Ok(Some(photo.clone()))
    }

    async fn delete_photo(&self, id: i32) -> Result<bool, StorageError> {
        Ok(self.photos.write().await.rows.remove(&id).is_some())
    }

    fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }
}

/// In-memory session store; expired entries are pruned on access.
pub struct MemSessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemSessionStore {
    async fn get(&self, sid: &str) -> Result<Option<SessionRecord>, StorageError> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(sid) {
                Some(record) if record.expires_at > Utc::now() => {
                    return Ok(Some(record.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }
        self.sessions.write().await.remove(sid);
        Ok(None)
    }

    async fn insert(&self, sid: &str, user_id: i32, ttl: Duration) -> Result<(), StorageError> {
        let record = SessionRecord {
            user_id,
            expires_at: Utc::now() + ttl,
        };
        self.sessions.write().await.insert(sid.to_owned(), record);
        Ok(())
    }

    async fn remove(&self, sid: &str) -> Result<(), StorageError> {
        self.sessions.write().await.remove(sid);
        Ok(())
    }
}

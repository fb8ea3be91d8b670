use async_trait::async_trait;

use crate::contract::model::{Role, Status, User};

/// Port for the domain layer: the dataset operations the domain needs from
/// the ERP. Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// All users; the password hash is not requested.
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    /// Users whose status is still pending.
    async fn list_pending(&self) -> anyhow::Result<Vec<User>>;
    /// One user by id, including the stored password hash.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Case-insensitive match of `term` against name, email and role.
    async fn search(&self, term: &str) -> anyhow::Result<Vec<User>>;
    /// Insert a new record. The ERP assigns the id; callers re-fetch to
    /// learn it.
    async fn insert(&self, record: NewRecord) -> anyhow::Result<()>;
    /// Rewrite the full field set of an existing record. The password hash
    /// is never part of an update.
    async fn update(&self, id: i64, record: UpdateRecord) -> anyhow::Result<()>;
    /// Rewrite the status field only (soft delete writes Blocked).
    async fn set_status(&self, id: i64, status: Status) -> anyhow::Result<()>;
}

/// Fields written on insert. `avatar: None` means the avatar slot is not
/// declared at all, not that an empty value is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: Status,
    pub avatar: Option<String>,
}

/// Fully-merged record written on update; the service resolves omitted
/// patch fields against the current remote state before building this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub avatar: String,
}

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, Registration, Role, Status, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::{NewRecord, UpdateRecord, UsersRepository};

/// Domain service with the business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bcrypt_cost: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "users.service.get_all", skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        debug!("listing users");
        self.repo.list_all().await.map_err(backend)
    }

    #[instrument(name = "users.service.get_pending", skip(self))]
    pub async fn get_pending(&self) -> Result<Vec<User>, DomainError> {
        debug!("listing pending users");
        self.repo.list_pending().await.map_err(backend)
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        debug!("getting user by id");
        self.repo
            .find_by_id(id)
            .await
            .map_err(backend)?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(name = "users.service.search", skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<User>, DomainError> {
        debug!("searching users");
        self.repo.search(term).await.map_err(backend)
    }

    /// Create a user with caller-chosen role/status. The ERP assigns the id,
    /// so the created record is recovered through a search by email.
    #[instrument(name = "users.service.create_user", skip(self, new_user), fields(email = %new_user.email))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("creating user");
        self.validate_presence(&new_user.name, &new_user.email)?;

        let password_hash = match new_user.password.as_deref() {
            Some(password) if !password.is_empty() => self.hash_password(password)?,
            _ => String::new(),
        };

        let record = NewRecord {
            name: new_user.name,
            email: new_user.email.clone(),
            password_hash,
            role: new_user.role,
            status: new_user.status,
            // Create always declares the avatar slot, empty when unset.
            avatar: Some(new_user.avatar.unwrap_or_default()),
        };
        self.repo.insert(record).await.map_err(backend)?;

        self.refetch_by_email(&new_user.email).await
    }

    /// Self-registration: rejects duplicate emails before any save is
    /// issued, hashes the password unconditionally and forces the
    /// pending-salesperson defaults. The email pre-check is race-prone
    /// against concurrent registrations; the ERP holds no unique constraint.
    #[instrument(name = "users.service.register", skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        info!("registering user");
        self.validate_presence(&registration.name, &registration.email)?;

        let existing = self.repo.search(&registration.email).await.map_err(backend)?;
        if !existing.is_empty() {
            return Err(DomainError::email_already_exists(registration.email));
        }

        let record = NewRecord {
            name: registration.name,
            email: registration.email.clone(),
            password_hash: self.hash_password(&registration.password)?,
            role: Role::Salesperson,
            status: Status::Pending,
            avatar: None,
        };
        self.repo.insert(record).await.map_err(backend)?;

        self.refetch_by_email(&registration.email).await
    }

    /// Partial update with preserve-on-missing semantics: the current record
    /// is loaded first and omitted patch fields keep their remote values.
    #[instrument(name = "users.service.update_user", skip(self, patch), fields(user_id = id))]
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, DomainError> {
        info!("updating user");
        self.validate_patch(&patch)?;

        let current = self.get_user(id).await?;
        let record = UpdateRecord {
            name: patch.name.unwrap_or(current.name),
            email: patch.email.unwrap_or(current.email),
            role: patch.role.unwrap_or(current.role),
            status: patch.status.unwrap_or(current.status),
            avatar: patch.avatar.or(current.avatar).unwrap_or_default(),
        };
        self.repo.update(id, record).await.map_err(backend)?;

        self.get_user(id).await
    }

    #[instrument(name = "users.service.approve", skip(self), fields(user_id = id))]
    pub async fn approve(&self, id: i64) -> Result<User, DomainError> {
        self.update_user(
            id,
            UserPatch {
                status: Some(Status::Active),
                ..UserPatch::default()
            },
        )
        .await
    }

    #[instrument(name = "users.service.block", skip(self), fields(user_id = id))]
    pub async fn block(&self, id: i64) -> Result<User, DomainError> {
        self.update_user(
            id,
            UserPatch {
                status: Some(Status::Blocked),
                ..UserPatch::default()
            },
        )
        .await
    }

    /// Soft delete: the record stays in the ERP with status Blocked. There
    /// is no hard delete path.
    #[instrument(name = "users.service.delete", skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        info!("soft-deleting user");
        self.repo
            .set_status(id, Status::Blocked)
            .await
            .map_err(backend)
    }

    // --- helpers ---

    async fn refetch_by_email(&self, email: &str) -> Result<User, DomainError> {
        let mut found = self.repo.search(email).await.map_err(backend)?;
        if found.is_empty() {
            return Err(DomainError::created_user_missing(email));
        }
        Ok(found.remove(0))
    }

    fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| DomainError::backend(format!("password hashing failed: {e}")))
    }

    fn validate_presence(&self, name: &str, email: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if email.trim().is_empty() {
            return Err(DomainError::validation("email", "must not be empty"));
        }
        Ok(())
    }

    fn validate_patch(&self, patch: &UserPatch) -> Result<(), DomainError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name", "must not be empty"));
            }
        }
        if let Some(email) = &patch.email {
            if email.trim().is_empty() {
                return Err(DomainError::validation("email", "must not be empty"));
            }
        }
        Ok(())
    }
}

fn backend(err: anyhow::Error) -> DomainError {
    DomainError::backend(err.to_string())
}

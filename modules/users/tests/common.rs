//! Shared test doubles for the repository port.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;

use users::contract::model::{Role, Status, User};
use users::domain::repo::{NewRecord, UpdateRecord, UsersRepository};
use users::domain::service::{Service, ServiceConfig};

/// In-memory stand-in for the ERP dataset: assigns ids on insert and mirrors
/// the backend's case-insensitive LIKE search over name, email and role.
pub struct InMemoryRepo {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seeded(users: Vec<User>) -> Self {
        let next = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: Mutex::new(users),
            next_id: AtomicI64::new(next),
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().len()
    }
}

#[async_trait]
impl UsersRepository for InMemoryRepo {
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.lock().clone())
    }

    async fn list_pending(&self) -> anyhow::Result<Vec<User>> {
        Ok(self
            .users
            .lock()
            .iter()
            .filter(|u| u.status == Status::Pending)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn search(&self, term: &str) -> anyhow::Result<Vec<User>> {
        let term = term.to_uppercase();
        Ok(self
            .users
            .lock()
            .iter()
            .filter(|u| {
                u.name.to_uppercase().contains(&term)
                    || u.email.to_uppercase().contains(&term)
                    || u.role.as_wire().to_uppercase().contains(&term)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, record: NewRecord) -> anyhow::Result<()> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.lock().push(User {
            id,
            name: record.name,
            email: record.email,
            role: record.role,
            status: record.status,
            password: record.password_hash,
            // An empty written avatar reads back as absent.
            avatar: record.avatar.filter(|a| !a.is_empty()),
        });
        Ok(())
    }

    async fn update(&self, id: i64, record: UpdateRecord) -> anyhow::Result<()> {
        let mut users = self.users.lock();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.name = record.name;
            user.email = record.email;
            user.role = record.role;
            user.status = record.status;
            user.avatar = if record.avatar.is_empty() {
                None
            } else {
                Some(record.avatar)
            };
        }
        Ok(())
    }

    async fn set_status(&self, id: i64, status: Status) -> anyhow::Result<()> {
        let mut users = self.users.lock();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.status = status;
        }
        Ok(())
    }
}

/// Repository whose every call fails, for exercising the backend error path.
pub struct FailingRepo;

#[async_trait]
impl UsersRepository for FailingRepo {
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Err(anyhow!("gateway unreachable"))
    }

    async fn list_pending(&self) -> anyhow::Result<Vec<User>> {
        Err(anyhow!("gateway unreachable"))
    }

    async fn find_by_id(&self, _id: i64) -> anyhow::Result<Option<User>> {
        Err(anyhow!("gateway unreachable"))
    }

    async fn search(&self, _term: &str) -> anyhow::Result<Vec<User>> {
        Err(anyhow!("gateway unreachable"))
    }

    async fn insert(&self, _record: NewRecord) -> anyhow::Result<()> {
        Err(anyhow!("gateway unreachable"))
    }

    async fn update(&self, _id: i64, _record: UpdateRecord) -> anyhow::Result<()> {
        Err(anyhow!("gateway unreachable"))
    }

    async fn set_status(&self, _id: i64, _status: Status) -> anyhow::Result<()> {
        Err(anyhow!("gateway unreachable"))
    }
}

pub fn sample_user(id: i64) -> User {
    User {
        id,
        name: format!("USER {id}"),
        email: format!("user{id}@example.com"),
        role: Role::Salesperson,
        status: Status::Active,
        password: String::new(),
        avatar: None,
    }
}

/// Service over an in-memory repo, with the cheapest bcrypt cost so tests
/// stay fast.
pub fn service_over(repo: Arc<InMemoryRepo>) -> Service {
    Service::new(repo, ServiceConfig { bcrypt_cost: 4 })
}

use serde::{Deserialize, Serialize};

use crate::contract::model::{NewUser, Registration, Role, Status, User, UserPatch};

/// REST representation of a user. Role and status use the ERP literals the
/// browser form already speaks; the stored password hash is never
/// serialized out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: usize,
}

/// REST DTO for creating a user. Unset role/status fall back to the model
/// defaults (salesperson / pending).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserReq {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// REST DTO for a partial update; omitted fields keep their remote values.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

// Conversions between REST DTOs and contract models.

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_wire().to_string(),
            status: user.status.as_wire().to_string(),
            avatar: user.avatar,
        }
    }
}

impl From<Vec<User>> for UserListDto {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
        Self {
            total: users.len(),
            users,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role.as_deref().map(Role::from_wire).unwrap_or_default(),
            status: req
                .status
                .as_deref()
                .map(Status::from_wire)
                .unwrap_or_default(),
            avatar: req.avatar,
        }
    }
}

impl From<RegisterReq> for Registration {
    fn from(req: RegisterReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role.as_deref().map(Role::from_wire),
            status: req.status.as_deref().map(Status::from_wire),
            avatar: req.avatar,
        }
    }
}

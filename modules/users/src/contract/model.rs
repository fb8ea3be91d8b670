/// Pure user model for inter-crate communication (no serde).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the ERP; 0 means unmapped/missing.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    /// Stored bcrypt hash; only populated by id lookups, never cleartext.
    pub password: String,
    pub avatar: Option<String>,
}

/// Application role. The ERP stores the Portuguese literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Administrator,
    Manager,
    #[default]
    Salesperson,
}

impl Role {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Manager => "Gerente",
            Role::Salesperson => "Vendedor",
        }
    }

    /// Unknown literals fall back to the default role.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Administrador" => Role::Administrator,
            "Gerente" => Role::Manager,
            _ => Role::Salesperson,
        }
    }
}

/// Lifecycle status. Transitions are caller-driven: approve moves a pending
/// user to Active, block and delete both land on Blocked (soft delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    Active,
    #[default]
    Pending,
    Blocked,
}

impl Status {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Status::Active => "ativo",
            Status::Pending => "pendente",
            Status::Blocked => "bloqueado",
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "ativo" => Status::Active,
            "bloqueado" => Status::Blocked,
            _ => Status::Pending,
        }
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Cleartext; hashed by the service before it leaves the process.
    pub password: Option<String>,
    pub role: Role,
    pub status: Status,
    pub avatar: Option<String>,
}

/// Self-registration data. Role and status are not caller-settable: every
/// registration starts as a pending salesperson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial update. `None` leaves the remote value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
    pub avatar: Option<String>,
}

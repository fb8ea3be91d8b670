//! Repository implementation against the Sankhya data API.

pub mod mapper;
pub mod repo;

pub use repo::SankhyaUsersRepository;

/// ERP field names of the sales-user entity.
pub(crate) mod fields {
    pub const ID: &str = "CODUSUARIO";
    pub const NAME: &str = "NOME";
    pub const EMAIL: &str = "EMAIL";
    pub const ROLE: &str = "FUNCAO";
    pub const STATUS: &str = "STATUS";
    pub const PASSWORD: &str = "SENHA";
    pub const AVATAR: &str = "AVATAR";
}

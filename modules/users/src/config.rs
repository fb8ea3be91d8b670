use serde::{Deserialize, Serialize};

/// Configuration for the users module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    /// Root entity backing user records in the ERP.
    #[serde(default = "default_entity")]
    pub entity: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            entity: default_entity(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_entity() -> String {
    "AD_USUARIOSVENDAS".to_string()
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

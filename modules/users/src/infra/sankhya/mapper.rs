//! Decoding of `loadRecords` result sets into the user model.

use sankhya::dataset::{FieldMap, LoadRecordsResponse};

use crate::contract::model::{Role, Status, User};
use crate::infra::sankhya::fields;

/// Decode a result set into users. Absent fields fall back to their
/// documented defaults; an empty result set is an empty vec, not an error.
pub fn users_from_response(response: LoadRecordsResponse) -> Vec<User> {
    let Some(entities) = response.response_body.and_then(|body| body.entities) else {
        return Vec::new();
    };
    entities.rows().into_iter().map(user_from_row).collect()
}

fn user_from_row(row: FieldMap) -> User {
    User {
        id: row
            .get(fields::ID)
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0),
        name: text(&row, fields::NAME),
        email: text(&row, fields::EMAIL),
        role: row.get(fields::ROLE).map(Role::from_wire).unwrap_or_default(),
        status: row
            .get(fields::STATUS)
            .map(Status::from_wire)
            .unwrap_or_default(),
        password: text(&row, fields::PASSWORD),
        avatar: row
            .get(fields::AVATAR)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
    }
}

fn text(row: &FieldMap, name: &str) -> String {
    row.get(name).unwrap_or_default().to_string()
}

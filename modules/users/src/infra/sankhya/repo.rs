use std::sync::Arc;

use async_trait::async_trait;
use sankhya::criteria::Expr;
use sankhya::dataset::{LoadRecordsRequest, SaveRequest};
use tracing::instrument;

use crate::contract::model::{Status, User};
use crate::domain::repo::{NewRecord, UpdateRecord, UsersRepository};
use crate::infra::sankhya::{fields, mapper};

const READ_FIELDS: [&str; 6] = [
    fields::ID,
    fields::NAME,
    fields::EMAIL,
    fields::ROLE,
    fields::STATUS,
    fields::AVATAR,
];

// Only id lookups may see the stored hash.
const READ_FIELDS_WITH_PASSWORD: [&str; 7] = [
    fields::ID,
    fields::NAME,
    fields::EMAIL,
    fields::ROLE,
    fields::STATUS,
    fields::AVATAR,
    fields::PASSWORD,
];

const INSERT_FIELDS: [&str; 5] = [
    fields::NAME,
    fields::EMAIL,
    fields::PASSWORD,
    fields::ROLE,
    fields::STATUS,
];

// Updates rewrite everything except the password; the pk field takes
// slot 0 of the save record.
const UPDATE_FIELDS: [&str; 6] = [
    fields::ID,
    fields::NAME,
    fields::EMAIL,
    fields::ROLE,
    fields::STATUS,
    fields::AVATAR,
];

/// `UsersRepository` backed by the Sankhya dataset services.
pub struct SankhyaUsersRepository {
    client: Arc<sankhya::Client>,
    entity: String,
}

impl SankhyaUsersRepository {
    pub fn new(client: Arc<sankhya::Client>, entity: impl Into<String>) -> Self {
        Self {
            client,
            entity: entity.into(),
        }
    }

    async fn load(&self, fieldset: &[&str], criteria: Option<Expr>) -> anyhow::Result<Vec<User>> {
        let request =
            LoadRecordsRequest::new(&self.entity, fieldset, criteria.map(|expr| expr.render()));
        let response = self.client.load_records(&request).await?;
        Ok(mapper::users_from_response(response))
    }
}

#[async_trait]
impl UsersRepository for SankhyaUsersRepository {
    #[instrument(name = "users.sankhya.list_all", skip(self))]
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        self.load(&READ_FIELDS, None).await
    }

    #[instrument(name = "users.sankhya.list_pending", skip(self))]
    async fn list_pending(&self) -> anyhow::Result<Vec<User>> {
        let pending = Expr::eq_str(fields::STATUS, Status::Pending.as_wire());
        self.load(&READ_FIELDS, Some(pending)).await
    }

    #[instrument(name = "users.sankhya.find_by_id", skip(self))]
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let mut users = self
            .load(
                &READ_FIELDS_WITH_PASSWORD,
                Some(Expr::eq_int(fields::ID, id)),
            )
            .await?;
        Ok(if users.is_empty() {
            None
        } else {
            Some(users.remove(0))
        })
    }

    #[instrument(name = "users.sankhya.search", skip_all)]
    async fn search(&self, term: &str) -> anyhow::Result<Vec<User>> {
        let term = term.to_uppercase();
        let matches = Expr::any(vec![
            Expr::contains(fields::NAME, &term),
            Expr::contains(fields::EMAIL, &term),
            Expr::contains(fields::ROLE, &term),
        ]);
        self.load(&READ_FIELDS, Some(matches)).await
    }

    #[instrument(name = "users.sankhya.insert", skip_all, fields(email = %record.email))]
    async fn insert(&self, record: NewRecord) -> anyhow::Result<()> {
        let mut fieldset: Vec<&str> = INSERT_FIELDS.to_vec();
        let mut values = vec![
            record.name,
            record.email,
            record.password_hash,
            record.role.as_wire().to_string(),
            record.status.as_wire().to_string(),
        ];
        // The avatar slot is only declared when a value is being written.
        if let Some(avatar) = record.avatar {
            fieldset.push(fields::AVATAR);
            values.push(avatar);
        }

        let request = SaveRequest::insert(&self.entity, &fieldset, &values);
        self.client.save(&request).await?;
        Ok(())
    }

    #[instrument(name = "users.sankhya.update", skip_all, fields(user_id = id))]
    async fn update(&self, id: i64, record: UpdateRecord) -> anyhow::Result<()> {
        let values = vec![
            record.name,
            record.email,
            record.role.as_wire().to_string(),
            record.status.as_wire().to_string(),
            record.avatar,
        ];
        let request = SaveRequest::update(&self.entity, &UPDATE_FIELDS, &id.to_string(), &values);
        self.client.save(&request).await?;
        Ok(())
    }

    #[instrument(name = "users.sankhya.set_status", skip(self))]
    async fn set_status(&self, id: i64, status: Status) -> anyhow::Result<()> {
        let request = SaveRequest::update(
            &self.entity,
            &[fields::ID, fields::STATUS],
            &id.to_string(),
            &[status.as_wire().to_string()],
        );
        self.client.save(&request).await?;
        Ok(())
    }
}

//! Request and response shapes for the gateway dataset services.
//!
//! Query responses are positional: the metadata block lists field names in
//! order, and each entity carries its scalars under `f0`, `f1`, … keys, each
//! wrapped in a `$` object. Entities may omit a positional key entirely, and
//! a single-row result arrives as a bare object instead of an array. All of
//! that is normalized here so callers only see name-keyed rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// loadRecords request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRecordsRequest {
    pub request_body: LoadRequestBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequestBody {
    pub data_set: DataSet,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    pub root_entity: String,
    pub include_presentation_fields: String,
    pub entity: EntitySpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<CriteriaSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntitySpec {
    pub fieldset: Fieldset,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fieldset {
    pub list: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriteriaSpec {
    pub expression: Expression,
}

#[derive(Debug, Clone, Serialize)]
pub struct Expression {
    #[serde(rename = "$")]
    pub value: String,
}

impl LoadRecordsRequest {
    /// Query `fields` of `root_entity`, optionally filtered by a rendered
    /// criteria expression (see [`crate::criteria`]).
    pub fn new(root_entity: &str, fields: &[&str], criteria: Option<String>) -> Self {
        Self {
            request_body: LoadRequestBody {
                data_set: DataSet {
                    root_entity: root_entity.to_string(),
                    include_presentation_fields: "N".to_string(),
                    entity: EntitySpec {
                        fieldset: Fieldset {
                            list: fields.join(", "),
                        },
                    },
                    criteria: criteria.map(|value| CriteriaSpec {
                        expression: Expression { value },
                    }),
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// loadRecords response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRecordsResponse {
    #[serde(default)]
    pub response_body: Option<LoadResponseBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadResponseBody {
    #[serde(default)]
    pub entities: Option<EntitySet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntitySet {
    pub metadata: Metadata,
    #[serde(default)]
    pub entity: Option<OneOrMany<WireRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub fields: FieldList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldList {
    pub field: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
}

/// The gateway returns a bare object for a single row and an array otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// One positional row: keys `f0`, `f1`, … each wrapping its scalar in `$`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct WireRecord(pub BTreeMap<String, WireValue>);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireValue {
    #[serde(rename = "$", default)]
    pub value: Option<serde_json::Value>,
}

impl WireRecord {
    /// Scalar at positional slot `index`, rendered as a string. `None` when
    /// the slot or its wrapped value is absent.
    pub fn slot(&self, index: usize) -> Option<String> {
        self.0
            .get(&format!("f{index}"))
            .and_then(|wrapped| wrapped.value.as_ref())
            .map(scalar_to_string)
    }
}

fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field-name → scalar view of one record, aligned via the metadata order.
#[derive(Debug, Clone, Default)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl EntitySet {
    /// Normalize the result set into name-keyed rows. Slots an entity does
    /// not carry are simply missing from its row.
    pub fn rows(&self) -> Vec<FieldMap> {
        let names: Vec<&str> = self
            .metadata
            .fields
            .field
            .iter()
            .map(|f| f.name.as_str())
            .collect();

        let records = match &self.entity {
            Some(OneOrMany::One(record)) => vec![record.clone()],
            Some(OneOrMany::Many(records)) => records.clone(),
            None => Vec::new(),
        };

        records
            .into_iter()
            .map(|record| {
                let mut row = BTreeMap::new();
                for (index, name) in names.iter().enumerate() {
                    if let Some(value) = record.slot(index) {
                        row.insert((*name).to_string(), value);
                    }
                }
                FieldMap(row)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// DatasetSP.save request
// ---------------------------------------------------------------------------

pub const SAVE_SERVICE: &str = "DatasetSP.save";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub service_name: String,
    pub request_body: SaveRequestBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequestBody {
    pub entity_name: String,
    pub stand_alone: bool,
    pub fields: Vec<String>,
    pub records: Vec<SaveRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pk: Option<BTreeMap<String, String>>,
    pub values: BTreeMap<String, String>,
}

impl SaveRequest {
    /// Insert one record. `values` pair up with `fields` and take slots
    /// numbered from `"0"` in declaration order.
    pub fn insert(entity: &str, fields: &[&str], values: &[String]) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        let record = SaveRecord {
            pk: None,
            values: numbered(values, 0),
        };
        Self::build(entity, fields, record)
    }

    /// Update one record by primary key. `fields[0]` must be the pk field:
    /// it is carried in the `pk` map and its slot `"0"` is never repeated in
    /// `values`, so the remaining fields take slots numbered from `"1"`.
    pub fn update(entity: &str, fields: &[&str], pk_value: &str, values: &[String]) -> Self {
        debug_assert_eq!(fields.len(), values.len() + 1);
        let mut pk = BTreeMap::new();
        pk.insert(fields[0].to_string(), pk_value.to_string());
        let record = SaveRecord {
            pk: Some(pk),
            values: numbered(values, 1),
        };
        Self::build(entity, fields, record)
    }

    fn build(entity: &str, fields: &[&str], record: SaveRecord) -> Self {
        Self {
            service_name: SAVE_SERVICE.to_string(),
            request_body: SaveRequestBody {
                entity_name: entity.to_string(),
                stand_alone: false,
                fields: fields.iter().map(|f| f.to_string()).collect(),
                records: vec![record],
            },
        }
    }
}

fn numbered(values: &[String], first_slot: usize) -> BTreeMap<String, String> {
    values
        .iter()
        .enumerate()
        .map(|(offset, value)| ((first_slot + offset).to_string(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> LoadRecordsResponse {
        serde_json::from_value(value).expect("response should decode")
    }

    #[test]
    fn insert_numbers_slots_from_zero_in_field_order() {
        let request = SaveRequest::insert(
            "AD_USUARIOSVENDAS",
            &["NOME", "EMAIL", "STATUS"],
            &["A".into(), "B".into(), "C".into()],
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["serviceName"], "DatasetSP.save");
        assert_eq!(body["requestBody"]["standAlone"], json!(false));
        assert_eq!(
            body["requestBody"]["records"][0]["values"],
            json!({"0": "A", "1": "B", "2": "C"})
        );
        assert!(body["requestBody"]["records"][0].get("pk").is_none());
    }

    #[test]
    fn update_carries_pk_and_numbers_slots_from_one() {
        let request = SaveRequest::update(
            "AD_USUARIOSVENDAS",
            &["CODUSUARIO", "NOME", "EMAIL"],
            "42",
            &["A".into(), "B".into()],
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["requestBody"]["records"][0]["pk"],
            json!({"CODUSUARIO": "42"})
        );
        // Slot "0" belongs to the pk field and must not reappear.
        assert_eq!(
            body["requestBody"]["records"][0]["values"],
            json!({"1": "A", "2": "B"})
        );
    }

    #[test]
    fn single_entity_and_one_element_array_normalize_identically() {
        let metadata = json!({"fields": {"field": [{"name": "NOME"}]}});
        let single = decode(json!({
            "responseBody": {"entities": {
                "metadata": metadata,
                "entity": {"f0": {"$": "ALICE"}}
            }}
        }));
        let array = decode(json!({
            "responseBody": {"entities": {
                "metadata": metadata,
                "entity": [{"f0": {"$": "ALICE"}}]
            }}
        }));

        let single_rows = single.response_body.unwrap().entities.unwrap().rows();
        let array_rows = array.response_body.unwrap().entities.unwrap().rows();
        assert_eq!(single_rows.len(), 1);
        assert_eq!(array_rows.len(), 1);
        assert_eq!(single_rows[0].get("NOME"), array_rows[0].get("NOME"));
    }

    #[test]
    fn missing_positional_slot_leaves_field_absent() {
        let response = decode(json!({
            "responseBody": {"entities": {
                "metadata": {"fields": {"field": [{"name": "NOME"}, {"name": "EMAIL"}]}},
                "entity": [{"f0": {"$": "ALICE"}}]
            }}
        }));

        let rows = response.response_body.unwrap().entities.unwrap().rows();
        assert_eq!(rows[0].get("NOME"), Some("ALICE"));
        assert_eq!(rows[0].get("EMAIL"), None);
    }

    #[test]
    fn empty_result_set_yields_no_rows() {
        let response = decode(json!({
            "responseBody": {"entities": {
                "metadata": {"fields": {"field": [{"name": "NOME"}]}}
            }}
        }));

        let rows = response.response_body.unwrap().entities.unwrap().rows();
        assert!(rows.is_empty());

        let bare = decode(json!({"responseBody": {}}));
        assert!(bare.response_body.unwrap().entities.is_none());
    }

    #[test]
    fn numeric_scalars_render_as_strings() {
        let response = decode(json!({
            "responseBody": {"entities": {
                "metadata": {"fields": {"field": [{"name": "CODUSUARIO"}]}},
                "entity": [{"f0": {"$": 7}}]
            }}
        }));

        let rows = response.response_body.unwrap().entities.unwrap().rows();
        assert_eq!(rows[0].get("CODUSUARIO"), Some("7"));
    }
}

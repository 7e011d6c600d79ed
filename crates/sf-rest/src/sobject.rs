//! SObject records and CRUD result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Salesforce record as an open JSON object.
///
/// Field names are the API names (`Id`, `Name`, `Custom__c`). The object type
/// lives in `attributes.type`, the way the REST API returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SObject(Map<String, Value>);

impl SObject {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record of the given type.
    pub fn of_type(type_name: &str) -> Self {
        let mut record = Self::new();
        record.set_type(type_name);
        record
    }

    /// The record id, if set.
    pub fn id(&self) -> Option<&str> {
        self.get_str("Id").filter(|id| !id.is_empty())
    }

    /// The object type from `attributes.type`.
    pub fn type_name(&self) -> Option<&str> {
        self.0
            .get("attributes")?
            .get("type")?
            .as_str()
            .filter(|t| !t.is_empty())
    }

    /// Set `attributes.type`, keeping any other attributes.
    pub fn set_type(&mut self, type_name: &str) -> &mut Self {
        let attributes = self
            .0
            .entry("attributes")
            .or_insert_with(|| Value::Object(Map::new()));
        if !attributes.is_object() {
            *attributes = Value::Object(Map::new());
        }
        if let Value::Object(map) = attributes {
            map.insert("type".to_string(), Value::from(type_name));
        }
        self
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a string field value.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.as_str()
    }

    /// Set a field value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Remove a field, returning its old value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// All fields, including `attributes`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record and return its fields.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// The body sent on create and update: every field except `attributes` and `Id`.
    pub fn write_payload(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != "attributes" && key.as_str() != "Id")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<Map<String, Value>> for SObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Result of a create operation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
}

/// Salesforce error in operation results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SalesforceError {
    #[serde(rename = "statusCode", alias = "errorCode")]
    pub status_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

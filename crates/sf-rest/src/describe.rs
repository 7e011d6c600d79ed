//! Describe types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Result of describeGlobal: every object visible to the user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DescribeGlobalResult {
    /// Character encoding (e.g., "UTF-8").
    pub encoding: String,

    /// Maximum batch size for composite operations.
    #[serde(rename = "maxBatchSize")]
    pub max_batch_size: u32,

    /// List of SObject summaries.
    pub sobjects: Vec<SObjectSummary>,
}

impl DescribeGlobalResult {
    /// Find an object by API name.
    pub fn find(&self, name: &str) -> Option<&SObjectSummary> {
        self.sobjects
            .iter()
            .find(|sobject| sobject.name.eq_ignore_ascii_case(name))
    }
}

/// Basic information about an SObject from describeGlobal.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectSummary {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub label_plural: String,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub retrieveable: bool,
    #[serde(default)]
    pub custom_setting: Option<bool>,
    #[serde(default)]
    pub layoutable: Option<bool>,
    #[serde(default)]
    pub triggerable: Option<bool>,
    #[serde(default)]
    pub replicateable: Option<bool>,
    #[serde(default)]
    pub urls: Option<HashMap<String, String>>,
}

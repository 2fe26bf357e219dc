//! Class metadata returned alongside results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `meta` object of a response, keyed by class name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(flatten)]
    pub classes: HashMap<String, ClassMeta>,
}

impl Meta {
    /// Metadata for one class.
    pub fn class(&self, name: &str) -> Option<&ClassMeta> {
        self.classes.get(name)
    }
}

/// Metadata describing a class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose_name_plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields_order: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ordering: Vec<String>,
    #[serde(default)]
    pub logical_delete: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub fields: HashMap<String, FieldMeta>,
    /// Keys this struct does not model (`ui_form`, ACL settings, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Metadata describing a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

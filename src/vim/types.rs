// vim25 data objects exchanged over VI/JSON

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Reference to a server-side managed object (`{"type": "Folder", "value": "group-d1"}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagedObjectReference {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(type_: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            value: value.into(),
        }
    }

    /// Request form; VI/JSON wants the `_typeName` discriminator on data objects.
    pub fn to_request_json(&self) -> Value {
        json!({
            "_typeName": "ManagedObjectReference",
            "type": self.type_,
            "value": self.value,
        })
    }
}

impl std::fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.type_, self.value)
    }
}

/// Subset of `ServiceInstance.content` needed to log in and scope views.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    pub root_folder: ManagedObjectReference,
    pub view_manager: ManagedObjectReference,
    pub property_collector: ManagedObjectReference,
    pub session_manager: ManagedObjectReference,
    #[serde(default)]
    pub about: AboutInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutInfo {
    pub full_name: String,
    pub api_version: String,
}

/// One object returned by `RetrieveProperties` with the requested properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub obj: ManagedObjectReference,
    #[serde(default)]
    pub prop_set: Vec<DynamicProperty>,
}

impl ObjectContent {
    /// Value of property `name`, if the endpoint returned it.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.prop_set.iter().find(|p| p.name == name).map(|p| &p.val)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamicProperty {
    pub name: String,
    #[serde(default)]
    pub val: Value,
}

/// Body of a non-2xx VI/JSON response: a serialized `MethodFault`.
#[derive(Debug, Deserialize)]
pub(crate) struct FaultBody {
    #[serde(rename = "_typeName")]
    pub type_name: String,
    #[serde(default, alias = "faultstring", alias = "message")]
    pub msg: Option<String>,
}

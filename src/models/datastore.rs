// Datastore summary (vim.Datastore.Summary subset)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatastoreSummary {
    pub name: String,
    /// File system type, e.g. VMFS, NFS, vsan.
    #[serde(rename = "type")]
    pub type_: String,
    /// Bytes.
    pub capacity: i64,
    /// Bytes.
    pub free_space: i64,
}

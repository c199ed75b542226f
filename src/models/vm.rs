// VirtualMachine summary (vim.vm.Summary subset)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VmSummary {
    pub config: VmConfigSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VmConfigSummary {
    pub name: String,
    /// Guest OS as configured, e.g. "Ubuntu Linux (64-bit)".
    pub guest_full_name: String,
}

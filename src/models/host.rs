// HostSystem summary (vim.host.Summary subset)

use serde::{Deserialize, Serialize};

/// The `summary` property of a HostSystem, reduced to the fields the report uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostSummary {
    pub config: HostConfigSummary,
    pub hardware: HostHardwareSummary,
    pub quick_stats: HostQuickStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfigSummary {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostHardwareSummary {
    /// Per-core clock speed in MHz.
    pub cpu_mhz: i64,
    pub num_cpu_cores: i64,
    /// Physical memory in bytes.
    pub memory_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostQuickStats {
    /// Aggregated CPU usage across all cores, MHz.
    pub overall_cpu_usage: i64,
    /// Physical memory usage, MiB.
    pub overall_memory_usage: i64,
}

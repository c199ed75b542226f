// Managed object summaries as returned by the endpoint

mod datastore;
mod host;
mod kind;
mod vm;

pub use datastore::DatastoreSummary;
pub use host::{HostConfigSummary, HostHardwareSummary, HostQuickStats, HostSummary};
pub use kind::ObjectKind;
pub use vm::{VmConfigSummary, VmSummary};

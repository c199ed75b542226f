// Inventory impls for the three summary types

use super::Inventory;
use crate::metrics::host_metrics;
use crate::models::{DatastoreSummary, HostSummary, ObjectKind, VmSummary};
use crate::report::{DatastoreRow, HostRow, VmRow};
use crate::units::ByteSize;

pub trait Sealed {}

impl Sealed for HostSummary {}
impl Sealed for DatastoreSummary {}
impl Sealed for VmSummary {}

impl Inventory for HostSummary {
    const KIND: ObjectKind = ObjectKind::Host;
    type Row = HostRow;

    fn row(&self) -> HostRow {
        let m = host_metrics(self);
        HostRow {
            name: self.config.name.clone(),
            used_cpu: m.used_cpu_mhz,
            total_cpu: m.total_cpu_mhz,
            free_cpu: m.free_cpu_mhz,
            used_memory: m.used_memory,
            total_memory: m.total_memory,
            free_memory: m.free_memory,
        }
    }
}

impl Inventory for DatastoreSummary {
    const KIND: ObjectKind = ObjectKind::Datastore;
    type Row = DatastoreRow;

    fn row(&self) -> DatastoreRow {
        DatastoreRow {
            name: self.name.clone(),
            type_: self.type_.clone(),
            capacity: ByteSize(self.capacity.into()),
            free: ByteSize(self.free_space.into()),
        }
    }
}

impl Inventory for VmSummary {
    const KIND: ObjectKind = ObjectKind::VirtualMachine;
    type Row = VmRow;

    fn row(&self) -> VmRow {
        VmRow {
            name: self.config.name.clone(),
            guest_full_name: self.config.guest_full_name.clone(),
        }
    }
}

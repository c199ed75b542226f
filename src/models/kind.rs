// Managed object kinds covered by the inventory report

use std::fmt;

/// The closed set of managed object kinds the report covers, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Host,
    Datastore,
    VirtualMachine,
}

impl ObjectKind {
    /// vim25 managed object type name used in container views and property specs.
    pub fn type_name(self) -> &'static str {
        match self {
            ObjectKind::Host => "HostSystem",
            ObjectKind::Datastore => "Datastore",
            ObjectKind::VirtualMachine => "VirtualMachine",
        }
    }

    /// Word used in the section title (`*** Host Information ***`).
    pub fn title(self) -> &'static str {
        match self {
            ObjectKind::Host => "Host",
            ObjectKind::Datastore => "Datastore",
            ObjectKind::VirtualMachine => "VM",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectKind::Host => "host",
            ObjectKind::Datastore => "datastore",
            ObjectKind::VirtualMachine => "virtual machine",
        })
    }
}

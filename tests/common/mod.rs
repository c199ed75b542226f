// Shared test helpers: summary JSON builders and an in-memory ViewApi endpoint

#![allow(dead_code)]

pub mod vsphere;

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use vsphere_inventory::vim::{
    DynamicProperty, EndpointError, ManagedObjectReference, ObjectContent, ViewApi,
};

pub fn host_json(
    name: &str,
    cpu_mhz: i64,
    cores: i64,
    used_cpu_mhz: i64,
    memory_bytes: i64,
    used_memory_mib: i64,
) -> Value {
    json!({
        "_typeName": "HostListSummary",
        "config": {"_typeName": "HostConfigSummary", "name": name, "port": 443},
        "hardware": {
            "_typeName": "HostHardwareSummary",
            "vendor": "Dell Inc.",
            "cpuMhz": cpu_mhz,
            "numCpuCores": cores,
            "numCpuThreads": cores * 2,
            "memorySize": memory_bytes
        },
        "quickStats": {
            "_typeName": "HostListSummaryQuickStats",
            "overallCpuUsage": used_cpu_mhz,
            "overallMemoryUsage": used_memory_mib,
            "uptime": 86400
        },
        "overallStatus": "green"
    })
}

pub fn datastore_json(name: &str, type_: &str, capacity: i64, free_space: i64) -> Value {
    json!({
        "_typeName": "DatastoreSummary",
        "name": name,
        "type": type_,
        "capacity": capacity,
        "freeSpace": free_space,
        "accessible": true,
        "url": format!("ds:///vmfs/volumes/{name}/")
    })
}

pub fn vm_json(name: &str, guest_full_name: &str) -> Value {
    json!({
        "_typeName": "VirtualMachineSummary",
        "config": {
            "_typeName": "VirtualMachineConfigSummary",
            "name": name,
            "guestFullName": guest_full_name,
            "template": false,
            "numCpu": 2
        },
        "overallStatus": "green"
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Retrieve { type_name: String, view: String },
    Destroy(String),
}

/// In-memory endpoint. Objects are returned in insertion order; a `Value::Null`
/// summary stands for an object returned without its `summary` property.
#[derive(Default)]
pub struct FakeEndpoint {
    root: Option<ManagedObjectReference>,
    objects: HashMap<String, Vec<Value>>,
    fail_create: Option<String>,
    fail_retrieve: Option<String>,
    fail_destroy: bool,
    cancel_on_retrieve: Option<(String, CancellationToken)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeEndpoint {
    pub fn new() -> Self {
        Self {
            root: Some(ManagedObjectReference::new("Folder", "group-d1")),
            ..Default::default()
        }
    }

    pub fn with_objects(mut self, type_name: &str, summaries: Vec<Value>) -> Self {
        self.objects.insert(type_name.to_string(), summaries);
        self
    }

    pub fn failing_create(mut self, type_name: &str) -> Self {
        self.fail_create = Some(type_name.to_string());
        self
    }

    pub fn failing_retrieve(mut self, type_name: &str) -> Self {
        self.fail_retrieve = Some(type_name.to_string());
        self
    }

    pub fn failing_destroy(mut self) -> Self {
        self.fail_destroy = true;
        self
    }

    /// Cancels `token` from inside the retrieval of `type_name`, then never completes.
    pub fn cancelling_retrieve(mut self, type_name: &str, token: CancellationToken) -> Self {
        self.cancel_on_retrieve = Some((type_name.to_string(), token));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Destroy(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn fault(name: &str) -> EndpointError {
    EndpointError::Fault {
        fault: name.to_string(),
        message: format!("simulated {name}"),
    }
}

impl ViewApi for FakeEndpoint {
    fn root_folder(&self) -> &ManagedObjectReference {
        self.root.as_ref().expect("FakeEndpoint::new sets the root folder")
    }

    async fn create_container_view(
        &self,
        container: &ManagedObjectReference,
        types: &[&str],
        recursive: bool,
    ) -> Result<ManagedObjectReference, EndpointError> {
        assert_eq!(container, self.root_folder());
        assert!(recursive, "container views must be recursive");
        assert_eq!(types.len(), 1);
        let type_name = types[0].to_string();
        self.record(Call::Create(type_name.clone()));
        if self.fail_create.as_deref() == Some(type_name.as_str()) {
            return Err(fault("NoPermission"));
        }
        Ok(ManagedObjectReference::new(
            "ContainerView",
            format!("session[fake]view-{type_name}"),
        ))
    }

    async fn retrieve_properties(
        &self,
        view: &ManagedObjectReference,
        type_name: &str,
        path_set: &[&str],
    ) -> Result<Vec<ObjectContent>, EndpointError> {
        assert_eq!(path_set, ["summary"]);
        self.record(Call::Retrieve {
            type_name: type_name.to_string(),
            view: view.value.clone(),
        });
        if let Some((kind, token)) = &self.cancel_on_retrieve
            && kind == type_name
        {
            token.cancel();
            std::future::pending::<()>().await;
        }
        if self.fail_retrieve.as_deref() == Some(type_name) {
            return Err(fault("ManagedObjectNotFound"));
        }
        let summaries = self.objects.get(type_name).cloned().unwrap_or_default();
        Ok(summaries
            .into_iter()
            .enumerate()
            .map(|(i, val)| ObjectContent {
                obj: ManagedObjectReference::new(type_name, format!("{type_name}-{i}")),
                prop_set: if val.is_null() {
                    vec![]
                } else {
                    vec![DynamicProperty {
                        name: "summary".to_string(),
                        val,
                    }]
                },
            })
            .collect())
    }

    async fn destroy_view(&self, view: &ManagedObjectReference) -> Result<(), EndpointError> {
        self.record(Call::Destroy(view.value.clone()));
        if self.fail_destroy {
            return Err(fault("ManagedObjectNotFound"));
        }
        Ok(())
    }
}

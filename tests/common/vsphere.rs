// wiremock VI/JSON endpoint: service content, login, views, RetrieveProperties

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RELEASE: &str = "8.0.1.0";
pub const SESSION_ID: &str = "52d9e6b1-5ad3-4ac7-b9f2-8fd5b4a0c1de";

pub fn sdk_path(object_type: &str, moid: &str, method: &str) -> String {
    format!("/sdk/vim25/{RELEASE}/{object_type}/{moid}/{method}")
}

pub fn moref(type_: &str, value: &str) -> Value {
    json!({"_typeName": "ManagedObjectReference", "type": type_, "value": value})
}

pub fn service_content() -> Value {
    json!({
        "_typeName": "ServiceContent",
        "rootFolder": moref("Folder", "group-d1"),
        "propertyCollector": moref("PropertyCollector", "propertyCollector"),
        "viewManager": moref("ViewManager", "ViewManager"),
        "sessionManager": moref("SessionManager", "SessionManager"),
        "about": {
            "_typeName": "AboutInfo",
            "fullName": "VMware vCenter Server 8.0.2 build-22385739",
            "apiVersion": "8.0.2.0"
        }
    })
}

pub fn object_content(type_: &str, value: &str, summary: Value) -> Value {
    json!({
        "_typeName": "ObjectContent",
        "obj": moref(type_, value),
        "propSet": [{"_typeName": "DynamicProperty", "name": "summary", "val": summary}]
    })
}

fn user_session() -> Value {
    json!({
        "_typeName": "UserSession",
        "userName": "VSPHERE.LOCAL\\Administrator"
    })
}

pub async fn mount_service_content(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(sdk_path("ServiceInstance", "ServiceInstance", "content")))
        .respond_with(ResponseTemplate::new(200).set_body_json(service_content()))
        .mount(server)
        .await;
}

/// Service content and a successful Login.
pub async fn mount_login(server: &MockServer) {
    mount_service_content(server).await;
    login_mock().mount(server).await;
}

/// A successful Login expected exactly `times` times.
pub async fn mount_login_times(server: &MockServer, times: u64) {
    login_mock().expect(times).mount(server).await;
}

fn login_mock() -> Mock {
    Mock::given(method("POST"))
        .and(path(sdk_path("SessionManager", "SessionManager", "Login")))
        .and(body_partial_json(json!({"userName": "administrator@vsphere.local"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("vmware-api-session-id", SESSION_ID)
                .set_body_json(user_session()),
        )
}

/// `SessionManager.currentSession` read with `session_id`: the user session
/// when `valid`, 401 otherwise.
pub async fn mount_current_session(
    server: &MockServer,
    session_id: &str,
    valid: bool,
    times: u64,
) {
    let response = if valid {
        ResponseTemplate::new(200).set_body_json(user_session())
    } else {
        ResponseTemplate::new(401)
    };
    Mock::given(method("GET"))
        .and(path(sdk_path("SessionManager", "SessionManager", "currentSession")))
        .and(header("vmware-api-session-id", session_id))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Logout must not be called.
pub async fn mount_no_logout(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(sdk_path("SessionManager", "SessionManager", "Logout")))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(server)
        .await;
}

/// Logout, expected exactly once.
pub async fn mount_logout(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(sdk_path("SessionManager", "SessionManager", "Logout")))
        .and(header("vmware-api-session-id", SESSION_ID))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
}

/// View creation, retrieval and destruction for one type. The view is
/// expected to be destroyed exactly once.
pub async fn mount_kind(server: &MockServer, type_name: &str, objects: Vec<Value>) {
    mount_kind_runs(server, type_name, objects, 1).await;
}

/// Like [`mount_kind`] for `runs` report runs against the same server.
pub async fn mount_kind_runs(
    server: &MockServer,
    type_name: &str,
    objects: Vec<Value>,
    runs: u64,
) {
    let view = format!("view-{type_name}");
    Mock::given(method("POST"))
        .and(path(sdk_path("ViewManager", "ViewManager", "CreateContainerView")))
        .and(header("vmware-api-session-id", SESSION_ID))
        .and(body_partial_json(json!({
            "container": {"type": "Folder", "value": "group-d1"},
            "type": [type_name],
            "recursive": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(moref("ContainerView", &view)))
        .expect(runs)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(sdk_path(
            "PropertyCollector",
            "propertyCollector",
            "RetrieveProperties",
        )))
        .and(header("vmware-api-session-id", SESSION_ID))
        .and(body_partial_json(json!({
            "specSet": [{
                "propSet": [{"type": type_name, "pathSet": ["summary"]}],
                "objectSet": [{"obj": {"type": "ContainerView", "value": view}, "skip": true}]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(objects)))
        .expect(runs)
        .mount(server)
        .await;

    mount_destroy_runs(server, &view, runs).await;
}

pub async fn mount_destroy(server: &MockServer, view: &str) {
    mount_destroy_runs(server, view, 1).await;
}

pub async fn mount_destroy_runs(server: &MockServer, view: &str, runs: u64) {
    Mock::given(method("POST"))
        .and(path(sdk_path("ContainerView", view, "DestroyView")))
        .and(header("vmware-api-session-id", SESSION_ID))
        .respond_with(ResponseTemplate::new(204))
        .expect(runs)
        .mount(server)
        .await;
}

// vSphere vim25 client over VI/JSON (`/sdk/vim25/{release}/...`)
//
// Only the calls the inventory pipeline needs: service content, login/logout,
// session reuse, container views and RetrieveProperties.

mod cache;
mod error;
mod types;

pub use cache::SessionCache;
pub use error::EndpointError;
pub use types::{
    AboutInfo, DynamicProperty, ManagedObjectReference, ObjectContent, ServiceContent,
};

use crate::config::{ClientConfig, Credentials, EndpointConfig};
use crate::version;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;
use tracing::instrument;
use types::FaultBody;
use url::Url;

/// Header carrying the session id, returned by Login and sent on every later call.
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// View primitives the inventory pipeline consumes. Implemented by [`Session`];
/// tests substitute an in-memory endpoint.
pub trait ViewApi {
    /// Inventory root used to scope container views.
    fn root_folder(&self) -> &ManagedObjectReference;

    /// `ViewManager.CreateContainerView`.
    fn create_container_view(
        &self,
        container: &ManagedObjectReference,
        types: &[&str],
        recursive: bool,
    ) -> impl Future<Output = Result<ManagedObjectReference, EndpointError>> + Send;

    /// `PropertyCollector.RetrieveProperties` over every object in `view` of
    /// `type_name`, one request.
    fn retrieve_properties(
        &self,
        view: &ManagedObjectReference,
        type_name: &str,
        path_set: &[&str],
    ) -> impl Future<Output = Result<Vec<ObjectContent>, EndpointError>> + Send;

    /// `ContainerView.DestroyView`.
    fn destroy_view(
        &self,
        view: &ManagedObjectReference,
    ) -> impl Future<Output = Result<(), EndpointError>> + Send;
}

/// Unauthenticated VI/JSON client; [`Client::login`] turns it into a [`Session`].
pub struct Client {
    http: reqwest::Client,
    base: Url,
    release: String,
}

impl Client {
    pub fn new(url: &Url, config: &ClientConfig) -> Result<Self, EndpointError> {
        if url.cannot_be_a_base() {
            return Err(EndpointError::InvalidBaseUrl(url.to_string()));
        }
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(version::user_agent())
            .build()?;
        Ok(Self {
            http,
            base: url.clone(),
            release: config.api_release.clone(),
        })
    }

    pub fn from_endpoint(endpoint: &EndpointConfig) -> Result<Self, EndpointError> {
        Self::new(&endpoint.url, &endpoint.client)
    }

    /// Fetches the service content and logs in with `credentials`.
    #[instrument(skip(self, credentials), fields(endpoint = %self.base, operation = "login"))]
    pub async fn login(self, credentials: &Credentials) -> Result<Session, EndpointError> {
        let content = self.service_content().await?;
        self.login_with(content, credentials).await
    }

    /// Reuses the session id stored in `cache` while the endpoint still
    /// accepts it, otherwise logs in and stores the new id. Without a cache
    /// this is [`Client::login`].
    ///
    /// A session that is reused or stored is marked persisted and should not
    /// be logged out.
    #[instrument(skip_all, fields(endpoint = %self.base, operation = "connect"))]
    pub async fn connect(
        self,
        credentials: &Credentials,
        cache: Option<&SessionCache>,
    ) -> Result<Session, EndpointError> {
        let Some(cache) = cache else {
            return self.login(credentials).await;
        };
        let content = self.service_content().await?;

        let cached = cache.load().await.unwrap_or_else(|e| {
            tracing::warn!(path = %cache.path().display(), error = %e, "unreadable session cache");
            None
        });
        if let Some(session_id) = cached {
            if self.current_session(&content, &session_id).await? {
                tracing::info!("reusing cached session");
                return Ok(Session {
                    client: self,
                    session_id,
                    content,
                    persisted: true,
                });
            }
            tracing::debug!("cached session no longer valid");
        }

        let mut session = self.login_with(content, credentials).await?;
        match cache.store(&session.session_id).await {
            Ok(()) => session.persisted = true,
            Err(e) => {
                tracing::warn!(path = %cache.path().display(), error = %e, "session not cached")
            }
        }
        Ok(session)
    }

    async fn service_content(&self) -> Result<ServiceContent, EndpointError> {
        let instance = ManagedObjectReference::new("ServiceInstance", "ServiceInstance");
        let url = self.method_url(&instance, "content")?;
        let resp = Self::check_status(self.http.get(url).send().await?).await?;
        parse_json(resp).await
    }

    /// `SessionManager.currentSession` read with `session_id`; `false` when the
    /// endpoint no longer knows the session.
    async fn current_session(
        &self,
        content: &ServiceContent,
        session_id: &str,
    ) -> Result<bool, EndpointError> {
        let url = self.method_url(&content.session_manager, "currentSession")?;
        let resp = self.http.get(url).header(SESSION_HEADER, session_id).send().await?;
        match Self::check_status(resp).await {
            Ok(resp) => {
                let user: Option<Value> = parse_json(resp).await?;
                Ok(user.is_some())
            }
            Err(e) if e.is_auth_failure() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn login_with(
        self,
        content: ServiceContent,
        credentials: &Credentials,
    ) -> Result<Session, EndpointError> {
        let url = self.method_url(&content.session_manager, "Login")?;
        let body = json!({
            "userName": credentials.username,
            "password": credentials.password,
        });
        let resp = self.invoke(url, None, Some(&body)).await?;
        let session_id = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .ok_or(EndpointError::MissingSessionId)?;

        tracing::info!(
            product = %content.about.full_name,
            api_version = %content.about.api_version,
            "Log in successful"
        );
        Ok(Session {
            client: self,
            session_id,
            content,
            persisted: false,
        })
    }

    fn method_url(
        &self,
        object: &ManagedObjectReference,
        method: &str,
    ) -> Result<Url, EndpointError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| EndpointError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend([
                "sdk",
                "vim25",
                self.release.as_str(),
                object.type_.as_str(),
                object.value.as_str(),
                method,
            ]);
        Ok(url)
    }

    async fn invoke(
        &self,
        url: Url,
        session_id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Response, EndpointError> {
        let mut req = self.http.post(url);
        if let Some(sid) = session_id {
            req = req.header(SESSION_HEADER, sid);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Self::check_status(req.send().await?).await
    }

    async fn check_status(resp: Response) -> Result<Response, EndpointError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        if let Ok(fault) = serde_json::from_str::<FaultBody>(&body) {
            return Err(EndpointError::Fault {
                message: fault.msg.unwrap_or_else(|| fault.type_name.clone()),
                fault: fault.type_name,
            });
        }
        Err(EndpointError::Status {
            status: status.as_u16(),
            body: body.chars().take(500).collect(),
        })
    }
}

/// Authenticated session. One per report run.
pub struct Session {
    client: Client,
    session_id: String,
    content: ServiceContent,
    persisted: bool,
}

impl Session {
    pub fn content(&self) -> &ServiceContent {
        &self.content
    }

    /// Stored in a [`SessionCache`] for the next run.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// `SessionManager.Logout`. Destroys any views the session still holds.
    #[instrument(skip(self), fields(operation = "logout"))]
    pub async fn logout(self) -> Result<(), EndpointError> {
        let url = self
            .client
            .method_url(&self.content.session_manager, "Logout")?;
        self.client
            .invoke(url, Some(&self.session_id), None)
            .await?;
        Ok(())
    }

    async fn call(
        &self,
        object: &ManagedObjectReference,
        method: &str,
        body: Option<&Value>,
    ) -> Result<Response, EndpointError> {
        let url = self.client.method_url(object, method)?;
        self.client
            .invoke(url, Some(&self.session_id), body)
            .await
    }
}

impl ViewApi for Session {
    fn root_folder(&self) -> &ManagedObjectReference {
        &self.content.root_folder
    }

    #[instrument(skip(self, container), fields(operation = "CreateContainerView", container = %container))]
    async fn create_container_view(
        &self,
        container: &ManagedObjectReference,
        types: &[&str],
        recursive: bool,
    ) -> Result<ManagedObjectReference, EndpointError> {
        let body = json!({
            "container": container.to_request_json(),
            "type": types,
            "recursive": recursive,
        });
        let resp = self
            .call(&self.content.view_manager, "CreateContainerView", Some(&body))
            .await?;
        parse_json(resp).await
    }

    #[instrument(skip(self, view, path_set), fields(operation = "RetrieveProperties", view = %view))]
    async fn retrieve_properties(
        &self,
        view: &ManagedObjectReference,
        type_name: &str,
        path_set: &[&str],
    ) -> Result<Vec<ObjectContent>, EndpointError> {
        let body = json!({
            "specSet": [{
                "_typeName": "PropertyFilterSpec",
                "propSet": [{
                    "_typeName": "PropertySpec",
                    "type": type_name,
                    "pathSet": path_set,
                }],
                "objectSet": [{
                    "_typeName": "ObjectSpec",
                    "obj": view.to_request_json(),
                    "skip": true,
                    "selectSet": [{
                        "_typeName": "TraversalSpec",
                        "name": "traverseEntities",
                        "type": "ContainerView",
                        "path": "view",
                        "skip": false,
                    }],
                }],
            }],
        });
        let resp = self
            .call(
                &self.content.property_collector,
                "RetrieveProperties",
                Some(&body),
            )
            .await?;
        let objects: Option<Vec<ObjectContent>> = parse_json(resp).await?;
        Ok(objects.unwrap_or_default())
    }

    #[instrument(skip(self, view), fields(operation = "DestroyView", view = %view))]
    async fn destroy_view(&self, view: &ManagedObjectReference) -> Result<(), EndpointError> {
        self.call(view, "DestroyView", None).await?;
        Ok(())
    }
}

/// Parses a JSON body; an empty body decodes as JSON `null`.
async fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, EndpointError> {
    let body = resp.text().await?;
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    Ok(serde_json::from_str(body)?)
}

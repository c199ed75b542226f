// Endpoint, credentials and client settings: GOVMOMI_* environment plus an optional TOML file

use anyhow::Context;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use url::Url;

pub const ENV_URL: &str = "GOVMOMI_URL";
pub const ENV_USERNAME: &str = "GOVMOMI_USERNAME";
pub const ENV_PASSWORD: &str = "GOVMOMI_PASSWORD";
pub const ENV_INSECURE: &str = "GOVMOMI_INSECURE";
pub const ENV_PERSIST_SESSION: &str = "GOVMOMI_PERSIST_SESSION";
pub const ENV_HOME: &str = "GOVMOMI_HOME";
pub const ENV_CONFIG_FILE: &str = "CONFIG_FILE";

/// Read when `CONFIG_FILE` is unset; a missing default file means all defaults.
pub const DEFAULT_CONFIG_FILE: &str = "vsphere-inventory.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Per-request timeout applied to every endpoint call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// vim25 release in VI/JSON paths (`/sdk/vim25/{api_release}/...`).
    #[serde(default = "default_api_release")]
    pub api_release: String,
    /// Skip TLS certificate verification. Overridden by GOVMOMI_INSECURE.
    #[serde(default = "default_insecure")]
    pub insecure: bool,
    /// Keep the session id on disk and reuse it on the next run instead of
    /// logging in and out. Overridden by GOVMOMI_PERSIST_SESSION.
    #[serde(default = "default_persist_session")]
    pub persist_session: bool,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_api_release() -> String {
    "8.0.1.0".into()
}

fn default_insecure() -> bool {
    true
}

fn default_persist_session() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            api_release: default_api_release(),
            insecure: default_insecure(),
            persist_session: default_persist_session(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`] with an explicit environment lookup.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        if let Some(path) = env(ENV_CONFIG_FILE) {
            let s = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            return Self::load_from_str(&s);
        }
        match std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("reading config file {DEFAULT_CONFIG_FILE}")),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.client.timeout_secs > 0,
            "client.timeout_secs must be > 0, got {}",
            self.client.timeout_secs
        );
        anyhow::ensure!(
            !self.client.api_release.trim().is_empty(),
            "client.api_release must be non-empty"
        );
        Ok(())
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to reach and log in to one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Scheme, host and port only; userinfo and path are stripped.
    pub url: Url,
    pub credentials: Credentials,
    pub client: ClientConfig,
    /// Session cache directory; `None` when persistence is off or no home
    /// directory is known.
    pub session_dir: Option<PathBuf>,
}

impl EndpointConfig {
    pub fn from_env(client: ClientConfig) -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), client)
    }

    /// GOVMOMI_USERNAME / GOVMOMI_PASSWORD win over userinfo embedded in the URL.
    pub fn from_lookup(
        env: impl Fn(&str) -> Option<String>,
        mut client: ClientConfig,
    ) -> anyhow::Result<Self> {
        let raw = env(ENV_URL).unwrap_or_default();
        let mut url = parse_endpoint_url(&raw)?;

        let username = match non_empty(env(ENV_USERNAME)) {
            Some(username) => username,
            None => decode_userinfo(url.username(), "username")?
                .with_context(|| format!("{ENV_USERNAME} must be set"))?,
        };
        let password = match non_empty(env(ENV_PASSWORD)) {
            Some(password) => password,
            None => decode_userinfo(url.password().unwrap_or_default(), "password")?
                .with_context(|| format!("{ENV_PASSWORD} must be set"))?,
        };

        // Both setters only fail for cannot-be-a-base URLs, ruled out by parse_endpoint_url.
        let _ = url.set_username("");
        let _ = url.set_password(None);

        if let Some(value) = non_blank(env(ENV_INSECURE)) {
            client.insecure = parse_bool(ENV_INSECURE, &value)?;
        }
        if let Some(value) = non_blank(env(ENV_PERSIST_SESSION)) {
            client.persist_session = parse_bool(ENV_PERSIST_SESSION, &value)?;
        }
        let session_dir = if client.persist_session {
            session_dir(&env)
        } else {
            None
        };

        Ok(Self {
            url,
            credentials: Credentials { username, password },
            client,
            session_dir,
        })
    }
}

/// `$GOVMOMI_HOME/sessions`, else `$HOME/.govmomi/sessions`.
fn session_dir(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(home) = non_blank(env(ENV_HOME)) {
        return Some(PathBuf::from(home).join("sessions"));
    }
    non_blank(env("HOME")).map(|home| PathBuf::from(home).join(".govmomi").join("sessions"))
}

/// Userinfo stays percent-encoded in a parsed URL (`administrator%40vsphere.local`).
fn decode_userinfo(raw: &str, part: &str) -> anyhow::Result<Option<String>> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .with_context(|| format!("{ENV_URL} {part} is not valid UTF-8"))?;
    Ok(non_empty(Some(decoded.into_owned())))
}

/// Accepts `vc.example.com`, `vc.example.com:8443`, `https://vc/sdk` and the like.
/// A missing scheme defaults to https; any path, query or fragment is dropped.
pub fn parse_endpoint_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    anyhow::ensure!(!raw.is_empty(), "{ENV_URL} must be set");

    let with_scheme = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    };
    let mut url =
        Url::parse(&with_scheme).with_context(|| format!("{ENV_URL} is not a valid URL: {raw}"))?;
    anyhow::ensure!(
        matches!(url.scheme(), "https" | "http"),
        "{ENV_URL} scheme must be https or http, got {}",
        url.scheme()
    );
    anyhow::ensure!(
        url.host_str().is_some_and(|h| !h.is_empty()),
        "{ENV_URL} has no host: {raw}"
    );
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Set-but-blank variables count as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean, got {other:?}"),
    }
}

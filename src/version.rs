// Build-time identity from Cargo.toml

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// HTTP User-Agent sent to the endpoint, e.g. `vsphere-inventory/0.1.0`.
pub fn user_agent() -> String {
    format!("{NAME}/{VERSION}")
}

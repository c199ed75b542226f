// Library for tests to access modules

pub mod app;
pub mod config;
pub mod error;
pub mod inventory;
pub mod metrics;
pub mod models;
pub mod report;
pub mod units;
pub mod version;
pub mod vim;

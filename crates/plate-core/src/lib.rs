//! Core plate library (profile controller, account service, session, config).

pub mod account;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod profile;
pub mod session;

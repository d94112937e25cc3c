// Library target: the binary in main.rs drives the terminal, everything it
// renders or mutates lives here so integration tests and benches can reach it.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod keyboard;
pub mod logging;
pub mod session;
pub mod source;
pub mod store;
pub mod ui;

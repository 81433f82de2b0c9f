pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod focus;
pub mod handlers;
pub mod mock;
pub mod spotlight;
pub mod ui;
pub mod viewport;

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod model;
pub mod processor;
pub mod transport;
pub mod view;

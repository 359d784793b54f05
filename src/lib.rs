pub mod bytes;

pub mod config;
pub use config::Config;

pub mod hub;
pub use hub::Hub;

pub mod midi;

pub mod ui;

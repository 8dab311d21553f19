pub mod admin;
pub mod dashboard;
pub mod fixtures;
pub mod model;
pub mod settings;
pub mod store;
pub mod views;

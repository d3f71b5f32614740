pub mod configuration;
pub mod listing;
pub mod setup;

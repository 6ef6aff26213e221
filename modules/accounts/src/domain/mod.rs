pub mod auth_service;
pub mod credentials;
pub mod error;
pub mod model;
pub mod pact_service;
pub mod ports;
pub mod repo;

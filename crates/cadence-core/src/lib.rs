pub mod config;
pub mod execution;
pub mod models;
pub mod observability;
pub mod orchestration;

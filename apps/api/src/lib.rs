pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod interview;
pub mod llm_client;
pub mod models;
pub mod profile;
pub mod routes;
pub mod state;
pub mod worker;

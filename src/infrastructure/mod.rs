// Infrastructure layer - External adapters and configuration
pub mod chunked_json;
pub mod config;
pub mod http_response;
pub mod synthetic_history_repository;

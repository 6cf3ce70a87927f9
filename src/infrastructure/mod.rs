// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod home_assistant;
pub mod http_response;
pub mod svg_writer;

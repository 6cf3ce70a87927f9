// Application layer - Use cases and repository ports
pub mod dashboard_service;
pub mod energy_repository;

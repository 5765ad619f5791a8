/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the domain services and reaches infrastructure
/// only through the outbound ports.
pub mod dto;
pub mod use_cases;

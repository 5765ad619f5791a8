/// Firmware delivery domain - artifact search, layout reconstruction and validation
///
/// Pure domain types live in `domain`, ordered file-classification rules in
/// `policies`, and the stateless services that apply them in `services`.
pub mod domain;
pub mod policies;
pub mod services;

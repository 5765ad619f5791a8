/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist: the CLI drives the use cases
/// directly, and the use cases reach GitHub, the archive format, the
/// flashing tool and the console through these traits.
pub mod outbound;

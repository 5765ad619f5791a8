/// Crate-wide Result alias backed by anyhow::Error.
///
/// Typed failures are raised as `FlashToolError` and recovered with
/// `downcast_ref` where a caller needs to branch on them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

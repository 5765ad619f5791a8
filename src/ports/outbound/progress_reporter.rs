/// ProgressReporter port for reporting pipeline progress to the user
///
/// This port abstracts user-facing output (e.g., stderr) so the use cases
/// stay silent in tests and the binary can decorate output as it likes.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports byte progress of a transfer
    ///
    /// # Arguments
    /// * `current` - Bytes transferred so far
    /// * `total` - Expected total, when the server announced one
    fn report_transfer(&self, current: u64, total: Option<u64>);

    /// Reports a non-fatal problem the user should know about
    fn report_warning(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}

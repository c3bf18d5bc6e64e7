//! Sink trait for formatted log output destinations

use super::error::Result;

/// Where formatted log text goes.
///
/// A sink is owned by exactly one writer thread for its whole working life,
/// so implementations only need `Send`. `write` receives one complete line,
/// trailing newline included.
pub trait Sink: Send {
    fn write(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;

    /// Release the destination. Writes after `close` fail.
    fn close(&mut self) -> Result<()>;

    fn name(&self) -> &str;

    /// Whether the writer should color the level token for this sink
    fn supports_color(&self) -> bool {
        false
    }
}

//! The "renders to a display string" capability shared by event sources and
//! messages

use std::fmt;

/// A value that can be turned into the text of a log line.
///
/// Every `Display + Send` type gets this for free, so strings, integers and
/// any custom type with a `Display` impl can be used as a source or message.
/// Types that want a different log representation than their `Display` output
/// can implement `Render` directly instead.
///
/// # Example
///
/// ```
/// use spektral_log::Render;
///
/// struct Port(u16);
///
/// impl Render for Port {
///     fn render(&self) -> String {
///         format!("port:{}", self.0)
///     }
/// }
///
/// assert_eq!(Port(8080).render(), "port:8080");
/// assert_eq!(42.render(), "42");
/// assert_eq!("main".render(), "main");
/// ```
pub trait Render: Send {
    fn render(&self) -> String;
}

impl<T: fmt::Display + Send + ?Sized> Render for T {
    fn render(&self) -> String {
        self.to_string()
    }
}

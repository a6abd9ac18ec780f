//! Best-effort outbound text capability.
//!
//! Clipboard and download surfaces are owned by the host; the tools only
//! see this trait. A failed write is a soft `false`, never an error, so a
//! missing clipboard can never take a tool down.

/// Trait describing where summary text is published (system clipboard,
/// stdout, a test buffer).
pub trait ClipboardSink: Send + Sync {
    fn write(&self, text: &str) -> bool;
}

impl<T: ClipboardSink + ?Sized> ClipboardSink for &T {
    fn write(&self, text: &str) -> bool {
        (**self).write(text)
    }
}

/// Chain of two sinks: try the primary, fall through to the secondary.
pub struct FallbackClipboard<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackClipboard<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: ClipboardSink, S: ClipboardSink> ClipboardSink for FallbackClipboard<P, S> {
    fn write(&self, text: &str) -> bool {
        self.primary.write(text) || self.secondary.write(text)
    }
}

/// Sink used by the CLI host: prints the text so the user can copy it.
#[derive(Default)]
pub struct StdoutClipboard;

impl ClipboardSink for StdoutClipboard {
    fn write(&self, text: &str) -> bool {
        println!("{text}");
        true
    }
}

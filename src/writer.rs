//! Escaping writer and stream lifecycle.
//!
//! [`CsvWriter`] is the only component that touches the byte sink. It knows
//! nothing about cells or rows: it escapes text tokens, prints control tokens
//! verbatim, and owns the open/close lifecycle of the sink.
//!
//! ## Escaping
//!
//! Escaping is deliberately minimal. Every literal occurrence of the delimiter
//! inside a text value is replaced with the configured replacement string and
//! nothing else is touched: no quoting, no handling of line breaks.
//!
//! ```rust
//! use report_csv::writer::escape;
//!
//! assert_eq!(escape("a,b", ",", " "), "a b");
//! assert_eq!(escape("plain", ",", " "), "plain");
//! ```
//!
//! ## Lifecycle
//!
//! A writer starts idle, is [`open`](CsvWriter::open)ed with a sink and is
//! [`close`](CsvWriter::close)d exactly once. Failures never propagate to the
//! caller of the emitter. The first write failure is logged and kept for later
//! inspection, and every following write is dropped. A close failure is logged
//! and kept on its own. A writer that is dropped while still open closes
//! itself.

use std::borrow::Cow;
use std::io::{self, BufWriter, Write};
use tracing::warn;

/// Default field separator.
pub const COMMA: &str = ",";

/// Default row terminator.
pub const CR: &str = "\r\n";

/// Replaces every occurrence of `delimiter` in `value` with `replacement`.
///
/// Borrows the input untouched when it holds no delimiter.
#[must_use]
pub fn escape<'a>(value: &'a str, delimiter: &str, replacement: &str) -> Cow<'a, str> {
    if delimiter.is_empty() || !value.contains(delimiter) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.replace(delimiter, replacement))
    }
}

/// Buffered, escaping writer over a byte sink.
pub struct CsvWriter<W: Write> {
    out: Option<BufWriter<W>>,
    released: Option<W>,
    error: Option<io::Error>,
    close_error: Option<io::Error>,
}

impl<W: Write> Default for CsvWriter<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> CsvWriter<W> {
    /// Creates an idle writer with no sink attached.
    pub fn new() -> Self {
        CsvWriter {
            out: None,
            released: None,
            error: None,
            close_error: None,
        }
    }

    /// Attaches the sink. Output is UTF-8, with no byte-order mark.
    ///
    /// Opening a writer that is already open keeps the current sink and drops
    /// the new one.
    pub fn open(&mut self, out: W) {
        if self.out.is_some() {
            warn!("CSV writer is already open, ignoring second sink");
            return;
        }
        self.out = Some(BufWriter::new(out));
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.out.is_some()
    }

    /// Escapes and writes a text token. Absent or empty values write nothing.
    pub fn text(&mut self, value: Option<&str>, delimiter: &str, replacement: &str) {
        match value {
            Some(value) if !value.is_empty() => {
                let escaped = escape(value, delimiter, replacement);
                self.print(&escaped);
            }
            _ => {}
        }
    }

    /// Writes a control token (delimiter or terminator) verbatim.
    pub fn close_tag(&mut self, tag: &str) {
        self.print(tag);
    }

    fn print(&mut self, s: &str) {
        if self.error.is_some() {
            return;
        }
        let Some(out) = self.out.as_mut() else {
            return;
        };
        if let Err(err) = out.write_all(s.as_bytes()) {
            warn!(error = %err, "CSV write failed, dropping remaining output");
            self.error = Some(err);
        }
    }

    /// Flushes and releases the sink.
    ///
    /// A flush failure is logged and kept apart from write failures, see
    /// [`take_close_error`](Self::take_close_error). Closing an idle or already
    /// closed writer does nothing.
    pub fn close(&mut self) {
        let Some(mut out) = self.out.take() else {
            return;
        };
        if let Err(err) = out.flush() {
            warn!(error = %err, "failed to close CSV output stream");
            self.close_error = Some(err);
        }
        let (inner, _unflushed) = out.into_parts();
        self.released = Some(inner);
    }

    /// Takes the first write failure, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Takes the failure raised while closing, if any.
    pub fn take_close_error(&mut self) -> Option<io::Error> {
        self.close_error.take()
    }

    /// Closes the writer if needed and hands back the sink.
    ///
    /// Returns `None` when the writer was never opened.
    pub fn into_inner(mut self) -> Option<W> {
        self.close();
        self.released.take()
    }
}

impl<W: Write> Drop for CsvWriter<W> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_TOKEN_LEN: usize = 16 * 1024;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"))
        }
    }

    fn written(writer: CsvWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_escape_replaces_every_occurrence() {
        assert_eq!(escape("a,b,c", ",", " "), "a b c");
        assert_eq!(escape("a||b", "||", "/"), "a/b");
    }

    #[test]
    fn test_escape_borrows_without_delimiter() {
        assert!(matches!(escape("abc", ",", " "), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_text_and_tags() {
        let mut writer = CsvWriter::new();
        writer.open(Vec::new());
        writer.text(Some("East, Coast"), ",", ";");
        writer.close_tag(",");
        writer.text(Some("100"), ",", ";");
        writer.close_tag(CR);
        assert_eq!(written(writer), "East; Coast,100\r\n");
    }

    #[test]
    fn test_empty_and_missing_text_write_nothing() {
        let mut writer = CsvWriter::new();
        writer.open(Vec::new());
        writer.text(None, ",", " ");
        writer.text(Some(""), ",", " ");
        assert_eq!(written(writer), "");
    }

    #[test]
    fn test_writes_before_open_are_dropped() {
        let mut writer: CsvWriter<Vec<u8>> = CsvWriter::new();
        writer.close_tag(",");
        assert!(!writer.is_open());
        assert!(writer.into_inner().is_none());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut writer = CsvWriter::new();
        writer.open(Vec::new());
        writer.close_tag("x");
        writer.close();
        writer.close();
        writer.close_tag("y");
        assert_eq!(written(writer), "x");
    }

    #[test]
    fn test_close_failure_is_kept_apart() {
        let mut writer = CsvWriter::new();
        writer.open(FailingSink);
        writer.close_tag(",");
        writer.close();
        assert!(writer.take_error().is_none());
        let err = writer.take_close_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!writer.is_open());
    }

    #[test]
    fn test_write_failure_drops_later_output() {
        let mut writer = CsvWriter::new();
        writer.open(FailingSink);
        // Larger than the buffer, so it reaches the sink immediately.
        writer.close_tag(&"x".repeat(LONG_TOKEN_LEN));
        let err = writer.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        writer.close_tag(",");
        assert!(writer.take_error().is_none());
    }
}

use std::io;

use super::RenderError;

/// Trait to generically bound the renderer output
///
/// Implementations are provided for [`String`] and [`Vec<u8>`] (holding UTF-8).
pub trait RenderOutput {
    /// Converts the rendered text.
    fn from_string(string: String) -> Self;
}

impl RenderOutput for String {
    fn from_string(string: String) -> Self {
        string
    }
}

impl RenderOutput for Vec<u8> {
    fn from_string(string: String) -> Self {
        string.into_bytes()
    }
}

/// Destination of the rendered rows
pub(crate) trait Emit {
    fn emit(&mut self, text: &str) -> Result<(), RenderError>;
}

impl Emit for String {
    fn emit(&mut self, text: &str) -> Result<(), RenderError> {
        self.push_str(text);
        Ok(())
    }
}

/// Streams rows into an [`io::Write`]
pub(crate) struct IoSink<W>(pub(crate) W);

impl<W: io::Write> Emit for IoSink<W> {
    fn emit(&mut self, text: &str) -> Result<(), RenderError> {
        self.0.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Joins the rows of all flushed lines with a single newline between consecutive rows.
pub(crate) struct OutputAssembler<S> {
    sink: S,
    rows: usize,
}

impl<S: Emit> OutputAssembler<S> {
    pub(crate) const fn new(sink: S) -> Self {
        Self { sink, rows: 0 }
    }

    pub(crate) fn row(&mut self, row: &str) -> Result<(), RenderError> {
        if self.rows > 0 {
            self.sink.emit("\n")?;
        }
        self.sink.emit(row)?;
        self.rows += 1;
        Ok(())
    }

    pub(crate) fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{IoSink, OutputAssembler};
    use crate::render::RenderError;

    #[test]
    fn separators_between_rows_only() {
        let mut output = OutputAssembler::new(String::new());
        for row in ["ab", "", "cd"] {
            output.row(row).unwrap();
        }
        assert_eq!(output.into_sink(), "ab\n\ncd");
    }

    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_errors_propagate() {
        let mut output = OutputAssembler::new(IoSink(Broken));
        assert!(matches!(output.row("x"), Err(RenderError::Io(_))));
    }
}

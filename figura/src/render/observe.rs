//! Render events
//!
//! A [`RenderObserver`] is notified of the decisions taken while rendering. The default
//! [`NoopObserver`] ignores everything and compiles away; [`TracingObserver`] forwards events to
//! [`tracing`].

use tracing::{debug, trace};

use super::layout::Layout;
use super::overlap::Overlap;
use crate::font::PrintDirection;

const TARGET: &str = "figura::render";

/// Receives events from a render
///
/// Every method has an empty default implementation.
pub trait RenderObserver {
    /// The layout is resolved and composition is about to start.
    fn render_started(&mut self, _event: &RenderStarted) {}
    /// A glyph was appended to the current line.
    fn glyph_processed(&mut self, _event: &GlyphProcessed) {}
    /// The overlapped columns of one row were combined.
    fn row_overlapped(&mut self, _event: &RowOverlapped) {}
    /// A line was written to the output.
    fn line_flushed(&mut self, _event: &LineFlushed) {}
    /// The render completed successfully.
    fn render_finished(&mut self, _event: &RenderFinished) {}
}

impl<T: RenderObserver + ?Sized> RenderObserver for &mut T {
    fn render_started(&mut self, event: &RenderStarted) {
        (**self).render_started(event);
    }

    fn glyph_processed(&mut self, event: &GlyphProcessed) {
        (**self).glyph_processed(event);
    }

    fn row_overlapped(&mut self, event: &RowOverlapped) {
        (**self).row_overlapped(event);
    }

    fn line_flushed(&mut self, event: &LineFlushed) {
        (**self).line_flushed(event);
    }

    fn render_finished(&mut self, event: &RenderFinished) {
        (**self).render_finished(event);
    }
}

/// See [`RenderObserver::render_started`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStarted {
    /// The resolved layout
    pub layout: Layout,
    /// The effective print direction
    pub direction: PrintDirection,
    /// Maximum line length in columns
    pub width_limit: usize,
    /// Length of the input in bytes
    pub input_len: usize,
}

/// See [`RenderObserver::glyph_processed`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphProcessed {
    /// The input character
    pub character: char,
    /// The character whose glyph was used, which differs from `character` when the fallback was
    /// substituted
    pub glyph: char,
    /// Width of the glyph
    pub width: usize,
    /// Overlap with the line before the glyph was added
    pub overlap: Overlap,
    /// Line length after the glyph was added
    pub line_length: usize,
    /// The glyph did not fit but the line was empty, so the width limit was ignored
    pub forced: bool,
}

/// See [`RenderObserver::row_overlapped`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowOverlapped {
    /// Row index, from the top
    pub row: usize,
    /// Number of overlapped columns
    pub columns: usize,
    /// How many of them combined two non-blank sub-characters
    pub smushed: usize,
}

/// See [`RenderObserver::line_flushed`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineFlushed {
    /// Index of the line in the output
    pub line: usize,
    /// Length of the line before trimming and alignment
    pub length: usize,
    /// Why the line ended
    pub reason: FlushReason,
}

/// Why a line was flushed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushReason {
    /// The next glyph did not fit; the line was split at the last space
    WordBreak,
    /// The next glyph did not fit and the line had no space to split at
    WidthLimit,
    /// A line break character in the input
    LineBreak,
    /// The input ended
    EndOfInput,
}

/// See [`RenderObserver::render_finished`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderFinished {
    /// Number of lines written
    pub lines: usize,
}

/// Ignores all events
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl RenderObserver for NoopObserver {}

/// Emits every event through [`tracing`] under the `figura::render` target
///
/// Per-line events are logged at `DEBUG`, per-glyph and per-row events at `TRACE`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl RenderObserver for TracingObserver {
    fn render_started(&mut self, event: &RenderStarted) {
        debug!(
            target: TARGET,
            layout = ?event.layout,
            direction = ?event.direction,
            width_limit = event.width_limit,
            input_len = event.input_len,
            "render started"
        );
    }

    fn glyph_processed(&mut self, event: &GlyphProcessed) {
        trace!(
            target: TARGET,
            character = ?event.character,
            glyph = ?event.glyph,
            width = event.width,
            overlap = event.overlap.columns,
            kind = ?event.overlap.kind,
            line_length = event.line_length,
            forced = event.forced,
            "glyph"
        );
    }

    fn row_overlapped(&mut self, event: &RowOverlapped) {
        trace!(
            target: TARGET,
            row = event.row,
            columns = event.columns,
            smushed = event.smushed,
            "row overlap"
        );
    }

    fn line_flushed(&mut self, event: &LineFlushed) {
        debug!(
            target: TARGET,
            line = event.line,
            length = event.length,
            reason = ?event.reason,
            "line flushed"
        );
    }

    fn render_finished(&mut self, event: &RenderFinished) {
        debug!(target: TARGET, lines = event.lines, "render finished");
    }
}

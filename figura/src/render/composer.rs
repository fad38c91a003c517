use std::iter::{self, repeat_n};
use std::mem;

use itertools::Either;

use crate::font::{Font, Glyph, PrintDirection};

use super::arena::RenderArena;
use super::observe::{
    FlushReason, GlyphProcessed, LineFlushed, RenderFinished, RenderObserver, RenderStarted,
    RowOverlapped,
};
use super::output::{Emit, OutputAssembler};
use super::overlap::{Overlap, OverlapPlanner};
use super::smush::Cell;
use super::{Alignment, RenderError};

/// Newline, carriage return, vertical tab and form feed. `"\r\n"` counts as one line break.
const LINE_BREAKS: [char; 4] = ['\n', '\r', '\x0b', '\x0c'];

pub(crate) struct Settings {
    pub(crate) planner: OverlapPlanner,
    pub(crate) direction: PrintDirection,
    pub(crate) limit: usize,
    pub(crate) fallback: Option<char>,
    pub(crate) trim: bool,
    pub(crate) alignment: Option<Alignment>,
}

/// The state of one render: the line composed so far and everything needed to extend it
pub(crate) struct LineComposer<'r, S, O> {
    font: &'r Font,
    settings: Settings,
    arena: &'r mut RenderArena,
    output: OutputAssembler<S>,
    observer: O,
    length: usize,
    word_break: Option<usize>,
    wrapped: bool,
    lines: usize,
}

impl<'r, S: Emit, O: RenderObserver> LineComposer<'r, S, O> {
    pub(crate) fn new(
        font: &'r Font,
        settings: Settings,
        arena: &'r mut RenderArena,
        sink: S,
        observer: O,
    ) -> Self {
        arena.reset(font.height());
        Self {
            font,
            settings,
            arena,
            output: OutputAssembler::new(sink),
            observer,
            length: 0,
            word_break: None,
            wrapped: false,
            lines: 0,
        }
    }

    /// Composes the whole text and returns the sink.
    pub(crate) fn run(mut self, text: &str) -> Result<S, RenderError> {
        self.observer.render_started(&RenderStarted {
            layout: self.settings.planner.layout(),
            direction: self.settings.direction,
            width_limit: self.settings.limit,
            input_len: text.len(),
        });
        let mut segments = split_lines(text).peekable();
        while let Some(segment) = segments.next() {
            for c in composition_order(segment, self.settings.direction) {
                self.feed(c)?;
            }
            if segments.peek().is_some() {
                // a break right after a width wrap does not add an empty line
                if !self.arena.line.is_empty() || !self.wrapped {
                    self.flush(FlushReason::LineBreak)?;
                }
                self.wrapped = false;
            }
        }
        if !self.arena.line.is_empty() || self.lines == 0 {
            self.flush(FlushReason::EndOfInput)?;
        }
        self.observer.render_finished(&RenderFinished { lines: self.lines });
        Ok(self.output.into_sink())
    }

    fn feed(&mut self, c: char) -> Result<(), RenderError> {
        let c = if c == '\t' { ' ' } else { c };
        if c == ' ' && self.wrapped && self.arena.line.is_empty() {
            return Ok(());
        }
        let (glyph_char, glyph) = self.lookup(c)?;
        loop {
            let overlap = self.settings.planner.plan(&self.arena.rows, glyph);
            let fits = self.length + glyph.width() - overlap.columns <= self.settings.limit;
            if fits || self.arena.line.is_empty() {
                self.append(c, glyph_char, glyph, overlap, !fits);
                return Ok(());
            }
            if c == ' ' {
                self.flush(FlushReason::WidthLimit)?;
                self.wrapped = true;
                return Ok(());
            }
            match self.word_break {
                Some(at) => self.break_at(at)?,
                None => {
                    self.flush(FlushReason::WidthLimit)?;
                    self.wrapped = true;
                }
            }
        }
    }

    /// Returns the glyph for `c`, or for the fallback character, together with the character it
    /// belongs to.
    fn lookup(&self, c: char) -> Result<(char, &'r Glyph), RenderError> {
        let font = self.font;
        let (glyph_char, glyph) = font
            .glyph(c)
            .map(|glyph| (c, glyph))
            .or_else(|| {
                let fallback = self.settings.fallback?;
                font.glyph(fallback).map(|glyph| (fallback, glyph))
            })
            .ok_or(RenderError::UnsupportedCharacter(c))?;
        if glyph.height() != font.height() {
            return Err(RenderError::InvalidGlyphHeight {
                character: glyph_char,
                expected: font.height(),
                found: glyph.height(),
            });
        }
        Ok((glyph_char, glyph))
    }

    fn append(&mut self, c: char, glyph_char: char, glyph: &Glyph, overlap: Overlap, forced: bool) {
        let layout = self.settings.planner.layout();
        let hardblank = self.font.hardblank();
        let rows = self.arena.rows.iter_mut().zip(glyph.rows());
        for (index, (row, glyph_row)) in rows.enumerate() {
            let start = row.len() - overlap.columns;
            let mut smushed = 0;
            for (column, cell) in row[start..].iter_mut().enumerate() {
                let right = Cell::at(glyph_row, column, hardblank);
                if *cell != Cell::Blank && right != Cell::Blank {
                    smushed += 1;
                }
                *cell = layout.merge(*cell, right);
            }
            let rest = overlap.columns..glyph.width();
            row.extend(rest.map(|column| Cell::at(glyph_row, column, hardblank)));
            if overlap.columns > 0 {
                self.observer.row_overlapped(&RowOverlapped {
                    row: index,
                    columns: overlap.columns,
                    smushed,
                });
            }
        }
        self.length += glyph.width() - overlap.columns;
        if c == ' ' && self.arena.line.iter().any(|&previous| previous != ' ') {
            self.word_break = Some(self.arena.line.len());
        }
        self.arena.line.push(c);
        self.observer.glyph_processed(&GlyphProcessed {
            character: c,
            glyph: glyph_char,
            width: glyph.width(),
            overlap,
            line_length: self.length,
            forced,
        });
    }

    /// Splits the line at the space recorded at index `at`: what precedes the run of spaces is
    /// flushed, what follows the space starts the next line.
    fn break_at(&mut self, at: usize) -> Result<(), RenderError> {
        let mut replay = mem::take(&mut self.arena.replay);
        replay.clear();
        replay.extend_from_slice(&self.arena.line);
        let keep = replay[..at]
            .iter()
            .rposition(|&c| c != ' ')
            .map_or(0, |last| last + 1);
        self.clear_line();
        for &c in &replay[..keep] {
            let (glyph_char, glyph) = self.lookup(c)?;
            let overlap = self.settings.planner.plan(&self.arena.rows, glyph);
            self.append(c, glyph_char, glyph, overlap, false);
        }
        self.flush(FlushReason::WordBreak)?;
        self.wrapped = true;
        for &c in &replay[at + 1..] {
            self.feed(c)?;
        }
        self.arena.replay = replay;
        Ok(())
    }

    fn flush(&mut self, reason: FlushReason) -> Result<(), RenderError> {
        let padding = self.padding();
        for row in &self.arena.rows {
            let cells = if self.settings.trim {
                let end = row
                    .iter()
                    .rposition(|&cell| cell != Cell::Blank)
                    .map_or(0, |last| last + 1);
                &row[..end]
            } else {
                &row[..]
            };
            let text = &mut self.arena.text;
            text.clear();
            if !(self.settings.trim && cells.is_empty()) {
                text.extend(repeat_n(' ', padding));
            }
            text.extend(cells.iter().copied().map(Cell::output));
            self.output.row(text.as_str())?;
        }
        self.observer.line_flushed(&LineFlushed {
            line: self.lines,
            length: self.length,
            reason,
        });
        self.lines += 1;
        self.clear_line();
        Ok(())
    }

    fn padding(&self) -> usize {
        let Some(alignment) = self.settings.alignment else {
            return 0;
        };
        let free = self.settings.limit.saturating_sub(self.length);
        match (alignment, self.settings.direction) {
            (Alignment::Start, PrintDirection::LeftToRight)
            | (Alignment::End, PrintDirection::RightToLeft) => 0,
            (Alignment::Start, PrintDirection::RightToLeft)
            | (Alignment::End, PrintDirection::LeftToRight) => free,
            // the odd blank goes to the end
            (Alignment::Center, PrintDirection::LeftToRight) => free / 2,
            (Alignment::Center, PrintDirection::RightToLeft) => free - free / 2,
        }
    }

    fn clear_line(&mut self) {
        for row in &mut self.arena.rows {
            row.clear();
        }
        self.arena.line.clear();
        self.length = 0;
        self.word_break = None;
    }
}

/// The characters of one line in the order they are composed, reversed for right-to-left text.
///
/// Reversal happens before wrapping, so wrapped right-to-left text starts with the end of the line.
fn composition_order(line: &str, direction: PrintDirection) -> impl Iterator<Item = char> + '_ {
    match direction {
        PrintDirection::LeftToRight => Either::Left(line.chars()),
        PrintDirection::RightToLeft => Either::Right(line.chars().rev()),
    }
}

/// Splits at every line break character, treating `"\r\n"` as a single break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    iter::from_fn(move || {
        let current = rest?;
        match current.find(LINE_BREAKS) {
            Some(index) => {
                let end = if current[index..].starts_with("\r\n") {
                    index + 2
                } else {
                    index + 1
                };
                rest = Some(&current[end..]);
                Some(&current[..index])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

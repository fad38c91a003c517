//! Renderer and rendering settings
mod arena;
mod composer;
mod layout;
mod observe;
mod output;
mod overlap;
mod smush;

use std::io;

use thiserror::Error;

use crate::font::Font;
use composer::{LineComposer, Settings};
use output::{Emit, IoSink};
use overlap::OverlapPlanner;

pub use crate::font::PrintDirection;
pub use arena::RenderArena;
pub use layout::{FitMode, Layout, LayoutBits, LayoutConflict, SmushRule};
pub use observe::{
    FlushReason, GlyphProcessed, LineFlushed, NoopObserver, RenderFinished, RenderObserver,
    RenderStarted, RowOverlapped, TracingObserver,
};
pub use output::RenderOutput;
pub use overlap::{Overlap, OverlapKind};

/// The main type for rendering
///
/// Use [`render()`](Renderer::render) to process strings, or [`render_to()`](Renderer::render_to)
/// to stream the result into a writer.
///
/// The other methods are meant to be used in a builder pattern:
/// ```
/// # use figura::font::{Font, Hardblank, PrintDirection};
/// # use figura::render::{Alignment, Layout, Renderer};
/// let font = Font::new(1, Hardblank::DOLLAR)
///     .with_glyph('a', ["a "])
///     .with_glyph('b', ["b "])
///     .with_glyph(' ', ["$"]);
/// let rendered: String = Renderer::new(&font)
///     .max_width(8)
///     .alignment(Alignment::Start)
///     .print_direction(PrintDirection::RightToLeft)
///     .layout(Layout::KERNING)
///     .trim_trailing_whitespace(true)
///     .render("ab a")
///     .unwrap();
/// assert_eq!(rendered, "  a ba");
/// ```
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'font> {
    font: &'font Font,
    options: RenderOptions,
}

impl<'font> Renderer<'font> {
    /// Creates a new renderer with the default [`RenderOptions`]; the layout and the print
    /// direction are taken from the font.
    pub fn new(font: &'font Font) -> Self {
        Self {
            font,
            options: RenderOptions::default(),
        }
    }

    /// Replaces all options at once.
    pub const fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the print direction, overriding the font's default.
    pub const fn print_direction(mut self, direction: PrintDirection) -> Self {
        self.options.print_direction = Some(direction);
        self
    }

    /// Sets the output width. Lines are at most `width - 1` columns long, unless a single glyph
    /// is wider than that.
    pub const fn max_width(mut self, width: usize) -> Self {
        self.options.width = width;
        self
    }

    /// Sets the alignment.
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.options.alignment = Some(alignment);
        self
    }

    /// Overrides the font's layout with one given in the `Full_Layout` bit format (see
    /// [`LayoutBits`]). The override replaces the font's layout entirely.
    ///
    /// An override with both fit bits set makes rendering fail with
    /// [`RenderError::LayoutConflict`].
    pub const fn layout_override(mut self, bits: u16) -> Self {
        self.options.layout_override = Some(bits);
        self
    }

    /// Overrides the font's layout.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.options.layout_override = Some(layout.bits());
        self
    }

    /// Sets a character whose glyph replaces those missing from the font.
    pub const fn fallback(mut self, fallback: char) -> Self {
        self.options.fallback = Some(fallback);
        self
    }

    /// Sets whether blanks at the end of every output row are removed. Hardblanks are kept.
    pub const fn trim_trailing_whitespace(mut self, trim: bool) -> Self {
        self.options.trim_trailing_whitespace = trim;
        self
    }

    /// Renders the given string.
    ///
    /// A newline (or carriage return, vertical tab, or form feed) always causes a line break. A
    /// line that becomes too long is broken after the last word that fits, dropping the spaces
    /// at the break. If the line holds a single word, it is broken in the middle of that word
    /// (but never in the middle of a glyph).
    ///
    /// The output type can be [`String`] or [`Vec<u8>`].
    ///
    /// # Errors
    /// See [`RenderError`].
    pub fn render<O: RenderOutput>(self, string: &str) -> Result<O, RenderError> {
        self.render_with(string, &mut RenderArena::new(), NoopObserver)
    }

    /// Renders the given string, reusing the buffers of `arena` and reporting to `observer`.
    ///
    /// ```
    /// # use figura::font::{Font, Hardblank};
    /// # use figura::render::{RenderArena, Renderer, TracingObserver};
    /// let font = Font::new(1, Hardblank::DOLLAR).with_glyph('o', ["()"]);
    /// let mut arena = RenderArena::new();
    /// for _ in 0..3 {
    ///     let rendered: String = Renderer::new(&font)
    ///         .render_with("oo", &mut arena, TracingObserver)
    ///         .unwrap();
    ///     assert_eq!(rendered, "()()");
    /// }
    /// ```
    ///
    /// # Errors
    /// See [`RenderError`].
    pub fn render_with<O: RenderOutput>(
        self,
        string: &str,
        arena: &mut RenderArena,
        observer: impl RenderObserver,
    ) -> Result<O, RenderError> {
        let rendered = self.compose(string, String::new(), arena, observer)?;
        Ok(O::from_string(rendered))
    }

    /// Renders the given string into `writer`, row by row.
    ///
    /// The bytes written are exactly those of [`render()`](Renderer::render). Nothing is written
    /// after the last row, not even a newline.
    ///
    /// # Errors
    /// See [`RenderError`]. If writing fails, the rows written so far stay written.
    pub fn render_to(self, string: &str, writer: impl io::Write) -> Result<(), RenderError> {
        self.render_to_with(string, writer, &mut RenderArena::new(), NoopObserver)
    }

    /// Combination of [`render_to()`](Renderer::render_to) and
    /// [`render_with()`](Renderer::render_with).
    ///
    /// # Errors
    /// See [`RenderError`].
    pub fn render_to_with(
        self,
        string: &str,
        writer: impl io::Write,
        arena: &mut RenderArena,
        observer: impl RenderObserver,
    ) -> Result<(), RenderError> {
        self.compose(string, IoSink(writer), arena, observer).map(drop)
    }

    fn compose<S: Emit>(
        self,
        string: &str,
        sink: S,
        arena: &mut RenderArena,
        observer: impl RenderObserver,
    ) -> Result<S, RenderError> {
        let header = self.font.header();
        if header.height == 0 {
            return Err(RenderError::InvalidFont);
        }
        let layout = Layout::resolve(
            self.options.layout_override,
            header.full_layout,
            header.old_layout,
        )?;
        let settings = Settings {
            planner: OverlapPlanner::new(layout, header.hardblank),
            direction: self
                .options
                .print_direction
                .unwrap_or(header.print_direction),
            limit: self.options.width.saturating_sub(1),
            fallback: self.options.fallback,
            trim: self.options.trim_trailing_whitespace,
            alignment: self.options.alignment,
        };
        LineComposer::new(self.font, settings, arena, sink, observer).run(string)
    }
}

/// Settings of a [`Renderer`]
///
/// Every field has a builder method on [`Renderer`]; the struct is useful to keep a
/// configuration around independently of a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Layout in the `Full_Layout` bit format, replacing the font's layout
    pub layout_override: Option<u16>,
    /// Print direction, replacing the font's default
    pub print_direction: Option<PrintDirection>,
    /// Output width; lines are limited to `width - 1` columns
    pub width: usize,
    /// Character rendered in place of characters missing from the font
    pub fallback: Option<char>,
    /// Remove blanks at the end of every row
    pub trim_trailing_whitespace: bool,
    /// Pad lines relative to the width limit
    pub alignment: Option<Alignment>,
}

impl RenderOptions {
    /// The default output width
    pub const DEFAULT_WIDTH: usize = 80;
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout_override: None,
            print_direction: None,
            width: Self::DEFAULT_WIDTH,
            fallback: None,
            trim_trailing_whitespace: false,
            alignment: None,
        }
    }
}

/// The choice of line alignment
///
/// The alignment is defined relative to the printing direction, so [`Alignment::Start`] will align
/// text on the left if printing left-to-right and on the right if printing right-to-left (and the
/// opposite for [`Alignment::End`]). Lines are padded with blanks relative to the width limit
/// (see [`Renderer::max_width`]).
///
/// Without an alignment, lines are not padded at all, which looks the same as
/// [`Alignment::Start`] for left-to-right text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// Left align if rendering [left-to-right](PrintDirection::LeftToRight), right align if
    /// rendering [right-to-left](PrintDirection::RightToLeft).
    Start,
    /// Center align. If the free space is odd, the extra blank goes towards the *end*.
    Center,
    /// Right align if rendering [left-to-right](PrintDirection::LeftToRight), left align if
    /// rendering [right-to-left](PrintDirection::RightToLeft).
    End,
}

/// An error that aborted a render
#[derive(Debug, Error)]
pub enum RenderError {
    /// The font has zero height.
    #[error("the font has zero height")]
    InvalidFont,
    /// A character has no glyph in the font, and there is no fallback or the fallback has no glyph
    /// either.
    #[error("no glyph for {0:?} in the font")]
    UnsupportedCharacter(char),
    /// A glyph has a different number of rows than the font height.
    #[error("the glyph for {character:?} has {found} rows instead of {expected}")]
    InvalidGlyphHeight {
        /// The character the glyph belongs to
        character: char,
        /// The font height
        expected: usize,
        /// The number of rows of the glyph
        found: usize,
    },
    /// The layout override requests both kerning and smushing.
    #[error(transparent)]
    LayoutConflict(#[from] LayoutConflict),
    /// Writing to the output failed.
    #[error("failed to write rendered output")]
    Io(#[from] io::Error),
}


#[cfg(test)]
mod tests {
    use super::test::{ab, letters, rows};
    use std::io;

    use super::{
        Alignment, FlushReason, GlyphProcessed, Layout, LayoutConflict, LineFlushed, NoopObserver,
        Overlap, OverlapKind, PrintDirection, RenderArena, RenderError, RenderFinished,
        RenderObserver, RenderStarted, Renderer, RowOverlapped, SmushRule, TracingObserver,
    };
    use crate::font::tests::tiny_flf;
    use crate::font::{Font, Hardblank};

    fn render(renderer: Renderer<'_>, string: &str) -> String {
        renderer.render(string).unwrap()
    }

    #[test]
    fn glyphs_edge_to_edge() {
        assert_eq!(render(Renderer::new(&ab()), "AB"), "AABB\nAABB");
    }

    #[test]
    fn hardblank_is_blank_on_output() {
        let hardblank = Hardblank::try_from('#').unwrap();
        let font = Font::new(2, hardblank).with_glyph('A', ["A#A", "AAA"]);
        assert_eq!(font.render("A").unwrap(), "A A\nAAA");
    }

    #[test]
    fn equal_character_smushing() {
        let font = Font::new(2, Hardblank::DOLLAR)
            .with_layout(-1, Some(128 | 1))
            .with_glyph('#', ["##", "##"]);
        assert_eq!(font.render("##").unwrap(), "##\n##");
    }

    #[test]
    fn wide_glyphs_wrap() {
        let font = Font::new(1, Hardblank::DOLLAR).with_glyph('W', ["WWWWW"]);
        let rendered = render(Renderer::new(&font).max_width(12), "WWWWW");
        assert_eq!(rendered, "WWWWWWWWWW\nWWWWWWWWWW\nWWWWW");
        // a glyph wider than the limit still gets a line of its own
        let rendered = render(Renderer::new(&font).max_width(4), "WW");
        assert_eq!(rendered, "WWWWW\nWWWWW");
    }

    #[test]
    fn empty_input_for_every_layout() {
        let font = letters(3);
        for layout in [
            Layout::FULL_WIDTH,
            Layout::KERNING,
            Layout::smushing(SmushRule::EqualCharacter.into()),
            Layout::smushing(enumset::EnumSet::empty()),
        ] {
            assert_eq!(render(Renderer::new(&font).layout(layout), ""), "\n\n");
        }
    }

    #[test]
    fn full_width_adds_glyph_widths() {
        let font = Font::new(2, Hardblank::DOLLAR)
            .with_glyph('a', ["a  ", "a  "])
            .with_glyph('b', ["  b", "  bb"]);
        let rendered = render(Renderer::new(&font).layout(Layout::FULL_WIDTH), "ab");
        assert_eq!(rows(&rendered), ["a    b ", "a    bb"]);
        assert!(rows(&rendered).iter().all(|row| row.chars().count() == 3 + 4));
    }

    #[test]
    fn kerning_only_removes_blanks() {
        let font = Font::new(2, Hardblank::DOLLAR)
            .with_glyph('a', ["a  ", " a "])
            .with_glyph('b', ["  b", " bb"]);
        let full = render(Renderer::new(&font).layout(Layout::FULL_WIDTH), "abab");
        let kerned = render(Renderer::new(&font).layout(Layout::KERNING), "abab");
        assert!(kerned.len() < full.len());
        for (full_row, kerned_row) in rows(&full).into_iter().zip(rows(&kerned)) {
            assert_eq!(full_row.replace(' ', ""), kerned_row.replace(' ', ""));
        }
    }

    #[test]
    fn rendering_is_pure() {
        let font = Font::decode(tiny_flf()).unwrap();
        let renderer = Renderer::new(&font).max_width(7);
        let expected = render(renderer, "Hello, world! ☺");
        let mut arena = RenderArena::new();
        for text in ["Hello, world! ☺", "something else entirely", "Hello, world! ☺"] {
            let rendered: String = renderer
                .render_with(text, &mut arena, super::NoopObserver)
                .unwrap();
            if text.starts_with("Hello") {
                assert_eq!(rendered, expected);
            }
        }
    }

    #[test]
    fn streaming_matches_materialized() {
        let tiny = Font::decode(tiny_flf()).unwrap();
        let hardblank =
            Font::new(2, Hardblank::try_from('#').unwrap()).with_glyph('A', ["A#A", "AAA"]);
        let wrapping = letters(2);
        let cases = [
            (Renderer::new(&tiny), "ASCII only"),
            (Renderer::new(&tiny), "$ is the hardblank $$"),
            (Renderer::new(&hardblank).layout(Layout::KERNING), "AAA"),
            (
                Renderer::new(&tiny).print_direction(PrintDirection::RightToLeft),
                "right\nto left",
            ),
            (
                Renderer::new(&tiny).print_direction(PrintDirection::LeftToRight),
                "left to right",
            ),
            (
                Renderer::new(&wrapping).max_width(6),
                "a long text that has to wrap",
            ),
        ];
        for (renderer, text) in cases {
            let materialized: Vec<u8> = renderer.render(text).unwrap();
            let mut streamed = Vec::new();
            renderer.render_to(text, &mut streamed).unwrap();
            assert_eq!(streamed, materialized, "{text:?}");
        }
    }

    #[test]
    fn word_breaks() {
        let font = letters(1);
        let renderer = Renderer::new(&font);
        assert_eq!(render(renderer.max_width(5), "ab cd"), "ab\ncd");
        assert_eq!(render(renderer.max_width(6), "ab   cd"), "ab\ncd");
        assert_eq!(render(renderer.max_width(8), "ab cd ef gh"), "ab cd\nef gh");
        // the overflowing space is dropped, and so are the spaces after it
        assert_eq!(render(renderer.max_width(5), "abcd   ef"), "abcd\nef");
        // no space to break at
        assert_eq!(render(renderer.max_width(5), "abcdef"), "abcd\nef");
        assert_eq!(render(renderer.max_width(5), "ab abcdef"), "ab\nabcd\nef");
    }

    #[test]
    fn line_breaks() {
        let font = letters(1);
        let renderer = Renderer::new(&font);
        assert_eq!(render(renderer, "a\nb"), "a\nb");
        assert_eq!(render(renderer, "a\r\nb\rc"), "a\nb\nc");
        assert_eq!(render(renderer, "a\n\nb"), "a\n\nb");
        assert_eq!(render(renderer, "a\n"), "a");
        assert_eq!(render(renderer, "a\tb"), "a b");
        // a break right after a wrap does not add an empty line
        assert_eq!(render(renderer.max_width(5), "abcd \nef"), "abcd\nef");
    }

    #[test]
    fn right_to_left_reverses_each_line() {
        let font = letters(1);
        let renderer = Renderer::new(&font).print_direction(PrintDirection::RightToLeft);
        assert_eq!(render(renderer, "abc\nde"), "cba\ned");
        // lines are reversed before wrapping, so the end of the line comes first
        assert_eq!(render(renderer.max_width(6), "ab cd ef"), "fe dc\nba");
        let font = letters(1).with_print_direction(PrintDirection::RightToLeft);
        assert_eq!(font.render("abc").unwrap(), "cba");
        let renderer = Renderer::new(&font).print_direction(PrintDirection::LeftToRight);
        assert_eq!(render(renderer, "abc"), "abc");
    }

    #[test]
    fn trimming_keeps_hardblanks() {
        let font = Font::new(1, Hardblank::DOLLAR)
            .with_glyph('a', ["a  "])
            .with_glyph('h', ["h$ "]);
        let renderer = Renderer::new(&font);
        assert_eq!(render(renderer, "a"), "a  ");
        assert_eq!(render(renderer.trim_trailing_whitespace(true), "a"), "a");
        assert_eq!(render(renderer.trim_trailing_whitespace(true), "h"), "h ");
    }

    #[test]
    fn fallback_character() {
        let font = letters(1);
        let renderer = Renderer::new(&font);
        assert_eq!(render(renderer.fallback('x'), "a?b"), "axb");
        assert!(matches!(
            renderer.render::<String>("a?b"),
            Err(RenderError::UnsupportedCharacter('?'))
        ));
        assert!(matches!(
            renderer.fallback('!').render::<String>("a?b"),
            Err(RenderError::UnsupportedCharacter('?'))
        ));
    }

    #[test]
    fn fatal_errors() {
        let font = Font::new(2, Hardblank::DOLLAR).with_glyph('a', ["a"]);
        assert!(matches!(
            font.render("a"),
            Err(RenderError::InvalidGlyphHeight {
                character: 'a',
                expected: 2,
                found: 1
            })
        ));
        let empty = Font::new(0, Hardblank::DOLLAR);
        assert!(matches!(empty.render(""), Err(RenderError::InvalidFont)));
        assert!(matches!(
            Renderer::new(&letters(1))
                .layout_override(64 | 128)
                .render::<String>("a"),
            Err(RenderError::LayoutConflict(LayoutConflict(192)))
        ));
    }

    #[test]
    fn alignment() {
        let font = letters(1);
        let renderer = Renderer::new(&font).max_width(6);
        assert_eq!(render(renderer.alignment(Alignment::Start), "ab"), "ab");
        assert_eq!(render(renderer.alignment(Alignment::Center), "ab"), " ab");
        assert_eq!(render(renderer.alignment(Alignment::End), "ab"), "   ab");
        let renderer = renderer.print_direction(PrintDirection::RightToLeft);
        assert_eq!(render(renderer.alignment(Alignment::Start), "ab"), "   ba");
        assert_eq!(render(renderer.alignment(Alignment::Center), "ab"), "  ba");
        assert_eq!(render(renderer.alignment(Alignment::End), "ab"), "ba");
    }

    #[derive(Default)]
    struct Recorder {
        started: Option<RenderStarted>,
        glyphs: Vec<GlyphProcessed>,
        overlaps: Vec<RowOverlapped>,
        flushes: Vec<LineFlushed>,
        finished: Option<RenderFinished>,
    }

    impl Recorder {
        fn record(renderer: Renderer<'_>, text: &str) -> Self {
            let mut recorder = Self::default();
            let _: String = renderer
                .render_with(text, &mut RenderArena::new(), &mut recorder)
                .unwrap();
            recorder
        }

        fn characters(&self) -> String {
            self.glyphs.iter().map(|glyph| glyph.character).collect()
        }
    }

    impl RenderObserver for Recorder {
        fn render_started(&mut self, event: &RenderStarted) {
            self.started = Some(*event);
        }

        fn glyph_processed(&mut self, event: &GlyphProcessed) {
            self.glyphs.push(*event);
        }

        fn row_overlapped(&mut self, event: &RowOverlapped) {
            self.overlaps.push(*event);
        }

        fn line_flushed(&mut self, event: &LineFlushed) {
            self.flushes.push(*event);
        }

        fn render_finished(&mut self, event: &RenderFinished) {
            self.finished = Some(*event);
        }
    }

    #[test]
    fn observer_sees_flushes() {
        let font = letters(1);
        let recorder = Recorder::record(Renderer::new(&font).max_width(5), "ab cd\nx");
        let reasons: Vec<_> = recorder.flushes.iter().map(|flush| flush.reason).collect();
        assert_eq!(
            reasons,
            [
                FlushReason::WordBreak,
                FlushReason::LineBreak,
                FlushReason::EndOfInput
            ]
        );
        assert_eq!(recorder.flushes[0].length, 2);
        assert_eq!(recorder.finished, Some(RenderFinished { lines: 3 }));
    }

    #[test]
    fn observer_sees_resolved_settings() {
        let font = letters(1);
        let renderer = Renderer::new(&font)
            .max_width(6)
            .layout_override(128 | 1)
            .print_direction(PrintDirection::RightToLeft);
        let recorder = Recorder::record(renderer, "ab");
        assert_eq!(
            recorder.started,
            Some(RenderStarted {
                layout: Layout::smushing(SmushRule::EqualCharacter.into()),
                direction: PrintDirection::RightToLeft,
                width_limit: 5,
                input_len: 2,
            })
        );
    }

    #[test]
    fn observer_sees_forced_and_substituted_glyphs() {
        let font = Font::new(1, Hardblank::DOLLAR)
            .with_glyph('W', ["WWWWW"])
            .with_glyph('x', ["x"]);
        let recorder = Recorder::record(Renderer::new(&font).max_width(4).fallback('x'), "W?");
        assert_eq!(
            recorder.glyphs,
            [
                GlyphProcessed {
                    character: 'W',
                    glyph: 'W',
                    width: 5,
                    overlap: Overlap::EDGE,
                    line_length: 5,
                    forced: true,
                },
                GlyphProcessed {
                    character: '?',
                    glyph: 'x',
                    width: 1,
                    overlap: Overlap::EDGE,
                    line_length: 1,
                    forced: false,
                },
            ]
        );
        assert_eq!(recorder.flushes[0].reason, FlushReason::WidthLimit);
    }

    #[test]
    fn word_break_replays_glyphs() {
        let font = letters(1);
        let recorder = Recorder::record(Renderer::new(&font).max_width(5), "ab cd");
        // "ab" is composed again without the space, then "c" starts the next line
        assert_eq!(recorder.characters(), "ab cabcd");
        assert!(recorder.glyphs.iter().all(|glyph| !glyph.forced));
        assert_eq!(recorder.glyphs[6].line_length, 1);
    }

    #[test]
    fn observer_sees_row_overlaps() {
        let font = letters(1);
        assert!(Recorder::record(Renderer::new(&font), "abc").overlaps.is_empty());

        let font = Font::new(2, Hardblank::DOLLAR)
            .with_layout(-1, Some(128 | 1))
            .with_glyph('#', ["##", "##"]);
        let recorder = Recorder::record(Renderer::new(&font), "##");
        assert_eq!(
            recorder.overlaps,
            [
                RowOverlapped {
                    row: 0,
                    columns: 2,
                    smushed: 2
                },
                RowOverlapped {
                    row: 1,
                    columns: 2,
                    smushed: 2
                },
            ]
        );
        assert_eq!(recorder.glyphs[1].overlap.kind, OverlapKind::Smushed);

        // kerning only overlaps blanks
        let font = Font::new(1, Hardblank::DOLLAR).with_glyph('a', ["a "]);
        let recorder = Recorder::record(Renderer::new(&font).layout(Layout::KERNING), "aa");
        assert_eq!(
            recorder.overlaps,
            [RowOverlapped {
                row: 0,
                columns: 1,
                smushed: 0
            }]
        );
    }

    #[test]
    fn tracing_does_not_change_output() {
        let font = Font::decode(tiny_flf()).unwrap();
        let renderer = Renderer::new(&font).max_width(9);
        let text = "Hello, world!\n☺ and more";
        let quiet: String = renderer
            .render_with(text, &mut RenderArena::new(), NoopObserver)
            .unwrap();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(io::sink)
            .finish();
        let traced: String = tracing::subscriber::with_default(subscriber, || {
            renderer
                .render_with(text, &mut RenderArena::new(), TracingObserver)
                .unwrap()
        });
        assert_eq!(traced, quiet);
    }
}

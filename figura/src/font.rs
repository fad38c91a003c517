//! FIGfonts
//!
//! Font types and the logic for decoding `.flf` files.

mod header;

use std::collections::HashMap;
use std::str;

use bstr::{BString, ByteSlice as _};
use itertools::Itertools as _;
use thiserror::Error;
use tracing::debug;

pub use header::{Hardblank, Header, HeaderError, PrintDirection};

use crate::render::{RenderError, Renderer};

/// The 102 codepoints for characters that are included in all FIGfonts
///
/// Consists of 95 printable ASCII characters and 7 Deutsch characters from the Latin-1 encoding.
pub const DEFAULT_CODEPOINTS: [u8; 102] = *b" !\"#$%&'()*+,-./0123456789:;<=>?@\
                                             ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`\
                                             abcdefghijklmnopqrstuvwxyz{|}~\
                                             \xc4\xd6\xdc\xe4\xf6\xfc\xdf";

/// A FIGfont
///
/// A font is either decoded from an `.flf` file with [`Font::decode`] or assembled in code:
/// ```
/// # use figura::font::{Font, Hardblank};
/// let font = Font::new(2, Hardblank::DOLLAR)
///     .with_glyph('A', ["AA", "AA"])
///     .with_glyph('B', ["BB", "BB"]);
/// assert_eq!(font.render("AB").unwrap(), "AABB\nAABB");
/// ```
///
/// Fonts are immutable once built and can be shared freely between threads and renders.
#[derive(Debug, Clone)]
pub struct Font {
    header: Header,
    comments: String,
    glyphs: HashMap<u32, Glyph>,
    code_tagged_characters: HashMap<u32, String>,
    ignored_characters: HashMap<u32, String>,
}

impl Font {
    /// Creates an empty font of the given height.
    ///
    /// The layout defaults to full width (`Old_Layout = -1`) and left-to-right printing.
    pub fn new(height: usize, hardblank: Hardblank) -> Self {
        let header = Header {
            hardblank,
            height,
            baseline: Some(height),
            max_length: 0,
            comment_lines: 0,
            old_layout: -1,
            full_layout: None,
            print_direction: PrintDirection::LeftToRight,
            code_tag_count: 0,
        };
        Self {
            header,
            comments: String::new(),
            glyphs: HashMap::new(),
            code_tagged_characters: HashMap::new(),
            ignored_characters: HashMap::new(),
        }
    }

    /// Adds (or replaces) the glyph for `character`.
    ///
    /// The number of rows is not checked here; rendering a glyph whose height differs from the
    /// font height fails with [`RenderError::InvalidGlyphHeight`].
    #[must_use]
    pub fn with_glyph<I>(mut self, character: char, rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let glyph = Glyph::new(rows);
        self.header.max_length = self.header.max_length.max(glyph.width() + 2);
        drop(self.glyphs.insert(u32::from(character), glyph));
        self
    }

    /// Sets the default print direction.
    #[must_use]
    pub const fn with_print_direction(mut self, direction: PrintDirection) -> Self {
        self.header.print_direction = direction;
        self
    }

    /// Sets the default layout parameters, in the encoding used by the `.flf` header. See
    /// [`Layout::resolve`](crate::render::Layout::resolve) for their meaning.
    #[must_use]
    pub const fn with_layout(mut self, old_layout: i32, full_layout: Option<u16>) -> Self {
        self.header.old_layout = old_layout;
        self.header.full_layout = full_layout;
        self
    }

    /// Decodes the contents of an `.flf` file.
    ///
    /// The decoder is lenient: missing required characters and inconsistent row widths are
    /// accepted, since the renderer tolerates them.
    ///
    /// # Errors
    /// Returns `Err` on a fatal decoding error; see [`FontError`] for details.
    pub fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, FontError> {
        let font_string: BString = bytes
            .as_ref()
            .replace("\r\n", "\n")
            .into_iter()
            .map(|c| if c == b'\r' { b'\n' } else { c })
            .collect();

        let mut lines = font_string.lines();
        let Some(header_line) = lines.next() else {
            return Err(FontError::BadHeader(HeaderError::Missing));
        };
        let header = Header::decode(header_line)?;
        let comments =
            String::from_utf8_lossy(&bstr::join("\n", lines.by_ref().take(header.comment_lines)))
                .into_owned();
        let mut font = Self {
            header,
            comments,
            glyphs: HashMap::new(),
            code_tagged_characters: HashMap::new(),
            ignored_characters: HashMap::new(),
        };
        font.decode_characters(&mut lines)?;
        debug!(
            height = font.header.height,
            glyphs = font.glyphs.len(),
            hardblank = ?font.header.hardblank.get(),
            "decoded FIGfont"
        );
        Ok(font)
    }

    /// Renders a string with the settings provided by the font.
    ///
    /// # Errors
    /// See [`Renderer::render`].
    pub fn render(&self, string: &str) -> Result<String, RenderError> {
        Renderer::new(self).render(string)
    }

    /// The *comments* portion of the FIGfont, between the header and the FIGcharacters. Usually
    /// contains information about the font author.
    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// The font header.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Number of rows per glyph.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.header.height
    }

    /// The hardblank of this font.
    #[must_use]
    pub const fn hardblank(&self) -> Hardblank {
        self.header.hardblank
    }

    /// Descriptions attached to code-tagged characters in the font file.
    #[must_use]
    pub const fn code_tagged_characters(&self) -> &HashMap<u32, String> {
        &self.code_tagged_characters
    }

    /// Human-readable information, usually *translation tables*, included in the font as tagged
    /// characters with negative character codes.
    #[must_use]
    pub const fn ignored_characters(&self) -> &HashMap<u32, String> {
        &self.ignored_characters
    }

    /// The glyph for `character`, if the font has one.
    #[must_use]
    pub fn glyph(&self, character: char) -> Option<&Glyph> {
        self.glyphs.get(&u32::from(character))
    }

    fn decode_characters<'a>(
        &mut self,
        mut lines: impl Iterator<Item = &'a [u8]>,
    ) -> Result<(), FontError> {
        let height = self.header.height;
        let default_char_chunks = lines
            .by_ref()
            .take(DEFAULT_CODEPOINTS.len() * height)
            .chunks(height);
        for (codepoint, rows) in DEFAULT_CODEPOINTS
            .into_iter()
            .zip(default_char_chunks.into_iter())
        {
            let glyph = Glyph::decode(rows, codepoint.into())?;
            drop(self.glyphs.insert(codepoint.into(), glyph));
        }
        for mut rows in &lines.by_ref().chunks(height + 1) {
            let Some(line) = rows.next() else {
                break;
            };
            let (codepoint, description) = line
                .split_once_str(" ")
                .map_or((line, None), |(codepoint, desc)| {
                    (codepoint, Some(desc.trim_ascii()))
                });
            let (codepoint, positive) =
                Self::parse_codepoint(str::from_utf8(codepoint).map_err(|_| {
                    FontError::InvalidCharacterCode(BString::new(codepoint.to_owned()))
                })?)?;
            if positive {
                if let Some(description) = description.filter(|d| !d.is_empty()) {
                    drop(
                        self.code_tagged_characters
                            .insert(codepoint, String::from_utf8_lossy(description).into_owned()),
                    );
                }
                let glyph = Glyph::decode(rows, codepoint)?;
                // a later duplicate code replaces the earlier glyph
                drop(self.glyphs.insert(codepoint, glyph));
            } else {
                drop(self.ignored_characters.insert(
                    codepoint,
                    String::from_utf8_lossy(&bstr::join(b"\n", rows)).into_owned(),
                ));
            }
        }
        Ok(())
    }

    /// A codepoint in a *code tag* may be positive, denoting an actual character, or negative,
    /// signifying human-readable information, usually translation tables. This returns the
    /// absolute value and the sign (`true` if positive) separately.
    fn parse_codepoint(codepoint: &str) -> Result<(u32, bool), FontError> {
        let (positive, codepoint) = codepoint
            .strip_prefix('-')
            .map_or((true, codepoint), |codepoint| (false, codepoint));
        let result = if codepoint == "0" {
            Ok(0)
        } else if let Some(codepoint) = codepoint
            .strip_prefix("0x")
            .or_else(|| codepoint.strip_prefix("0X"))
        {
            u32::from_str_radix(codepoint, 16)
        } else if let Some(codepoint) = codepoint.strip_prefix('0') {
            u32::from_str_radix(codepoint, 8)
        } else {
            codepoint.parse()
        };
        let codepoint = result.map_err(|_| FontError::InvalidCharacterCode(codepoint.into()))?;
        if (positive && codepoint <= 0x7FFF_FFFF)
            || (!positive && (2..=0x8000_0000).contains(&codepoint))
        {
            Ok((codepoint, positive))
        } else {
            Err(FontError::CharacterCodeOutOfRange(codepoint))
        }
    }
}

/// The rows of sub-characters depicting one character
///
/// All rows of a well-formed glyph have the same length. Shorter rows are tolerated and behave as
/// if padded with blanks up to [`width`](Glyph::width).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Box<[char]>>,
    width: usize,
    min_width: usize,
}

impl Glyph {
    /// Creates a glyph from its rows, top to bottom.
    pub fn new<I>(rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let rows: Vec<Box<[char]>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();
        let (min_width, width) = rows
            .iter()
            .map(|row| row.len())
            .minmax()
            .into_option()
            .unwrap_or((0, 0));
        Self {
            rows,
            width,
            min_width,
        }
    }

    fn decode<'a>(rows: impl Iterator<Item = &'a [u8]>, codepoint: u32) -> Result<Self, FontError> {
        let rows = rows
            .map(|line| {
                let line = line.to_str_lossy();
                let endmark = line.chars().next_back()?;
                Some(line.trim_end_matches(endmark).to_owned())
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(FontError::EmptyRow(codepoint))?;
        Ok(Self::new(rows))
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Length of the shortest row. Overlaps with the previous glyph never exceed this.
    #[must_use]
    pub const fn min_width(&self) -> usize {
        self.min_width
    }

    /// The rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Box<[char]>] {
        &self.rows
    }
}

/// An error in decoding a FIGfont
#[derive(Debug, Error)]
pub enum FontError {
    /// An error in decoding the header
    #[error("Bad header: {0}")]
    BadHeader(#[from] HeaderError),
    /// A character code that cannot be parsed as a `u32`
    #[error("{0} is not a valid character code")]
    InvalidCharacterCode(BString),
    /// A character code outside the ranges `0..=2147483647` and `-2147483648..=-2`
    #[error("character code {0} is out of range")]
    CharacterCodeOutOfRange(u32),
    /// A FIGcharacter that has an empty row, without an *endmark*
    #[error("empty row in FIGcharacter {0}")]
    EmptyRow(u32),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Font, FontError, Glyph, PrintDirection};

    /// A height-2 font with the 102 required characters (all `"#@"`/`"@@"` sized) and two tagged
    /// characters, one of them negative.
    pub(crate) fn tiny_flf() -> String {
        let mut flf = String::from("flf2a$ 2 2 4 0 1 1 128 2\nA comment line\n");
        for codepoint in super::DEFAULT_CODEPOINTS {
            let c = char::from(codepoint);
            if c == ' ' {
                flf.push_str("$@\n$@@\n");
            } else {
                flf.push_str(&format!("{c}@\n{c}@@\n"));
            }
        }
        flf.push_str("0x263A SMILING FACE\n:)@\n:(@@\n");
        flf.push_str("-0x0002 translation table\nfoo@\nbar@@\n");
        flf
    }

    #[test]
    fn decode_tiny_font() {
        let font = Font::decode(tiny_flf()).unwrap();
        assert_eq!(font.height(), 2);
        assert_eq!(font.comments(), "A comment line");
        assert_eq!(font.header().print_direction, PrintDirection::RightToLeft);
        assert_eq!(font.header().full_layout, Some(128));
        assert_eq!(font.glyph('A').unwrap().rows().len(), 2);
        assert_eq!(font.glyph('Ä').unwrap().width(), 1);
        let smiley = font.glyph('☺').unwrap();
        assert_eq!(smiley, &Glyph::new([":)", ":("]));
        assert_eq!(
            font.code_tagged_characters().get(&0x263A).map(String::as_str),
            Some("SMILING FACE")
        );
        assert_eq!(
            font.ignored_characters().get(&2).map(String::as_str),
            Some("foo@\nbar@@")
        );
    }

    #[test]
    fn crlf_line_endings() {
        let font = Font::decode(tiny_flf().replace('\n', "\r\n")).unwrap();
        assert_eq!(font.glyph('x').unwrap(), &Glyph::new(["x", "x"]));
    }

    #[test]
    fn empty_row_is_fatal() {
        let flf = "flf2a$ 1 1 3 0 0\n\n@\n";
        assert!(matches!(Font::decode(flf), Err(FontError::EmptyRow(32))));
    }

    #[test]
    fn parse_codepoints() {
        assert_eq!(Font::parse_codepoint("65").unwrap(), (65, true));
        assert_eq!(Font::parse_codepoint("0x41").unwrap(), (65, true));
        assert_eq!(Font::parse_codepoint("0X41").unwrap(), (65, true));
        assert_eq!(Font::parse_codepoint("0101").unwrap(), (65, true));
        assert_eq!(Font::parse_codepoint("0").unwrap(), (0, true));
        assert_eq!(Font::parse_codepoint("-2").unwrap(), (2, false));
        assert!(matches!(
            Font::parse_codepoint("-1"),
            Err(FontError::CharacterCodeOutOfRange(1))
        ));
        assert!(matches!(
            Font::parse_codepoint("0xZZ"),
            Err(FontError::InvalidCharacterCode(_))
        ));
    }

    #[test]
    fn ragged_glyph_widths() {
        let glyph = Glyph::new(["abc", "a", ""]);
        assert_eq!(glyph.width(), 3);
        assert_eq!(glyph.min_width(), 0);
        assert_eq!(glyph.height(), 3);
    }
}

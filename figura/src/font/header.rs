use std::str::{self, FromStr};

use bstr::{BString, ByteSlice as _};
use itertools::Itertools as _;
use thiserror::Error;

use crate::render::LayoutBits;

/// A FIGfont header.
///
/// The layout parameters are kept in their raw form; they are only resolved into a
/// [`Layout`](crate::render::Layout) when rendering, since a caller override may replace them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// The *hardblank* character; see [`Hardblank`].
    pub hardblank: Hardblank,
    /// Number of rows in each FIGcharacter, including any empty space above or below the glyph.
    ///
    /// Decoding rejects a zero height; a programmatically built font with zero height fails to
    /// render with [`RenderError::InvalidFont`](crate::render::RenderError::InvalidFont).
    pub height: usize,
    /// The number of rows from the baseline of a FIGcharacter to its top. Does not affect
    /// rendering. `None` if the parameter could not be parsed.
    pub baseline: Option<usize>,
    /// An upper bound for the length of each row of each FIGcharacter in the font, usually the
    /// widest FIGcharacter plus 2 (for the *endmarks*).
    pub max_length: usize,
    /// Number of lines of comments between the header and the FIGcharacters. See also
    /// [`Font::comments`](crate::font::Font::comments).
    pub comment_lines: usize,
    /// The `Old_Layout` parameter: `-1` for full width, `0` for kerning, `1..=63` for smushing
    /// with the given rule bits.
    pub old_layout: i32,
    /// The `Full_Layout` parameter, if present. When set it takes precedence over
    /// [`old_layout`](Header::old_layout).
    pub full_layout: Option<u16>,
    /// The default print direction (left-to-right or right-to-left).
    pub print_direction: PrintDirection,
    /// Number of code-tagged characters announced by the header.
    pub code_tag_count: usize,
}

impl Header {
    /// Decode a header from its binary encoding.
    ///
    /// # Errors
    /// Any fatal decoding errors, see [`HeaderError`] for details.
    pub fn decode(header_line: impl AsRef<[u8]>) -> Result<Self, HeaderError> {
        let header_line = header_line.as_ref();
        let mut parameters = header_line
            .split(|&c| c == b' ')
            .filter(|parameter| !parameter.is_empty());
        let Some(
            [
                signature_and_hardblank,
                height,
                baseline,
                max_length,
                old_layout,
                comment_lines,
            ],
        ) = parameters.next_array()
        else {
            return Err(HeaderError::NotEnoughParameters(BString::new(
                header_line.to_owned(),
            )));
        };
        let print_direction = parameters.next();
        let full_layout = parameters.next();
        let code_tag_count = parameters.next();
        let Some(hardblank) = signature_and_hardblank.strip_prefix(b"flf2a") else {
            return Err(HeaderError::UnknownSignature(
                signature_and_hardblank.into(),
            ));
        };
        let Ok(hardblank) = hardblank.chars().exactly_one() else {
            return Err(HeaderError::HardblankLength(hardblank.into()));
        };
        let hardblank = hardblank
            .try_into()
            .map_err(HeaderError::InvalidHardblankChar)?;
        let height = IntParameter::Height.parse(height)?;
        if height == 0 {
            return Err(HeaderError::ZeroHeight);
        }
        let baseline = IntParameter::Baseline.parse(baseline).ok();
        let max_length = IntParameter::MaxLength.parse(max_length)?;
        let comment_lines = IntParameter::CommentLines.parse(comment_lines)?;
        let old_layout = IntParameter::OldLayout.parse(old_layout)?;
        let full_layout = full_layout
            .map(|full_layout| IntParameter::FullLayout.parse::<u16>(full_layout))
            .transpose()?;
        if let Some(full_layout) = full_layout {
            if full_layout > LayoutBits::MAX_FULL_LAYOUT {
                return Err(HeaderError::FullLayoutOutOfRange(full_layout));
            }
        }
        let print_direction = PrintDirection::decode(print_direction)?;
        let code_tag_count = code_tag_count
            .map(|count| IntParameter::CodeTagCount.parse(count))
            .transpose()?
            .unwrap_or(0);
        Ok(Self {
            hardblank,
            height,
            baseline,
            max_length,
            comment_lines,
            old_layout,
            full_layout,
            print_direction,
            code_tag_count,
        })
    }
}

/// Printing direction, left-to-right or right-to-left
///
/// Each font specifies a default, found in `font.header().print_direction`, which can be
/// overridden with [`Renderer::print_direction`](crate::render::Renderer::print_direction).
///
/// Right-to-left printing reverses the order of the input characters on each line before they are
/// composed; the glyphs themselves are never mirrored. The rendered string should always be read
/// left-to-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrintDirection {
    /// Left-to-right
    #[default]
    LeftToRight,
    /// Right-to-left
    RightToLeft,
}

impl PrintDirection {
    pub(crate) fn decode(print_direction: Option<&[u8]>) -> Result<Self, HeaderError> {
        Ok(match print_direction {
            None | Some(b"0") => Self::LeftToRight,
            Some(b"1") => Self::RightToLeft,
            Some(other) => return Err(HeaderError::PrintDirection(other.into())),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum IntParameter {
    Height,
    Baseline,
    MaxLength,
    CommentLines,
    OldLayout,
    FullLayout,
    CodeTagCount,
}

impl IntParameter {
    fn parse<T: FromStr>(self, bytes: &[u8]) -> Result<T, HeaderError> {
        str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| HeaderError::Parse(self.name(), bytes.into()))
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Height => "Height",
            Self::Baseline => "Baseline",
            Self::MaxLength => "Max_Length",
            Self::CommentLines => "Comment_Lines",
            Self::OldLayout => "Old_Layout",
            Self::FullLayout => "Full_Layout",
            Self::CodeTagCount => "Codetag_Count",
        }
    }
}

/// A hardblank character
///
/// A hardblank is a special sub-character which is displayed as a blank (`' '`) once rendered, but
/// is treated like a visible sub-character when kerning or smushing. Therefore, hardblanks keep
/// adjacent FIGcharacters a certain distance apart.
///
/// The usual hardblank is a `$`, but it can be any character except a blank (`' '`), a
/// carriage-return, a newline or a null character.
///
/// See [`SmushRule`](crate::render::SmushRule) and [The FIGfont
/// standard](http://www.jave.de/figlet/figfont.html#hardblanks) for more details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hardblank(char);

impl Hardblank {
    /// The conventional hardblank, `$`.
    pub const DOLLAR: Self = Self('$');

    /// The hardblank as a character.
    #[must_use]
    pub const fn get(self) -> char {
        self.0
    }
}

impl Default for Hardblank {
    fn default() -> Self {
        Self::DOLLAR
    }
}

impl PartialEq<char> for Hardblank {
    fn eq(&self, other: &char) -> bool {
        self.0 == *other
    }
}

impl TryFrom<char> for Hardblank {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        if matches!(value, ' ' | '\r' | '\n' | '\0') {
            Err(value)
        } else {
            Ok(Self(value))
        }
    }
}

/// An error in decoding a FIGfont header
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("missing header")]
    /// There is no header, ie the contents are empty.
    Missing,
    /// The header has fewer than the five required parameters (after the signature and hardblank).
    #[error(r#""{0}" does not include enough parameters"#)]
    NotEnoughParameters(BString),
    /// The header does not begin with `"flf2a"`.
    #[error(r#"{0} does not begin with "flf2a""#)]
    UnknownSignature(BString),
    /// The hardblank is either missing or contains more than one character.
    #[error(r#"hardblank "{0}" is not exactly one character"#)]
    HardblankLength(BString),
    /// The specified hardblank is a blank (space), a carriage-return, a newline (linefeed) or a
    /// null character.
    #[error("{0:?} must not be the hardblank")]
    InvalidHardblankChar(char),
    /// One of the integer parameters cannot be parsed.
    #[error("{1} cannot be parsed as the parameter `{0}`")]
    Parse(&'static str, BString),
    /// The print direction parameter is not 0 or 1.
    #[error(r#""{0}" is an invalid print direction, expecting 0 or 1"#)]
    PrintDirection(BString),
    /// The `Full_Layout` parameter is outside the range `0..=32767`.
    #[error("invalid `Full_Layout` {0}")]
    FullLayoutOutOfRange(u16),
    /// The height parameter is 0
    #[error("height parameter is 0")]
    ZeroHeight,
}

use crate::font::Hardblank;

use super::layout::{FitMode, Layout, SmushRule};

/// One sub-character of a composed row
///
/// Hardblanks are kept distinct from visible characters so that only literal hardblanks turn
/// into blanks on output, even if a smushing result happens to equal the hardblank character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Blank,
    Hardblank,
    Visible(char),
}

impl Cell {
    pub(crate) fn from_char(c: char, hardblank: Hardblank) -> Self {
        if c == ' ' {
            Self::Blank
        } else if hardblank == c {
            Self::Hardblank
        } else {
            Self::Visible(c)
        }
    }

    /// The sub-character at `column` of a glyph row, padding short rows with blanks.
    pub(crate) fn at(row: &[char], column: usize, hardblank: Hardblank) -> Self {
        row.get(column)
            .map_or(Self::Blank, |&c| Self::from_char(c, hardblank))
    }

    pub(crate) const fn to_char(self, hardblank: Hardblank) -> char {
        match self {
            Self::Blank => ' ',
            Self::Hardblank => hardblank.get(),
            Self::Visible(c) => c,
        }
    }

    /// The character written to the output, with hardblanks turned into blanks.
    pub(crate) const fn output(self) -> char {
        match self {
            Self::Blank | Self::Hardblank => ' ',
            Self::Visible(c) => c,
        }
    }

    const fn visible(self) -> Option<char> {
        match self {
            Self::Visible(c) => Some(c),
            Self::Blank | Self::Hardblank => None,
        }
    }
}

impl Layout {
    /// Combines two overlapping sub-characters, `left` from the composed line and `right` from
    /// the glyph being added.
    ///
    /// Returns `None` if they cannot be smushed, which is always the case unless the fit mode is
    /// [`FitMode::Smushing`].
    ///
    /// ```
    /// # use figura::font::Hardblank;
    /// # use figura::render::{Layout, SmushRule};
    /// let layout = Layout::smushing(SmushRule::BigX.into());
    /// assert_eq!(layout.smush('/', '\\', Hardblank::DOLLAR), Some('|'));
    /// assert_eq!(layout.smush('\\', '/', Hardblank::DOLLAR), Some('Y'));
    /// assert_eq!(layout.smush('<', '>', Hardblank::DOLLAR), None);
    /// assert_eq!(layout.smush(' ', '<', Hardblank::DOLLAR), Some('<'));
    /// ```
    #[must_use]
    pub fn smush(self, left: char, right: char, hardblank: Hardblank) -> Option<char> {
        self.smush_cells(
            Cell::from_char(left, hardblank),
            Cell::from_char(right, hardblank),
        )
        .map(|cell| cell.to_char(hardblank))
    }

    pub(crate) fn smush_cells(self, left: Cell, right: Cell) -> Option<Cell> {
        if self.fit() != FitMode::Smushing {
            return None;
        }
        match (left, right) {
            (Cell::Blank, _) => return Some(right),
            (_, Cell::Blank) => return Some(left),
            _ => (),
        }
        if let Some(cell) = self
            .rules()
            .iter()
            .find_map(|rule| rule.smush(left, right))
        {
            return Some(cell);
        }
        if !self.universal_smushing() {
            // controlled smushing only combines what the rules allow
            return None;
        }
        match (left, right) {
            (Cell::Hardblank, Cell::Hardblank) => None,
            (Cell::Hardblank, visible) | (visible, Cell::Hardblank) => Some(visible),
            (_, later) => Some(later),
        }
    }

    /// Combines two overlapping sub-characters where at least one is blank, as kerning does.
    ///
    /// In smushing mode this agrees with [`Layout::smush_cells`] for such pairs.
    pub(crate) fn merge(self, left: Cell, right: Cell) -> Cell {
        self.smush_cells(left, right)
            .unwrap_or(if left == Cell::Blank { right } else { left })
    }
}

impl SmushRule {
    fn smush(self, left: Cell, right: Cell) -> Option<Cell> {
        if self == Self::Hardblank {
            return (left == Cell::Hardblank && right == Cell::Hardblank).then_some(left);
        }
        let (l, r) = left.visible().zip(right.visible())?;
        match self {
            Self::EqualCharacter => (l == r).then_some(left),
            Self::Underscore => match (l, r) {
                ('_', r) if is_border(r) => Some(right),
                (l, '_') if is_border(l) => Some(left),
                _ => None,
            },
            Self::Hierarchy => {
                let (left_class, right_class) = hierarchy_class(l).zip(hierarchy_class(r))?;
                match left_class.cmp(&right_class) {
                    std::cmp::Ordering::Less => Some(left),
                    std::cmp::Ordering::Equal => None,
                    std::cmp::Ordering::Greater => Some(right),
                }
            }
            Self::OppositePair => matches!(
                (l, r),
                ('[', ']') | (']', '[') | ('{', '}') | ('}', '{') | ('(', ')') | (')', '(')
            )
            .then_some(Cell::Visible('|')),
            Self::BigX => match (l, r) {
                ('/', '\\') => Some(Cell::Visible('|')),
                ('\\', '/') => Some(Cell::Visible('Y')),
                ('>', '<') => Some(Cell::Visible('X')),
                _ => None,
            },
            Self::Hardblank => None,
        }
    }
}

const fn is_border(c: char) -> bool {
    hierarchy_class(c).is_some()
}

/// Rank in the hierarchy ladder, `0` being the highest priority.
const fn hierarchy_class(c: char) -> Option<u8> {
    match c {
        '|' => Some(0),
        '/' | '\\' => Some(1),
        '[' | ']' => Some(2),
        '{' | '}' => Some(3),
        '(' | ')' => Some(4),
        '<' | '>' => Some(5),
        _ => None,
    }
}

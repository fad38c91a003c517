use enumset::{EnumSet, EnumSetType};
use thiserror::Error;

/// Bit masks of the `Full_Layout` encoding, which is also the encoding of caller overrides
///
/// * bits 0--5: the [`SmushRule`]s, in declaration order
/// * bit 6: [`FitMode::Kerning`]
/// * bit 7: [`FitMode::Smushing`]
///
/// The high byte describes vertical layout, which this crate does not implement; it is ignored.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBits;

impl LayoutBits {
    /// The six controlled smushing rules
    pub const RULES: u16 = 0b0011_1111;
    /// Kerning (fitting)
    pub const KERNING: u16 = 1 << 6;
    /// Smushing
    pub const SMUSHING: u16 = 1 << 7;
    /// The largest valid `Full_Layout` header parameter
    pub const MAX_FULL_LAYOUT: u16 = 32767;
}

/// Combination of a fit mode and a set of controlled smushing rules
///
/// The rules are only relevant if the fit mode is [`FitMode::Smushing`]. An empty rule set in
/// smushing mode means *universal smushing*.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    fit: FitMode,
    rules: EnumSet<SmushRule>,
}

impl Layout {
    /// Glyphs are laid out as rectangles, edge to edge.
    pub const FULL_WIDTH: Self = Self {
        fit: FitMode::FullWidth,
        rules: EnumSet::empty(),
    };

    /// Glyphs are moved together until they touch.
    pub const KERNING: Self = Self {
        fit: FitMode::Kerning,
        rules: EnumSet::empty(),
    };

    /// Glyphs are overlapped as far as the given rules allow. An empty set means universal
    /// smushing.
    #[must_use]
    pub const fn smushing(rules: EnumSet<SmushRule>) -> Self {
        Self {
            fit: FitMode::Smushing,
            rules,
        }
    }

    /// Returns the fit mode.
    #[must_use]
    pub const fn fit(&self) -> FitMode {
        self.fit
    }

    /// Returns the set of controlled smushing rules.
    #[must_use]
    pub const fn rules(&self) -> EnumSet<SmushRule> {
        self.rules
    }

    /// Returns true if *universal smushing* is active.
    ///
    /// When universal smushing, a visible sub-character from a later glyph overrides one from an
    /// earlier glyph, and visible sub-characters override hardblanks. This produces an
    /// "overlapping" effect with some fonts, whereby later glyphs appear to be in front.
    #[must_use]
    pub fn universal_smushing(&self) -> bool {
        self.fit == FitMode::Smushing && self.rules.is_empty()
    }

    /// Encodes this layout in the `Full_Layout` bit format.
    ///
    /// ```
    /// # use figura::render::{Layout, SmushRule};
    /// let layout = Layout::smushing(SmushRule::EqualCharacter | SmushRule::BigX);
    /// assert_eq!(layout.bits(), 0b1001_0001);
    /// assert_eq!(Layout::from_override(layout.bits()), Ok(layout));
    /// ```
    #[must_use]
    pub fn bits(&self) -> u16 {
        match self.fit {
            FitMode::FullWidth => 0,
            FitMode::Kerning => LayoutBits::KERNING,
            FitMode::Smushing => LayoutBits::SMUSHING | u16::from(self.rules.as_repr()),
        }
    }

    /// Resolves the layout for one render.
    ///
    /// A caller override fully replaces the font defaults, it is never merged with them.
    /// Otherwise the font's `Full_Layout` is used if the font has one, and its `Old_Layout` if not.
    ///
    /// ```
    /// # use figura::render::{FitMode, Layout, SmushRule};
    /// // the font's Full_Layout wins over its Old_Layout
    /// let layout = Layout::resolve(None, Some(0b1000_0001), 0).unwrap();
    /// assert_eq!(layout, Layout::smushing(SmushRule::EqualCharacter.into()));
    /// // a caller override replaces both
    /// let layout = Layout::resolve(Some(0), Some(0b1000_0001), 0).unwrap();
    /// assert_eq!(layout.fit(), FitMode::FullWidth);
    /// ```
    ///
    /// # Errors
    /// [`LayoutConflict`] if the override requests both kerning and smushing.
    pub fn resolve(
        layout_override: Option<u16>,
        full_layout: Option<u16>,
        old_layout: i32,
    ) -> Result<Self, LayoutConflict> {
        match (layout_override, full_layout) {
            (Some(bits), _) => Self::from_override(bits),
            (None, Some(full_layout)) => Ok(Self::from_full_layout(full_layout)),
            (None, None) => Ok(Self::from_old_layout(old_layout)),
        }
    }

    /// Decodes a caller override in the `Full_Layout` bit format.
    ///
    /// Rule bits without the smushing bit are accepted and ignored.
    ///
    /// # Errors
    /// [`LayoutConflict`] if both the kerning and the smushing bit are set.
    pub fn from_override(bits: u16) -> Result<Self, LayoutConflict> {
        if bits & LayoutBits::KERNING != 0 && bits & LayoutBits::SMUSHING != 0 {
            return Err(LayoutConflict(bits));
        }
        Ok(Self::from_full_layout(bits))
    }

    /// Decodes the font's `Full_Layout` parameter.
    ///
    /// The smushing bit overrides the kerning bit if both are set. If neither is set the layout
    /// is full width, even for a raw value of `0`.
    #[must_use]
    pub fn from_full_layout(bits: u16) -> Self {
        if bits & LayoutBits::SMUSHING != 0 {
            Self::smushing(SmushRule::decode(bits))
        } else if bits & LayoutBits::KERNING != 0 {
            Self::KERNING
        } else {
            Self::FULL_WIDTH
        }
    }

    /// Decodes the font's `Old_Layout` parameter.
    ///
    /// `-1` (and any other negative value) means full width, `0` means kerning, and a positive
    /// value means smushing with its low six bits as the rules.
    #[must_use]
    pub fn from_old_layout(old_layout: i32) -> Self {
        match u16::try_from(old_layout) {
            Err(_) => Self::FULL_WIDTH,
            Ok(0) => Self::KERNING,
            Ok(bits) => Self::smushing(SmushRule::decode(bits)),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::FULL_WIDTH
    }
}

/// Fit modes for horizontal layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitMode {
    /// No kerning, the glyphs are laid out as rectangles.
    #[default]
    FullWidth,
    /// Glyphs are moved closer until they touch, which means that two non-blank sub-characters
    /// are adjacent. Hardblanks count as non-blank.
    Kerning,
    /// Glyphs are overlapped by the largest amount for which every overlapped pair of
    /// sub-characters can be combined, as decided by the active [`SmushRule`]s (or universal
    /// smushing if none are active). If no overlap works, kerning is used instead.
    Smushing,
}

/// Controlled smushing rules for horizontal layout
///
/// Rules are tried in declaration order and the first one that applies decides the result.
#[derive(EnumSetType, Debug)]
#[enumset(repr = "u8")]
pub enum SmushRule {
    /// Smush two sub-characters if they are the same, but not a
    /// [*hardblank*](crate::font::Hardblank).
    EqualCharacter = 0,
    /// An underscore (`_`) will be overridden by any of: `|`, `/`, `\`, `[`, `]`, `{`, `}`, `(`,
    /// `)`, `<` or `>`.
    Underscore = 1,
    /// A hierarchy of six classes is used: `|`, `/\`, `[]`, `{}`, `()`, and `<>`, in decreasing
    /// priority. When two smushing sub-characters are from different classes, the one from the
    /// higher-priority class is kept.
    Hierarchy = 2,
    /// Smushes opposing brackets (`[]`), braces (`{}`) and parentheses (`()`) together, replacing
    /// any such pair with a vertical bar (`|`).
    ///
    /// The pairs are smushed in either order, but they must be of the same kind.
    OppositePair = 3,
    /// Smushes `/\` into `|`, `\/` into `Y`, and `><` into `X`.
    ///
    /// Here the pairs *are* ordered, in particular `<>` is not affected by this rule.
    BigX = 4,
    /// Two [hardblanks](crate::font::Hardblank) are smushed to a single one.
    Hardblank = 5,
}

impl SmushRule {
    fn decode(bits: u16) -> EnumSet<Self> {
        let [_, low] = (bits & LayoutBits::RULES).to_be_bytes();
        EnumSet::from_repr_truncated(low)
    }
}

/// The caller's layout override requests both kerning and smushing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("layout override {0:#b} sets both the kerning and the smushing bit")]
pub struct LayoutConflict(pub u16);

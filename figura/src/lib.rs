//! A crate for decoding FIGfonts and rendering text using these fonts.
//!
//! # Features
//!
//! - Decoding of `.flf` files, including code-tagged characters
//!   ([`Font::decode`](crate::font::Font::decode))
//! - Full width, kerning and smushing layouts, with all six controlled smushing rules and
//!   universal smushing ([`Layout`](crate::render::Layout))
//! - Automatic line breaking at word boundaries depending on the output width
//!   ([`Renderer::render`](crate::render::Renderer::render))
//! - Right-to-left printing and alignment ([`Alignment`](crate::render::Alignment))
//! - Streaming output to any [`std::io::Write`]
//!   ([`Renderer::render_to`](crate::render::Renderer::render_to))
//! - Render events for debugging, optionally forwarded to [`tracing`]
//!   ([`RenderObserver`](crate::render::RenderObserver))
//!
//! # Example
//!
//! ```
//! # use figura::font::Font;
//! let flf = "flf2a$ 2 1 3 -1 1\nTwo glyphs only\n$@\n$@@\n|@\no@@\n";
//! let font = Font::decode(flf).unwrap();
//! assert_eq!(font.render("! !").unwrap(), "| |\no o");
//! ```
//!
//! A font can also be assembled in code:
//!
//! ```
//! # use figura::font::{Font, Hardblank};
//! # use figura::render::{Layout, Renderer, SmushRule};
//! let font = Font::new(3, Hardblank::DOLLAR)
//!     .with_glyph('/', ["  /", " / ", "/  "])
//!     .with_glyph('\\', ["\\  ", " \\ ", "  \\"]);
//! let smushed: String = Renderer::new(&font)
//!     .layout(Layout::smushing(SmushRule::BigX.into()))
//!     .render("/\\")
//!     .unwrap();
//! assert_eq!(smushed, concat!(r"\ /", "\n", " | ", "\n", r"/ \"));
//! ```

pub mod font;
pub mod render;

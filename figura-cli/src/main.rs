//! Renders text with a FIGfont
//!
//! The text is taken from the arguments, or from standard input if there are none. Set
//! `RUST_LOG` (or pass `--trace`) to see what the renderer does.

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use figura::font::Font;
use figura::render::{
    Layout, NoopObserver, PrintDirection, RenderArena, RenderObserver, RenderOptions, Renderer,
    TracingObserver,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.trace);
    let font = cli.font()?;
    let input = cli.input()?;
    let renderer = cli.renderer(&font);
    let mut observer: Box<dyn RenderObserver> = if cli.trace {
        Box::new(TracingObserver)
    } else {
        Box::new(NoopObserver)
    };
    let mut stdout = io::stdout().lock();
    renderer.render_to_with(&input, &mut stdout, &mut RenderArena::new(), &mut *observer)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("warn,figura=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Text to render; read from standard input if missing
    input: Vec<String>,
    /// Path of the `.flf` font file
    #[arg(short = 'f', value_name = "FONT")]
    font: PathBuf,
    /// Output width; lines are at most one column shorter
    #[arg(short = 'w', default_value_t = RenderOptions::DEFAULT_WIDTH)]
    width: usize,
    /// Print direction, overriding the font's default
    #[arg(short = 'd')]
    direction: Option<Direction>,
    /// Alignment relative to the print direction
    #[arg(short = 'j')]
    alignment: Option<Alignment>,
    /// Full width layout, overriding the font's layout
    #[arg(short = 'W', conflicts_with_all = ["kerning", "layout_bits"])]
    full_width: bool,
    /// Kerning layout, overriding the font's layout
    #[arg(short = 'k', conflicts_with = "layout_bits")]
    kerning: bool,
    /// Layout override in the `Full_Layout` bit format: bits 0-5 are the smushing rules, 64 is
    /// kerning and 128 is smushing
    #[arg(short = 'm', value_name = "BITS")]
    layout_bits: Option<u16>,
    /// Character to render in place of characters missing from the font
    #[arg(short = 'F', value_name = "CHAR")]
    fallback: Option<char>,
    /// Remove trailing blanks from every row
    #[arg(long)]
    trim: bool,
    /// Log every rendering decision to standard error
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn font(&self) -> Result<Font> {
        let bytes = fs::read(&self.font)
            .with_context(|| format!("failed to read {}", self.font.display()))?;
        let font = Font::decode(bytes)
            .with_context(|| format!("failed to decode {}", self.font.display()))?;
        debug!(path = %self.font.display(), "font loaded");
        Ok(font)
    }

    fn input(&self) -> Result<String> {
        if self.input.is_empty() {
            io::read_to_string(io::stdin()).context("failed to read standard input")
        } else {
            Ok(self.input.join(" "))
        }
    }

    fn renderer<'font>(&self, font: &'font Font) -> Renderer<'font> {
        let mut renderer = Renderer::new(font)
            .max_width(self.width)
            .trim_trailing_whitespace(self.trim);
        if let Some(direction) = self.direction {
            renderer = renderer.print_direction(direction.into());
        }
        if let Some(alignment) = self.alignment {
            renderer = renderer.alignment(alignment.into());
        }
        if let Some(fallback) = self.fallback {
            renderer = renderer.fallback(fallback);
        }
        if self.full_width {
            renderer = renderer.layout(Layout::FULL_WIDTH);
        } else if self.kerning {
            renderer = renderer.layout(Layout::KERNING);
        } else if let Some(bits) = self.layout_bits {
            renderer = renderer.layout_override(bits);
        }
        renderer
    }
}

#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Direction {
    LeftToRight,
    RightToLeft,
}

impl From<Direction> for PrintDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::LeftToRight => Self::LeftToRight,
            Direction::RightToLeft => Self::RightToLeft,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum Alignment {
    Start,
    Center,
    End,
}

impl From<Alignment> for figura::render::Alignment {
    fn from(value: Alignment) -> Self {
        match value {
            Alignment::Start => Self::Start,
            Alignment::Center => Self::Center,
            Alignment::End => Self::End,
        }
    }
}

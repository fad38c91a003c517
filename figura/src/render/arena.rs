use super::smush::Cell;

/// Reusable scratch buffers for rendering
///
/// Rendering with [`Renderer::render_with`](super::Renderer::render_with) or
/// [`Renderer::render_to_with`](super::Renderer::render_to_with) grows the buffers of the arena
/// instead of allocating new ones, so a caller that renders many strings can keep one arena
/// around. The arena is cleared at the start of every render; its contents never affect the
/// output.
#[derive(Debug, Default)]
pub struct RenderArena {
    pub(crate) rows: Vec<Vec<Cell>>,
    pub(crate) line: Vec<char>,
    pub(crate) replay: Vec<char>,
    pub(crate) text: String,
}

impl RenderArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything and prepares `height` empty rows.
    pub(crate) fn reset(&mut self, height: usize) {
        self.rows.resize_with(height, Vec::new);
        for row in &mut self.rows {
            row.clear();
        }
        self.line.clear();
        self.replay.clear();
        self.text.clear();
    }
}

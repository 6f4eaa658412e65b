mod color;
mod font;

// Re-export public API
pub use color::{density_to_rgba, Rgba};
use font::render_overlay_text;

/// Frame layout: a square grid, each cell blown up to `cell_px` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub grid: usize,
    pub cell_px: usize,
    pub frame_width: usize,
    pub frame_height: usize,
}

impl RenderConfig {
    pub fn new(grid: usize, cell_px: usize) -> Self {
        let cell_px = cell_px.max(1);
        Self {
            grid,
            cell_px,
            frame_width: grid * cell_px,
            frame_height: grid * cell_px,
        }
    }

    /// Overlay font scale: one font pixel per 320 frame pixels, at least 1.
    pub fn text_scale(&self) -> usize {
        (self.frame_width / 320).max(1)
    }

    /// Map a window pixel position to the grid cell under it.
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let c = self.cell_px as f32;
        ((x / c).floor() as i32, (y / c).floor() as i32)
    }
}

/// RGBA byte buffer the simulation paints into, one block per grid cell.
pub struct FrameBuffer {
    pub cfg: RenderConfig,
    pub rgba: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(cfg: RenderConfig) -> Self {
        let rgba = vec![0u8; cfg.frame_width * cfg.frame_height * 4];
        Self { cfg, rgba }
    }

    /// Fill the block for grid cell `(col, row)`.
    pub fn put_cell(&mut self, col: usize, row: usize, color: Rgba) {
        let cell = self.cfg.cell_px;
        let fw = self.cfg.frame_width;
        debug_assert!(col < self.cfg.grid && row < self.cfg.grid, "cell ({col},{row}) outside grid");
        let px = [color.r, color.g, color.b, color.a];
        for y in row * cell..(row + 1) * cell {
            let start = (y * fw + col * cell) * 4;
            for chunk in self.rgba[start..start + cell * 4].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    pub fn draw_overlay(&mut self, lines: &[String]) {
        render_overlay_text(&mut self.rgba, &self.cfg, lines);
    }

    /// Pack into the `0RGB` layout the window expects.
    pub fn to_argb(&self, out: &mut Vec<u32>) {
        out.resize(self.cfg.frame_width * self.cfg.frame_height, 0);
        rgba_to_argb(&self.rgba, out);
    }
}

fn rgba_to_argb(rgba: &[u8], out: &mut [u32]) {
    for (i, pixel) in rgba.chunks_exact(4).enumerate() {
        out[i] = (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32;
    }
}

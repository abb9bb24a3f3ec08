use kurbo::{Rect, Size};

use crate::{
    compositor::{frame::FrameSnapshot, target::RenderTarget},
    foundation::error::{SlideError, SlideResult},
};

/// Uniform grid of viewports covering the canvas, filled row by row from the top left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportGrid {
    /// Cells per row.
    pub cols: u32,
    /// Rows of cells.
    pub rows: u32,
    /// Spacing between cells and around the edge, in canvas pixels.
    #[serde(default)]
    pub gap: f64,
}

impl Default for ViewportGrid {
    fn default() -> Self {
        Self {
            cols: 1,
            rows: 1,
            gap: 0.0,
        }
    }
}

impl ViewportGrid {
    /// Number of cells.
    pub fn len(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    /// No cells at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell rectangles for `canvas`.
    pub fn cells(&self, canvas: Size) -> SlideResult<Vec<Rect>> {
        if self.is_empty() {
            return Err(SlideError::validation("viewport grid needs at least one cell"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(SlideError::validation("viewport gap must be finite and >= 0"));
        }
        let cols = f64::from(self.cols);
        let rows = f64::from(self.rows);
        let w = (canvas.width - self.gap * (cols + 1.0)) / cols;
        let h = (canvas.height - self.gap * (rows + 1.0)) / rows;
        if !(w > 0.0 && h > 0.0) {
            return Err(SlideError::validation(format!(
                "canvas {}x{} is too small for a {}x{} grid with gap {}",
                canvas.width, canvas.height, self.cols, self.rows, self.gap
            )));
        }

        let mut out = Vec::with_capacity(self.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x0 = self.gap + f64::from(col) * (w + self.gap);
                let y0 = self.gap + f64::from(row) * (h + self.gap);
                out.push(Rect::new(x0, y0, x0 + w, y0 + h));
            }
        }
        Ok(out)
    }
}

/// Issues the per-frame draw call for every scene into its viewport.
#[derive(Clone, Debug)]
pub struct Compositor {
    canvas: Size,
    cells: Vec<Rect>,
}

impl Compositor {
    pub fn new(grid: ViewportGrid, canvas: Size) -> SlideResult<Self> {
        let cells = grid.cells(canvas)?;
        Ok(Self { canvas, cells })
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn viewports(&self) -> &[Rect] {
        &self.cells
    }

    /// Draw each scene of `frame` into the viewport with the same index.
    #[tracing::instrument(level = "trace", skip_all, fields(frame = frame.frame))]
    pub fn render<T>(&self, frame: &FrameSnapshot, target: &mut T) -> SlideResult<()>
    where
        T: RenderTarget + ?Sized,
    {
        if frame.scenes.len() > self.cells.len() {
            return Err(SlideError::validation(format!(
                "{} scenes but only {} viewports",
                frame.scenes.len(),
                self.cells.len()
            )));
        }
        target.begin_frame(frame)?;
        for (viewport, scene) in self.cells.iter().zip(&frame.scenes) {
            target.draw(*viewport, scene)?;
        }
        target.end_frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/viewport.rs"]
mod tests;

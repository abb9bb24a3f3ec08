use std::io::Write;

use kurbo::Rect;

use crate::{
    compositor::frame::{FrameSnapshot, SceneSnapshot},
    foundation::error::{SlideError, SlideResult},
};

/// Backend seam: whatever actually draws scenes (WebGL, wgpu, a test recorder).
pub trait RenderTarget {
    /// Called once before the frame's draw calls.
    fn begin_frame(&mut self, _frame: &FrameSnapshot) -> SlideResult<()> {
        Ok(())
    }

    /// Draw one scene clipped to `viewport`.
    fn draw(&mut self, viewport: Rect, scene: &SceneSnapshot) -> SlideResult<()>;

    /// Called once after the frame's draw calls.
    fn end_frame(&mut self) -> SlideResult<()> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct DrawRecord<'a> {
    frame: u64,
    time_ms: f64,
    viewport: Rect,
    scene: &'a SceneSnapshot,
}

/// Headless target writing one JSON line per draw call.
#[derive(Debug)]
pub struct JsonLinesTarget<W: Write> {
    out: W,
    frame: u64,
    time_ms: f64,
    lines: u64,
}

impl<W: Write> JsonLinesTarget<W> {
    /// Target writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame: 0,
            time_ms: 0.0,
            lines: 0,
        }
    }

    /// Lines written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderTarget for JsonLinesTarget<W> {
    fn begin_frame(&mut self, frame: &FrameSnapshot) -> SlideResult<()> {
        self.frame = frame.frame;
        self.time_ms = frame.time_ms;
        Ok(())
    }

    fn draw(&mut self, viewport: Rect, scene: &SceneSnapshot) -> SlideResult<()> {
        let record = DrawRecord {
            frame: self.frame,
            time_ms: self.time_ms,
            viewport,
            scene,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out
            .write_all(b"\n")
            .map_err(|e| SlideError::Other(e.into()))?;
        self.lines += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> SlideResult<()> {
        self.out.flush().map_err(|e| SlideError::Other(e.into()))
    }
}

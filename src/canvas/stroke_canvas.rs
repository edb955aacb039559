use image::{GrayImage, Luma};
use tracing::debug;

use crate::canvas::pen::{draw_segment, Point, PEN_INTENSITY, PEN_WIDTH};

/// Side length of the drawing surface: 28 blocks of 7×7 pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 196;

/// Where the user is in a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    Idle,
    /// Pen is down; `last` is where the previous segment ended.
    Drawing { last: Point },
}

/// Single-channel drawing surface that accumulates user strokes.
///
/// Strokes are not retained: each `extend_stroke` paints its segment straight
/// into the bitmap, so only the cumulative ink survives.
#[derive(Debug, Clone)]
pub struct StrokeCanvas {
    bitmap: GrayImage,
    state: StrokeState,
    read_only: bool,
    needs_redraw: bool,
}

impl StrokeCanvas {
    pub fn new(width: u32, height: u32) -> StrokeCanvas {
        StrokeCanvas {
            bitmap: GrayImage::new(width, height),
            state: StrokeState::Idle,
            read_only: false,
            needs_redraw: true,
        }
    }

    /// Allocates a fresh blank surface, discarding all content and any stroke
    /// in progress.
    pub fn reset_surface(&mut self, width: u32, height: u32) {
        debug!(width, height, "reset drawing surface");
        self.bitmap = GrayImage::new(width, height);
        self.state = StrokeState::Idle;
        self.needs_redraw = true;
    }

    /// Zeroes every pixel in place.
    pub fn clear(&mut self) {
        for px in self.bitmap.pixels_mut() {
            *px = Luma([0]);
        }
        self.needs_redraw = true;
    }

    pub fn begin_stroke(&mut self, at: Point) {
        if self.read_only {
            return;
        }
        self.state = StrokeState::Drawing { last: at };
    }

    pub fn extend_stroke(&mut self, to: Point) {
        let StrokeState::Drawing { last } = self.state else {
            return;
        };
        draw_segment(&mut self.bitmap, last, to, PEN_WIDTH, PEN_INTENSITY);
        self.state = StrokeState::Drawing { last: to };
        self.needs_redraw = true;
    }

    pub fn end_stroke(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Replays a whole stroke: begin at the first point, extend through the
    /// rest, end. An empty slice does nothing.
    pub fn draw_stroke(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.begin_stroke(*first);
        for p in rest {
            self.extend_stroke(*p);
        }
        self.end_stroke();
    }

    /// Permanently disables drawing. There is no way back.
    pub fn set_read_only(&mut self) {
        self.read_only = true;
        self.state = StrokeState::Idle;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn bitmap(&self) -> &GrayImage {
        &self.bitmap
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        StrokeCanvas::new(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(canvas: &StrokeCanvas) -> u64 {
        canvas.bitmap().pixels().map(|p| p.0[0] as u64).sum()
    }

    #[test]
    fn starts_blank_and_idle() {
        let canvas = StrokeCanvas::default();
        assert_eq!(canvas.bitmap().dimensions(), (196, 196));
        assert_eq!(canvas.state(), StrokeState::Idle);
        assert_eq!(ink(&canvas), 0);
    }

    #[test]
    fn extend_paints_only_while_drawing() {
        let mut canvas = StrokeCanvas::default();

        canvas.extend_stroke(Point::new(50.0, 50.0));
        assert_eq!(ink(&canvas), 0);

        canvas.begin_stroke(Point::new(20.0, 20.0));
        assert_eq!(ink(&canvas), 0, "pressing the pen alone paints nothing");
        canvas.extend_stroke(Point::new(80.0, 20.0));
        assert!(ink(&canvas) > 0);
        assert_eq!(canvas.state(), StrokeState::Drawing { last: Point::new(80.0, 20.0) });

        canvas.end_stroke();
        let before = ink(&canvas);
        canvas.extend_stroke(Point::new(80.0, 150.0));
        assert_eq!(ink(&canvas), before);
    }

    #[test]
    fn consecutive_segments_chain_from_last_point() {
        let mut canvas = StrokeCanvas::default();
        canvas.draw_stroke(&[
            Point::new(20.0, 20.0),
            Point::new(100.0, 20.0),
            Point::new(100.0, 100.0),
        ]);
        assert_eq!(canvas.bitmap().get_pixel(60, 20).0[0], 255);
        assert_eq!(canvas.bitmap().get_pixel(100, 60).0[0], 255);
        // The diagonal from the first to the last point was never drawn.
        assert_eq!(canvas.bitmap().get_pixel(60, 60).0[0], 0);
        assert_eq!(canvas.state(), StrokeState::Idle);
    }

    #[test]
    fn read_only_canvas_ignores_strokes() {
        let mut canvas = StrokeCanvas::default();
        canvas.begin_stroke(Point::new(10.0, 10.0));
        canvas.set_read_only();
        assert!(canvas.is_read_only());

        canvas.extend_stroke(Point::new(90.0, 90.0));
        canvas.draw_stroke(&[Point::new(10.0, 10.0), Point::new(90.0, 90.0)]);
        assert_eq!(ink(&canvas), 0);
    }

    #[test]
    fn clear_and_reset() {
        let mut canvas = StrokeCanvas::default();
        canvas.draw_stroke(&[Point::new(10.0, 10.0), Point::new(90.0, 90.0)]);
        canvas.take_redraw();

        canvas.clear();
        assert!(canvas.take_redraw());
        assert!(!canvas.take_redraw());
        assert_eq!(ink(&canvas), 0);
        assert_eq!(canvas.bitmap().dimensions(), (196, 196));

        canvas.begin_stroke(Point::new(1.0, 1.0));
        canvas.reset_surface(392, 196);
        assert_eq!(canvas.bitmap().dimensions(), (392, 196));
        assert_eq!(canvas.state(), StrokeState::Idle);
    }
}

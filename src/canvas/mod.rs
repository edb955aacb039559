pub mod pen;
pub mod stroke_canvas;

pub use pen::{draw_segment, Point, PEN_INTENSITY, PEN_WIDTH};
pub use stroke_canvas::{StrokeCanvas, StrokeState, DEFAULT_CANVAS_SIZE};

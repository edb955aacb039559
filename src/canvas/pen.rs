use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Stroke width used for every segment, in pixels.
pub const PEN_WIDTH: f32 = 7.0;
/// Ink intensity (white on a black surface).
pub const PEN_INTENSITY: u8 = 255;

/// A position on the drawing surface, in pixel units.
///
/// Serializes as a two-element array so stroke payloads stay compact:
/// `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Distance from `p` to the closed segment `a..b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (p.x - a.x, p.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt()
}

/// Rasterizes an antialiased, round-capped segment onto `img`.
///
/// Coverage falls off linearly over one pixel at the edge of the capsule:
/// a pixel whose centre lies `d` away from the segment receives
/// `clamp(width / 2 + 0.5 - d, 0, 1)` of the ink, composited source-over.
/// Parts of the segment outside the bitmap are clipped.
pub fn draw_segment(img: &mut GrayImage, from: Point, to: Point, width: f32, intensity: u8) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let radius = width / 2.0;
    let reach = radius + 1.0;

    let min_x = (from.x.min(to.x) - reach).floor().max(0.0) as u32;
    let min_y = (from.y.min(to.y) - reach).floor().max(0.0) as u32;
    let max_x = (from.x.max(to.x) + reach).ceil().min((w - 1) as f32);
    let max_y = (from.y.max(to.y) + reach).ceil().min((h - 1) as f32);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as u32, max_y as u32);

    let ink = intensity as f32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let coverage = (radius + 0.5 - distance_to_segment(centre, from, to)).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let px = img.get_pixel_mut(x, y);
            let old = px.0[0] as f32;
            if old >= ink {
                continue;
            }
            px.0[0] = (old + (ink - old) * coverage).round().min(255.0) as u8;
        }
    }
}

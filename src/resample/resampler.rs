use image::GrayImage;

use crate::sample::{Sample, SAMPLE_HEIGHT, SAMPLE_LEN, SAMPLE_WIDTH};

/// Block mean that maps to the middle of the output range.
pub const CURVE_CENTRE: f64 = 100.0;
/// Divisor of the tanh argument; smaller values give a steeper curve.
pub const CURVE_SLOPE: f64 = 40.0;
/// Half of the output range.
pub const CURVE_HALF_RANGE: f64 = 127.5;

/// Maps a block mean (0.0..=255.0) onto a byte with the S-shaped
/// contrast curve `127.5 * (1 + tanh((m - 100) / 40))`, truncated.
///
/// Box averaging softens stroke edges; this curve pushes faint blocks towards
/// black and inked blocks towards white. Samples must match previously
/// produced ones byte for byte, so the constants are fixed.
pub fn contrast_curve(mean: f64) -> u8 {
    let v = CURVE_HALF_RANGE * (1.0 + ((mean - CURVE_CENTRE) / CURVE_SLOPE).tanh());
    // `as` truncates towards zero and saturates into 0..=255.
    v as u8
}

/// Per-block pixel sums for a 28×28 grid laid over `img`.
///
/// Each pixel is visited exactly once and added to the block it falls in.
fn block_sums(img: &GrayImage, block_w: usize, block_h: usize) -> [f64; SAMPLE_LEN] {
    let mut sums = [0.0f64; SAMPLE_LEN];
    for (x, y, px) in img.enumerate_pixels() {
        let bx = x as usize / block_w;
        let by = y as usize / block_h;
        sums[by * SAMPLE_WIDTH + bx] += px.0[0] as f64;
    }
    sums
}

/// Downsamples a drawing surface to a normalized 28×28 sample.
///
/// The bitmap is split into a 28×28 grid of equal blocks (7×7 for the
/// standard 196×196 canvas). Every block is averaged and passed through
/// [`contrast_curve`]; the resulting bytes are written block-row-major.
///
/// # Panics
/// If either dimension is zero or not a multiple of 28. The canvas is
/// created with a valid size, so this indicates a programming error.
pub fn resample(img: &GrayImage) -> Sample {
    let (w, h) = img.dimensions();
    assert!(
        w > 0 && h > 0 && w as usize % SAMPLE_WIDTH == 0 && h as usize % SAMPLE_HEIGHT == 0,
        "canvas {}x{} cannot be split into {}x{} equal blocks",
        w, h, SAMPLE_WIDTH, SAMPLE_HEIGHT
    );
    let block_w = w as usize / SAMPLE_WIDTH;
    let block_h = h as usize / SAMPLE_HEIGHT;
    let area = (block_w * block_h) as f64;

    let sums = block_sums(img, block_w, block_h);
    let mut pixels = [0u8; SAMPLE_LEN];
    for (out, sum) in pixels.iter_mut().zip(sums.iter()) {
        *out = contrast_curve(sum / area);
    }
    Sample::from_pixels(pixels)
}

use image::{GrayImage, Luma};

use crate::sample::sample::{Sample, SAMPLE_HEIGHT, SAMPLE_WIDTH};

/// Default replication factor: one sample pixel becomes a 7×7 block, giving a
/// 196×196 preview that matches the drawing canvas.
pub const DEFAULT_PREVIEW_SCALE: u32 = 7;

/// Read-only enlarged view of a sample.
///
/// Each sample byte is replicated across a `scale × scale` block. Nothing ever
/// flows back from the preview into the sample.
#[derive(Debug, Clone)]
pub struct SamplePreview {
    scale: u32,
    bitmap: GrayImage,
}

impl SamplePreview {
    pub fn new(scale: u32) -> SamplePreview {
        assert!(scale > 0, "preview scale must be positive");
        let side = SAMPLE_WIDTH as u32 * scale;
        SamplePreview { scale, bitmap: GrayImage::new(side, side) }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Replaces the displayed image with `sample`.
    pub fn show(&mut self, sample: &Sample) {
        let scale = self.scale as usize;
        for (x, y, px) in self.bitmap.enumerate_pixels_mut() {
            let sx = x as usize / scale;
            let sy = y as usize / scale;
            debug_assert!(sx < SAMPLE_WIDTH && sy < SAMPLE_HEIGHT);
            *px = Luma([sample.get(sx, sy)]);
        }
    }

    pub fn clear(&mut self) {
        for px in self.bitmap.pixels_mut() {
            *px = Luma([0]);
        }
    }

    pub fn bitmap(&self) -> &GrayImage {
        &self.bitmap
    }
}

impl Default for SamplePreview {
    fn default() -> Self {
        SamplePreview::new(DEFAULT_PREVIEW_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample::SAMPLE_LEN;

    #[test]
    fn replicates_each_byte_into_a_block() {
        let pixels: [u8; SAMPLE_LEN] = std::array::from_fn(|i| i as u8);
        let sample = Sample::from_pixels(pixels);

        let mut preview = SamplePreview::new(3);
        preview.show(&sample);

        let img = preview.bitmap();
        assert_eq!(img.dimensions(), (84, 84));
        for sy in 0..SAMPLE_HEIGHT as u32 {
            for sx in 0..SAMPLE_WIDTH as u32 {
                let expected = sample.get(sx as usize, sy as usize);
                for dy in 0..3 {
                    for dx in 0..3 {
                        assert_eq!(img.get_pixel(sx * 3 + dx, sy * 3 + dy).0[0], expected);
                    }
                }
            }
        }
    }

    #[test]
    fn clear_blanks_the_bitmap() {
        let mut preview = SamplePreview::default();
        preview.show(&Sample::from_pixels([255; SAMPLE_LEN]));
        preview.clear();
        assert!(preview.bitmap().pixels().all(|p| p.0[0] == 0));
        assert_eq!(preview.bitmap().width(), 196);
    }
}

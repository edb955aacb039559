use crate::sample::{Sample, SAMPLE_HEIGHT, SAMPLE_LEN, SAMPLE_WIDTH};

/// NCHW shape of the classifier input: one single-channel 28×28 image.
pub const INPUT_SHAPE: [usize; 4] = [1, 1, SAMPLE_HEIGHT, SAMPLE_WIDTH];

/// Float view of a sample in the layout the classifier expects.
///
/// Built fresh for every call and dropped afterwards. Each value is the pixel
/// byte divided by 256, so the range is `[0, 1)`, matching how the training
/// data was scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorView {
    data: Vec<f32>,
}

impl TensorView {
    pub fn from_sample(sample: &Sample) -> TensorView {
        let data = sample.as_bytes().iter().map(|&b| b as f32 / 256.0).collect();
        TensorView { data }
    }

    pub fn shape(&self) -> [usize; 4] {
        INPUT_SHAPE
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&Sample> for TensorView {
    fn from(sample: &Sample) -> Self {
        TensorView::from_sample(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_bytes_by_256() {
        let mut pixels = [0u8; SAMPLE_LEN];
        pixels[0] = 255;
        pixels[1] = 128;
        pixels[783] = 64;
        let view = TensorView::from_sample(&Sample::from_pixels(pixels));

        assert_eq!(view.len(), SAMPLE_LEN);
        assert_eq!(view.shape(), [1, 1, 28, 28]);
        assert_eq!(view.shape().iter().product::<usize>(), view.len());
        assert_eq!(view.as_slice()[0], 255.0 / 256.0);
        assert_eq!(view.as_slice()[1], 0.5);
        assert_eq!(view.as_slice()[783], 0.25);
        assert!(view.as_slice().iter().all(|&v| (0.0..1.0).contains(&v)));
    }
}

use thiserror::Error;
use tracing::{debug, warn};

use crate::inference::tensor::TensorView;
use crate::sample::Sample;

/// Number of digit classes the classifier scores.
pub const NUM_CLASSES: usize = 10;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("no classifier is loaded")]
    NotReady,
    #[error("classifier failed: {0}")]
    Failed(String),
    #[error("classifier returned no output")]
    NoOutput,
    #[error("classifier returned {0} scores, expected {NUM_CLASSES}")]
    OutputShape(usize),
}

/// Anything that maps a `[1, 1, 28, 28]` tensor to output blobs.
///
/// The first blob is expected to hold one score per digit class. Extra blobs
/// are allowed and ignored.
pub trait Classifier {
    fn run(&mut self, input: &TensorView) -> Result<Vec<Vec<f32>>, InferenceError>;
}

/// One score per digit class 0–9, as returned by the classifier.
///
/// Nothing forces the scores to sum to one; they are shown as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores([f32; NUM_CLASSES]);

impl Scores {
    pub fn new(values: [f32; NUM_CLASSES]) -> Scores {
        Scores(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// Highest-scoring class and its score. Ties go to the lower digit.
    pub fn best(&self) -> (usize, f32) {
        self.iter()
            .fold((0, self.0[0]), |best, (i, v)| if v > best.1 { (i, v) } else { best })
    }
}

impl TryFrom<&[f32]> for Scores {
    type Error = InferenceError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        let arr: [f32; NUM_CLASSES] = values
            .try_into()
            .map_err(|_| InferenceError::OutputShape(values.len()))?;
        Ok(Scores(arr))
    }
}

/// Runs `classifier` on `sample` and returns its class scores.
///
/// Any failure, including an output that is not exactly ten values, is
/// reported as an error; partial outputs are never used.
pub fn classify<C: Classifier + ?Sized>(classifier: &mut C, sample: &Sample) -> Result<Scores, InferenceError> {
    let input = TensorView::from_sample(sample);
    let outputs = classifier.run(&input).inspect_err(|e| warn!("inference failed: {}", e))?;
    let first = outputs.first().ok_or(InferenceError::NoOutput)?;
    let scores = Scores::try_from(first.as_slice())?;
    let (digit, score) = scores.best();
    debug!(digit, score, "classified sample");
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SAMPLE_LEN;

    /// Returns canned outputs and remembers the last input it saw.
    struct Canned {
        outputs: Result<Vec<Vec<f32>>, String>,
        seen: Option<TensorView>,
    }

    impl Classifier for Canned {
        fn run(&mut self, input: &TensorView) -> Result<Vec<Vec<f32>>, InferenceError> {
            self.seen = Some(input.clone());
            self.outputs.clone().map_err(InferenceError::Failed)
        }
    }

    fn canned(outputs: Result<Vec<Vec<f32>>, String>) -> Canned {
        Canned { outputs, seen: None }
    }

    fn blank() -> Sample {
        Sample::from_pixels([0; SAMPLE_LEN])
    }

    #[test]
    fn passes_scaled_tensor_and_returns_scores() {
        let mut probs = vec![0.0f32; 10];
        probs[7] = 0.9;
        probs[1] = 0.1;
        let mut clf = canned(Ok(vec![probs.clone()]));

        let sample = Sample::from_pixels([128; SAMPLE_LEN]);
        let scores = classify(&mut clf, &sample).unwrap();

        assert_eq!(scores.as_slice(), probs.as_slice());
        assert_eq!(scores.best(), (7, 0.9));
        let seen = clf.seen.unwrap();
        assert_eq!(seen.shape(), [1, 1, 28, 28]);
        assert!(seen.as_slice().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn rejects_wrong_output_length() {
        let mut clf = canned(Ok(vec![vec![0.1; 9]]));
        assert!(matches!(classify(&mut clf, &blank()), Err(InferenceError::OutputShape(9))));

        let mut clf = canned(Ok(vec![vec![0.1; 11]]));
        assert!(matches!(classify(&mut clf, &blank()), Err(InferenceError::OutputShape(11))));
    }

    #[test]
    fn rejects_missing_output() {
        let mut clf = canned(Ok(vec![]));
        assert!(matches!(classify(&mut clf, &blank()), Err(InferenceError::NoOutput)));
    }

    #[test]
    fn propagates_runtime_failure() {
        let mut clf = canned(Err("boom".into()));
        assert!(matches!(classify(&mut clf, &blank()), Err(InferenceError::Failed(_))));
    }

    #[test]
    fn uses_first_blob_only() {
        let mut clf = canned(Ok(vec![vec![0.0; 10], vec![1.0; 3]]));
        assert!(classify(&mut clf, &blank()).is_ok());
    }

    #[test]
    fn best_prefers_lowest_index_on_tie() {
        let scores = Scores::new([0.2, 0.4, 0.4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(scores.best(), (1, 0.4));
    }
}

use serde::{Deserialize, Serialize};

/// Dense row-major matrix of `f32`.
///
/// Serialized as `{ "rows": R, "cols": C, "data": [[...], ...] }` so model
/// parameter files stay readable and diffable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f32>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![vec![0.0; cols]; rows] }
    }

    /// Builds a matrix from rows. Returns `None` if the rows are ragged.
    pub fn from_rows(data: Vec<Vec<f32>>) -> Option<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |r| r.len());
        if data.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    /// Whether `rows`/`cols` agree with the actual contents. Deserialized
    /// matrices are not trusted until this holds.
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.rows && self.data.iter().all(|r| r.len() == self.cols)
    }

    /// Row vector times matrix: `input (1×rows) · self (rows×cols)`.
    ///
    /// # Panics
    /// If `input.len() != self.rows`.
    pub fn row_mul(&self, input: &[f32]) -> Vec<f32> {
        assert_eq!(input.len(), self.rows, "input length does not match matrix rows");
        let mut out = vec![0.0f32; self.cols];
        for (x, row) in input.iter().zip(self.data.iter()) {
            if *x == 0.0 {
                continue;
            }
            for (o, w) in out.iter_mut().zip(row.iter()) {
                *o += x * w;
            }
        }
        out
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

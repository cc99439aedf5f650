//! In-memory dataset rows

use num_complex::Complex32;

/// One window split into real and imaginary planes
#[derive(Debug, Clone, PartialEq)]
pub struct IqWindow {
    pub real: Vec<f32>,
    pub imag: Vec<f32>,
}

impl IqWindow {
    pub fn from_samples(samples: &[Complex32]) -> Self {
        Self {
            real: samples.iter().map(|c| c.re).collect(),
            imag: samples.iter().map(|c| c.im).collect(),
        }
    }

    /// `[planes, samples]`; planes is 2 for a well-formed window
    pub fn shape(&self) -> [usize; 2] {
        if self.real.len() == self.imag.len() {
            [2, self.real.len()]
        } else {
            // Ragged planes never match a rectangular shape
            [1, self.real.len() + self.imag.len()]
        }
    }

    /// Sum of per-sample magnitudes
    pub fn l1_norm(&self) -> f64 {
        self.real
            .iter()
            .zip(&self.imag)
            .map(|(&re, &im)| (re as f64).hypot(im as f64))
            .sum()
    }
}

/// One labeled, normalized window
///
/// `samples_per_symbol` and `excess_bandwidth` are NaN when the parameter
/// was not chosen for the realization.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledVector {
    pub modulation: &'static str,
    pub snr: i64,
    /// 1-based realization counter within its key
    pub realization_index: i64,
    /// Start of the window within the realization
    pub window_offset: i64,
    pub samples_per_symbol: f64,
    pub excess_bandwidth: f64,
    pub iq_data: IqWindow,
}

/// Append-only ordered table of labeled vectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetTable {
    rows: Vec<LabeledVector>,
}

impl DatasetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: LabeledVector) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LabeledVector] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledVector> {
        self.rows.iter()
    }
}

impl Extend<LabeledVector> for DatasetTable {
    fn extend<I: IntoIterator<Item = LabeledVector>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<'a> IntoIterator for &'a DatasetTable {
    type Item = &'a LabeledVector;
    type IntoIter = std::slice::Iter<'a, LabeledVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

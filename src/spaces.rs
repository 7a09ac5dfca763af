use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    F32,
    F64,
}

/// A box in R^n: every element lies in `[low, high]`.
///
/// Bounds are shared by all elements, which is all the traffic environments
/// need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSpace {
    pub low: f32,
    pub high: f32,
    pub shape: Vec<usize>,
    pub dtype: DType,
}

impl BoxSpace {
    pub fn new(low: f32, high: f32, shape: Vec<usize>, dtype: DType) -> Self {
        Self {
            low,
            high,
            shape,
            dtype,
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, values: &[f32]) -> bool {
        values.len() == self.len()
            && values
                .iter()
                .all(|v| !v.is_nan() && *v >= self.low && *v <= self.high)
    }

    /// Clamps each value into the bounds. NaN is left untouched.
    pub fn clip(&self, values: &[f32]) -> Vec<f32> {
        values.iter().map(|v| v.clamp(self.low, self.high)).collect()
    }
}

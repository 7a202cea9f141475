//! Run length handed across one year boundary.

use ndarray::{Array2, ArrayView2};

/// Per-pixel length of a spell that was still open when the previous year
/// ended and has already been certified to reach the minimum spell length.
///
/// A `CarryState` is produced by year Y, consumed by year Y+1 and then
/// discarded; it is passed as a value and never lives longer than one
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryState(Array2<u32>);

impl CarryState {
    /// No carry for any pixel.
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self(Array2::zeros(shape))
    }

    /// Wrap explicit per-pixel carry lengths.
    pub fn from_array(values: Array2<u32>) -> Self {
        Self(values)
    }

    /// Spatial shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Carry length of one pixel.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[[row, col]]
    }

    /// Whether every pixel carries zero days.
    pub fn is_clear(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Number of pixels with a non-zero carry.
    pub fn n_carrying(&self) -> usize {
        self.0.iter().filter(|&&n| n > 0).count()
    }

    /// Borrow the underlying array.
    pub fn view(&self) -> ArrayView2<'_, u32> {
        self.0.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn zeros_is_clear() {
        let c = CarryState::zeros((3, 4));
        assert_eq!(c.shape(), (3, 4));
        assert!(c.is_clear());
        assert_eq!(c.n_carrying(), 0);
    }

    #[test]
    fn explicit_values() {
        let c = CarryState::from_array(array![[0, 3], [2, 0]]);
        assert!(!c.is_clear());
        assert_eq!(c.get(0, 1), 3);
        assert_eq!(c.n_carrying(), 2);
    }
}

//! Percentile-exceedance fractions such as TX90p and TN10p.

use climdex_grid::{Comparison, DailyGrid, IndexGrid, ThresholdProvider};

use crate::error::IndexError;
use crate::series::reduce_pixels;

/// Fraction of valid days whose value satisfies `cmp` against the threshold
/// of its calendar day.
///
/// The result lies in `[0, 1]`. Missing when the pixel has no valid day.
///
/// # Errors
///
/// Returns [`IndexError::Grid`] if `thresholds` has a different shape.
pub fn exceedance_fraction<P>(
    grid: &DailyGrid,
    thresholds: &P,
    cmp: Comparison,
    name: &str,
) -> Result<IndexGrid, IndexError>
where
    P: ThresholdProvider + ?Sized,
{
    thresholds.check_shape(grid.shape())?;
    Ok(reduce_pixels(grid, name, |s| {
        let (hits, valid) = s
            .days
            .iter()
            .zip(&s.values)
            .filter_map(|(&doy, v)| v.map(|v| (doy, v)))
            .fold((0usize, 0usize), |(hits, valid), (doy, v)| {
                let hit = cmp.holds(v, thresholds.threshold(doy, s.row, s.col));
                (hits + usize::from(hit), valid + 1)
            });
        (valid > 0).then(|| hits as f64 / valid as f64)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use climdex_grid::{ConstantThreshold, DoyThresholds, is_missing};
    use ndarray::Array3;

    #[test]
    fn fraction_of_valid_days() {
        // 73 of 365 days above 30, one of the remaining days invalid.
        let values = Array3::from_shape_fn((365, 1, 1), |(d, _, _)| match d {
            d if d % 5 == 0 => 31.0,
            1 => f64::NAN,
            _ => 20.0,
        });
        let g = DailyGrid::full_year(1961, values).unwrap();
        let tx90p =
            exceedance_fraction(&g, &ConstantThreshold(30.0), Comparison::Above, "TX90p").unwrap();
        assert_relative_eq!(tx90p.get(0, 0).unwrap(), 73.0 / 364.0);
    }

    #[test]
    fn thresholds_follow_calendar_day() {
        // Threshold is 0 for the first 10 calendar days and 100 afterwards.
        let table =
            Array3::from_shape_fn((366, 1, 1), |(d, _, _)| if d < 10 { 0.0 } else { 100.0 });
        let thresholds = DoyThresholds::new(table).unwrap();
        let g = DailyGrid::full_year(1961, Array3::from_elem((365, 1, 1), 50.0)).unwrap();
        let tn10p = exceedance_fraction(&g, &thresholds, Comparison::Below, "TN10p").unwrap();
        assert_relative_eq!(tn10p.get(0, 0).unwrap(), 355.0 / 365.0);
    }

    #[test]
    fn no_valid_days_missing() {
        let g = DailyGrid::full_year(1961, Array3::from_elem((365, 1, 1), f64::NAN)).unwrap();
        let out = exceedance_fraction(&g, &ConstantThreshold(0.0), Comparison::Above, "TX90p")
            .unwrap();
        assert!(is_missing(out.values()[[0, 0]]));
    }
}

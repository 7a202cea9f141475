//! One year of a spell index: day loop, boundary stitch and no-data masking.

use climdex_grid::{CarryState, DailyGrid, IndexGrid, MISSING, ThresholdProvider};
use ndarray::Array2;
use rayon::prelude::*;

use crate::config::SpellConfig;
use crate::engine::score_pixel;
use crate::error::SpellError;
use crate::event::EventMask;
use crate::stitch::{Stitch, leading_run, stitch};

/// Index values and carry produced by one year.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellYear {
    index: IndexGrid,
    carry_out: CarryState,
    n_tainted: usize,
}

impl SpellYear {
    /// Index grid for the year; tainted pixels hold [`MISSING`].
    pub fn index(&self) -> &IndexGrid {
        &self.index
    }

    /// Carry-in for the following year.
    pub fn carry_out(&self) -> &CarryState {
        &self.carry_out
    }

    /// Number of pixels forced to missing.
    pub fn n_tainted(&self) -> usize {
        self.n_tainted
    }

    /// Split into the index grid and the carry for the next year.
    pub fn into_parts(self) -> (IndexGrid, CarryState) {
        (self.index, self.carry_out)
    }
}

/// Compute one year of a spell-duration index.
///
/// `lookahead` is the following year's grid, or `None` when there is no
/// following year; only its first [`SpellConfig::lookahead_days`] days are
/// examined. Without a lookahead no tail is credited and the carry-out is
/// zero everywhere.
///
/// A pixel with an invalid day in `grid` or in the examined lookahead
/// window gets [`MISSING`] and a carry-out of zero.
///
/// # Errors
///
/// - [`SpellError::InvalidConfig`] if `config` does not validate.
/// - [`SpellError::ShapeMismatch`] if `carry_in` or `lookahead` do not share
///   the shape of `grid`.
/// - [`SpellError::Grid`] if `thresholds` has a different shape.
pub fn compute_spell_year<P>(
    grid: &DailyGrid,
    lookahead: Option<&DailyGrid>,
    thresholds: &P,
    config: &SpellConfig,
    carry_in: &CarryState,
) -> Result<SpellYear, SpellError>
where
    P: ThresholdProvider + ?Sized,
{
    config.validate()?;
    let shape = grid.shape();
    if carry_in.shape() != shape {
        return Err(SpellError::ShapeMismatch {
            what: "carry state".into(),
            expected: shape,
            got: carry_in.shape(),
        });
    }
    if let Some(next) = lookahead
        && next.shape() != shape
    {
        return Err(SpellError::ShapeMismatch {
            what: format!("lookahead grid {}", next.year()),
            expected: shape,
            got: next.shape(),
        });
    }

    let cmp = config.comparison();
    let min_length = config.min_length();
    let mask = EventMask::build(grid, thresholds, cmp)?;
    let window = lookahead
        .map(|next| EventMask::build(&next.leading(config.lookahead_days()), thresholds, cmp))
        .transpose()?;

    let (rows, cols) = shape;
    let pixels: Vec<(f64, u32)> = (0..rows * cols)
        .into_par_iter()
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            let tally = score_pixel(
                mask.pixel(r, c).iter().copied(),
                carry_in.get(r, c),
                min_length,
            );
            let (boundary, window_tainted) = match &window {
                Some(w) => {
                    let la = leading_run(w.pixel(r, c).iter().copied());
                    (stitch(tally.tail, la.lead, min_length), la.tainted)
                }
                None => (Stitch::default(), false),
            };
            if tally.tainted || window_tainted {
                (MISSING, 0)
            } else {
                (
                    f64::from(tally.credited + boundary.correction),
                    boundary.carry_out,
                )
            }
        })
        .collect();

    let values = Array2::from_shape_fn(shape, |(r, c)| pixels[r * cols + c].0);
    let carry = Array2::from_shape_fn(shape, |(r, c)| pixels[r * cols + c].1);
    let index = IndexGrid::new(config.index_name(), grid.year(), values);
    let n_tainted = index.n_missing();

    Ok(SpellYear {
        index,
        carry_out: CarryState::from_array(carry),
        n_tainted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpellKind;
    use climdex_grid::{ConstantThreshold, is_missing};
    use ndarray::Array3;

    fn year_grid(year: i32, events: &[(usize, usize)]) -> DailyGrid {
        let n = usize::from(climdex_calendar::days_in_year(year));
        let mut values = Array3::zeros((n, 1, 1));
        for &(start, len) in events {
            for d in start..start + len {
                values[[d, 0, 0]] = 1.0;
            }
        }
        DailyGrid::full_year(year, values).unwrap()
    }

    fn warm() -> SpellConfig {
        SpellConfig::new(SpellKind::Warm)
    }

    #[test]
    fn run_inside_year() {
        let g = year_grid(1961, &[(10, 7)]);
        let out = compute_spell_year(
            &g,
            None,
            &ConstantThreshold(0.5),
            &warm(),
            &CarryState::zeros((1, 1)),
        )
        .unwrap();
        assert_eq!(out.index().get(0, 0), Some(7.0));
        assert_eq!(out.index().name(), "WSDI");
        assert!(out.carry_out().is_clear());
    }

    #[test]
    fn tail_credited_through_lookahead() {
        let g = year_grid(1961, &[(361, 4)]);
        let next = year_grid(1962, &[(0, 3)]);
        let out = compute_spell_year(
            &g,
            Some(&next),
            &ConstantThreshold(0.5),
            &warm(),
            &CarryState::zeros((1, 1)),
        )
        .unwrap();
        assert_eq!(out.index().get(0, 0), Some(4.0));
        assert_eq!(out.carry_out().get(0, 0), 3);
    }

    #[test]
    fn final_year_tail_discarded() {
        let g = year_grid(1961, &[(355, 10)]);
        let out = compute_spell_year(
            &g,
            None,
            &ConstantThreshold(0.5),
            &warm(),
            &CarryState::zeros((1, 1)),
        )
        .unwrap();
        assert_eq!(out.index().get(0, 0), Some(0.0));
    }

    #[test]
    fn invalid_lookahead_day_taints_pixel() {
        let g = year_grid(1961, &[(361, 4)]);
        let mut next = year_grid(1962, &[(0, 3)]);
        let mut values = next.values().to_owned();
        values[[5, 0, 0]] = f64::NAN;
        next = DailyGrid::full_year(1962, values).unwrap();
        let out = compute_spell_year(
            &g,
            Some(&next),
            &ConstantThreshold(0.5),
            &warm(),
            &CarryState::zeros((1, 1)),
        )
        .unwrap();
        assert!(is_missing(out.index().values()[[0, 0]]));
        assert_eq!(out.carry_out().get(0, 0), 0);
        assert_eq!(out.n_tainted(), 1);
    }

    #[test]
    fn carry_shape_checked() {
        let g = year_grid(1961, &[]);
        let err = compute_spell_year(
            &g,
            None,
            &ConstantThreshold(0.5),
            &warm(),
            &CarryState::zeros((2, 1)),
        )
        .unwrap_err();
        assert!(matches!(err, SpellError::ShapeMismatch { .. }));
    }
}

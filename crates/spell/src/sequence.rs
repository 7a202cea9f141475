//! Chronological fold over a range of years.

use std::ops::RangeInclusive;

use climdex_grid::{CarryState, DailyGrid, GridError, IndexGrid, ThresholdProvider, YearSource};
use tracing::{debug, info, warn};

use crate::config::SpellConfig;
use crate::error::SpellError;
use crate::year::compute_spell_year;

/// Which years a sequence run produced output for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceSummary {
    /// Years with an index grid, ascending.
    pub computed: Vec<i32>,
    /// Years skipped because their input was missing, ascending.
    pub skipped: Vec<i32>,
}

/// Load a year, mapping [`GridError::MissingYear`] to `None`.
fn load_optional<S>(source: &S, year: i32) -> Result<Option<DailyGrid>, SpellError>
where
    S: YearSource + ?Sized,
{
    match source.load_year(year) {
        Ok(grid) => Ok(Some(grid)),
        Err(GridError::MissingYear { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Compute a spell index for every year in `years`, oldest first.
///
/// Carry state is threaded from each year into the next. Each grid is loaded
/// once and serves both as year Y+1's lookahead and as the next year's
/// input. A missing year produces no output and resets the carry to zero;
/// the year before it gets no lookahead.
///
/// Every computed [`IndexGrid`] is passed to `on_year` before the next year
/// starts.
///
/// # Errors
///
/// Returns [`SpellError::InvalidYearRange`] for an empty range, any error of
/// [`compute_spell_year`] or of the source other than a missing year, and
/// any error returned by `on_year`.
pub fn run_spell_sequence<S, P, F, E>(
    source: &S,
    years: RangeInclusive<i32>,
    thresholds: &P,
    config: &SpellConfig,
    mut on_year: F,
) -> Result<SequenceSummary, E>
where
    S: YearSource + ?Sized,
    P: ThresholdProvider + ?Sized,
    F: FnMut(IndexGrid) -> Result<(), E>,
    E: From<SpellError>,
{
    let (start, end) = (*years.start(), *years.end());
    if start > end {
        return Err(SpellError::InvalidYearRange { start, end }.into());
    }
    config.validate()?;

    let mut summary = SequenceSummary::default();
    let mut carry: Option<CarryState> = None;
    let mut current = load_optional(source, start)?;

    for year in start..=end {
        let next = if year < end {
            load_optional(source, year + 1)?
        } else {
            None
        };

        match current.take() {
            None => {
                warn!(year, index = config.index_name(), "input missing, skipping year");
                carry = None;
                summary.skipped.push(year);
            }
            Some(grid) => {
                let carry_in = carry
                    .take()
                    .unwrap_or_else(|| CarryState::zeros(grid.shape()));
                if next.is_none() {
                    debug!(year, "no lookahead, year-end tails discarded");
                }
                let out = compute_spell_year(&grid, next.as_ref(), thresholds, config, &carry_in)?;
                info!(
                    year,
                    index = config.index_name(),
                    tainted = out.n_tainted(),
                    carrying = out.carry_out().n_carrying(),
                    "spell year computed"
                );
                let (index, carry_out) = out.into_parts();
                carry = Some(carry_out);
                summary.computed.push(year);
                on_year(index)?;
            }
        }

        current = next;
    }

    Ok(summary)
}

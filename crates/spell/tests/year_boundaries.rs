use climdex_calendar::days_in_year;
use climdex_grid::{
    CarryState, ConstantThreshold, DailyGrid, DoyThresholds, InMemorySource, IndexGrid,
    is_missing,
};
use climdex_spell::{SpellConfig, SpellError, SpellKind, compute_spell_year, run_spell_sequence};
use ndarray::Array3;

const THRESHOLD: ConstantThreshold = ConstantThreshold(0.5);

/// A year of zeros with 1.0 on the given `(first_day_index, length)` runs.
fn year_with_runs(year: i32, runs: &[(usize, usize)]) -> DailyGrid {
    let n = usize::from(days_in_year(year));
    let mut values = Array3::zeros((n, 1, 1));
    for &(start, len) in runs {
        for d in start..start + len {
            values[[d, 0, 0]] = 1.0;
        }
    }
    DailyGrid::full_year(year, values).unwrap()
}

/// Run the warm index over `grids` and return `(year, value)` per output.
fn run(grids: Vec<DailyGrid>, years: std::ops::RangeInclusive<i32>) -> Vec<(i32, Option<f64>)> {
    let source: InMemorySource = grids.into_iter().collect();
    let mut out = Vec::new();
    run_spell_sequence::<_, _, _, SpellError>(
        &source,
        years,
        &THRESHOLD,
        &SpellConfig::new(SpellKind::Warm),
        |grid: IndexGrid| {
            out.push((grid.year(), grid.get(0, 0)));
            Ok(())
        },
    )
    .unwrap();
    out
}

#[test]
fn seven_day_run_at_year_start() {
    let out = run(vec![year_with_runs(1961, &[(0, 7)])], 1961..=1961);
    assert_eq!(out, vec![(1961, Some(7.0))]);
}

#[test]
fn tail_four_lead_three_merges_across_boundary() {
    // 1961 ends with 4 event days; 1962 starts with 3, then a gap.
    let out = run(
        vec![
            year_with_runs(1961, &[(361, 4)]),
            year_with_runs(1962, &[(0, 3)]),
        ],
        1961..=1962,
    );
    // 1961 gets its tail, 1962 credits its short opening run unconditionally.
    assert_eq!(out, vec![(1961, Some(4.0)), (1962, Some(3.0))]);
}

#[test]
fn tail_two_lead_one_is_ignored() {
    let out = run(
        vec![
            year_with_runs(1961, &[(363, 2)]),
            year_with_runs(1962, &[(0, 1)]),
        ],
        1961..=1962,
    );
    assert_eq!(out, vec![(1961, Some(0.0)), (1962, Some(0.0))]);
}

#[test]
fn straddling_spell_counted_exactly_once() {
    // 3 days in 1961 + 9 days in 1962 = one 12-day spell.
    let out = run(
        vec![
            year_with_runs(1961, &[(362, 3)]),
            year_with_runs(1962, &[(0, 9), (100, 6)]),
        ],
        1961..=1962,
    );
    let total: f64 = out.iter().filter_map(|(_, v)| *v).sum();
    assert_eq!(out[0], (1961, Some(3.0)));
    assert_eq!(out[1], (1962, Some(9.0 + 6.0)));
    assert_eq!(total, 12.0 + 6.0);
}

#[test]
fn carry_only_affects_first_closed_run() {
    let out = run(
        vec![
            year_with_runs(1961, &[(360, 5)]),
            year_with_runs(1962, &[(0, 2), (10, 3)]),
        ],
        1961..=1962,
    );
    assert_eq!(out, vec![(1961, Some(5.0)), (1962, Some(2.0))]);
}

#[test]
fn leap_year_boundary() {
    // 1964 has 366 days; the tail sits on its last four.
    let out = run(
        vec![
            year_with_runs(1964, &[(362, 4)]),
            year_with_runs(1965, &[(0, 2)]),
        ],
        1964..=1965,
    );
    assert_eq!(out, vec![(1964, Some(4.0)), (1965, Some(2.0))]);
}

#[test]
fn missing_year_resets_carry() {
    let out = run(
        vec![
            year_with_runs(1961, &[(361, 4)]),
            year_with_runs(1963, &[(0, 3)]),
        ],
        1961..=1963,
    );
    assert_eq!(out, vec![(1961, Some(0.0)), (1963, Some(0.0))]);
}

#[test]
fn carry_through_unbroken_year_does_not_reach_next() {
    // 1962 has no quiet day, so its carry-in is never consumed; 1963's
    // short run must not inherit it.
    let out = run(
        vec![
            year_with_runs(1961, &[(361, 4)]),
            year_with_runs(1962, &[(0, 365)]),
            year_with_runs(1963, &[(1, 2)]),
        ],
        1961..=1963,
    );
    assert_eq!(out, vec![(1961, Some(4.0)), (1962, Some(365.0)), (1963, Some(0.0))]);
}

#[test]
fn final_year_tail_is_dropped() {
    let out = run(vec![year_with_runs(1961, &[(355, 10)])], 1961..=1961);
    assert_eq!(out, vec![(1961, Some(0.0))]);
}

#[test]
fn lookahead_limited_to_range() {
    // 1962 exists but lies outside the requested range.
    let out = run(
        vec![
            year_with_runs(1961, &[(361, 4)]),
            year_with_runs(1962, &[(0, 3)]),
        ],
        1961..=1961,
    );
    assert_eq!(out, vec![(1961, Some(0.0))]);
}

#[test]
fn all_invalid_year_is_missing() {
    let grid = DailyGrid::full_year(1961, Array3::from_elem((365, 2, 2), f64::NAN)).unwrap();
    let out = compute_spell_year(
        &grid,
        None,
        &THRESHOLD,
        &SpellConfig::new(SpellKind::Cold),
        &CarryState::zeros((2, 2)),
    )
    .unwrap();
    assert!(out.index().values().iter().all(|v| is_missing(*v)));
    assert!(out.carry_out().is_clear());
}

#[test]
fn invalid_pixel_does_not_touch_neighbour() {
    let mut values = Array3::zeros((365, 1, 2));
    for d in 50..58 {
        values[[d, 0, 0]] = 1.0;
        values[[d, 0, 1]] = 1.0;
    }
    values[[200, 0, 0]] = f64::NAN;
    let grid = DailyGrid::full_year(1990, values).unwrap();
    let out = compute_spell_year(
        &grid,
        None,
        &THRESHOLD,
        &SpellConfig::new(SpellKind::Warm),
        &CarryState::zeros((1, 2)),
    )
    .unwrap();
    assert!(is_missing(out.index().values()[[0, 0]]));
    assert_eq!(out.index().get(0, 1), Some(8.0));
}

#[test]
fn cold_spells_use_day_of_year_thresholds() {
    // Threshold rises by day; a constant 100.0 is below it from day 101 on.
    let table = Array3::from_shape_fn((366, 1, 1), |(d, _, _)| d as f64);
    let thresholds = DoyThresholds::new(table).unwrap();
    let grid = DailyGrid::full_year(1975, Array3::from_elem((365, 1, 1), 100.0)).unwrap();
    let out = compute_spell_year(
        &grid,
        None,
        &thresholds,
        &SpellConfig::new(SpellKind::Cold),
        &CarryState::zeros((1, 1)),
    )
    .unwrap();
    // The run from day 102 to the end of the year is an unresolved tail.
    assert_eq!(out.index().get(0, 0), Some(0.0));

    let next = DailyGrid::full_year(1976, Array3::from_elem((366, 1, 1), 100.0)).unwrap();
    let out = compute_spell_year(
        &grid,
        Some(&next),
        &thresholds,
        &SpellConfig::new(SpellKind::Cold),
        &CarryState::zeros((1, 1)),
    )
    .unwrap();
    // Days with index 101..=364 are below threshold; 1976 starts above it.
    assert_eq!(out.index().get(0, 0), Some(264.0));
    assert_eq!(out.carry_out().get(0, 0), 0);
}

#[test]
fn sequence_is_deterministic() {
    let make = || {
        vec![
            year_with_runs(1961, &[(20, 8), (362, 3)]),
            year_with_runs(1962, &[(0, 4), (200, 5), (363, 2)]),
            year_with_runs(1963, &[(0, 5), (90, 12)]),
        ]
    };
    let a = run(make(), 1961..=1963);
    let b = run(make(), 1961..=1963);
    assert_eq!(a, b);
    assert_eq!(
        a,
        vec![(1961, Some(8.0 + 3.0)), (1962, Some(4.0 + 2.0)), (1963, Some(5.0 + 12.0))]
    );
}

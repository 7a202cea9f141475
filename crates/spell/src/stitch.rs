//! Year-boundary stitching.
//!
//! After year Y is scored, its open tail is judged together with the
//! leading run of year Y+1. If the two reach the minimum length the tail is
//! credited to Y and the leading run becomes Y+1's carry-in, which makes
//! Y+1's first closed run count regardless of its own length.

use crate::event::DayClass;

/// Leading run found in a lookahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lookahead {
    /// Consecutive event days from the start of the window.
    pub lead: u32,
    /// Whether any day of the window was invalid.
    pub tainted: bool,
}

/// Measure the leading run of a lookahead window.
///
/// Counting stops at the first quiet day; invalid days are skipped but the
/// whole window is still scanned for them.
pub fn leading_run<I>(window: I) -> Lookahead
where
    I: IntoIterator<Item = DayClass>,
{
    let mut out = Lookahead::default();
    let mut open = true;
    for day in window {
        match day {
            DayClass::Event if open => out.lead += 1,
            DayClass::Event => {}
            DayClass::Quiet => open = false,
            DayClass::Invalid => out.tainted = true,
        }
    }
    out
}

/// Outcome of one year boundary for one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stitch {
    /// Days added to year Y after its day loop.
    pub correction: u32,
    /// Carry-in for year Y+1.
    pub carry_out: u32,
}

/// Resolve a boundary between a year-end `tail` and the next year's `lead`.
pub fn stitch(tail: u32, lead: u32, min_length: u32) -> Stitch {
    if tail + lead >= min_length {
        Stitch {
            correction: tail,
            carry_out: lead,
        }
    } else {
        Stitch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: DayClass = DayClass::Event;
    const Q: DayClass = DayClass::Quiet;
    const X: DayClass = DayClass::Invalid;

    #[test]
    fn leading_run_stops_at_quiet() {
        let la = leading_run([E, E, E, Q, E, E]);
        assert_eq!(la.lead, 3);
        assert!(!la.tainted);
    }

    #[test]
    fn leading_run_full_window() {
        assert_eq!(leading_run([E; 6]).lead, 6);
        assert_eq!(leading_run([Q, E, E]).lead, 0);
        assert_eq!(leading_run(Vec::<DayClass>::new()).lead, 0);
    }

    #[test]
    fn leading_run_scans_past_close_for_taint() {
        let la = leading_run([E, Q, X]);
        assert_eq!(la.lead, 1);
        assert!(la.tainted);
    }

    #[test]
    fn leading_run_skips_invalid() {
        let la = leading_run([E, X, E, Q]);
        assert_eq!(la.lead, 2);
        assert!(la.tainted);
    }

    #[test]
    fn tail_and_lead_reach_minimum() {
        assert_eq!(
            stitch(4, 3, 6),
            Stitch {
                correction: 4,
                carry_out: 3,
            }
        );
    }

    #[test]
    fn tail_and_lead_too_short() {
        assert_eq!(stitch(2, 1, 6), Stitch::default());
        assert_eq!(stitch(5, 0, 6), Stitch::default());
    }

    #[test]
    fn long_tail_without_lead() {
        assert_eq!(
            stitch(9, 0, 6),
            Stitch {
                correction: 9,
                carry_out: 0,
            }
        );
    }
}

//! Per-pixel spell state machine for a single year.
//!
//! The tracker walks one pixel's [`DayClass`] sequence in day order. Event
//! days extend the current run; the first non-event day after a run closes
//! it and scores it:
//!
//! - On the first non-event day of the year, a non-zero carry-in credits the
//!   just-closed run unconditionally and is then consumed.
//! - Otherwise a run is credited only when it reaches the minimum length.
//!
//! Invalid days neither extend nor close a run; they only taint the pixel.
//! A run still open on the last day is not scored here. It is returned as
//! the year-end tail for [`stitch`](crate::stitch).

use crate::event::DayClass;

/// Run state of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not inside a run.
    #[default]
    Idle,
    /// Inside a run of the given length (at least 1).
    Running(u32),
}

impl RunState {
    /// Current run length, 0 when idle.
    pub fn run_length(self) -> u32 {
        match self {
            Self::Idle => 0,
            Self::Running(n) => n,
        }
    }
}

/// Result of walking one pixel through one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelTally {
    /// Days credited to this year's index by the day loop.
    pub credited: u32,
    /// Length of the run still open on the year's last day.
    pub tail: u32,
    /// Whether any day was invalid.
    pub tainted: bool,
}

/// Spell state machine for one pixel and one year.
#[derive(Debug, Clone)]
pub struct SpellTracker {
    min_length: u32,
    state: RunState,
    carry: u32,
    credited: u32,
    tainted: bool,
}

impl SpellTracker {
    /// Start a year with `carry_in` days certified by the previous boundary.
    pub fn new(min_length: u32, carry_in: u32) -> Self {
        Self {
            min_length,
            state: RunState::Idle,
            carry: carry_in,
            credited: 0,
            tainted: false,
        }
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Carry not yet consumed by a boundary merge.
    pub fn pending_carry(&self) -> u32 {
        self.carry
    }

    /// Days credited so far.
    pub fn credited(&self) -> u32 {
        self.credited
    }

    /// Advance by one day.
    pub fn advance(&mut self, day: DayClass) {
        match day {
            DayClass::Event => {
                self.state = RunState::Running(self.state.run_length() + 1);
            }
            DayClass::Quiet => {
                let run = self.state.run_length();
                if self.carry > 0 {
                    self.credited += run;
                    self.carry = 0;
                } else if run >= self.min_length {
                    self.credited += run;
                }
                self.state = RunState::Idle;
            }
            DayClass::Invalid => self.tainted = true,
        }
    }

    /// End the year, returning credited days and the open tail.
    pub fn finish(self) -> PixelTally {
        PixelTally {
            credited: self.credited,
            tail: self.state.run_length(),
            tainted: self.tainted,
        }
    }
}

/// Run the tracker over a whole day sequence.
pub fn score_pixel<I>(days: I, carry_in: u32, min_length: u32) -> PixelTally
where
    I: IntoIterator<Item = DayClass>,
{
    let mut tracker = SpellTracker::new(min_length, carry_in);
    for day in days {
        tracker.advance(day);
    }
    tracker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: DayClass = DayClass::Event;
    const Q: DayClass = DayClass::Quiet;
    const X: DayClass = DayClass::Invalid;

    fn days(pattern: &str) -> Vec<DayClass> {
        pattern
            .chars()
            .map(|c| match c {
                '1' => E,
                '0' => Q,
                _ => X,
            })
            .collect()
    }

    #[test]
    fn seven_day_run_is_credited() {
        let t = score_pixel(days("11111110000"), 0, 6);
        assert_eq!(t.credited, 7);
        assert_eq!(t.tail, 0);
        assert!(!t.tainted);
    }

    #[test]
    fn exact_minimum_is_credited() {
        let t = score_pixel(days("0111111000"), 0, 6);
        assert_eq!(t.credited, 6);
    }

    #[test]
    fn short_runs_score_zero() {
        let t = score_pixel(days("011111011110110"), 0, 6);
        assert_eq!(t.credited, 0);
    }

    #[test]
    fn several_runs_accumulate() {
        let t = score_pixel(days("1111111011111111000111"), 0, 6);
        assert_eq!(t.credited, 7 + 8);
        assert_eq!(t.tail, 3);
    }

    #[test]
    fn open_run_becomes_tail() {
        let t = score_pixel(days("00011111111"), 0, 6);
        assert_eq!(t.credited, 0);
        assert_eq!(t.tail, 8);
    }

    #[test]
    fn carry_credits_first_run_unconditionally() {
        let t = score_pixel(days("11100000"), 3, 6);
        assert_eq!(t.credited, 3);
    }

    #[test]
    fn carry_is_consumed_once() {
        // Second short run is judged by the minimum-length rule.
        let t = score_pixel(days("1110110000"), 3, 6);
        assert_eq!(t.credited, 3);
    }

    #[test]
    fn carry_consumed_on_first_quiet_day_even_when_idle() {
        let mut tracker = SpellTracker::new(6, 4);
        tracker.advance(Q);
        assert_eq!(tracker.pending_carry(), 0);
        assert_eq!(tracker.credited(), 0);
        for d in days("1110") {
            tracker.advance(d);
        }
        assert_eq!(tracker.finish().credited, 0);
    }

    #[test]
    fn invalid_day_neither_breaks_nor_extends() {
        let t = score_pixel(days("111x1110"), 0, 6);
        assert_eq!(t.credited, 6);
        assert!(t.tainted);

        let t = score_pixel(days("11111x0"), 0, 6);
        assert_eq!(t.credited, 0);
    }

    #[test]
    fn all_invalid_is_tainted() {
        let t = score_pixel(days("xxxxxxxx"), 2, 6);
        assert_eq!(t.credited, 0);
        assert_eq!(t.tail, 0);
        assert!(t.tainted);
    }

    #[test]
    fn state_transitions() {
        let mut tracker = SpellTracker::new(6, 0);
        assert_eq!(tracker.state(), RunState::Idle);
        tracker.advance(E);
        assert_eq!(tracker.state(), RunState::Running(1));
        tracker.advance(E);
        assert_eq!(tracker.state(), RunState::Running(2));
        tracker.advance(X);
        assert_eq!(tracker.state(), RunState::Running(2));
        tracker.advance(Q);
        assert_eq!(tracker.state(), RunState::Idle);
    }
}

//! # climdex-spell
//!
//! Spell-duration indices over year-chunked daily grids.
//!
//! The warm and cold spell duration indices (WSDI, CSDI) count the days that
//! belong to runs of at least six consecutive days beyond a climatological
//! threshold. Runs can straddle the boundary between two yearly grids, so
//! every year hands a [`CarryState`](climdex_grid::CarryState) to the next.
//! The consecutive dry/wet day indices (CDD, CWD) are the simplified variant
//! without carry.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["DailyGrid (Y)"] -->|"EventMask::build()"| B["EventMask"]
//!     B -->|"SpellTracker per pixel"| C["credited + tail"]
//!     D["DailyGrid (Y+1), first days"] -->|"leading_run()"| E["lead"]
//!     C --> F["stitch()"]
//!     E --> F
//!     F --> G["IndexGrid (Y)"]
//!     F --> H["CarryState → Y+1"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use climdex_grid::InMemorySource;
//! use climdex_spell::{SpellConfig, SpellKind, run_spell_sequence};
//!
//! let config = SpellConfig::new(SpellKind::Warm);
//! let summary = run_spell_sequence(&source, 1961..=2014, &tx90, &config, |grid| {
//!     println!("{} computed", grid.label());
//!     Ok::<_, climdex_spell::SpellError>(())
//! })?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Spell kind and minimum length |
//! | `event` | Per-day event classification |
//! | `engine` | Per-pixel run state machine |
//! | `stitch` | Year-boundary lookahead and carry |
//! | `year` | One year over the whole grid |
//! | `sequence` | Chronological fold over years |
//! | `dry_wet` | CDD and CWD |
//! | `error` | Error types |

mod config;
mod dry_wet;
mod engine;
mod error;
mod event;
mod sequence;
mod stitch;
mod year;

pub use config::{DEFAULT_MIN_LENGTH, SpellConfig, SpellKind};
pub use dry_wet::{
    DEFAULT_WET_DAY_THRESHOLD, DryWetConfig, DryWetYear, StreakCounter, Streaks, dry_wet_spells,
};
pub use engine::{PixelTally, RunState, SpellTracker, score_pixel};
pub use error::SpellError;
pub use event::{DayClass, EventMask};
pub use sequence::{SequenceSummary, run_spell_sequence};
pub use stitch::{Lookahead, Stitch, leading_run, stitch};
pub use year::{SpellYear, compute_spell_year};

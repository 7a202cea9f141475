use tracing_subscriber::EnvFilter;

/// Library crates whose spans and events reach the subscriber.
///
/// Anything outside this list (netcdf, rayon) stays silent unless `RUST_LOG`
/// asks for it.
const CLIMDEX_TARGETS: &[&str] = &[
    "climdex",
    "climdex_calendar",
    "climdex_grid",
    "climdex_indices",
    "climdex_io",
    "climdex_spell",
];

/// Level for the `-v` count: quiet runs only report skipped years and
/// missing inputs, `-v` adds one line per computed year.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Directive string such as `climdex=info,climdex_spell=info,...`.
fn climdex_directives(level: &str) -> String {
    CLIMDEX_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber for a climdex run.
///
/// `RUST_LOG`, when set, replaces the directives built from `verbosity`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(climdex_directives(level_for(verbosity))));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_level() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn directives_cover_every_crate() {
        let directives = climdex_directives("debug");
        assert!(directives.starts_with("climdex=debug,"));
        assert!(directives.contains("climdex_spell=debug"));
        assert_eq!(directives.split(',').count(), CLIMDEX_TARGETS.len());
    }
}

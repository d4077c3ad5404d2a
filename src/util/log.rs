use crate::core::prelude::*;

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::time::OffsetTime;

pub static LAST_LOG: LazyLock<Mutex<HashMap<String, Instant>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Installs a global `tracing` subscriber that writes to stderr.
///
/// Host applications usually bring their own subscriber; this is for small tools and tests.
/// Fails if a global subscriber has already been installed.
pub fn init_logging() -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true)
                .with_timer(timer),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {e}"))
}

/// Returns true at most once per `interval` for a given call site `loc`.
pub fn should_log(loc: &str, interval: Duration) -> bool {
    let mut last_log = LAST_LOG
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if last_log
        .get(loc)
        .is_some_and(|then| then.elapsed() < interval)
    {
        return false;
    }
    last_log.insert(loc.to_string(), Instant::now());
    true
}

#[macro_export]
macro_rules! warn_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        let loc = $crate::util::assert::current_location!();
        if $crate::util::log::should_log(&loc, std::time::Duration::from_secs($seconds)) {
            $crate::core::prelude::warn!($($args),+);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_log_rate_limits_per_location() {
        let loc = "log.rs:should_log_rate_limits_per_location";
        check!(should_log(loc, Duration::from_secs(3600)));
        check_false!(should_log(loc, Duration::from_secs(3600)));
        check!(should_log("log.rs:some_other_location", Duration::from_secs(3600)));
        check!(should_log(loc, Duration::ZERO));
    }

    #[test]
    fn init_logging_only_installs_once() {
        // Another test may already have installed a subscriber, so only the second call's
        // outcome is known.
        let _ = init_logging();
        check!(init_logging().is_err());
    }

    #[test]
    fn rate_limited_macro_expands() {
        for _ in 0..3 {
            warn_every_seconds!(60, "warn_every_seconds from test");
            warn_every_seconds!(60, "warn_every_seconds from test: {}", 42);
        }
    }
}

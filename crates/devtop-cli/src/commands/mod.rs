pub mod monitor;
pub mod snapshot;

use std::time::Duration;

/// Parse an interval in (fractional) seconds.
///
/// Missing, non-numeric, non-finite and non-positive values silently fall
/// back to `default`.
pub fn parse_interval(raw: Option<&str>, default: Duration) -> Duration {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => {
            Duration::try_from_secs_f64(secs).unwrap_or(default)
        }
        _ => {
            log::debug!("ignoring interval {raw:?}, using {default:?}");
            default
        }
    }
}

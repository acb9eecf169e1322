//! Engine tuning knobs resolved from the environment at startup.

use std::env;

use tracing::{info, warn};

/// Default size of the public id keyspace.
const DEFAULT_MAX_PUBLIC_ID: u32 = 1_000_000;
/// Default seconds shown counting down while a game waits to start.
const DEFAULT_WAITING_COUNTDOWN: u32 = 5;
/// Environment variable overriding [`DEFAULT_MAX_PUBLIC_ID`].
const MAX_PUBLIC_ID_ENV: &str = "QUIZ_RALLY_MAX_PUBLIC_ID";
/// Environment variable overriding [`DEFAULT_WAITING_COUNTDOWN`].
const WAITING_COUNTDOWN_ENV: &str = "QUIZ_RALLY_WAITING_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Immutable engine settings shared across the application.
pub struct EngineSettings {
    /// Size of the public id keyspace; game codes live in `[1, max_public_id]`.
    ///
    /// Production keeps this large so codes are hard to stumble into; test
    /// setups shrink it to make exhaustion reachable.
    pub max_public_id: u32,
    /// Seconds participants see counting down while a game waits to start.
    pub waiting_countdown: u32,
}

impl EngineSettings {
    /// Resolve the settings from the environment, falling back to defaults.
    pub fn load() -> Self {
        let settings = Self {
            max_public_id: read_positive(MAX_PUBLIC_ID_ENV, DEFAULT_MAX_PUBLIC_ID),
            waiting_countdown: read_positive(WAITING_COUNTDOWN_ENV, DEFAULT_WAITING_COUNTDOWN),
        };
        info!(
            max_public_id = settings.max_public_id,
            waiting_countdown = settings.waiting_countdown,
            "resolved engine settings"
        );
        settings
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_public_id: DEFAULT_MAX_PUBLIC_ID,
            waiting_countdown: DEFAULT_WAITING_COUNTDOWN,
        }
    }
}

/// Read a positive integer variable, keeping `default` when the variable is
/// absent, unparseable, or zero.
fn read_positive(name: &str, default: u32) -> u32 {
    match env::var(name) {
        Ok(raw) => match raw.parse::<u32>() {
            Ok(value) if value >= 1 => value,
            Ok(_) => {
                warn!(name, "ignoring zero value; keeping default {default}");
                default
            }
            Err(err) => {
                warn!(name, error = %err, "unparseable value; keeping default {default}");
                default
            }
        },
        Err(_) => default,
    }
}

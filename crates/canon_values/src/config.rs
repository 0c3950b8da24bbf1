//! Engine configuration.

use crate::handle::Retention;

/// Environment variable selecting the retention policy (`weak` or `strong`).
pub const RETENTION_ENV: &str = "CANON_RETENTION";

/// Environment variable holding the [`init_tracing`](crate::init_tracing)
/// filter. Takes precedence over `RUST_LOG`.
pub const LOG_ENV: &str = "CANON_LOG";

/// Configuration for a [`Canon`](crate::Canon) context.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonConfig {
    /// Retention used by value-object repositories.
    ///
    /// Enumeration registries always retain their members strongly.
    pub retention: Retention,
}

impl CanonConfig {
    pub fn new(retention: Retention) -> Self {
        CanonConfig { retention }
    }

    /// Read the configuration from the environment.
    ///
    /// Unset or unrecognized values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(RETENTION_ENV).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match raw.parse() {
            Ok(retention) => CanonConfig { retention },
            Err(err) => {
                tracing::warn!(%err, "ignoring {RETENTION_ENV}");
                Self::default()
            }
        }
    }
}

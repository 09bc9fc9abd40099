//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an explicit filter directive
///
/// Falls back to `RUST_LOG`, then to the profile default.
pub const LOG_FILTER_ENV: &str = "MIXINX_LOG";

/// Environment variable selecting the profile for [`init_from_env`]
pub const LOG_PROFILE_ENV: &str = "MIXINX_LOG_PROFILE";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Human-readable output for development
    #[default]
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter directive used when no env override is present
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "mixinx=debug",
            Profile::Production => "mixinx=info",
            Profile::Test => "off",
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile '{}'", other)),
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

/// Initialize the logging facility
///
/// Only the first call installs a subscriber; later calls are no-ops.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `mixinx=debug`
/// - **Production**: JSON structured logs, `mixinx=info`
/// - **Test**: Bare registry; use `init_test_capture()` to record events
///
/// # Example
///
/// ```
/// use mixinx_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(profile))
                .with_target(true)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

/// Initialize using the profile named in `MIXINX_LOG_PROFILE`
///
/// Unset or unrecognised values fall back to [`Profile::Development`].
/// Returns the profile that was requested.
pub fn init_from_env() -> Profile {
    let profile = std::env::var(LOG_PROFILE_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    init(profile);
    profile
}

//! Diagnostics setup.
//!
//! Logs go to stderr; stdout carries nothing but the result line.
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `VKB_LOG` | `EnvFilter` directives, e.g. `vkb_core=debug` |
//! | `RUST_LOG` | Used when `VKB_LOG` is unset |

use tracing_subscriber::EnvFilter;

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter used by `--verbose` when neither variable is set.
pub const VERBOSE_FILTER: &str = "debug";

/// Build the filter from the environment, falling back to the defaults.
#[must_use]
pub fn filter_from_env(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    ["VKB_LOG", "RUST_LOG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

//! # canopy-settings
//!
//! Configuration management with layered sources for the Canopy platform.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`CanopySettings::default()`]
//! 2. **User file** — `~/.canopy/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `CANOPY_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! let settings = canopy_settings::load_settings().unwrap_or_default();
//! println!("realtime endpoint: {}", settings.realtime.endpoint);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

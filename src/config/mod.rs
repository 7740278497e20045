//! Configuration for quarry.
//!
//! Settings control the default compile target and how bare type specs are
//! interpreted. Nothing here is needed to build or compile expressions; all
//! values have defaults.

mod settings;

pub use settings::{CompileSettings, Settings, SettingsError, TypeSettings};

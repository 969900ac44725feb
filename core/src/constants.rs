//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the library and the service.

/// Default model artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/model.json";

/// Number of ranked contributions shown in the results table and chart
pub const DEFAULT_TOP_CONTRIBUTIONS: usize = 10;

/// Library version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

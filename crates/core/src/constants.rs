//! Constants used throughout the spots core crate.
//!
//! Document keys and default paths live here so the store, the API layer and
//! the CLI agree on them.

/// Default location of the spots document when no explicit path is configured.
pub const DEFAULT_DATA_FILE: &str = "data/spots.json";

/// Environment variable naming the spots document path.
pub const DATA_FILE_ENV: &str = "SPOTS_DATA_FILE";

/// Top-level document key holding the spot list.
pub const SPOTS_KEY: &str = "spots";

/// Record key holding the spot identifier.
pub const ID_KEY: &str = "id";

/// Record key holding the spot display name.
pub const NAME_KEY: &str = "name";

/// Record key holding the detail section list.
pub const DETAIL_SECTIONS_KEY: &str = "detailSections";

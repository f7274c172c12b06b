/// Upstream character ids are 64-bit integers.
pub type MemberId = i64;

/// Game class identifier from the static game-data catalog.
pub type ClassId = i64;

/// Specialization identifier, unique across all classes.
pub type SpecId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

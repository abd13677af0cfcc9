// Model constants
pub const DEFAULT_RATING: f64 = 1500.0;
/// Rating difference at which the stronger side is expected to score ten times as often
pub const RATING_SCALE: f64 = 400.0;
pub const INACTIVITY_WINDOW: usize = 4;
// Persistence
pub const STATE_SCHEMA_VERSION: u32 = 1;

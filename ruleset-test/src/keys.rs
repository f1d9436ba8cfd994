//! Recognized request-level attribute names.
//!
//! Input objects mix request-level properties with custom player
//! properties. These names are the closed set read by the request
//! builder; every other name on an input object is treated as a custom
//! player property and stripped into the player's property list.

pub const APP_VERSION: &str = "appVersion";
pub const BUNDLE_ID: &str = "bundleId";
pub const LOCALE: &str = "locale";
pub const LOCATION: &str = "location";
pub const MAX_PLAYERS: &str = "maxPlayers";
pub const MIN_PLAYERS: &str = "minPlayers";
pub const PLATFORM: &str = "platform";
pub const SECONDS_IN_QUEUE: &str = "secondsInQueue";

/// All recognized request-level keys.
pub const REQUEST_KEYS: [&str; 8] = [
    APP_VERSION,
    BUNDLE_ID,
    LOCALE,
    LOCATION,
    MAX_PLAYERS,
    MIN_PLAYERS,
    PLATFORM,
    SECONDS_IN_QUEUE,
];

/// Whether `key` is a request-level attribute name.
pub fn is_request_key(key: &str) -> bool {
    REQUEST_KEYS.contains(&key)
}

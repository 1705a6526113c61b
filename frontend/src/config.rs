use log::Level;

pub const SITE_NAME: &str = "Marketlens";

// Counter reveal
pub const VISIBILITY_THRESHOLD: f64 = 0.1;
pub const VISIBILITY_ROOT_MARGIN: &str = "50px";
pub const COUNTER_DURATION_MS: u32 = 2000;
pub const STAT_STAGGER_MS: u32 = 200;

// Preferences in local storage
pub const THEME_KEY: &str = "marketlens.theme";
pub const COOKIE_CONSENT_KEY: &str = "marketlens.cookie_consent";

// Simulated network
pub const SUBMIT_DELAY_MS: u32 = 1200;
pub const SEARCH_DEBOUNCE_MS: u32 = 300;
pub const SEARCH_DELAY_MS: u32 = 300;
pub const CHART_REFRESH_MS: u32 = 1000;
pub const RECENT_SEARCH_LIMIT: usize = 5;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Share of simulated submissions that fail. Higher locally so the error
/// states get exercised.
#[cfg(debug_assertions)]
pub fn submit_failure_rate() -> f64 {
    0.3
}

#[cfg(not(debug_assertions))]
pub fn submit_failure_rate() -> f64 {
    0.1
}

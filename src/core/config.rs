use crate::types::Viewport;
use serde::{Deserialize, Serialize};

/// Viewport breakpoint below which a page is classified as mobile.
pub const MOBILE_VIEWPORT_BREAKPOINT_PX: u32 = 768;

/// Default visibility wait used by the action helpers (click, fill, select,
/// hold).
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 10_000;

/// `wait_for_element` defaults. Mobile emulation renders measurably slower,
/// so its window is longer.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;
pub const MOBILE_WAIT_TIMEOUT_MS: u64 = 15_000;

/// `is_element_visible` defaults, same mobile asymmetry.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;
pub const MOBILE_PROBE_TIMEOUT_MS: u64 = 8_000;

/// Pause after a focusing tap so the on-screen keyboard can appear.
pub const KEYBOARD_SETTLE_MS: u64 = 200;

/// Pause after tapping a select-like control so the dropdown can open.
pub const DROPDOWN_SETTLE_MS: u64 = 300;

pub const DEFAULT_LONG_PRESS_MS: u64 = 600;
pub const DEFAULT_SWIPE_DURATION_MS: u64 = 300;
pub const DEFAULT_SCROLL_DISTANCE_PX: i64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub browser: BrowserConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub navigation_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            user_agent: None,
            args: vec![],
        }
    }
}

impl BrowserConfig {
    /// A phone-sized profile: narrow viewport plus an iOS Safari user agent,
    /// so both classification signals read as mobile.
    pub fn mobile() -> Self {
        Self {
            viewport: Viewport {
                width: 375,
                height: 667,
            },
            user_agent: Some(
                "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
                 AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 \
                 Mobile/15E148 Safari/604.1"
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: 30_000,
            poll_interval_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        assert_eq!(MOBILE_VIEWPORT_BREAKPOINT_PX, 768);
        assert_eq!(DEFAULT_WAIT_TIMEOUT_MS, 10_000);
        assert_eq!(MOBILE_WAIT_TIMEOUT_MS, 15_000);
        assert_eq!(DEFAULT_PROBE_TIMEOUT_MS, 5_000);
        assert_eq!(MOBILE_PROBE_TIMEOUT_MS, 8_000);
    }

    #[test]
    fn mobile_profile_is_below_breakpoint() {
        let config = BrowserConfig::mobile();
        assert!(config.viewport.width < MOBILE_VIEWPORT_BREAKPOINT_PX);
        assert!(config.user_agent.unwrap().contains("iPhone"));
    }
}

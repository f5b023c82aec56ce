//! Device classification for the current page context.
//!
//! Classification is recomputed on every query. Viewport and user agent can
//! change mid-test (an explicit resize, for instance), so nothing here is
//! cached.

use crate::core::config::MOBILE_VIEWPORT_BREAKPOINT_PX;
use crate::core::Driver;
use crate::errors::Result;
use crate::utils::scripts;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MOBILE_UA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Mobile|Android|iPhone|iPad|iPod").expect("pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub is_mobile: bool,
    /// Currently defined identically to `is_mobile`; there is no independent
    /// touch-capability probe.
    pub is_touch: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub user_agent: String,
}

/// True when the user agent carries a mobile token.
pub fn mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA_PATTERN.is_match(user_agent)
}

/// Classify the page as touch or pointer territory.
///
/// Either signal alone is sufficient: a viewport narrower than 768px, or a
/// mobile token in the user agent. Over-approximating toward "mobile" is
/// intentional. A missing viewport degrades to non-mobile rather than
/// failing.
pub async fn classify_device<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
) -> Result<DeviceProfile> {
    let viewport = driver.viewport_size(page).await?;
    let user_agent = driver
        .evaluate(page, scripts::USER_AGENT)
        .await?
        .as_str()
        .unwrap_or_default()
        .to_string();

    let mobile_viewport = viewport
        .as_ref()
        .map(|v| v.width < MOBILE_VIEWPORT_BREAKPOINT_PX)
        .unwrap_or(false);
    let is_mobile = mobile_viewport || mobile_user_agent(&user_agent);

    Ok(DeviceProfile {
        is_mobile,
        is_touch: is_mobile,
        viewport_width: viewport.as_ref().map(|v| v.width).unwrap_or(0),
        viewport_height: viewport.as_ref().map(|v| v.height).unwrap_or(0),
        user_agent,
    })
}

/// Shorthand for callers that only need the mobile/desktop verdict.
pub async fn is_mobile_device<D: Driver>(driver: &D, page: &D::PageHandle) -> Result<bool> {
    Ok(classify_device(driver, page).await?.is_mobile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDriver;
    use crate::types::Viewport;

    #[test]
    fn user_agent_tokens_match_case_insensitively() {
        assert!(mobile_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"));
        assert!(mobile_user_agent("something ANDROID something"));
        assert!(mobile_user_agent("Mozilla/5.0 (iPad; CPU OS 16_0)"));
        assert!(mobile_user_agent("ipod touch"));
        assert!(mobile_user_agent("Generic Mobile Browser"));
        assert!(!mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0"
        ));
    }

    #[tokio::test]
    async fn wide_viewport_desktop_ua_is_not_mobile() {
        let driver = MockDriver::desktop();
        let page = driver.new_page().await.unwrap();

        let profile = classify_device(&driver, &page).await.unwrap();
        assert!(!profile.is_mobile);
        assert!(!profile.is_touch);
        assert_eq!(profile.viewport_width, 1280);
    }

    #[tokio::test]
    async fn narrow_viewport_is_mobile_regardless_of_ua() {
        let driver = MockDriver::desktop().with_viewport(Some(Viewport {
            width: 500,
            height: 900,
        }));
        let page = driver.new_page().await.unwrap();

        let profile = classify_device(&driver, &page).await.unwrap();
        assert!(profile.is_mobile);
    }

    #[tokio::test]
    async fn mobile_ua_is_mobile_regardless_of_viewport() {
        let driver = MockDriver::desktop()
            .with_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)");
        let page = driver.new_page().await.unwrap();

        let profile = classify_device(&driver, &page).await.unwrap();
        assert!(profile.is_mobile);
        assert_eq!(profile.viewport_width, 1280);
    }

    #[tokio::test]
    async fn missing_viewport_degrades_to_desktop() {
        let driver = MockDriver::desktop().with_viewport(None);
        let page = driver.new_page().await.unwrap();

        let profile = classify_device(&driver, &page).await.unwrap();
        assert!(!profile.is_mobile);
        assert_eq!(profile.viewport_width, 0);
        assert_eq!(profile.viewport_height, 0);
    }

    #[tokio::test]
    async fn touch_mirrors_mobile() {
        let driver = MockDriver::mobile();
        let page = driver.new_page().await.unwrap();

        let profile = classify_device(&driver, &page).await.unwrap();
        assert!(profile.is_mobile);
        assert_eq!(profile.is_touch, profile.is_mobile);
        assert!(is_mobile_device(&driver, &page).await.unwrap());
    }
}

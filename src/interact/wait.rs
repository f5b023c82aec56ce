use crate::core::config::{
    DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_WAIT_TIMEOUT_MS, MOBILE_PROBE_TIMEOUT_MS,
    MOBILE_WAIT_TIMEOUT_MS,
};
use crate::core::Driver;
use crate::device::{classify_device, is_mobile_device};
use crate::errors::Result;
use crate::types::{ElementState, InteractionOptions, WaitOptions};
use std::time::Duration;

pub(crate) fn resolve_wait_timeout(is_mobile: bool, explicit_ms: Option<u64>) -> Duration {
    let default = if is_mobile {
        MOBILE_WAIT_TIMEOUT_MS
    } else {
        DEFAULT_WAIT_TIMEOUT_MS
    };
    Duration::from_millis(explicit_ms.unwrap_or(default))
}

pub(crate) fn resolve_probe_timeout(is_mobile: bool, explicit_ms: Option<u64>) -> Duration {
    let default = if is_mobile {
        MOBILE_PROBE_TIMEOUT_MS
    } else {
        DEFAULT_PROBE_TIMEOUT_MS
    };
    Duration::from_millis(explicit_ms.unwrap_or(default))
}

/// Wait for the first match to reach a target state (`visible` by default).
///
/// The default window is device-dependent: mobile emulation renders slower,
/// so it gets 15s against 10s elsewhere. Timeouts propagate as errors; the
/// caller decides on fallback selectors.
pub async fn wait_for_element<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    options: WaitOptions,
) -> Result<()> {
    let profile = classify_device(driver, page).await?;
    let timeout = resolve_wait_timeout(profile.is_mobile, options.timeout_ms);
    let state = options.state.unwrap_or(ElementState::Visible);
    driver.wait_for_state(page, selector, state, timeout).await
}

/// Probe for optional UI. Never fails: classification errors, locate
/// failures, and timeouts all resolve to `false`, and only once the wait
/// window has run its course.
pub async fn is_element_visible<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    options: InteractionOptions,
) -> bool {
    let is_mobile = is_mobile_device(driver, page).await.unwrap_or(false);
    let timeout = resolve_probe_timeout(is_mobile, options.timeout_ms);
    driver
        .wait_for_state(page, selector, ElementState::Visible, timeout)
        .await
        .is_ok()
}

//! Click, fill, and select helpers that behave the same way whether the page
//! is being driven as a touch or a pointer target.
//!
//! Single attempt per call: no retries, no fallback selectors. Resilience
//! belongs to the calling test.

use crate::core::config::{DEFAULT_ACTION_TIMEOUT_MS, DROPDOWN_SETTLE_MS, KEYBOARD_SETTLE_MS};
use crate::core::Driver;
use crate::errors::Result;
use crate::interact::gesture_point;
use crate::interact::strategy::InteractionStrategy;
use crate::types::{ElementState, InteractionOptions};
use std::time::Duration;
use tracing::debug;

fn action_timeout(options: &InteractionOptions) -> Duration {
    Duration::from_millis(options.timeout_ms.unwrap_or(DEFAULT_ACTION_TIMEOUT_MS))
}

/// Wait for visibility, then tap (touch) or click (pointer) the first match.
pub async fn click_element<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    options: InteractionOptions,
) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    driver
        .wait_for_state(page, selector, ElementState::Visible, action_timeout(&options))
        .await?;
    let point = gesture_point(driver, page, selector).await?;
    strategy.activate(driver, page, point).await
}

/// Write `value` into an input. Any string is accepted verbatim, the empty
/// string included. On touch the element is tapped first and given a beat
/// for the on-screen keyboard to appear.
pub async fn fill_input<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    value: &str,
    options: InteractionOptions,
) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    driver
        .wait_for_state(page, selector, ElementState::Visible, action_timeout(&options))
        .await?;

    if strategy.is_touch() {
        let point = gesture_point(driver, page, selector).await?;
        driver.touch_tap(page, point.x, point.y).await?;
        tokio::time::sleep(Duration::from_millis(KEYBOARD_SETTLE_MS)).await;
    }

    driver.set_value(page, selector, value).await
}

/// Select an option by value. On pointer targets the driver's native
/// selection is used directly, with no fallback. Touch targets are often
/// custom-rendered dropdowns rather than native selects, so the control is
/// tapped open first and a failed native selection falls back to tapping the
/// visible option text; if that also fails, the fallback's error propagates.
pub async fn select_option<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    value: &str,
    options: InteractionOptions,
) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    driver
        .wait_for_state(page, selector, ElementState::Visible, action_timeout(&options))
        .await?;

    if !strategy.is_touch() {
        return driver.select_value(page, selector, value).await;
    }

    let point = gesture_point(driver, page, selector).await?;
    driver.touch_tap(page, point.x, point.y).await?;
    tokio::time::sleep(Duration::from_millis(DROPDOWN_SETTLE_MS)).await;

    match driver.select_value(page, selector, value).await {
        Ok(()) => Ok(()),
        Err(native_err) => {
            debug!(%native_err, selector, "native selection failed, tapping option text");
            let fallback = format!("text={value}");
            let point = gesture_point(driver, page, &fallback).await?;
            driver.touch_tap(page, point.x, point.y).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DeviceError;
    use crate::testing::{rect, DriverCall, MockDriver};
    use std::time::Instant;

    #[tokio::test]
    async fn desktop_click_goes_through_the_mouse() {
        let driver =
            MockDriver::desktop().with_visible_element("#go", rect(10.0, 10.0, 20.0, 20.0));
        let page = driver.new_page().await.unwrap();

        click_element(&driver, &page, "#go", InteractionOptions::default())
            .await
            .unwrap();

        let calls = driver.calls();
        assert!(calls.contains(&DriverCall::MouseMove { x: 20.0, y: 20.0 }));
        assert!(calls.contains(&DriverCall::MouseDown));
        assert!(calls.contains(&DriverCall::MouseUp));
        assert!(!calls.iter().any(|c| matches!(c, DriverCall::TouchTap { .. })));
    }

    #[tokio::test]
    async fn mobile_click_taps_the_center() {
        let driver =
            MockDriver::mobile().with_visible_element("#go", rect(100.0, 200.0, 40.0, 20.0));
        let page = driver.new_page().await.unwrap();

        click_element(&driver, &page, "#go", InteractionOptions::default())
            .await
            .unwrap();

        let calls = driver.calls();
        assert!(calls.contains(&DriverCall::TouchTap { x: 120.0, y: 210.0 }));
        assert!(!calls.contains(&DriverCall::MouseDown));
    }

    #[tokio::test]
    async fn click_times_out_for_invisible_elements() {
        let driver = MockDriver::desktop();
        let page = driver.new_page().await.unwrap();

        let err = click_element(
            &driver,
            &page,
            "#never",
            InteractionOptions {
                timeout_ms: Some(50),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DeviceError::Timeout(_)));
    }

    #[tokio::test]
    async fn desktop_fill_sets_the_value_directly() {
        let driver =
            MockDriver::desktop().with_visible_element("#name", rect(0.0, 0.0, 80.0, 20.0));
        let page = driver.new_page().await.unwrap();

        fill_input(&driver, &page, "#name", "Ada", InteractionOptions::default())
            .await
            .unwrap();

        let calls = driver.calls();
        assert!(calls.contains(&DriverCall::SetValue {
            selector: "#name".into(),
            value: "Ada".into(),
        }));
        assert!(!calls.iter().any(|c| matches!(c, DriverCall::TouchTap { .. })));
    }

    #[tokio::test]
    async fn mobile_fill_taps_then_waits_for_the_keyboard() {
        let driver =
            MockDriver::mobile().with_visible_element("#name", rect(0.0, 0.0, 80.0, 20.0));
        let page = driver.new_page().await.unwrap();

        let start = Instant::now();
        fill_input(&driver, &page, "#name", "Ada", InteractionOptions::default())
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(KEYBOARD_SETTLE_MS));
        let calls = driver.calls();
        let tap_index = calls
            .iter()
            .position(|c| matches!(c, DriverCall::TouchTap { .. }))
            .unwrap();
        let set_index = calls
            .iter()
            .position(|c| matches!(c, DriverCall::SetValue { .. }))
            .unwrap();
        assert!(tap_index < set_index);
    }

    #[tokio::test]
    async fn empty_values_are_written_verbatim() {
        let driver =
            MockDriver::desktop().with_visible_element("#name", rect(0.0, 0.0, 80.0, 20.0));
        let page = driver.new_page().await.unwrap();

        fill_input(&driver, &page, "#name", "", InteractionOptions::default())
            .await
            .unwrap();

        assert!(driver.calls().contains(&DriverCall::SetValue {
            selector: "#name".into(),
            value: String::new(),
        }));
    }

    #[tokio::test]
    async fn desktop_select_never_reaches_the_fallback() {
        let driver =
            MockDriver::desktop().with_visible_element("#fruit", rect(0.0, 0.0, 80.0, 20.0));
        let page = driver.new_page().await.unwrap();

        select_option(&driver, &page, "#fruit", "Banana", InteractionOptions::default())
            .await
            .unwrap();

        let calls = driver.calls();
        assert!(calls.contains(&DriverCall::SelectValue {
            selector: "#fruit".into(),
            value: "Banana".into(),
        }));
        assert!(!calls.iter().any(|c| matches!(c, DriverCall::TouchTap { .. })));
        assert!(!calls.contains(&DriverCall::BoundingBox("text=Banana".into())));
    }

    #[tokio::test]
    async fn mobile_select_taps_open_then_selects_natively() {
        let driver =
            MockDriver::mobile().with_visible_element("#fruit", rect(0.0, 0.0, 80.0, 20.0));
        let page = driver.new_page().await.unwrap();

        select_option(&driver, &page, "#fruit", "Banana", InteractionOptions::default())
            .await
            .unwrap();

        let calls = driver.calls();
        let taps = calls
            .iter()
            .filter(|c| matches!(c, DriverCall::TouchTap { .. }))
            .count();
        assert_eq!(taps, 1);
        assert!(calls.contains(&DriverCall::SelectValue {
            selector: "#fruit".into(),
            value: "Banana".into(),
        }));
    }

    #[tokio::test]
    async fn mobile_select_falls_back_to_tapping_option_text() {
        let driver = MockDriver::mobile()
            .with_visible_element("#fruit", rect(0.0, 0.0, 80.0, 20.0))
            .with_visible_element("text=Banana", rect(0.0, 40.0, 80.0, 20.0))
            .with_select_failure("#fruit");
        let page = driver.new_page().await.unwrap();

        select_option(&driver, &page, "#fruit", "Banana", InteractionOptions::default())
            .await
            .unwrap();

        let calls = driver.calls();
        assert!(calls.contains(&DriverCall::BoundingBox("text=Banana".into())));
        assert!(calls.contains(&DriverCall::TouchTap { x: 40.0, y: 50.0 }));
    }

    #[tokio::test]
    async fn exhausted_fallback_propagates_its_own_error() {
        let driver = MockDriver::mobile()
            .with_visible_element("#fruit", rect(0.0, 0.0, 80.0, 20.0))
            .with_select_failure("#fruit");
        let page = driver.new_page().await.unwrap();

        let err = select_option(&driver, &page, "#fruit", "Banana", InteractionOptions::default())
            .await
            .unwrap_err();

        match err {
            DeviceError::NotRendered(selector) => assert_eq!(selector, "text=Banana"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

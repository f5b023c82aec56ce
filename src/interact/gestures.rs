//! Gestures the underlying drivers do not natively support with adjustable
//! duration: sustained holds and directional swipes.
//!
//! On touch targets these are synthesized by dispatching touch events inside
//! the page, with the hold timed by the page's own clock. A helper resolves
//! only after the full duration has elapsed and the end event has been
//! dispatched; it never resolves early.

use crate::core::config::{
    DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_LONG_PRESS_MS, DEFAULT_SCROLL_DISTANCE_PX,
    DEFAULT_SWIPE_DURATION_MS,
};
use crate::core::Driver;
use crate::errors::{DeviceError, Result};
use crate::interact::gesture_point;
use crate::interact::strategy::InteractionStrategy;
use crate::types::{ElementState, InteractionOptions, ScrollDirection, ScrollOptions, SwipeParams};
use crate::utils::scripts;
use std::time::Duration;

fn action_timeout(options: &InteractionOptions) -> Duration {
    Duration::from_millis(options.timeout_ms.unwrap_or(DEFAULT_ACTION_TIMEOUT_MS))
}

/// Press the element for `hold_duration_ms`, then release.
///
/// The element must have a bounding box; a gesture against an unrendered
/// target is a precondition failure, not a zero-duration press. The touch
/// branch dispatches exactly one touchstart and one touchend, with the gap
/// between them timed in-page.
pub async fn hold_and_release<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    hold_duration_ms: u64,
    options: InteractionOptions,
) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    driver
        .wait_for_state(page, selector, ElementState::Visible, action_timeout(&options))
        .await?;
    let point = gesture_point(driver, page, selector).await?;

    match strategy {
        InteractionStrategy::Touch => {
            let script = scripts::touch_hold(point.x, point.y, hold_duration_ms);
            driver.evaluate(page, &script).await?;
            Ok(())
        }
        InteractionStrategy::Pointer => {
            driver.mouse_move(page, point.x, point.y).await?;
            driver.mouse_down(page).await?;
            tokio::time::sleep(Duration::from_millis(hold_duration_ms)).await;
            driver.mouse_up(page).await
        }
    }
}

/// The down-half of a long press. On touch this is a self-contained
/// tap-then-wait; on pointer the button is left down for
/// [`release_long_press`] to release.
pub async fn long_press<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    duration_ms: Option<u64>,
    options: InteractionOptions,
) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    let duration = duration_ms.unwrap_or(DEFAULT_LONG_PRESS_MS);
    driver
        .wait_for_state(page, selector, ElementState::Visible, action_timeout(&options))
        .await?;
    let point = gesture_point(driver, page, selector).await?;

    match strategy {
        InteractionStrategy::Touch => {
            driver.touch_tap(page, point.x, point.y).await?;
            tokio::time::sleep(Duration::from_millis(duration)).await;
            Ok(())
        }
        InteractionStrategy::Pointer => {
            driver.mouse_move(page, point.x, point.y).await?;
            driver.mouse_down(page).await?;
            tokio::time::sleep(Duration::from_millis(duration)).await;
            Ok(())
        }
    }
}

/// The up-half of a long press. On pointer this issues the mouse release.
/// On touch it is a no-op: the touch branch of [`long_press`] already
/// completed a self-contained interaction and has nothing outstanding to
/// release.
pub async fn release_long_press<D: Driver>(driver: &D, page: &D::PageHandle) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    match strategy {
        InteractionStrategy::Touch => Ok(()),
        InteractionStrategy::Pointer => driver.mouse_up(page).await,
    }
}

/// Drag between two points.
///
/// Pointer: down at the start, move, up at the end, no enforced timing.
/// Touch: touchstart at the start, then after `duration_ms` (page clock) a
/// single touchmove followed immediately by touchend at the end point. The
/// move is a discrete jump, deliberately not interpolated; downstream code
/// may depend on receiving one move event rather than a stream.
pub async fn swipe<D: Driver>(driver: &D, page: &D::PageHandle, params: SwipeParams) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;

    match strategy {
        InteractionStrategy::Pointer => {
            driver.mouse_move(page, params.start_x, params.start_y).await?;
            driver.mouse_down(page).await?;
            driver.mouse_move(page, params.end_x, params.end_y).await?;
            driver.mouse_up(page).await
        }
        InteractionStrategy::Touch => {
            let duration = params.duration_ms.unwrap_or(DEFAULT_SWIPE_DURATION_MS);
            let script = scripts::touch_swipe(
                params.start_x,
                params.start_y,
                params.end_x,
                params.end_y,
                duration,
            );
            driver.evaluate(page, &script).await?;
            Ok(())
        }
    }
}

/// Scroll within an element. Touch targets get a tap-then-drag from the
/// element's center row; pointer targets get an in-page smooth `scrollBy`.
/// Scrolling down moves the finger up, and vice versa. Distances are passed
/// through unvalidated.
pub async fn scroll_element<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
    options: ScrollOptions,
) -> Result<()> {
    let strategy = InteractionStrategy::detect(driver, page).await?;
    let direction = options.direction.unwrap_or_default();
    let distance = options.distance_px.unwrap_or(DEFAULT_SCROLL_DISTANCE_PX) as f64;

    match strategy {
        InteractionStrategy::Touch => {
            let rect = driver
                .bounding_box(page, selector)
                .await?
                .ok_or_else(|| DeviceError::ElementNotFound(selector.to_string()))?;
            let center_x = rect.x + rect.width / 2.0;
            let start_y = rect.y + rect.height / 2.0;
            let end_y = match direction {
                ScrollDirection::Down => start_y - distance,
                ScrollDirection::Up => start_y + distance,
            };
            driver.touch_tap(page, center_x, start_y).await?;
            driver.mouse_move(page, center_x, end_y).await
        }
        InteractionStrategy::Pointer => {
            let delta = match direction {
                ScrollDirection::Down => distance,
                ScrollDirection::Up => -distance,
            };
            let script = scripts::scroll_by(selector, delta)?;
            let result = driver.evaluate(page, &script).await?;
            if result.get("success").and_then(|v| v.as_bool()).unwrap_or(false) {
                Ok(())
            } else {
                Err(DeviceError::ElementNotFound(selector.to_string()))
            }
        }
    }
}

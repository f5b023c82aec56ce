pub mod actions;
pub mod gestures;
pub mod strategy;
pub mod wait;

pub use actions::{click_element, fill_input, select_option};
pub use gestures::{hold_and_release, long_press, release_long_press, scroll_element, swipe};
pub use strategy::InteractionStrategy;
pub use wait::{is_element_visible, wait_for_element};

use crate::core::Driver;
use crate::errors::{DeviceError, Result};
use crate::types::GesturePoint;

/// Bounding-box center at the moment of the call. A missing box is a hard
/// precondition failure naming the selector.
pub(crate) async fn gesture_point<D: Driver>(
    driver: &D,
    page: &D::PageHandle,
    selector: &str,
) -> Result<GesturePoint> {
    match driver.bounding_box(page, selector).await? {
        Some(rect) => Ok(rect.center()),
        None => Err(DeviceError::NotRendered(selector.to_string())),
    }
}

use crate::core::Driver;
use crate::device::classify_device;
use crate::errors::Result;
use crate::types::GesturePoint;
use tracing::debug;

/// How interactions are simulated for the current page context.
///
/// Selected once per call from a fresh classification. Classification can
/// change between calls when the viewport does, so a strategy value must not
/// be stored across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionStrategy {
    Touch,
    Pointer,
}

impl InteractionStrategy {
    pub async fn detect<D: Driver>(driver: &D, page: &D::PageHandle) -> Result<Self> {
        let profile = classify_device(driver, page).await?;
        debug!(
            is_mobile = profile.is_mobile,
            viewport_width = profile.viewport_width,
            "selected interaction strategy"
        );
        Ok(if profile.is_touch {
            Self::Touch
        } else {
            Self::Pointer
        })
    }

    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch)
    }

    /// Activate an element at its center: a tap on touch, a full
    /// move/press/release on pointer.
    pub async fn activate<D: Driver>(
        &self,
        driver: &D,
        page: &D::PageHandle,
        point: GesturePoint,
    ) -> Result<()> {
        match self {
            Self::Touch => driver.touch_tap(page, point.x, point.y).await,
            Self::Pointer => {
                driver.mouse_move(page, point.x, point.y).await?;
                driver.mouse_down(page).await?;
                driver.mouse_up(page).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DriverCall, MockDriver};

    #[tokio::test]
    async fn mobile_context_selects_touch() {
        let driver = MockDriver::mobile();
        let page = driver.new_page().await.unwrap();

        let strategy = InteractionStrategy::detect(&driver, &page).await.unwrap();
        assert_eq!(strategy, InteractionStrategy::Touch);
        assert!(strategy.is_touch());
    }

    #[tokio::test]
    async fn desktop_context_selects_pointer() {
        let driver = MockDriver::desktop();
        let page = driver.new_page().await.unwrap();

        let strategy = InteractionStrategy::detect(&driver, &page).await.unwrap();
        assert_eq!(strategy, InteractionStrategy::Pointer);
        assert!(!strategy.is_touch());
    }

    #[tokio::test]
    async fn pointer_activation_is_move_press_release() {
        let driver = MockDriver::desktop();
        let page = driver.new_page().await.unwrap();

        InteractionStrategy::Pointer
            .activate(&driver, &page, GesturePoint { x: 40.0, y: 60.0 })
            .await
            .unwrap();

        let calls = driver.calls();
        assert_eq!(
            calls,
            vec![
                DriverCall::MouseMove { x: 40.0, y: 60.0 },
                DriverCall::MouseDown,
                DriverCall::MouseUp,
            ]
        );
    }

    #[tokio::test]
    async fn touch_activation_is_a_single_tap() {
        let driver = MockDriver::mobile();
        let page = driver.new_page().await.unwrap();

        InteractionStrategy::Touch
            .activate(&driver, &page, GesturePoint { x: 10.0, y: 20.0 })
            .await
            .unwrap();

        let calls = driver.calls();
        assert_eq!(calls, vec![DriverCall::TouchTap { x: 10.0, y: 20.0 }]);
    }
}

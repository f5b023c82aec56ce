//! A scripted, recording [`Driver`] so the interaction layer's contracts can
//! be exercised without a browser.

use crate::core::{Config, Driver};
use crate::errors::{DeviceError, Result};
use crate::types::{ElementRect, ElementState, Viewport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> ElementRect {
    ElementRect {
        x,
        y,
        width,
        height,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    Launch,
    Navigate(String),
    ViewportQuery,
    Evaluate(String),
    WaitForState {
        selector: String,
        state: ElementState,
        timeout_ms: u64,
    },
    BoundingBox(String),
    SetValue {
        selector: String,
        value: String,
    },
    SelectValue {
        selector: String,
        value: String,
    },
    MouseMove {
        x: f64,
        y: f64,
    },
    MouseDown,
    MouseUp,
    TouchTap {
        x: f64,
        y: f64,
    },
}

pub struct MockPage;

pub struct MockDriver {
    viewport: Option<Viewport>,
    user_agent: String,
    visible: HashSet<String>,
    boxes: HashMap<String, ElementRect>,
    failing_selects: HashSet<String>,
    calls: Mutex<Vec<DriverCall>>,
}

impl MockDriver {
    /// A desktop-shaped page: wide viewport, desktop user agent.
    pub fn desktop() -> Self {
        Self::new(
            Some(Viewport {
                width: 1280,
                height: 720,
            }),
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/120.0 Safari/537.36",
        )
    }

    /// A phone-shaped page: 375x667 viewport, iOS Safari user agent.
    pub fn mobile() -> Self {
        Self::new(
            Some(Viewport {
                width: 375,
                height: 667,
            }),
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        )
    }

    fn new(viewport: Option<Viewport>, user_agent: &str) -> Self {
        Self {
            viewport,
            user_agent: user_agent.to_string(),
            visible: HashSet::new(),
            boxes: HashMap::new(),
            failing_selects: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_viewport(mut self, viewport: Option<Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// An element that both reaches the visible state and has a box.
    pub fn with_visible_element(mut self, selector: &str, rect: ElementRect) -> Self {
        self.visible.insert(selector.to_string());
        self.boxes.insert(selector.to_string(), rect);
        self
    }

    /// An element that reports visible but yields no bounding box, the way a
    /// detached-mid-layout node does.
    pub fn with_stateless_element(mut self, selector: &str) -> Self {
        self.visible.insert(selector.to_string());
        self
    }

    /// Make native option selection fail for `selector`.
    pub fn with_select_failure(mut self, selector: &str) -> Self {
        self.failing_selects.insert(selector.to_string());
        self
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    fn record(&self, call: DriverCall) {
        self.calls.lock().expect("mock call log poisoned").push(call);
    }
}

#[async_trait]
impl Driver for MockDriver {
    type PageHandle = MockPage;

    async fn launch(&mut self, _config: &Config) -> Result<()> {
        self.record(DriverCall::Launch);
        Ok(())
    }

    async fn new_page(&self) -> Result<Self::PageHandle> {
        Ok(MockPage)
    }

    async fn navigate(&self, _page: &Self::PageHandle, url: &str) -> Result<()> {
        self.record(DriverCall::Navigate(url.to_string()));
        Ok(())
    }

    async fn viewport_size(&self, _page: &Self::PageHandle) -> Result<Option<Viewport>> {
        self.record(DriverCall::ViewportQuery);
        Ok(self.viewport)
    }

    async fn evaluate(&self, _page: &Self::PageHandle, script: &str) -> Result<Value> {
        self.record(DriverCall::Evaluate(script.to_string()));
        if script.contains("navigator.userAgent") {
            return Ok(Value::String(self.user_agent.clone()));
        }
        if script.contains("scrollBy") {
            let known = self
                .boxes
                .keys()
                .any(|selector| script.contains(&format!("\"{selector}\"")));
            return Ok(serde_json::json!({ "success": known }));
        }
        Ok(Value::Null)
    }

    async fn wait_for_state(
        &self,
        _page: &Self::PageHandle,
        selector: &str,
        state: ElementState,
        timeout: Duration,
    ) -> Result<()> {
        self.record(DriverCall::WaitForState {
            selector: selector.to_string(),
            state,
            timeout_ms: timeout.as_millis() as u64,
        });
        let satisfied = match state {
            ElementState::Visible => self.visible.contains(selector),
            ElementState::Hidden => !self.visible.contains(selector),
            ElementState::Attached => {
                self.visible.contains(selector) || self.boxes.contains_key(selector)
            }
        };
        if satisfied {
            Ok(())
        } else {
            tokio::time::sleep(timeout).await;
            Err(DeviceError::Timeout(format!(
                "{} state for {selector}",
                state.as_str()
            )))
        }
    }

    async fn bounding_box(
        &self,
        _page: &Self::PageHandle,
        selector: &str,
    ) -> Result<Option<ElementRect>> {
        self.record(DriverCall::BoundingBox(selector.to_string()));
        Ok(self.boxes.get(selector).copied())
    }

    async fn set_value(&self, _page: &Self::PageHandle, selector: &str, value: &str) -> Result<()> {
        self.record(DriverCall::SetValue {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn select_value(
        &self,
        _page: &Self::PageHandle,
        selector: &str,
        value: &str,
    ) -> Result<()> {
        self.record(DriverCall::SelectValue {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        if self.failing_selects.contains(selector) {
            return Err(DeviceError::SelectionFailed(format!(
                "no option matching {value} on {selector}"
            )));
        }
        Ok(())
    }

    async fn mouse_move(&self, _page: &Self::PageHandle, x: f64, y: f64) -> Result<()> {
        self.record(DriverCall::MouseMove { x, y });
        Ok(())
    }

    async fn mouse_down(&self, _page: &Self::PageHandle) -> Result<()> {
        self.record(DriverCall::MouseDown);
        Ok(())
    }

    async fn mouse_up(&self, _page: &Self::PageHandle) -> Result<()> {
        self.record(DriverCall::MouseUp);
        Ok(())
    }

    async fn touch_tap(&self, _page: &Self::PageHandle, x: f64, y: f64) -> Result<()> {
        self.record(DriverCall::TouchTap { x, y });
        Ok(())
    }

    async fn get_url(&self, _page: &Self::PageHandle) -> Result<String> {
        Ok("about:blank".to_string())
    }

    fn is_running(&self) -> bool {
        true
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_primitives_in_order() {
        let driver = MockDriver::desktop();
        let page = driver.new_page().await.unwrap();

        driver.mouse_move(&page, 1.0, 2.0).await.unwrap();
        driver.mouse_down(&page).await.unwrap();
        driver.mouse_up(&page).await.unwrap();

        assert_eq!(
            driver.calls(),
            vec![
                DriverCall::MouseMove { x: 1.0, y: 2.0 },
                DriverCall::MouseDown,
                DriverCall::MouseUp,
            ]
        );
    }

    #[tokio::test]
    async fn visible_elements_satisfy_waits_immediately() {
        let driver = MockDriver::desktop().with_visible_element("#a", rect(0.0, 0.0, 1.0, 1.0));
        let page = driver.new_page().await.unwrap();

        driver
            .wait_for_state(&page, "#a", ElementState::Visible, Duration::from_millis(10))
            .await
            .unwrap();
        driver
            .wait_for_state(&page, "#b", ElementState::Hidden, Duration::from_millis(10))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_elements_time_out() {
        let driver = MockDriver::desktop();
        let page = driver.new_page().await.unwrap();

        let err = driver
            .wait_for_state(&page, "#a", ElementState::Visible, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, DeviceError::Timeout(_)));
    }
}

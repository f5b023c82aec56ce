use crate::core::{Config, Driver};
use crate::errors::{DeviceError, Result};
use crate::types::{ElementRect, ElementState, Viewport};
use crate::utils::scripts;
use crate::utils::ScriptRunner;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::ffi::OsStr;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct CursorState {
    x: f64,
    y: f64,
    pressed: bool,
}

/// Chrome-backed driver.
///
/// Pointer and touch primitives are synthesized by dispatching events inside
/// the page rather than through the DevTools input domain, so the same code
/// path serves headless and headed sessions. The virtual pointer position is
/// the only state carried between calls.
pub struct ChromeDriver {
    browser: Option<Browser>,
    config: Config,
    session_id: String,
    cursor: Mutex<CursorState>,
}

impl ChromeDriver {
    pub fn new() -> Self {
        Self {
            browser: None,
            config: Config::default(),
            session_id: uuid::Uuid::new_v4().to_string(),
            cursor: Mutex::new(CursorState::default()),
        }
    }

    fn with_cursor<T>(&self, apply: impl FnOnce(&mut CursorState) -> T) -> Result<T> {
        let mut guard = self
            .cursor
            .lock()
            .map_err(|_| DeviceError::DriverError("pointer state poisoned".to_string()))?;
        Ok(apply(&mut guard))
    }
}

impl Default for ChromeDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for ChromeDriver {
    type PageHandle = Arc<Tab>;

    async fn launch(&mut self, config: &Config) -> Result<()> {
        let window_size_arg = format!(
            "--window-size={},{}",
            config.browser.viewport.width, config.browser.viewport.height
        );

        let user_agent_arg = config
            .browser
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        for arg in &config.browser.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.browser.headless)
            .args(args)
            .build()
            .map_err(|e| DeviceError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| DeviceError::LaunchFailed(e.to_string()))?;

        self.browser = Some(browser);
        self.config = config.clone();
        debug!(session_id = %self.session_id, "browser launched");
        Ok(())
    }

    async fn new_page(&self) -> Result<Self::PageHandle> {
        let browser = self.browser.as_ref().ok_or(DeviceError::NotLaunched)?;

        let tab = browser
            .new_tab()
            .map_err(|e| DeviceError::PageCreationFailed(e.to_string()))?;

        Ok(tab)
    }

    async fn navigate(&self, page: &Self::PageHandle, url: &str) -> Result<()> {
        page.navigate_to(url)
            .map_err(|e| DeviceError::NavigationFailed(e.to_string()))?;

        page.wait_until_navigated()
            .map_err(|e| DeviceError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    async fn viewport_size(&self, page: &Self::PageHandle) -> Result<Option<Viewport>> {
        let value = self.evaluate(page, scripts::VIEWPORT_PROBE).await?;
        Ok(serde_json::from_value(value).ok())
    }

    async fn evaluate(&self, page: &Self::PageHandle, script: &str) -> Result<Value> {
        // await_promise, so in-page timers bound the call by the page clock
        let result = page
            .evaluate(script, true)
            .map_err(|e| DeviceError::ScriptFailed(e.to_string()))?;

        Ok(result.value.unwrap_or(Value::Null))
    }

    async fn wait_for_state(
        &self,
        page: &Self::PageHandle,
        selector: &str,
        state: ElementState,
        timeout: std::time::Duration,
    ) -> Result<()> {
        let script = scripts::element_state(selector, state)?;
        let reached = ScriptRunner::wait_for_condition(
            self,
            page,
            &script,
            timeout.as_millis() as u64,
            self.config.session.poll_interval_ms,
        )
        .await?;

        if reached {
            Ok(())
        } else {
            Err(DeviceError::Timeout(format!(
                "{} state for {selector}",
                state.as_str()
            )))
        }
    }

    async fn bounding_box(
        &self,
        page: &Self::PageHandle,
        selector: &str,
    ) -> Result<Option<ElementRect>> {
        let script = scripts::bounding_box(selector)?;
        let value = self.evaluate(page, &script).await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(serde_json::from_value(value).ok())
    }

    async fn set_value(&self, page: &Self::PageHandle, selector: &str, value: &str) -> Result<()> {
        let script = scripts::set_value(selector, value)?;
        let result = self.evaluate(page, &script).await?;

        if result.get("success").and_then(Value::as_bool).unwrap_or(false) {
            Ok(())
        } else {
            Err(DeviceError::ElementNotFound(selector.to_string()))
        }
    }

    async fn select_value(
        &self,
        page: &Self::PageHandle,
        selector: &str,
        value: &str,
    ) -> Result<()> {
        let script = scripts::select_value(selector, value)?;
        let result = self.evaluate(page, &script).await?;

        if result.get("success").and_then(Value::as_bool).unwrap_or(false) {
            Ok(())
        } else {
            let reason = result
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            Err(DeviceError::SelectionFailed(format!("{selector}: {reason}")))
        }
    }

    async fn mouse_move(&self, page: &Self::PageHandle, x: f64, y: f64) -> Result<()> {
        let pressed = self.with_cursor(|cursor| {
            cursor.x = x;
            cursor.y = y;
            cursor.pressed
        })?;
        let buttons = if pressed { 1 } else { 0 };
        let script = scripts::mouse_event("mousemove", x, y, buttons)?;
        self.evaluate(page, &script).await?;
        Ok(())
    }

    async fn mouse_down(&self, page: &Self::PageHandle) -> Result<()> {
        let (x, y) = self.with_cursor(|cursor| {
            cursor.pressed = true;
            (cursor.x, cursor.y)
        })?;
        let script = scripts::mouse_event("mousedown", x, y, 1)?;
        self.evaluate(page, &script).await?;
        Ok(())
    }

    async fn mouse_up(&self, page: &Self::PageHandle) -> Result<()> {
        let (x, y) = self.with_cursor(|cursor| {
            cursor.pressed = false;
            (cursor.x, cursor.y)
        })?;
        let script = scripts::mouse_event("mouseup", x, y, 0)?;
        self.evaluate(page, &script).await?;
        // a completed press-release pair is a click as far as the page is
        // concerned
        let click = scripts::mouse_event("click", x, y, 0)?;
        self.evaluate(page, &click).await?;
        Ok(())
    }

    async fn touch_tap(&self, page: &Self::PageHandle, x: f64, y: f64) -> Result<()> {
        let script = scripts::touch_tap(x, y);
        self.evaluate(page, &script).await?;
        Ok(())
    }

    async fn get_url(&self, page: &Self::PageHandle) -> Result<String> {
        Ok(page.get_url())
    }

    fn is_running(&self) -> bool {
        self.browser.is_some()
    }

    async fn close(&mut self) -> Result<()> {
        self.browser = None;
        Ok(())
    }
}

use crate::errors::Result;
use crate::types::{ElementRect, ElementState, Viewport};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// The browser automation seam the interaction layer is written against.
///
/// Any driver exposing element location, state waiting, bounding-box
/// queries, mouse/touch primitives, and arbitrary script evaluation is
/// substitutable. Selectors are CSS, plus a `text=` prefix that locates the
/// innermost visible element whose text matches.
#[async_trait]
pub trait Driver: Send + Sync {
    type PageHandle: Send + Sync;

    /// Launch a new browser instance
    async fn launch(&mut self, config: &crate::core::Config) -> Result<()>;

    /// Create a new page
    async fn new_page(&self) -> Result<Self::PageHandle>;

    /// Navigate to a URL and wait for the load to settle
    async fn navigate(&self, page: &Self::PageHandle, url: &str) -> Result<()>;

    /// Current viewport, or None when the driver has no viewport notion for
    /// this page. Queried fresh on every call.
    async fn viewport_size(&self, page: &Self::PageHandle) -> Result<Option<Viewport>>;

    /// Evaluate JavaScript in the page. Promises are awaited, so an in-page
    /// timer bounds the call by the page's own clock.
    async fn evaluate(&self, page: &Self::PageHandle, script: &str) -> Result<Value>;

    /// Block until the first element matching `selector` reaches `state`,
    /// or fail with a timeout error.
    async fn wait_for_state(
        &self,
        page: &Self::PageHandle,
        selector: &str,
        state: ElementState,
        timeout: Duration,
    ) -> Result<()>;

    /// Bounding box of the first match, None when the element is not
    /// rendered. Recomputed on every call; layout can shift between calls.
    async fn bounding_box(
        &self,
        page: &Self::PageHandle,
        selector: &str,
    ) -> Result<Option<ElementRect>>;

    /// Write a value into an input-like element and fire input/change.
    async fn set_value(&self, page: &Self::PageHandle, selector: &str, value: &str) -> Result<()>;

    /// Native option selection on a `<select>`-like element. Fails when the
    /// element is not a native select or no option matches.
    async fn select_value(
        &self,
        page: &Self::PageHandle,
        selector: &str,
        value: &str,
    ) -> Result<()>;

    /// Move the virtual pointer.
    async fn mouse_move(&self, page: &Self::PageHandle, x: f64, y: f64) -> Result<()>;

    /// Press the primary button at the current pointer position.
    async fn mouse_down(&self, page: &Self::PageHandle) -> Result<()>;

    /// Release the primary button at the current pointer position.
    async fn mouse_up(&self, page: &Self::PageHandle) -> Result<()>;

    /// Instantaneous tap at a point. Sustained touch gestures are not a
    /// driver primitive; the layer synthesizes those in-page.
    async fn touch_tap(&self, page: &Self::PageHandle, x: f64, y: f64) -> Result<()>;

    /// Get current URL
    async fn get_url(&self, page: &Self::PageHandle) -> Result<String>;

    /// Check if the browser is still running
    fn is_running(&self) -> bool;

    /// Close the browser
    async fn close(&mut self) -> Result<()>;
}

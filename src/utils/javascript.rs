use crate::core::Driver;
use crate::errors::Result;
use serde_json::Value;

pub struct ScriptRunner;

impl ScriptRunner {
    pub async fn execute<D: Driver>(
        driver: &D,
        page: &D::PageHandle,
        script: &str,
    ) -> Result<Value> {
        driver.evaluate(page, script).await
    }

    pub async fn execute_with_timeout<D: Driver>(
        driver: &D,
        page: &D::PageHandle,
        script: &str,
        timeout_ms: u64,
    ) -> Result<Value> {
        let execution = driver.evaluate(page, script);

        tokio::time::timeout(tokio::time::Duration::from_millis(timeout_ms), execution)
            .await
            .map_err(|_| crate::errors::DeviceError::ScriptTimeout)?
    }

    /// Re-evaluate `condition` until it yields `true` or the window closes.
    /// Returns Ok(false) on timeout; the caller decides whether that is an
    /// error.
    pub async fn wait_for_condition<D: Driver>(
        driver: &D,
        page: &D::PageHandle,
        condition: &str,
        timeout_ms: u64,
        poll_interval_ms: u64,
    ) -> Result<bool> {
        let start_time = std::time::Instant::now();
        let timeout = tokio::time::Duration::from_millis(timeout_ms);
        let poll_interval = tokio::time::Duration::from_millis(poll_interval_ms);

        loop {
            let result = driver.evaluate(page, condition).await?;
            if result.as_bool() == Some(true) {
                return Ok(true);
            }

            if start_time.elapsed() >= timeout {
                return Ok(false);
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}

//! Device capability adapter - battery level, screen brightness, and phone
//! dialer helpers the agent can invoke as tools during a session.
//!
//! Platform capabilities sit behind traits with mock implementations; the
//! helpers here add the small amount of behavior on top (unsupported-device
//! mapping, the flash sequence, dialer URL schemes).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use parley_core::error::ParleyError;

/// How long the screen stays lit during [`flash_screen`].
pub const FLASH_HOLD: Duration = Duration::from_millis(200);

/// Host platform, for the few behaviors that differ per OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

/// Battery level probe.
#[async_trait]
pub trait BatteryProbe: Send + Sync {
    /// Battery charge in `[0.0, 1.0]`, or `None` when the device cannot
    /// report it.
    async fn battery_level(&self) -> Option<f32>;
}

/// Screen brightness control.
#[async_trait]
pub trait ScreenBrightness: Send + Sync {
    /// Set system brightness in `[0.0, 1.0]`.
    async fn set_brightness(&self, level: f32) -> Result<(), ParleyError>;
}

/// Read the battery level, mapping an unsupported device to an error.
pub async fn battery_level(probe: &dyn BatteryProbe) -> Result<f32, ParleyError> {
    match probe.battery_level().await {
        Some(level) => {
            tracing::debug!(level, "Battery level read");
            Ok(level)
        }
        None => Err(ParleyError::Device(
            "Device does not support retrieving the battery level".to_string(),
        )),
    }
}

/// Change brightness to the given level, returning the level that was set.
pub async fn change_brightness(
    screen: &dyn ScreenBrightness,
    level: f32,
) -> Result<f32, ParleyError> {
    tracing::debug!(level, "Changing brightness");
    screen.set_brightness(level).await?;
    Ok(level)
}

/// Flash the screen: full brightness, hold, then dark.
pub async fn flash_screen(
    screen: &dyn ScreenBrightness,
    hold: Duration,
) -> Result<(), ParleyError> {
    screen.set_brightness(1.0).await?;
    tokio::time::sleep(hold).await;
    screen.set_brightness(0.0).await?;
    Ok(())
}

/// Build the URL that opens the platform dialer for a phone number.
///
/// iOS uses `telprompt:` (confirmation prompt); everything else uses `tel:`.
pub fn dial_url(phone_number: &str, platform: Platform) -> String {
    match platform {
        Platform::Ios => format!("telprompt:{}", phone_number),
        Platform::Android => format!("tel:{}", phone_number),
    }
}

// =============================================================================
// Mock implementations
// =============================================================================

/// Mock battery probe returning a fixed reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBattery {
    /// `None` simulates a device without battery reporting.
    pub level: Option<f32>,
}

#[async_trait]
impl BatteryProbe for MockBattery {
    async fn battery_level(&self) -> Option<f32> {
        self.level
    }
}

/// Mock brightness control recording every level set.
#[derive(Clone, Default)]
pub struct MockScreen {
    levels: Arc<Mutex<Vec<f32>>>,
    fail: Arc<AtomicBool>,
}

impl MockScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }

    /// Brightness levels set so far, in order.
    pub fn levels(&self) -> Vec<f32> {
        self.levels.lock().expect("levels mutex poisoned").clone()
    }
}

#[async_trait]
impl ScreenBrightness for MockScreen {
    async fn set_brightness(&self, level: f32) -> Result<(), ParleyError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(ParleyError::Device("mock brightness failure".to_string()));
        }
        self.levels
            .lock()
            .expect("levels mutex poisoned")
            .push(level);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

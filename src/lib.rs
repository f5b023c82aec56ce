pub mod browser;
pub mod core;
pub mod device;
pub mod errors;
pub mod interact;
pub mod testing;
pub mod types;
pub mod utils;

pub use browser::ChromeDriver;
pub use core::{BrowserConfig, Config, Driver, SessionConfig};
pub use device::{classify_device, is_mobile_device, DeviceProfile};
pub use errors::{DeviceError, Result};
pub use interact::{
    click_element, fill_input, hold_and_release, is_element_visible, long_press,
    release_long_press, scroll_element, select_option, swipe, wait_for_element,
    InteractionStrategy,
};
pub use types::*;

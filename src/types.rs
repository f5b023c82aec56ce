use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    /// Center of the box, where taps and clicks land.
    pub fn center(&self) -> GesturePoint {
        GesturePoint {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A point derived from an element's bounding box at the moment of the call.
/// Never cached; layout can shift between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesturePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    Visible,
    Hidden,
    Attached,
}

impl ElementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementState::Visible => "visible",
            ElementState::Hidden => "hidden",
            ElementState::Attached => "attached",
        }
    }
}

/// Per-call knobs for the action helpers. All fields optional; defaults are
/// documented on each helper.
#[derive(Debug, Clone, Default)]
pub struct InteractionOptions {
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    pub timeout_ms: Option<u64>,
    pub state: Option<ElementState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Invalid combinations (e.g. a negative distance) are passed through rather
/// than rejected.
#[derive(Debug, Clone, Default)]
pub struct ScrollOptions {
    pub direction: Option<ScrollDirection>,
    pub distance_px: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SwipeParams {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub duration_ms: Option<u64>,
}

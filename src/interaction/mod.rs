mod controller;
mod selection;
mod tooltip;

pub use controller::{InteractionController, PointClick, ScenePatch};
pub use selection::{
    SelectionHighlight, SelectionMode, SelectionRecord, SelectionState, ToggleGroup,
};
pub use tooltip::{
    TooltipPlacement, TooltipSide, TooltipSize, TooltipStyle, resolve_tooltip_placement,
};

use serde::{Deserialize, Serialize};

use crate::core::PointId;

/// Pointer position in outer-element coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Set for clicks produced by the select-all broadcast.
    pub synthetic: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            synthetic: false,
        }
    }

    #[must_use]
    pub fn synthetic(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            synthetic: true,
        }
    }
}

/// Public hover state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverState {
    pub hovered: Option<PointId>,
    pub tooltip: Option<TooltipPlacement>,
}

impl HoverState {
    #[must_use]
    pub fn is_hovering(self) -> bool {
        self.hovered.is_some()
    }
}

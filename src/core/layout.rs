use serde::{Deserialize, Serialize};

use crate::core::{Insets, Padding, Viewport};

/// Drawable region inside the padded container, in outer-element coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        self.y + self.height * 0.5
    }
}

/// Size the host element must take once padding is added around the plot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OuterSize {
    pub width: f64,
    pub height: f64,
}

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub insets: Insets,
    pub intrinsic: Viewport,
    pub outer: OuterSize,
    pub plot: PlotRect,
}

/// Computes padding insets, outer size and plotting rectangle.
///
/// Pure and uncached: callers run it on every pass.
#[must_use]
pub fn compute_layout(padding: &Padding, intrinsic: Viewport) -> ChartLayout {
    let insets = padding.normalize();
    let width = f64::from(intrinsic.width);
    let height = f64::from(intrinsic.height);

    ChartLayout {
        insets,
        intrinsic,
        outer: OuterSize {
            width: width + insets.horizontal(),
            height: height + insets.vertical(),
        },
        plot: PlotRect::new(insets.left, insets.top, width, height),
    }
}

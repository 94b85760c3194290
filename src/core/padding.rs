use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw padding as supplied by the host: one scalar or a list of sides.
///
/// Lists follow the CSS shorthand for one, two or four entries. Any other
/// arity broadcasts its first entry to all four sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f64),
    Sides(Vec<f64>),
}

impl Default for Padding {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl Padding {
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self::Uniform(value)
    }

    /// Two-entry shorthand: `vertical` for top/bottom, `horizontal` for right/left.
    #[must_use]
    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::Sides(vec![vertical, horizontal])
    }

    #[must_use]
    pub fn sides(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::Sides(vec![top, right, bottom, left])
    }

    /// Normalizes to `(top, right, bottom, left)` with non-negative sides.
    #[must_use]
    pub fn normalize(&self) -> Insets {
        let [top, right, bottom, left] = match self {
            Self::Uniform(value) => [*value; 4],
            Self::Sides(values) => match values.as_slice() {
                [] => [0.0; 4],
                [all] => [*all; 4],
                [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
                [top, right, bottom, left] => [*top, *right, *bottom, *left],
                [first, ..] => {
                    debug!(
                        arity = values.len(),
                        "padding arity not 1, 2 or 4; broadcasting first entry"
                    );
                    [*first; 4]
                }
            },
        };

        Insets {
            top: sanitize_side(top),
            right: sanitize_side(right),
            bottom: sanitize_side(bottom),
            left: sanitize_side(left),
        }
    }
}

fn sanitize_side(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Normalized four-sided inset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Padding::uniform(value).normalize()
    }

    #[must_use]
    pub fn as_array(self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::{Insets, Padding};

    #[test]
    fn three_entries_broadcast_first_value() {
        let insets = Padding::Sides(vec![7.0, 1.0, 2.0]).normalize();
        assert_eq!(insets, Insets::uniform(7.0));
    }

    #[test]
    fn negative_and_non_finite_sides_clamp_to_zero() {
        let insets = Padding::sides(-3.0, f64::NAN, 4.0, f64::INFINITY).normalize();
        assert_eq!(insets.as_array(), [0.0, 0.0, 4.0, 0.0]);
    }

    #[test]
    fn empty_list_is_zero_padding() {
        assert_eq!(Padding::Sides(Vec::new()).normalize(), Insets::default());
    }
}

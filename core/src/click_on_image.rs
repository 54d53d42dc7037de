//! `ClickOnImage`: a click position plus the regions it landed in.

use serde::{Deserialize, Serialize};

/// Normalized click coordinates within an image (`0.0..=1.0` on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2d {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

/// A learner's click on an image, with the labels of every region it hit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClickOnImage {
    /// Where the click landed.
    #[serde(default)]
    pub click_position: Point2d,
    /// Labels of the regions containing the click.
    #[serde(default)]
    pub clicked_regions: Vec<String>,
}

impl ClickOnImage {
    /// Create a click at `(x, y)` that hit `regions`.
    pub fn new<S: Into<String>>(x: f32, y: f32, regions: impl IntoIterator<Item = S>) -> Self {
        Self {
            click_position: Point2d { x, y },
            clicked_regions: regions.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the click landed in the region labelled `region`.
    #[must_use]
    pub fn is_in_region(&self, region: &str) -> bool {
        self.clicked_regions.iter().any(|r| r == region)
    }
}

#![forbid(unsafe_code)]

//! Reorder interaction settings.

use std::fmt;

use tilegrid_core::gesture::GestureConfig;
use tilegrid_layout::EDGE_THICKNESS;
use web_time::Duration;

/// Tunables for the drag-to-reorder interaction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderConfig {
    /// Hold duration before a press turns into a drag (default: 300ms).
    pub min_press_duration: Duration,
    /// Travel allowed while the press is being timed (default: 10.0).
    pub allowable_movement: f64,
    /// Opacity the preview fades to once lifted (default: 0.8).
    pub preview_alpha: f64,
    /// Duration of the lift fade (default: 150ms).
    pub fade_duration: Duration,
    /// Thickness of the auto-scroll edge strips (default: 20.0).
    pub edge_inset: f64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            min_press_duration: Duration::from_millis(300),
            allowable_movement: 10.0,
            preview_alpha: 0.8,
            fade_duration: Duration::from_millis(150),
            edge_inset: EDGE_THICKNESS,
        }
    }
}

impl ReorderConfig {
    #[must_use]
    pub fn with_min_press_duration(mut self, duration: Duration) -> Self {
        self.min_press_duration = duration;
        self
    }

    #[must_use]
    pub fn with_allowable_movement(mut self, points: f64) -> Self {
        self.allowable_movement = points;
        self
    }

    #[must_use]
    pub fn with_preview_alpha(mut self, alpha: f64) -> Self {
        self.preview_alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    #[must_use]
    pub fn with_edge_inset(mut self, inset: f64) -> Self {
        self.edge_inset = inset;
        self
    }

    /// Recognizer settings derived from this config.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig::default()
            .with_min_press_duration(self.min_press_duration)
            .with_allowable_movement(self.allowable_movement)
    }

    pub fn validate(&self) -> Result<(), ReorderConfigError> {
        if self.min_press_duration.is_zero() {
            return Err(ReorderConfigError::ZeroPressDuration);
        }
        if !self.allowable_movement.is_finite() || self.allowable_movement < 0.0 {
            return Err(ReorderConfigError::InvalidMovement(self.allowable_movement));
        }
        if !(0.0..=1.0).contains(&self.preview_alpha) {
            return Err(ReorderConfigError::InvalidAlpha(self.preview_alpha));
        }
        if !self.edge_inset.is_finite() || self.edge_inset < 0.0 {
            return Err(ReorderConfigError::InvalidEdgeInset(self.edge_inset));
        }
        Ok(())
    }
}

/// Invalid [`ReorderConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReorderConfigError {
    /// A zero hold duration would turn every tap into a drag.
    ZeroPressDuration,
    InvalidMovement(f64),
    /// Preview opacity outside `0.0..=1.0`.
    InvalidAlpha(f64),
    InvalidEdgeInset(f64),
}

impl fmt::Display for ReorderConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPressDuration => write!(f, "minimum press duration must be non-zero"),
            Self::InvalidMovement(v) => write!(f, "invalid allowable movement: {v}"),
            Self::InvalidAlpha(v) => write!(f, "preview alpha out of range: {v}"),
            Self::InvalidEdgeInset(v) => write!(f, "invalid edge inset: {v}"),
        }
    }
}

impl std::error::Error for ReorderConfigError {}

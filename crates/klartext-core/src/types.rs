// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for screen-region capture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{KlartextError, Result};

/// Unique identifier for one capture operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureId(pub Uuid);

impl CaptureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CaptureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CaptureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selected screen rectangle in virtual-desktop coordinates.
///
/// `(x1, y1)` is the top-left and `(x2, y2)` the bottom-right corner. Use
/// [`CaptureRegion::from_corners`] to build one from a drag in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CaptureRegion {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a region from the press and release points of a drag.
    pub fn from_corners(start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            x1: start.0.min(end.0),
            y1: start.1.min(end.1),
            x2: start.0.max(end.0),
            y2: start.1.max(end.1),
        }
    }

    /// Truncate to whole pixels.
    ///
    /// # Errors
    ///
    /// Returns [`KlartextError::InvalidRegion`] if a corner is not finite, the
    /// truncated width or height is not positive, or the rectangle does not
    /// fit in `i32` pixel coordinates.
    pub fn to_pixel_rect(&self) -> Result<PixelRect> {
        if ![self.x1, self.y1, self.x2, self.y2].iter().all(|v| v.is_finite()) {
            return Err(KlartextError::InvalidRegion {
                width: 0,
                height: 0,
            });
        }
        // Float to int casts saturate, so the subtraction is the only overflow.
        let (x1, y1, x2, y2) = (
            self.x1 as i64,
            self.y1 as i64,
            self.x2 as i64,
            self.y2 as i64,
        );
        let (width, height) = (x2.saturating_sub(x1), y2.saturating_sub(y1));
        let invalid = || KlartextError::InvalidRegion { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }

        let left = i32::try_from(x1).map_err(|_| invalid())?;
        let top = i32::try_from(y1).map_err(|_| invalid())?;
        let width_px = u32::try_from(width).map_err(|_| invalid())?;
        let height_px = u32::try_from(height).map_err(|_| invalid())?;
        // right() and bottom() must stay representable.
        left.checked_add_unsigned(width_px).ok_or_else(invalid)?;
        top.checked_add_unsigned(height_px).ok_or_else(invalid)?;

        Ok(PixelRect {
            left,
            top,
            width: width_px,
            height: height_px,
        })
    }
}

impl std::fmt::Display for CaptureRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) to ({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Integer pixel rectangle handed to a capture provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    /// Overlapping area of two rectangles, if any.
    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(PixelRect {
            left,
            top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Position and size of one physical monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorGeometry {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl From<MonitorGeometry> for PixelRect {
    fn from(m: MonitorGeometry) -> Self {
        PixelRect {
            left: m.left,
            top: m.top,
            width: m.width,
            height: m.height,
        }
    }
}

/// Extent of the virtual desktop spanning every monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    /// `max(left + width)` over all monitors.
    pub total_width: i32,
    /// `max(top + height)` over all monitors.
    pub total_height: i32,
    pub min_x: i32,
    pub min_y: i32,
}

impl ScreenBounds {
    /// Combine monitor geometries. With no secondary monitors the primary
    /// monitor alone defines the bounds.
    pub fn from_monitors(monitors: &[MonitorGeometry], primary: MonitorGeometry) -> Self {
        if monitors.is_empty() {
            return Self {
                total_width: primary.width as i32,
                total_height: primary.height as i32,
                min_x: 0,
                min_y: 0,
            };
        }
        Self {
            total_width: monitors
                .iter()
                .map(|m| m.left + m.width as i32)
                .max()
                .unwrap_or_default(),
            total_height: monitors
                .iter()
                .map(|m| m.top + m.height as i32)
                .max()
                .unwrap_or_default(),
            min_x: monitors.iter().map(|m| m.left).min().unwrap_or_default(),
            min_y: monitors.iter().map(|m| m.top).min().unwrap_or_default(),
        }
    }
}

/// Result of one completed capture → OCR → normalization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub id: CaptureId,
    /// `None` when the image came from a file rather than the screen.
    pub region: Option<CaptureRegion>,
    pub captured_at: DateTime<Utc>,
    /// Normalized, trimmed text.
    pub text: String,
    pub entry_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_direction_is_normalized() {
        let region = CaptureRegion::from_corners((300.0, 200.0), (100.0, 50.0));
        assert_eq!(region, CaptureRegion::new(100.0, 50.0, 300.0, 200.0));
    }

    #[test]
    fn pixel_rect_truncates() {
        let rect = CaptureRegion::new(10.9, 20.2, 110.7, 60.9).to_pixel_rect().unwrap();
        assert_eq!(
            rect,
            PixelRect {
                left: 10,
                top: 20,
                width: 100,
                height: 40
            }
        );
    }

    #[test]
    fn empty_region_is_rejected() {
        let err = CaptureRegion::new(5.0, 5.0, 5.4, 80.0).to_pixel_rect().unwrap_err();
        assert!(matches!(
            err,
            KlartextError::InvalidRegion {
                width: 0,
                height: 75
            }
        ));
    }

    #[test]
    fn oversized_region_is_rejected() {
        let err = CaptureRegion::new(0.0, 0.0, 5e9, 10.0).to_pixel_rect().unwrap_err();
        assert!(matches!(
            err,
            KlartextError::InvalidRegion {
                width: 5_000_000_000,
                height: 10
            }
        ));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let region = CaptureRegion::new(-3e9, 0.0, -2_999_999_000.0, 10.0);
        assert!(matches!(
            region.to_pixel_rect(),
            Err(KlartextError::InvalidRegion {
                width: 1000,
                height: 10
            })
        ));
    }

    #[test]
    fn region_past_i32_edge_is_rejected() {
        let max = f64::from(i32::MAX);
        let region = CaptureRegion::new(max - 10.0, 0.0, max + 10.0, 10.0);
        assert!(region.to_pixel_rect().is_err());
    }

    #[test]
    fn non_finite_region_is_rejected() {
        for region in [
            CaptureRegion::new(f64::NAN, 0.0, 10.0, 10.0),
            CaptureRegion::new(0.0, 0.0, f64::INFINITY, 10.0),
            CaptureRegion::new(0.0, f64::NEG_INFINITY, 10.0, 10.0),
        ] {
            assert!(matches!(
                region.to_pixel_rect(),
                Err(KlartextError::InvalidRegion { .. })
            ));
        }
    }

    #[test]
    fn large_region_inside_range_is_kept() {
        let rect = CaptureRegion::new(-7680.0, -2160.0, 7680.0, 2160.0)
            .to_pixel_rect()
            .unwrap();
        assert_eq!(rect.left, -7680);
        assert_eq!(rect.width, 15360);
        assert_eq!(rect.bottom(), 2160);
    }

    #[test]
    fn bounds_span_negative_offsets() {
        let monitors = [
            MonitorGeometry {
                left: -1920,
                top: 0,
                width: 1920,
                height: 1080,
            },
            MonitorGeometry {
                left: 0,
                top: -200,
                width: 2560,
                height: 1440,
            },
        ];
        let bounds = ScreenBounds::from_monitors(&monitors, monitors[1]);
        assert_eq!(
            bounds,
            ScreenBounds {
                total_width: 2560,
                total_height: 1240,
                min_x: -1920,
                min_y: -200,
            }
        );
    }

    #[test]
    fn bounds_fall_back_to_primary() {
        let primary = MonitorGeometry {
            left: 0,
            top: 0,
            width: 1280,
            height: 800,
        };
        let bounds = ScreenBounds::from_monitors(&[], primary);
        assert_eq!(bounds.total_width, 1280);
        assert_eq!(bounds.total_height, 800);
    }

    #[test]
    fn rect_intersection() {
        let a = PixelRect {
            left: 0,
            top: 0,
            width: 100,
            height: 100,
        };
        let b = PixelRect {
            left: 50,
            top: 80,
            width: 100,
            height: 100,
        };
        assert_eq!(
            a.intersect(&b),
            Some(PixelRect {
                left: 50,
                top: 80,
                width: 50,
                height: 20
            })
        );
        let c = PixelRect {
            left: 100,
            top: 0,
            width: 10,
            height: 10,
        };
        assert_eq!(a.intersect(&c), None);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Assembling one region image out of per-monitor screenshots.
//
// A selection may straddle monitors. Each monitor contributes the part of its
// screenshot that overlaps the region; uncovered pixels stay opaque black.
// Screenshots taken at a display scale other than 1 are sampled in their own
// pixel space and resized back to desktop coordinates.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use klartext_core::error::{KlartextError, Result};
use klartext_core::types::PixelRect;
use tracing::debug;

/// A full screenshot of one monitor and where that monitor sits.
///
/// `image` may be larger or smaller than `geometry` when the display is scaled.
pub struct MonitorShot {
    pub geometry: PixelRect,
    pub image: RgbaImage,
}

/// Cut `region` out of the given monitor screenshots.
///
/// # Errors
///
/// [`KlartextError::Capture`] if the region overlaps no monitor.
pub fn composite_region(region: PixelRect, shots: &[MonitorShot]) -> Result<RgbaImage> {
    let mut canvas = RgbaImage::from_pixel(region.width, region.height, Rgba([0, 0, 0, 255]));
    let mut covered = 0usize;

    for shot in shots {
        let Some(overlap) = region.intersect(&shot.geometry) else {
            continue;
        };
        let Some((src_x, src_y, src_w, src_h)) = source_rect(shot, &overlap) else {
            continue;
        };
        let mut piece = imageops::crop_imm(&shot.image, src_x, src_y, src_w, src_h).to_image();
        if piece.dimensions() != (overlap.width, overlap.height) {
            piece = imageops::resize(&piece, overlap.width, overlap.height, FilterType::Triangle);
        }
        imageops::overlay(
            &mut canvas,
            &piece,
            i64::from(overlap.left - region.left),
            i64::from(overlap.top - region.top),
        );
        covered += 1;
    }

    if covered == 0 {
        return Err(KlartextError::Capture(format!(
            "region {}x{} at ({}, {}) is outside every monitor",
            region.width, region.height, region.left, region.top
        )));
    }
    debug!(monitors = covered, "Region composited");
    Ok(canvas)
}

/// Map `overlap` (desktop coordinates) into the screenshot's pixel space.
fn source_rect(shot: &MonitorShot, overlap: &PixelRect) -> Option<(u32, u32, u32, u32)> {
    let (img_w, img_h) = shot.image.dimensions();
    if img_w == 0 || img_h == 0 {
        return None;
    }
    let sx = f64::from(img_w) / f64::from(shot.geometry.width);
    let sy = f64::from(img_h) / f64::from(shot.geometry.height);

    let x = (f64::from(overlap.left - shot.geometry.left) * sx).round() as u32;
    let y = (f64::from(overlap.top - shot.geometry.top) * sy).round() as u32;
    let x = x.min(img_w.saturating_sub(1));
    let y = y.min(img_h.saturating_sub(1));
    let w = ((f64::from(overlap.width) * sx).round() as u32).clamp(1, img_w - x);
    let h = ((f64::from(overlap.height) * sy).round() as u32).clamp(1, img_h - y);
    Some((x, y, w, h))
}

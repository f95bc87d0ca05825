//! Rendering sink shared by every entity.
//!
//! Entities never touch a concrete surface. Each one describes its
//! appearance as a list of [`Blit`]s: copy a sub-rectangle of a sprite sheet
//! to a position on the logical canvas. A host implements [`Canvas`] to put
//! those blits somewhere (a terminal cell grid, a pixel buffer, a test log).

/// Axis-aligned rectangle in canvas or sprite-sheet pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The sprite sheets the game draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    CactusLarge,
    CactusSmall,
    Cloud,
    Horizon,
    Restart,
    Text,
    Trex,
}

/// Which sprite-sheet resolution is loaded.
///
/// High-DPI sheets are drawn at twice the size, so every source rectangle
/// is doubled while the destination stays in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteResolution {
    #[default]
    Ldpi,
    Hdpi,
}

impl SpriteResolution {
    /// Pick the sheet set for a device pixel ratio.
    pub fn for_device_pixel_ratio(device_pixel_ratio: f64) -> Self {
        if device_pixel_ratio > 1.0 {
            Self::Hdpi
        } else {
            Self::Ldpi
        }
    }

    /// Multiplier applied to source rectangles.
    pub fn source_scale(&self) -> f64 {
        match self {
            Self::Ldpi => 1.0,
            Self::Hdpi => 2.0,
        }
    }

    /// Scale a logical-size source rectangle to this sheet's resolution.
    pub fn scale_source(&self, rect: Rect) -> Rect {
        let s = self.source_scale();
        Rect::new(rect.x * s, rect.y * s, rect.width * s, rect.height * s)
    }
}

/// A single "copy sprite sub-rectangle to canvas" draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    pub sprite: Sprite,
    /// Source rectangle on the sprite sheet (already resolution-scaled).
    pub source: Rect,
    /// Destination rectangle on the logical canvas.
    pub dest: Rect,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl Blit {
    pub fn new(sprite: Sprite, source: Rect, dest: Rect) -> Self {
        Self {
            sprite,
            source,
            dest,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Drawing surface the core renders into.
pub trait Canvas {
    /// Erase the whole canvas.
    fn clear(&mut self);

    /// Perform one sprite blit.
    fn draw(&mut self, blit: Blit);
}

/// Uniform scale factor for a canvas backing store.
///
/// Both ratios are floored (a missing ratio counts as 1). When they differ
/// the canvas must be upscaled by `device / backing` and the drawing context
/// scaled by the same factor; `None` means no scaling is needed.
pub fn canvas_scaling(device_pixel_ratio: f64, backing_store_ratio: f64) -> Option<f64> {
    let floor_or_one = |ratio: f64| {
        let r = ratio.floor();
        if r >= 1.0 {
            r
        } else {
            1.0
        }
    };
    let device = floor_or_one(device_pixel_ratio);
    let backing = floor_or_one(backing_store_ratio);

    if (device - backing).abs() > f64::EPSILON {
        Some(device / backing)
    } else {
        None
    }
}

/// Canvas that records every call. Used by headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub blits: Vec<Blit>,
    pub clears: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All blits taken from one sprite sheet, in draw order.
    pub fn blits_of(&self, sprite: Sprite) -> Vec<Blit> {
        self.blits
            .iter()
            .filter(|b| b.sprite == sprite)
            .copied()
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.blits.clear();
        self.clears += 1;
    }

    fn draw(&mut self, blit: Blit) {
        self.blits.push(blit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdpi_doubles_source() {
        let rect = Rect::new(10.0, 0.0, 44.0, 47.0);
        let scaled = SpriteResolution::Hdpi.scale_source(rect);
        assert_eq!(scaled, Rect::new(20.0, 0.0, 88.0, 94.0));
        assert_eq!(SpriteResolution::Ldpi.scale_source(rect), rect);
    }

    #[test]
    fn test_resolution_from_pixel_ratio() {
        assert_eq!(
            SpriteResolution::for_device_pixel_ratio(1.0),
            SpriteResolution::Ldpi
        );
        assert_eq!(
            SpriteResolution::for_device_pixel_ratio(1.5),
            SpriteResolution::Hdpi
        );
        assert_eq!(
            SpriteResolution::for_device_pixel_ratio(2.0),
            SpriteResolution::Hdpi
        );
    }

    #[test]
    fn test_canvas_scaling() {
        assert_eq!(canvas_scaling(1.0, 1.0), None);
        assert_eq!(canvas_scaling(2.0, 1.0), Some(2.0));
        // Fractional ratios are floored first
        assert_eq!(canvas_scaling(1.5, 1.0), None);
        assert_eq!(canvas_scaling(2.5, 1.0), Some(2.0));
        // Unknown ratios count as 1
        assert_eq!(canvas_scaling(0.0, 0.0), None);
        assert_eq!(canvas_scaling(3.0, 0.0), Some(3.0));
    }

    #[test]
    fn test_recording_canvas_clear_drops_blits() {
        let mut canvas = RecordingCanvas::new();
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        canvas.draw(Blit::new(Sprite::Cloud, rect, rect));
        canvas.draw(Blit::new(Sprite::Trex, rect, rect).with_alpha(0.5));
        assert_eq!(canvas.blits.len(), 2);
        assert_eq!(canvas.blits_of(Sprite::Trex)[0].alpha, 0.5);

        canvas.clear();
        assert!(canvas.blits.is_empty());
        assert_eq!(canvas.clears, 1);
    }
}

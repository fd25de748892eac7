use crate::api::capabilities::Viewport;

/// Drawing surface dimensions.
///
/// All simulation and draw commands use logical (CSS) pixels. The backing
/// buffer is `logical * pixel_ratio`, with the ratio capped so high-density
/// screens stay crisp without excessive memory use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Logical width in CSS pixels.
    pub width: f32,
    /// Logical height in CSS pixels.
    pub height: f32,
    /// Effective device pixel ratio, in [1, cap].
    pub pixel_ratio: f32,
    /// Backing buffer width in device pixels.
    pub backing_width: u32,
    /// Backing buffer height in device pixels.
    pub backing_height: u32,
}

impl Surface {
    /// Compute surface metrics from a viewport reading.
    /// Non-finite or negative dimensions collapse to zero.
    pub fn from_viewport(viewport: Viewport, max_pixel_ratio: f32) -> Self {
        let width = sanitize_dim(viewport.width);
        let height = sanitize_dim(viewport.height);
        let cap = if max_pixel_ratio.is_finite() && max_pixel_ratio >= 1.0 {
            max_pixel_ratio
        } else {
            1.0
        };
        let dpr = viewport.device_pixel_ratio;
        let pixel_ratio = if dpr.is_finite() && dpr > 0.0 {
            dpr.clamp(1.0, cap)
        } else {
            1.0
        };
        Self {
            width,
            height,
            pixel_ratio,
            backing_width: (width * pixel_ratio).round() as u32,
            backing_height: (height * pixel_ratio).round() as u32,
        }
    }

    /// Whether anything can be drawn on this surface.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::from_viewport(Viewport::default(), 1.0)
    }
}

fn sanitize_dim(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

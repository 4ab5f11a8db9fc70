use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Backing-buffer pixel count along one axis.
pub type Px = u32;

/// Size of a backing pixel buffer, already scaled by the device pixel ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: Px,
    pub height: Px,
}

impl PixelSize {
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    pub const fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `[rows, cols]` index for an ndarray buffer.
    pub const fn to_nd_shape(self) -> [usize; 2] {
        [self.height as usize, self.width as usize]
    }
}

/// Bounding box of the hosting container, in CSS pixels relative to the viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerBox {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Box anchored at the viewport origin.
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }

    /// Center of the box in viewport coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn backing_size(&self, dpr: f64) -> PixelSize {
        let dpr = normalize_dpr(dpr);
        PixelSize::new(ceil_px(self.width * dpr), ceil_px(self.height * dpr))
    }
}

/// Falls back to 1 for ratios a browser should never report but sometimes does.
pub fn normalize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

fn ceil_px(value: f64) -> Px {
    if !(value > 0.0) {
        return 0;
    }
    let truncated = value as Px;
    if (truncated as f64) < value {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}

pub(crate) fn floor_i64(value: f64) -> i64 {
    let truncated = value as i64;
    if (truncated as f64) > value {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}

/// Straight (non-premultiplied) RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_bytes([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t + 0.5) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

/// Compositing rule applied by fill operations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Composite {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Remove existing content wherever the source is opaque.
    DestinationOut,
}

impl Composite {
    pub const fn css_name(self) -> &'static str {
        use Composite::*;
        match self {
            SourceOver => "source-over",
            DestinationOut => "destination-out",
        }
    }

    /// Combines one straight-alpha source pixel with one destination pixel.
    pub fn blend(self, dst: Rgba, src: Rgba) -> Rgba {
        let sa = src.a as u32;
        let da = dst.a as u32;
        match self {
            Composite::SourceOver => {
                let keep = da * (255 - sa) / 255;
                let out_a = sa + keep;
                if out_a == 0 {
                    return Rgba::TRANSPARENT;
                }
                let mix = |s: u8, d: u8| {
                    ((s as u32 * sa + d as u32 * keep + out_a / 2) / out_a).min(255) as u8
                };
                Rgba::new(
                    mix(src.r, dst.r),
                    mix(src.g, dst.g),
                    mix(src.b, dst.b),
                    out_a as u8,
                )
            }
            Composite::DestinationOut => dst.with_alpha((da * (255 - sa) / 255) as u8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_size_rounds_up_scaled_box() {
        let container = ContainerBox::sized(100.5, 40.0);

        assert_eq!(container.backing_size(1.0), PixelSize::new(101, 40));
        assert_eq!(container.backing_size(1.5), PixelSize::new(151, 60));
        assert_eq!(container.backing_size(f64::NAN), PixelSize::new(101, 40));
        assert_eq!(ContainerBox::sized(0.0, 10.0).backing_size(2.0).area(), 0);
    }

    #[test]
    fn to_local_is_relative_to_box_origin() {
        let container = ContainerBox::new(30.0, 12.0, 200.0, 100.0);

        assert_eq!(container.to_local(40.0, 20.0), (10.0, 8.0));
        assert_eq!(container.center(), (130.0, 62.0));
    }

    #[test]
    fn translucent_paint_over_opaque_stays_opaque() {
        let dst = Rgba::rgb(0xc0, 0xc0, 0xc0);
        let out = Composite::SourceOver.blend(dst, Rgba::WHITE.with_alpha(38));

        assert_eq!(out.a, 0xff);
        assert!(out.r > 0xc0);
    }

    #[test]
    fn destination_out_with_opaque_source_clears_alpha() {
        let dst = Rgba::rgb(0x9e, 0x9e, 0x9e);

        assert_eq!(Composite::DestinationOut.blend(dst, Rgba::BLACK).a, 0);
        assert_eq!(
            Composite::DestinationOut.blend(dst, Rgba::TRANSPARENT),
            dst
        );
    }

    #[test]
    fn floor_handles_negative_values() {
        assert_eq!(floor_i64(-0.5), -1);
        assert_eq!(floor_i64(2.0), 2);
        assert_eq!(floor_i64(2.7), 2);
    }

    #[test]
    fn floor_saturates_far_outside_i64() {
        assert_eq!(floor_i64(-1e30), i64::MIN);
        assert_eq!(floor_i64(1e30), i64::MAX);
    }
}

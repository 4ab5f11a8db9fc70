use alloc::borrow::Cow;
use ndarray::Array2;

use crate::*;

/// Drawable raster the engine paints the mask onto and erases from.
///
/// Coordinates are in backing-buffer pixels. Fill operations honor the current
/// [`Composite`] mode; [`DrawSurface::clear`] ignores it.
pub trait DrawSurface {
    /// Resizes the backing buffer, discarding its content and resetting the
    /// composite mode. `css_size` is the presented, unscaled size.
    fn resize(&mut self, size: PixelSize, css_size: (f64, f64)) -> Result<()>;

    fn size(&self) -> PixelSize;

    fn composite(&self) -> Composite;

    fn set_composite(&mut self, mode: Composite);

    /// Fills the whole buffer with a gradient running from the top-left corner
    /// to the bottom-right one.
    fn fill_linear_gradient(&mut self, from: Rgba, to: Rgba) -> Result<()>;

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba) -> Result<()>;

    /// Sets every pixel to fully transparent.
    fn clear(&mut self) -> Result<()>;

    /// Row-major RGBA bytes of the whole buffer.
    fn rgba_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn resize(&mut self, size: PixelSize, css_size: (f64, f64)) -> Result<()> {
        (**self).resize(size, css_size)
    }

    fn size(&self) -> PixelSize {
        (**self).size()
    }

    fn composite(&self) -> Composite {
        (**self).composite()
    }

    fn set_composite(&mut self, mode: Composite) {
        (**self).set_composite(mode)
    }

    fn fill_linear_gradient(&mut self, from: Rgba, to: Rgba) -> Result<()> {
        (**self).fill_linear_gradient(from, to)
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba) -> Result<()> {
        (**self).fill_circle(center, radius, color)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn rgba_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).rgba_bytes()
    }
}

/// In-memory surface used off the browser and in tests.
///
/// A pixel belongs to a shape when its center lies inside it, so there is no
/// anti-aliasing at the edges.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterSurface {
    pixels: Array2<[u8; 4]>,
    css_size: (f64, f64),
    composite: Composite,
}

impl RasterSurface {
    pub fn new(size: PixelSize) -> Self {
        Self {
            pixels: Array2::from_elem(size.to_nd_shape(), Rgba::TRANSPARENT.to_bytes()),
            css_size: (size.width as f64, size.height as f64),
            composite: Composite::default(),
        }
    }

    pub fn css_size(&self) -> (f64, f64) {
        self.css_size
    }

    pub fn pixel_at(&self, x: Px, y: Px) -> Option<Rgba> {
        self.pixels
            .get([y as usize, x as usize])
            .copied()
            .map(Rgba::from_bytes)
    }

    fn blend_at(&mut self, index: [usize; 2], src: Rgba) {
        let composite = self.composite;
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = composite.blend(Rgba::from_bytes(*pixel), src).to_bytes();
        }
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(PixelSize::default())
    }
}

impl DrawSurface for RasterSurface {
    fn resize(&mut self, size: PixelSize, css_size: (f64, f64)) -> Result<()> {
        self.pixels = Array2::from_elem(size.to_nd_shape(), Rgba::TRANSPARENT.to_bytes());
        self.css_size = css_size;
        self.composite = Composite::default();
        Ok(())
    }

    fn size(&self) -> PixelSize {
        let (rows, cols) = self.pixels.dim();
        PixelSize::new(cols as Px, rows as Px)
    }

    fn composite(&self) -> Composite {
        self.composite
    }

    fn set_composite(&mut self, mode: Composite) {
        self.composite = mode;
    }

    fn fill_linear_gradient(&mut self, from: Rgba, to: Rgba) -> Result<()> {
        let PixelSize { width, height } = self.size();
        let (w, h) = (width as f64, height as f64);
        let length_sq = w * w + h * h;
        if length_sq == 0.0 {
            return Ok(());
        }

        let composite = self.composite;
        for ((y, x), pixel) in self.pixels.indexed_iter_mut() {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            let t = (px * w + py * h) / length_sq;
            *pixel = composite
                .blend(Rgba::from_bytes(*pixel), from.lerp(to, t))
                .to_bytes();
        }
        Ok(())
    }

    fn fill_circle(&mut self, (cx, cy): (f64, f64), radius: f64, color: Rgba) -> Result<()> {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return Ok(());
        }
        let PixelSize { width, height } = self.size();
        let x_start = floor_i64(cx - radius).max(0);
        let x_end = floor_i64(cx + radius).saturating_add(1).min(width as i64);
        let y_start = floor_i64(cy - radius).max(0);
        let y_end = floor_i64(cy + radius).saturating_add(1).min(height as i64);
        let radius_sq = radius * radius;

        for y in y_start..y_end {
            let dy = y as f64 + 0.5 - cy;
            for x in x_start..x_end {
                let dx = x as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_at([y as usize, x as usize], color);
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.pixels.fill(Rgba::TRANSPARENT.to_bytes());
        Ok(())
    }

    fn rgba_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.pixels
            .as_slice()
            .map(|pixels| Cow::Borrowed(pixels.as_flattened()))
            .ok_or(ScratchError::PixelReadFailed)
    }
}

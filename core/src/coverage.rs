use crate::*;

/// Fraction of pixels whose alpha is exactly zero.
///
/// Reads back the whole buffer, so callers should throttle it. An empty
/// surface reports `0.0`.
pub fn erased_fraction<S: DrawSurface + ?Sized>(surface: &S) -> Result<f64> {
    let total = surface.size().area();
    if total == 0 {
        return Ok(0.0);
    }

    let bytes = surface.rgba_bytes()?;
    let cleared = bytes
        .chunks_exact(4)
        .take(total)
        .filter(|pixel| pixel[3] == 0)
        .count();

    Ok(cleared as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_surface_is_fully_erased() {
        let surface = RasterSurface::new(PixelSize::new(8, 8));

        assert_eq!(erased_fraction(&surface), Ok(1.0));
    }

    #[test]
    fn counts_only_fully_transparent_pixels() {
        let mut surface = RasterSurface::new(PixelSize::new(4, 1));
        surface.fill_linear_gradient(Rgba::WHITE, Rgba::WHITE).unwrap();

        surface.set_composite(Composite::DestinationOut);
        surface.fill_circle((0.5, 0.5), 0.5, Rgba::BLACK).unwrap();
        surface
            .fill_circle((1.5, 0.5), 0.5, Rgba::BLACK.with_alpha(200))
            .unwrap();

        assert_eq!(erased_fraction(&surface), Ok(0.25));
    }

    #[test]
    fn empty_surface_reports_zero() {
        assert_eq!(erased_fraction(&RasterSurface::default()), Ok(0.0));
    }
}

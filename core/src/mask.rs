use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// Paints the opaque scratch-off covering.
///
/// The speckles are purely cosmetic and drawn from the renderer's own RNG, so
/// two paints of the same box differ in texture but never in opacity.
#[derive(Clone, Debug)]
pub struct MaskRenderer<R = SmallRng> {
    rng: R,
}

impl MaskRenderer<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MaskRenderer<R> {
    pub const TONE_FROM: Rgba = Rgba::rgb(0xc0, 0xc0, 0xc0);
    pub const TONE_TO: Rgba = Rgba::rgb(0x9e, 0x9e, 0x9e);
    pub const SPECKLE: Rgba = Rgba::WHITE.with_alpha(38);
    pub const SPECKLE_COUNT: usize = 150;
    /// Speckle radius range in CSS pixels, `(min, span)`.
    pub const SPECKLE_RADIUS: (f64, f64) = (0.5, 2.0);

    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Resizes `surface` to the container and overwrites it with a fresh mask.
    ///
    /// Does not look at the reveal state; painting a revealed session is the
    /// caller's mistake.
    pub fn paint<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        container: &ContainerBox,
        dpr: f64,
    ) -> Result<()> {
        let dpr = normalize_dpr(dpr);
        let size = container.backing_size(dpr);
        surface.resize(size, (container.width, container.height))?;
        surface.set_composite(Composite::SourceOver);
        surface.clear()?;
        surface.fill_linear_gradient(Self::TONE_FROM, Self::TONE_TO)?;

        if size.is_empty() {
            log::trace!("mask painted on empty surface");
            return Ok(());
        }

        let (radius_min, radius_span) = Self::SPECKLE_RADIUS;
        for _ in 0..Self::SPECKLE_COUNT {
            let x = self.rng.random::<f64>() * container.width;
            let y = self.rng.random::<f64>() * container.height;
            let radius = radius_min + self.rng.random::<f64>() * radius_span;
            surface.fill_circle((x * dpr, y * dpr), radius * dpr, Self::SPECKLE)?;
        }

        log::trace!("mask painted: {}x{} @ {}", size.width, size.height, dpr);
        Ok(())
    }
}

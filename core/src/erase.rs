use crate::*;

/// Stamps a transparent circle at a viewport position.
///
/// `brush_radius` is in CSS pixels, see [`ScratchConfig::brush_radius`]. The
/// surface is left in [`Composite::SourceOver`] mode whether or not the stamp
/// succeeds.
pub fn erase_at<S: DrawSurface + ?Sized>(
    (client_x, client_y): (f64, f64),
    container: Option<&ContainerBox>,
    surface: Option<&mut S>,
    brush_radius: f64,
    dpr: f64,
) -> Result<()> {
    let container = container.ok_or(ScratchError::MissingContainer)?;
    let surface = surface.ok_or(ScratchError::MissingSurface)?;

    let dpr = normalize_dpr(dpr);
    let (x, y) = container.to_local(client_x, client_y);

    surface.set_composite(Composite::DestinationOut);
    let stamped = surface.fill_circle((x * dpr, y * dpr), brush_radius * dpr, Rgba::BLACK);
    surface.set_composite(Composite::SourceOver);
    stamped
}

use scratch_reveal_core as scratch;
use scratch::{Composite, DrawSurface, PixelSize, Rgba, ScratchError};
use std::borrow::Cow;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`DrawSurface`] backed by a `<canvas>` element's 2D context.
///
/// The context is never scaled; everything is drawn in backing-buffer pixels.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    composite: Composite,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> scratch::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(ScratchError::ContextUnavailable)?;
        Ok(Self {
            canvas,
            ctx,
            composite: Composite::default(),
        })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn extent(&self) -> (f64, f64) {
        let PixelSize { width, height } = self.size();
        (width as f64, height as f64)
    }
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, size: PixelSize, (css_width, css_height): (f64, f64)) -> scratch::Result<()> {
        // assigning the size resets the whole context state
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.composite = Composite::default();

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", css_width))
            .and_then(|()| style.set_property("height", &format!("{}px", css_height)))
            .map_err(|err| {
                log::trace!("canvas style not applied: {:?}", err);
                ScratchError::ContextUnavailable
            })
    }

    fn size(&self) -> PixelSize {
        PixelSize::new(self.canvas.width(), self.canvas.height())
    }

    fn composite(&self) -> Composite {
        self.composite
    }

    fn set_composite(&mut self, mode: Composite) {
        match self.ctx.set_global_composite_operation(mode.css_name()) {
            Ok(()) => self.composite = mode,
            Err(err) => log::trace!("composite {:?} rejected: {:?}", mode, err),
        }
    }

    fn fill_linear_gradient(&mut self, from: Rgba, to: Rgba) -> scratch::Result<()> {
        let (width, height) = self.extent();
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, width, height);
        gradient
            .add_color_stop(0.0, &from.to_css())
            .and_then(|()| gradient.add_color_stop(1.0, &to.to_css()))
            .map_err(|_| ScratchError::ContextUnavailable)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_circle(&mut self, (x, y): (f64, f64), radius: f64, color: Rgba) -> scratch::Result<()> {
        if !(radius > 0.0) {
            return Ok(());
        }
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, radius, 0.0, TAU)
            .map_err(|_| ScratchError::ContextUnavailable)?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn clear(&mut self) -> scratch::Result<()> {
        let (width, height) = self.extent();
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn rgba_bytes(&self) -> scratch::Result<Cow<'_, [u8]>> {
        let (width, height) = self.extent();
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, width, height)
            .map_err(|_| ScratchError::PixelReadFailed)?;
        Ok(Cow::Owned(image.data().0))
    }
}

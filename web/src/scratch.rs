use crate::canvas::CanvasSurface;
use crate::result::ResultView;
use crate::utils::*;
use bitflags::bitflags;
use gloo::events::EventListener;
use scratch_reveal_core as scratch;
use scratch::{ResultSet, ScratchConfig, ScratchController, ScratchEvent, ScratchOutcome};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, PointerEvent, ResizeObserver};
use yew::prelude::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct PointerButtons: u16 {
        const PRIMARY   = 1;
        const SECONDARY = 1 << 1;
        const AUXILIARY = 1 << 2;
        const BACK      = 1 << 3;
        const FORWARD   = 1 << 4;
    }
}

impl PointerButtons {
    /// Mouse presses only scratch with the primary button; touch and pen
    /// contacts always report it.
    fn starts_stroke(self) -> bool {
        self.contains(Self::PRIMARY)
    }
}

fn client_point(e: &PointerEvent) -> (f64, f64) {
    (e.client_x() as f64, e.client_y() as f64)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer(ScratchEvent),
    Resized,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ScratchRevealProps {
    pub open: bool,
    pub results: ResultSet,
    #[prop_or_default]
    pub config: ScratchConfig,
    #[prop_or_default]
    pub on_reveal: Callback<()>,
}

/// DOM subscriptions of one open session; dropping them unsubscribes.
struct Bindings {
    resize_observer: ResizeObserver,
    _on_resize: Closure<dyn FnMut()>,
    _pointer_down: EventListener,
    _pointer_move: EventListener,
    _pointer_up: EventListener,
}

impl Bindings {
    fn new(ctx: &Context<ScratchReveal>, container: &HtmlElement) -> Result<Self, JsValue> {
        let window = gloo::utils::window();

        let pointer_down = {
            let link = ctx.link().clone();
            EventListener::new(container, "pointerdown", move |e| {
                let Some(e) = e.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let buttons = PointerButtons::from_bits_truncate(e.buttons());
                log::trace!("pointer down ({:?})", buttons);
                if buttons.starts_stroke() {
                    let (client_x, client_y) = client_point(e);
                    link.send_message(Msg::Pointer(ScratchEvent::PointerDown { client_x, client_y }));
                }
            })
        };

        let pointer_move = {
            let link = ctx.link().clone();
            EventListener::new(&window, "pointermove", move |e| {
                if let Some(e) = e.dyn_ref::<PointerEvent>() {
                    let (client_x, client_y) = client_point(e);
                    link.send_message(Msg::Pointer(ScratchEvent::PointerMove { client_x, client_y }));
                }
            })
        };

        let pointer_up = {
            let link = ctx.link().clone();
            EventListener::new(&window, "pointerup", move |_| {
                log::trace!("pointer up");
                link.send_message(Msg::Pointer(ScratchEvent::PointerUp));
            })
        };

        let on_resize = {
            let link = ctx.link().clone();
            Closure::<dyn FnMut()>::new(move || link.send_message(Msg::Resized))
        };
        let resize_observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
        resize_observer.observe(container);

        Ok(Self {
            resize_observer,
            _on_resize: on_resize,
            _pointer_down: pointer_down,
            _pointer_move: pointer_move,
            _pointer_up: pointer_up,
        })
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        self.resize_observer.disconnect();
    }
}

/// Scratch-off overlay for one result set.
///
/// A session opens whenever `open` turns true and is torn down when it turns
/// false or the component goes away.
pub(crate) struct ScratchReveal {
    controller: ScratchController<CanvasSurface>,
    container: NodeRef,
    canvas: NodeRef,
    bindings: Option<Bindings>,
}

impl ScratchReveal {
    fn new_controller(props: &ScratchRevealProps) -> ScratchController<CanvasSurface> {
        let mut controller = ScratchController::with_seed(props.config, js_random_seed());
        if props.open {
            controller.open(props.results.clone());
        }
        controller
    }

    fn mount(&mut self, ctx: &Context<Self>) {
        let Some(container) = self.container.cast::<HtmlElement>() else {
            log::trace!("container not in the DOM yet");
            return;
        };
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::trace!("canvas not in the DOM yet");
            return;
        };
        let surface = match CanvasSurface::new(canvas) {
            Ok(surface) => surface,
            Err(err) => {
                log::trace!("mount skipped: {}", err);
                return;
            }
        };

        self.controller
            .mount(surface, container_box(&container), device_pixel_ratio());

        match Bindings::new(ctx, &container) {
            Ok(bindings) => self.bindings = Some(bindings),
            Err(err) => log::warn!("could not observe scratch container: {:?}", err),
        }
    }

    fn teardown(&mut self) {
        if self.bindings.take().is_some() {
            log::debug!("scratch listeners removed");
        }
        self.controller.close();
    }
}

impl Component for ScratchReveal {
    type Message = Msg;
    type Properties = ScratchRevealProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            controller: Self::new_controller(ctx.props()),
            container: NodeRef::default(),
            canvas: NodeRef::default(),
            bindings: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();

        if props.config != old_props.config {
            self.teardown();
            self.controller = Self::new_controller(props);
            return true;
        }

        match (old_props.open, props.open) {
            (false, true) => self.controller.open(props.results.clone()),
            (true, false) => self.teardown(),
            (true, true) if props.results != old_props.results => {
                self.teardown();
                self.controller.open(props.results.clone());
            }
            _ => return false,
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Pointer(event) => {
                let outcome = self.controller.dispatch(event);
                if outcome == ScratchOutcome::Revealed {
                    ctx.props().on_reveal.emit(());
                    true
                } else {
                    false
                }
            }
            Msg::Resized => {
                let Some(container) = self.container.cast::<HtmlElement>() else {
                    return false;
                };
                self.controller.dispatch(ScratchEvent::Resize {
                    container: container_box(&container),
                    dpr: device_pixel_ratio(),
                });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let masked = self.controller.is_open() && !self.controller.is_revealed();

        html! {
            <div class="scratch" ref={self.container.clone()}>
                <ResultView results={props.results.clone()}/>
                if masked {
                    <canvas class="mask" ref={self.canvas.clone()}/>
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if self.controller.is_open() && self.bindings.is_none() {
            self.mount(ctx);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primary_contact_starts_a_stroke() {
        assert!(PointerButtons::from_bits_truncate(1).starts_stroke());
        assert!(PointerButtons::from_bits_truncate(1 | 2).starts_stroke());
        assert!(!PointerButtons::from_bits_truncate(2).starts_stroke());
        assert!(!PointerButtons::empty().starts_stroke());
    }
}

#![cfg(target_arch = "wasm32")]

use scratch_reveal_core::*;
use scratch_reveal_web::canvas::CanvasSurface;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas_surface() -> CanvasSurface {
    let canvas = gloo::utils::document()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    CanvasSurface::new(canvas).unwrap()
}

#[wasm_bindgen_test]
fn painted_canvas_is_opaque_and_css_sized() {
    let mut surface = canvas_surface();

    MaskRenderer::from_seed(9)
        .paint(&mut surface, &ContainerBox::sized(60.0, 30.0), 2.0)
        .unwrap();

    assert_eq!(surface.size(), PixelSize::new(120, 60));
    assert_eq!(surface.element().style().get_property_value("width").unwrap(), "60px");
    assert_eq!(erased_fraction(&surface), Ok(0.0));
}

#[wasm_bindgen_test]
fn erase_restores_source_over() {
    let mut surface = canvas_surface();
    let container = ContainerBox::sized(40.0, 40.0);
    MaskRenderer::from_seed(9)
        .paint(&mut surface, &container, 1.0)
        .unwrap();

    erase_at((20.0, 20.0), Some(&container), Some(&mut surface), 18.0, 1.0).unwrap();

    assert_eq!(surface.composite(), Composite::SourceOver);
    assert!(erased_fraction(&surface).unwrap() > 0.5);
}

#[wasm_bindgen_test]
fn controller_reveals_on_canvas() {
    let container = ContainerBox::sized(40.0, 40.0);
    let mut controller = ScratchController::<CanvasSurface>::with_seed(ScratchConfig::default(), 4);
    controller.open(ResultSet::from("大奖"));
    controller.mount(canvas_surface(), container, 1.0);

    let outcome = controller.dispatch_all([
        ScratchEvent::PointerDown {
            client_x: 20.0,
            client_y: 20.0,
        },
        ScratchEvent::PointerUp,
    ]);

    assert_eq!(outcome, ScratchOutcome::Revealed);
    let surface = controller.session().unwrap().surface().unwrap();
    assert_eq!(erased_fraction(surface), Ok(1.0));
}

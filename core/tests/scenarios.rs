use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scratch_reveal_core::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

type Controller = ScratchController<RasterSurface>;

fn open_mounted(results: ResultSet, container: ContainerBox, dpr: f64) -> Controller {
    let mut controller = Controller::with_seed(ScratchConfig::default(), 0x5eed);
    controller.open(results);
    controller.mount(RasterSurface::default(), container, dpr);
    controller
}

fn coverage(controller: &Controller) -> f64 {
    let surface = controller.session().unwrap().surface().unwrap();
    erased_fraction(surface).unwrap()
}

#[test]
fn grand_prize_is_revealed_by_end_of_stroke() {
    let container = ContainerBox::new(10.0, 20.0, 72.0, 72.0);
    let mut controller = open_mounted(ResultSet::from("大奖"), container, 1.0);
    let (cx, cy) = container.center();

    let moves = [
        (12.0, 12.0),
        (36.0, 12.0),
        (60.0, 12.0),
        (12.0, 36.0),
        (60.0, 36.0),
        (12.0, 60.0),
        (36.0, 60.0),
        (60.0, 60.0),
        (24.0, 24.0),
        (48.0, 48.0),
        (24.0, 48.0),
        (48.0, 24.0),
    ];

    let mut outcome = controller.dispatch(ScratchEvent::PointerDown {
        client_x: cx,
        client_y: cy,
    });
    for (x, y) in moves {
        outcome = outcome
            | controller.dispatch(ScratchEvent::PointerMove {
                client_x: container.left + x,
                client_y: container.top + y,
            });
    }
    outcome = outcome | controller.dispatch(ScratchEvent::PointerUp);

    assert_eq!(outcome, ScratchOutcome::Revealed);
    assert!(controller.is_revealed());
    assert_eq!(coverage(&controller), 1.0);
    assert_eq!(
        controller.session().unwrap().results().single(),
        Some("大奖")
    );
}

#[test]
fn single_small_stamp_stays_covered() {
    let container = ContainerBox::sized(480.0, 480.0);
    let mut controller = open_mounted(ResultSet::from("小奖"), container, 1.0);

    controller.dispatch(ScratchEvent::PointerDown {
        client_x: 240.0,
        client_y: 240.0,
    });
    let outcome = controller.dispatch(ScratchEvent::PointerUp);

    assert_eq!(outcome, ScratchOutcome::NoChange);
    assert!(!controller.is_revealed());
    let erased = coverage(&controller);
    assert!(erased > 0.0 && erased < 0.5, "erased {}", erased);
}

fn random_point(rng: &mut SmallRng, container: &ContainerBox) -> (f64, f64) {
    (
        container.left + rng.random::<f64>() * container.width,
        container.top + rng.random::<f64>() * container.height,
    )
}

#[test]
fn revealed_never_reverts_under_random_strokes() {
    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let width = rng.random_range(40.0..160.0);
        let height = rng.random_range(40.0..160.0);
        let dpr = [1.0, 1.5, 2.0][rng.random_range(0..3)];
        let container = ContainerBox::new(5.0, 7.0, width, height);
        let mut controller = open_mounted(ResultSet::no_prize(), container, dpr);
        let mut seen_revealed = false;

        for _ in 0..6 {
            let (x, y) = random_point(&mut rng, &container);
            let mut events = vec![ScratchEvent::PointerDown {
                client_x: x,
                client_y: y,
            }];
            for _ in 0..rng.random_range(0..25) {
                let (x, y) = random_point(&mut rng, &container);
                events.push(ScratchEvent::PointerMove {
                    client_x: x,
                    client_y: y,
                });
            }
            events.push(ScratchEvent::PointerUp);

            for event in events {
                controller.dispatch(event);
                if controller.is_revealed() {
                    seen_revealed = true;
                }
                if seen_revealed {
                    assert!(controller.is_revealed());
                    assert_eq!(coverage(&controller), 1.0);
                }
            }

            assert!(
                controller.is_revealed() || coverage(&controller) < 0.5,
                "seed {} ended a stroke at or above threshold while covered",
                seed
            );
        }
    }
}

#[test]
fn reopening_after_reveal_is_covered_again() {
    let container = ContainerBox::sized(40.0, 40.0);
    let mut controller = open_mounted(ResultSet::from("幸运奖"), container, 1.0);
    controller.dispatch_all([
        ScratchEvent::PointerDown {
            client_x: 20.0,
            client_y: 20.0,
        },
        ScratchEvent::PointerUp,
    ]);
    assert!(controller.is_revealed());

    controller.close();
    controller.open(ResultSet::from("大奖"));
    controller.mount(RasterSurface::default(), container, 1.0);

    assert!(!controller.is_revealed());
    assert_eq!(controller.session().unwrap().stroke().move_count(), 0);
    assert_eq!(coverage(&controller), 0.0);
}

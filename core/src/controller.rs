use core::ops::BitOr;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::*;

/// Input the host forwards from its event loop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScratchEvent {
    /// Press on the container.
    PointerDown { client_x: f64, client_y: f64 },
    /// Motion anywhere in the window.
    PointerMove { client_x: f64, client_y: f64 },
    /// Release anywhere in the window.
    PointerUp,
    /// The container was laid out again.
    Resize { container: ContainerBox, dpr: f64 },
}

/// State of the pointer between a press and its release.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StrokeSession {
    active: bool,
    moves: u32,
}

impl StrokeSession {
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn move_count(&self) -> u32 {
        self.moves
    }

    fn begin(&mut self) {
        self.active = true;
    }

    /// Returns whether a stroke was in progress.
    fn end(&mut self) -> bool {
        let was_active = self.active;
        *self = Self::default();
        was_active
    }

    /// Counts a move and tells whether coverage is due for a sample.
    fn record_move(&mut self, every: u32) -> bool {
        self.moves = self.moves.wrapping_add(1);
        self.moves % every.max(1) == 0
    }
}

/// Everything that lives between one modal open and its close.
#[derive(Clone, Debug)]
pub struct ScratchSession<S> {
    results: ResultSet,
    reveal: RevealMachine,
    stroke: StrokeSession,
    surface: Option<S>,
    container: Option<ContainerBox>,
    dpr: f64,
}

impl<S: DrawSurface> ScratchSession<S> {
    fn new(results: ResultSet, threshold: f64) -> Self {
        Self {
            results,
            reveal: RevealMachine::new(threshold),
            stroke: StrokeSession::default(),
            surface: None,
            container: None,
            dpr: 1.0,
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    pub fn stroke(&self) -> StrokeSession {
        self.stroke
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn container(&self) -> Option<&ContainerBox> {
        self.container.as_ref()
    }

    fn repaint<R: Rng>(&mut self, renderer: &mut MaskRenderer<R>) -> Result<()> {
        let container = self.container.as_ref().ok_or(ScratchError::MissingContainer)?;
        let surface = self.surface.as_mut().ok_or(ScratchError::MissingSurface)?;
        renderer.paint(surface, container, self.dpr)
    }

    fn erase(&mut self, client: (f64, f64), config: &ScratchConfig) -> Result<()> {
        let radius = self
            .container
            .as_ref()
            .map_or(0.0, |container| config.brush_radius(container));
        erase_at(
            client,
            self.container.as_ref(),
            self.surface.as_mut(),
            radius,
            self.dpr,
        )
    }

    fn sample(&mut self) -> Result<bool> {
        let surface = self.surface.as_mut().ok_or(ScratchError::MissingSurface)?;
        let fraction = erased_fraction(&*surface)?;
        log::trace!("erased fraction: {:.3}", fraction);
        Ok(self.reveal.apply_sample(fraction, surface))
    }

    fn sample_outcome(&mut self) -> ScratchOutcome {
        match self.sample() {
            Ok(true) => ScratchOutcome::Revealed,
            Ok(false) => ScratchOutcome::NoChange,
            Err(err) => {
                log::trace!("coverage sample skipped: {}", err);
                ScratchOutcome::NoChange
            }
        }
    }
}

fn outcome_of(result: Result<()>, on_success: ScratchOutcome) -> ScratchOutcome {
    match result {
        Ok(()) => on_success,
        Err(err) => {
            log::trace!("skipped: {}", err);
            ScratchOutcome::NoChange
        }
    }
}

/// Drives the mask through one session per modal open.
///
/// Events are handled strictly one at a time; the host is expected to forward
/// them in the order its event loop delivers them.
#[derive(Clone, Debug)]
pub struct ScratchController<S, R = SmallRng> {
    config: ScratchConfig,
    renderer: MaskRenderer<R>,
    session: Option<ScratchSession<S>>,
}

impl<S: DrawSurface, R: Rng> ScratchController<S, R> {
    pub fn new(config: ScratchConfig, renderer: MaskRenderer<R>) -> Self {
        Self {
            config: config.sanitized(),
            renderer,
            session: None,
        }
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&ScratchSession<S>> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_revealed(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.reveal.is_revealed())
    }

    /// Starts a brand-new covered session, discarding any previous one.
    pub fn open(&mut self, results: ResultSet) {
        if self.session.is_some() {
            log::debug!("scratch session replaced without close");
        }
        log::debug!("scratch session opened: {} result(s)", results.len());
        self.session = Some(ScratchSession::new(results, self.config.threshold_fraction));
    }

    /// Hands the drawable surface and its container to the open session and
    /// paints the mask.
    pub fn mount(&mut self, surface: S, container: ContainerBox, dpr: f64) -> ScratchOutcome {
        let Some(session) = self.session.as_mut() else {
            log::trace!("mount ignored, no open session");
            return ScratchOutcome::NoChange;
        };

        session.surface = Some(surface);
        session.container = Some(container);
        session.dpr = normalize_dpr(dpr);
        log::debug!("scratch surface mounted");

        if session.reveal.is_revealed() {
            return ScratchOutcome::NoChange;
        }
        outcome_of(session.repaint(&mut self.renderer), ScratchOutcome::Repainted)
    }

    /// Ends the session. Any stroke in progress is abandoned.
    pub fn close(&mut self) -> Option<ScratchSession<S>> {
        let session = self.session.take();
        if let Some(session) = &session {
            log::debug!("scratch session closed: {:?}", session.reveal.state());
        }
        session
    }

    pub fn dispatch(&mut self, event: ScratchEvent) -> ScratchOutcome {
        use ScratchEvent::*;

        let Some(session) = self.session.as_mut() else {
            return ScratchOutcome::NoChange;
        };
        log::trace!("scratch event: {:?}", event);

        match event {
            PointerDown { client_x, client_y } => {
                if session.reveal.is_revealed() {
                    return ScratchOutcome::NoChange;
                }
                session.stroke.begin();
                outcome_of(
                    session.erase((client_x, client_y), &self.config),
                    ScratchOutcome::Erased,
                )
            }
            PointerMove { client_x, client_y } => {
                if !session.stroke.is_active() || session.reveal.is_revealed() {
                    return ScratchOutcome::NoChange;
                }
                let erased = outcome_of(
                    session.erase((client_x, client_y), &self.config),
                    ScratchOutcome::Erased,
                );
                if session.stroke.record_move(self.config.throttle_every) {
                    erased | session.sample_outcome()
                } else {
                    erased
                }
            }
            PointerUp => {
                if !session.stroke.end() {
                    return ScratchOutcome::NoChange;
                }
                session.sample_outcome()
            }
            Resize { container, dpr } => {
                session.container = Some(container);
                session.dpr = normalize_dpr(dpr);
                if session.reveal.is_revealed() {
                    return ScratchOutcome::NoChange;
                }
                outcome_of(
                    session.repaint(&mut self.renderer),
                    ScratchOutcome::Repainted,
                )
            }
        }
    }

    pub fn dispatch_all<I>(&mut self, events: I) -> ScratchOutcome
    where
        I: IntoIterator<Item = ScratchEvent>,
    {
        events
            .into_iter()
            .map(|event| self.dispatch(event))
            .fold(ScratchOutcome::NoChange, BitOr::bitor)
    }
}

impl<S: DrawSurface> ScratchController<S, SmallRng> {
    pub fn with_seed(config: ScratchConfig, seed: u64) -> Self {
        Self::new(config, MaskRenderer::from_seed(seed))
    }
}

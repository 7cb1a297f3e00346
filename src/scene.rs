use crate::{
    core::{FrameIndex, Viewport},
    error::NiteglowResult,
    input::InputSample,
    rng::FrameRng,
    surface::PixelSurface,
};

/// The reference frame rate the original page's per-frame constants assume.
/// Phase advances by `rate * dt * REFERENCE_FPS` so hosts running slower or
/// faster get the same motion per second.
pub const REFERENCE_FPS: f64 = 60.0;

/// Everything a scene may read while updating or painting one frame.
/// Explicit context instead of ambient globals: scroll and pointer arrive
/// through the stage, and randomness is a per-frame stream.
#[derive(Clone, Copy, Debug)]
pub struct SceneCtx {
    pub frame: FrameIndex,
    pub dt: f64,
    pub phase: f64,
    pub viewport: Viewport,
    pub input: InputSample,
    pub rng: FrameRng,
}

/// One scene kind, parameterized by its entity type: spawn once, then
/// update and paint every frame. The five page scenes are all instances of
/// this trait; the per-scene loop of the original page exists exactly once,
/// in `SceneInstance`.
pub trait SceneModel {
    type Entity;

    /// Phase units per frame at the reference rate.
    fn phase_rate(&self) -> f64 {
        0.01
    }

    /// Build the entity set. Called once at mount time; the set never grows
    /// or shrinks afterwards.
    fn spawn(&mut self, rng: &mut FrameRng, viewport: Viewport) -> Vec<Self::Entity>;

    /// Advance transient entity state (and any model-owned state such as a
    /// camera) by one frame.
    fn update(&mut self, entities: &mut [Self::Entity], ctx: &mut SceneCtx);

    /// Repaint the frame from current state.
    fn paint(&self, entities: &[Self::Entity], ctx: &mut SceneCtx, surface: &mut PixelSurface);
}

/// Object-safe handle the stage drives; `SceneInstance` is the only
/// implementor.
pub trait AnimatedScene {
    fn mount(&self) -> &str;
    fn entity_count(&self) -> usize;
    fn viewport(&self) -> Viewport;
    fn resize(&mut self, viewport: Viewport) -> NiteglowResult<()>;
    fn advance(&mut self, frame: FrameIndex, dt: f64, input: InputSample);
    fn frame(&self) -> &PixelSurface;
}

pub struct SceneInstance<M: SceneModel> {
    mount: String,
    seed: u64,
    model: M,
    entities: Vec<M::Entity>,
    phase: f64,
    surface: PixelSurface,
}

impl<M: SceneModel> SceneInstance<M> {
    pub fn mounted(
        mount: impl Into<String>,
        seed: u64,
        mut model: M,
        viewport: Viewport,
    ) -> NiteglowResult<Self> {
        let surface = PixelSurface::new(viewport)?;
        let mut spawn_rng = FrameRng::new(seed);
        let entities = model.spawn(&mut spawn_rng, viewport);
        Ok(Self {
            mount: mount.into(),
            seed,
            model,
            entities,
            phase: 0.0,
            surface,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn entities(&self) -> &[M::Entity] {
        &self.entities
    }
}

impl<M: SceneModel> AnimatedScene for SceneInstance<M> {
    fn mount(&self) -> &str {
        &self.mount
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    fn resize(&mut self, viewport: Viewport) -> NiteglowResult<()> {
        self.surface.resize(viewport)
    }

    fn advance(&mut self, frame: FrameIndex, dt: f64, input: InputSample) {
        let viewport = self.surface.viewport();
        if viewport.is_empty() {
            return;
        }

        self.phase += self.model.phase_rate() * dt * REFERENCE_FPS;

        let mut ctx = SceneCtx {
            frame,
            dt,
            phase: self.phase,
            viewport,
            input: input.clamped(),
            rng: FrameRng::for_frame(self.seed, frame.0),
        };

        self.model.update(&mut self.entities, &mut ctx);
        self.model.paint(&self.entities, &mut ctx, &mut self.surface);
    }

    fn frame(&self) -> &PixelSurface {
        &self.surface
    }
}

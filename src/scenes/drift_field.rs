use crate::{
    core::{Point, Rgba8Premul, Vec2, Viewport},
    rng::FrameRng,
    scene::{REFERENCE_FPS, SceneCtx, SceneModel},
    surface::PixelSurface,
};

/// The step-visual scene: particles drifting in a unit box, bouncing off
/// the edges, linked when close. Four instances run on the page, differing
/// only in hue.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DriftFieldParams {
    pub particle_count: usize,
    pub hue_deg: f64,
    /// Normalized distance under which a pair is linked.
    pub link_distance: f64,
}

impl Default for DriftFieldParams {
    fn default() -> Self {
        Self {
            particle_count: 30,
            hue_deg: 280.0,
            link_distance: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DriftParticle {
    pub pos: Vec2,
    /// Normalized units per frame at the reference rate.
    pub vel: Vec2,
    pub size: f64,
}

pub struct DriftFieldScene {
    params: DriftFieldParams,
}

impl DriftFieldScene {
    pub fn new(params: DriftFieldParams) -> Self {
        Self { params }
    }

    pub fn hue_deg(&self) -> f64 {
        self.params.hue_deg
    }
}

impl SceneModel for DriftFieldScene {
    type Entity = DriftParticle;

    fn spawn(&mut self, rng: &mut FrameRng, _viewport: Viewport) -> Vec<DriftParticle> {
        (0..self.params.particle_count)
            .map(|_| DriftParticle {
                pos: Vec2::new(rng.next_f64(), rng.next_f64()),
                vel: Vec2::new(
                    (rng.next_f64() - 0.5) * 0.01,
                    (rng.next_f64() - 0.5) * 0.01,
                ),
                size: rng.next_f64() * 3.0 + 1.0,
            })
            .collect()
    }

    fn update(&mut self, entities: &mut [DriftParticle], ctx: &mut SceneCtx) {
        let step = ctx.dt * REFERENCE_FPS;
        for p in entities.iter_mut() {
            p.pos += p.vel * step;
            if p.pos.x < 0.0 || p.pos.x > 1.0 {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > 1.0 {
                p.vel.y = -p.vel.y;
            }
        }
    }

    fn paint(&self, entities: &[DriftParticle], ctx: &mut SceneCtx, surface: &mut PixelSurface) {
        surface.fade(Rgba8Premul::from_straight_rgba(26, 26, 37, 51));

        let w = f64::from(ctx.viewport.width);
        let h = f64::from(ctx.viewport.height);
        let at = |v: Vec2| Point::new(v.x * w, v.y * h);

        let fill = Rgba8Premul::hsla(self.params.hue_deg, 0.8, 0.6, 0.6);
        for p in entities {
            surface.fill_circle(at(p.pos), p.size, fill);
        }

        let link = Rgba8Premul::hsla(self.params.hue_deg, 0.8, 0.6, 0.1);
        for i in 0..entities.len() {
            for j in (i + 1)..entities.len() {
                let gap = entities[i].pos - entities[j].pos;
                if gap.hypot() < self.params.link_distance {
                    surface.stroke_line(at(entities[i].pos), at(entities[j].pos), 1.0, link);
                }
            }
        }
    }
}

use crate::{
    core::{Point, Rgba8Premul, Vec2, Viewport},
    rng::FrameRng,
    scene::{SceneCtx, SceneModel},
    surface::PixelSurface,
};

use super::{slate, violet};

/// The vision-section scene: a map of launch cities that light up one by
/// one as the page is scrolled, with flickering links between active pairs.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorldMapParams {
    /// Scroll progress at which the first city activates.
    pub activation_base: f64,
    /// Additional progress required per city index.
    pub activation_step: f64,
    /// Per-frame probability that an eligible link is drawn.
    pub link_probability: f64,
}

impl Default for WorldMapParams {
    fn default() -> Self {
        Self {
            activation_base: 0.6,
            activation_step: 0.03,
            link_probability: 0.2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CityMarker {
    pub name: String,
    /// Normalized map position.
    pub pos: Vec2,
    pub active: bool,
}

pub struct WorldMapScene {
    params: WorldMapParams,
}

/// Fixed roster; positions are normalized map coordinates.
const CITIES: [(&str, f64, f64); 9] = [
    ("NYC", 0.15, 0.35),
    ("London", 0.42, 0.38),
    ("Paris", 0.48, 0.42),
    ("Berlin", 0.55, 0.35),
    ("Tokyo", 0.75, 0.48),
    ("Singapore", 0.72, 0.58),
    ("Dubai", 0.58, 0.55),
    ("Miami", 0.22, 0.55),
    ("LA", 0.20, 0.42),
];

impl WorldMapScene {
    pub fn new(params: WorldMapParams) -> Self {
        Self { params }
    }
}

impl SceneModel for WorldMapScene {
    type Entity = CityMarker;

    fn spawn(&mut self, _rng: &mut FrameRng, _viewport: Viewport) -> Vec<CityMarker> {
        CITIES
            .iter()
            .map(|&(name, x, y)| CityMarker {
                name: name.to_string(),
                pos: Vec2::new(x, y),
                active: false,
            })
            .collect()
    }

    fn update(&mut self, entities: &mut [CityMarker], ctx: &mut SceneCtx) {
        // Activation is a pure function of scroll progress: cities light up
        // scrolling down and dim again scrolling back up.
        let progress = ctx.input.scroll_progress;
        for (i, city) in entities.iter_mut().enumerate() {
            city.active =
                progress > self.params.activation_base + i as f64 * self.params.activation_step;
        }
    }

    fn paint(&self, entities: &[CityMarker], ctx: &mut SceneCtx, surface: &mut PixelSurface) {
        surface.fill(Rgba8Premul::transparent());

        let w = f64::from(ctx.viewport.width);
        let h = f64::from(ctx.viewport.height);
        let at = |v: Vec2| Point::new(v.x * w, v.y * h);

        let link_color = violet(0.1);
        for i in 0..entities.len() {
            for j in (i + 1)..entities.len() {
                let eligible = entities[i].active || entities[j].active;
                if eligible && ctx.rng.chance(self.params.link_probability) {
                    surface.stroke_line(at(entities[i].pos), at(entities[j].pos), 1.0, link_color);
                }
            }
        }

        for (i, city) in entities.iter().enumerate() {
            let p = at(city.pos);
            if city.active {
                let glow_r = 40.0 + (ctx.phase * 2.0 + i as f64).sin() * 10.0;
                surface.radial_glow(p, glow_r, violet(0.6));
                let core_r = 4.0 + (ctx.phase * 3.0 + i as f64).sin();
                surface.fill_circle(p, core_r, violet(1.0));
            } else {
                surface.fill_circle(p, 3.0, slate(0.3));
            }
        }
    }
}

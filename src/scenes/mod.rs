//! The five page scenes, each a `SceneModel` over its own entity type.

mod city_grid;
mod drift_field;
mod starfield;
mod venue_map;
mod world_map;

pub use city_grid::{CityGridParams, CityGridScene, CityNode};
pub use drift_field::{DriftFieldParams, DriftFieldScene, DriftParticle};
pub use starfield::{Star, StarfieldParams, StarfieldScene};
pub use venue_map::{Venue, VenueMapParams, VenueMapScene};
pub use world_map::{CityMarker, WorldMapParams, WorldMapScene};

use crate::core::Rgba8Premul;

// Page palette: violet #a855f7, amber #f59e0b, cyan #06b6d4, slate #64748b.

pub(crate) fn alpha_u8(a: f64) -> u8 {
    (a.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn violet(alpha: f64) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(168, 85, 247, alpha_u8(alpha))
}

pub(crate) fn amber(alpha: f64) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(245, 158, 11, alpha_u8(alpha))
}

pub(crate) fn cyan(alpha: f64) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(6, 182, 212, alpha_u8(alpha))
}

pub(crate) fn slate(alpha: f64) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(100, 116, 139, alpha_u8(alpha))
}

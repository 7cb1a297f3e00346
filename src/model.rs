use std::collections::BTreeSet;

use crate::{
    core::Fps,
    error::{NiteglowError, NiteglowResult},
    reveal::RevealGroup,
    scenes::{
        CityGridParams, DriftFieldParams, StarfieldParams, VenueMapParams, WorldMapParams,
    },
    stats::StatSpec,
};

/// The whole page, as data: which scene runs on which mount, the reveal
/// groups, and the dashboard stats. Serializable so pages can be authored
/// as JSON and fed to the CLI.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageManifest {
    pub fps: Fps,
    /// Global determinism seed; per-scene and per-stat seeds derive from it.
    pub seed: u64,
    pub scenes: Vec<SceneEntry>,
    pub reveals: Vec<RevealGroup>,
    pub stats: Vec<StatSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneEntry {
    /// Mount id, e.g. `hero-canvas`. A manifest entry whose mount is not
    /// present in the host's mount set is skipped at build time.
    pub mount: String,
    #[serde(flatten)]
    pub kind: SceneKind,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum SceneKind {
    CityGrid(CityGridParams),
    Starfield(StarfieldParams),
    WorldMap(WorldMapParams),
    VenueMap(VenueMapParams),
    DriftField(DriftFieldParams),
}

impl PageManifest {
    pub fn validate(&self) -> NiteglowResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(NiteglowError::validation("fps must have num>0 and den>0"));
        }

        let mut mounts = BTreeSet::new();
        for entry in &self.scenes {
            if entry.mount.trim().is_empty() {
                return Err(NiteglowError::validation("scene mount id must be non-empty"));
            }
            if !mounts.insert(entry.mount.as_str()) {
                return Err(NiteglowError::validation(format!(
                    "duplicate scene mount '{}'",
                    entry.mount
                )));
            }
            entry.kind.validate(&entry.mount)?;
        }

        for group in &self.reveals {
            group.validate()?;
        }
        for stat in &self.stats {
            stat.validate()?;
        }

        Ok(())
    }
}

impl SceneKind {
    fn validate(&self, mount: &str) -> NiteglowResult<()> {
        let bad = |what: &str| {
            Err(NiteglowError::validation(format!(
                "scene '{mount}': {what}"
            )))
        };
        match self {
            Self::CityGrid(p) => {
                if p.grid_size == 0 || !(p.spacing > 0.0) {
                    return bad("grid_size and spacing must be > 0");
                }
                if !(0.0..=1.0).contains(&p.node_probability)
                    || !(0.0..=1.0).contains(&p.link_probability)
                {
                    return bad("probabilities must be in 0..=1");
                }
                if !(p.link_distance_factor > 0.0) {
                    return bad("link_distance_factor must be > 0");
                }
            }
            Self::Starfield(p) => {
                if !(0.0..=1.0).contains(&p.glitch_probability)
                    || !(0.0..=1.0).contains(&p.noise_line_probability)
                {
                    return bad("probabilities must be in 0..=1");
                }
            }
            Self::WorldMap(p) => {
                if !(0.0..=1.0).contains(&p.activation_base)
                    || !(0.0..=1.0).contains(&p.link_probability)
                {
                    return bad("activation_base and link_probability must be in 0..=1");
                }
                if p.activation_step < 0.0 {
                    return bad("activation_step must be >= 0");
                }
            }
            Self::VenueMap(p) => {
                if !(0.0..=1.0).contains(&p.avatar_chase) {
                    return bad("avatar_chase must be in 0..=1");
                }
                if !(p.grid_step > 0.0) {
                    return bad("grid_step must be > 0");
                }
            }
            Self::DriftField(p) => {
                if !(p.link_distance > 0.0) {
                    return bad("link_distance must be > 0");
                }
                if !p.hue_deg.is_finite() {
                    return bad("hue_deg must be finite");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::nite_page;

    #[test]
    fn preset_page_validates() {
        nite_page().validate().unwrap();
    }

    #[test]
    fn json_roundtrip() {
        let page = nite_page();
        let s = serde_json::to_string_pretty(&page).unwrap();
        let de: PageManifest = serde_json::from_str(&s).unwrap();
        de.validate().unwrap();
        assert_eq!(de.scenes.len(), page.scenes.len());
        assert_eq!(de.reveals.len(), page.reveals.len());
        assert_eq!(de.stats.len(), page.stats.len());
    }

    #[test]
    fn scene_kind_tag_is_snake_case() {
        let page = nite_page();
        let s = serde_json::to_string(&page).unwrap();
        assert!(s.contains("\"kind\":\"city_grid\""));
        assert!(s.contains("\"kind\":\"drift_field\""));
    }

    #[test]
    fn validate_rejects_duplicate_mounts() {
        let mut page = nite_page();
        let dup = page.scenes[0].clone();
        page.scenes.push(dup);
        assert!(page.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_fps() {
        let mut page = nite_page();
        page.fps = Fps { num: 0, den: 1 };
        assert!(page.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_probability() {
        let mut page = nite_page();
        for entry in &mut page.scenes {
            if let SceneKind::Starfield(p) = &mut entry.kind {
                p.glitch_probability = 1.5;
            }
        }
        assert!(page.validate().is_err());
    }
}

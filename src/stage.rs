use std::collections::BTreeMap;

use crate::{
    core::{FrameIndex, Viewport},
    error::NiteglowResult,
    input::InputSample,
    model::{PageManifest, SceneKind},
    reveal::{RevealRunner, RevealStyle},
    rng::stable_hash64,
    scene::{AnimatedScene, SceneInstance},
    scenes::{
        CityGridScene, DriftFieldScene, StarfieldScene, VenueMapScene, WorldMapScene,
    },
    stats::LiveStatBoard,
    surface::PixelSurface,
};

/// The mount points the host document actually has, with their pixel sizes.
#[derive(Clone, Debug, Default)]
pub struct MountSet {
    mounts: BTreeMap<String, Viewport>,
}

impl MountSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, viewport: Viewport) -> Self {
        self.mounts.insert(id.into(), viewport);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, viewport: Viewport) {
        self.mounts.insert(id.into(), viewport);
    }

    pub fn get(&self, id: &str) -> Option<Viewport> {
        self.mounts.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Viewport)> {
        self.mounts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// The running page: every mounted scene, the reveal runner, and the stat
/// board, advanced together against one frame clock.
pub struct Stage {
    fps: crate::core::Fps,
    frame: FrameIndex,
    scenes: Vec<Box<dyn AnimatedScene>>,
    reveals: RevealRunner,
    stats: LiveStatBoard,
}

impl Stage {
    /// Build from a manifest against the host's mounts. Scenes whose mount
    /// is missing are skipped; everything else about the manifest must be
    /// valid.
    #[tracing::instrument(skip_all)]
    pub fn build(manifest: &PageManifest, mounts: &MountSet) -> NiteglowResult<Self> {
        manifest.validate()?;

        let mut scenes: Vec<Box<dyn AnimatedScene>> = Vec::new();
        for entry in &manifest.scenes {
            let Some(viewport) = mounts.get(&entry.mount) else {
                tracing::debug!(mount = %entry.mount, "mount not present, scene skipped");
                continue;
            };

            let seed = stable_hash64(manifest.seed, &entry.mount);
            let scene: Box<dyn AnimatedScene> = match &entry.kind {
                SceneKind::CityGrid(p) => Box::new(SceneInstance::mounted(
                    &entry.mount,
                    seed,
                    CityGridScene::new(p.clone()),
                    viewport,
                )?),
                SceneKind::Starfield(p) => Box::new(SceneInstance::mounted(
                    &entry.mount,
                    seed,
                    StarfieldScene::new(p.clone()),
                    viewport,
                )?),
                SceneKind::WorldMap(p) => Box::new(SceneInstance::mounted(
                    &entry.mount,
                    seed,
                    WorldMapScene::new(p.clone()),
                    viewport,
                )?),
                SceneKind::VenueMap(p) => Box::new(SceneInstance::mounted(
                    &entry.mount,
                    seed,
                    VenueMapScene::new(p.clone()),
                    viewport,
                )?),
                SceneKind::DriftField(p) => Box::new(SceneInstance::mounted(
                    &entry.mount,
                    seed,
                    DriftFieldScene::new(p.clone()),
                    viewport,
                )?),
            };
            tracing::debug!(mount = %entry.mount, entities = scene.entity_count(), "scene mounted");
            scenes.push(scene);
        }

        Ok(Self {
            fps: manifest.fps,
            frame: FrameIndex(0),
            scenes,
            reveals: RevealRunner::new(manifest.reveals.clone())?,
            stats: LiveStatBoard::new(manifest.stats.clone(), manifest.seed)?,
        })
    }

    /// Advance every component by one frame.
    #[tracing::instrument(skip(self), fields(frame = self.frame.0))]
    pub fn advance(&mut self, input: InputSample) {
        let input = input.clamped();
        let dt = self.fps.frame_duration_secs();

        for scene in &mut self.scenes {
            scene.advance(self.frame, dt, input);
        }
        self.reveals.advance(dt, input.scroll_progress);
        self.stats.advance(dt);

        self.frame = FrameIndex(self.frame.0 + 1);
    }

    pub fn frame_index(&self) -> FrameIndex {
        self.frame
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.frame.0)
    }

    /// The current pixels of one mounted scene.
    pub fn scene_frame(&self, mount: &str) -> Option<&PixelSurface> {
        self.scenes
            .iter()
            .find(|s| s.mount() == mount)
            .map(|s| s.frame())
    }

    pub fn scene_entity_count(&self, mount: &str) -> Option<usize> {
        self.scenes
            .iter()
            .find(|s| s.mount() == mount)
            .map(|s| s.entity_count())
    }

    pub fn mounted(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|s| s.mount())
    }

    /// Resize one mount; unknown mounts are ignored, like the original
    /// page's resize handler on absent elements.
    pub fn resize(&mut self, mount: &str, viewport: Viewport) -> NiteglowResult<()> {
        match self.scenes.iter_mut().find(|s| s.mount() == mount) {
            Some(scene) => scene.resize(viewport),
            None => {
                tracing::debug!(mount = %mount, "resize on unknown mount ignored");
                Ok(())
            }
        }
    }

    pub fn reveal_style(&self, group: &str, member: usize) -> Option<RevealStyle> {
        self.reveals.style(group, member)
    }

    pub fn reveal_settled(&self, group: &str) -> bool {
        self.reveals.is_settled(group)
    }

    pub fn stat_text(&self, id: &str) -> Option<&str> {
        self.stats.text(id)
    }

    pub fn stat_value(&self, id: &str) -> Option<f64> {
        self.stats.value(id)
    }

    pub fn stat_ids(&self) -> impl Iterator<Item = &str> {
        self.stats.ids()
    }
}

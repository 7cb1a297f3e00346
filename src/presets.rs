//! The NITE landing page, as data: every scene, reveal group, and stat the
//! page ships with, in one programmatic preset.

use crate::{
    core::{Fps, Vec2, Viewport},
    ease::Ease,
    model::{PageManifest, SceneEntry, SceneKind},
    reveal::{RevealGroup, RevealTrigger},
    scenes::{
        CityGridParams, DriftFieldParams, StarfieldParams, VenueMapParams, WorldMapParams,
    },
    stage::MountSet,
    stats::StatSpec,
};

/// "NITE" in ASCII; any seed works, this one is recognizable in dumps.
pub const PAGE_SEED: u64 = 0x4E49_5445;

/// The full landing-page manifest.
pub fn nite_page() -> PageManifest {
    PageManifest {
        fps: Fps { num: 60, den: 1 },
        seed: PAGE_SEED,
        scenes: scenes(),
        reveals: reveals(),
        stats: stats(),
    }
}

/// Default mount sizes matching the page layout.
pub fn nite_mounts() -> MountSet {
    let mut mounts = MountSet::new();
    mounts.insert("hero-canvas", Viewport::new(1280, 720));
    mounts.insert("problem-canvas", Viewport::new(960, 540));
    mounts.insert("vision-canvas", Viewport::new(1280, 720));
    mounts.insert("gameplay-canvas", Viewport::new(800, 400));
    for i in 1..=4 {
        mounts.insert(format!("step-{i}-visual"), Viewport::new(480, 320));
    }
    mounts
}

fn scenes() -> Vec<SceneEntry> {
    // Step visuals cycle violet, amber, cyan, violet.
    let step_hues = [280.0, 35.0, 180.0, 280.0];

    let mut scenes = vec![
        SceneEntry {
            mount: "hero-canvas".to_string(),
            kind: SceneKind::CityGrid(CityGridParams::default()),
        },
        SceneEntry {
            mount: "problem-canvas".to_string(),
            kind: SceneKind::Starfield(StarfieldParams::default()),
        },
        SceneEntry {
            mount: "vision-canvas".to_string(),
            kind: SceneKind::WorldMap(WorldMapParams::default()),
        },
        SceneEntry {
            mount: "gameplay-canvas".to_string(),
            kind: SceneKind::VenueMap(VenueMapParams::default()),
        },
    ];

    for (i, hue) in step_hues.into_iter().enumerate() {
        scenes.push(SceneEntry {
            mount: format!("step-{}-visual", i + 1),
            kind: SceneKind::DriftField(DriftFieldParams {
                hue_deg: hue,
                ..DriftFieldParams::default()
            }),
        });
    }

    scenes
}

fn reveals() -> Vec<RevealGroup> {
    let load = |name: &str, delay: f64, duration: f64| RevealGroup {
        name: name.to_string(),
        trigger: RevealTrigger::AfterLoad { delay_secs: delay },
        members: 1,
        stagger_secs: 0.0,
        duration_secs: duration,
        ease: Ease::OutCubic,
        hidden_offset: Vec2::new(0.0, 30.0),
    };

    let scroll = |name: &str,
                  progress: f64,
                  members: usize,
                  stagger: f64,
                  duration: f64,
                  hidden: Vec2| RevealGroup {
        name: name.to_string(),
        trigger: RevealTrigger::ScrollDepth { progress },
        members,
        stagger_secs: stagger,
        duration_secs: duration,
        ease: Ease::OutQuad,
        hidden_offset: hidden,
    };

    vec![
        // Hero intro plays on load, headline first.
        load("hero-headline", 0.5, 1.2),
        load("hero-subtext", 0.9, 1.0),
        load("hero-cta", 1.3, 1.0),
        // Section content slides in as each section scrolls into view.
        scroll("problem-list", 0.18, 4, 0.15, 0.8, Vec2::new(-40.0, 0.0)),
        scroll("data-layers", 0.32, 3, 0.1, 0.8, Vec2::new(0.0, 30.0)),
        scroll("monetization-cards", 0.45, 3, 0.1, 0.8, Vec2::new(0.0, 30.0)),
        scroll("section-headers", 0.08, 6, 0.1, 1.0, Vec2::new(0.0, 30.0)),
        scroll("gameplay-features", 0.55, 4, 0.1, 0.6, Vec2::new(0.0, 20.0)),
        scroll("how-it-works-steps", 0.68, 4, 0.15, 0.8, Vec2::new(50.0, 0.0)),
        scroll("vision-text", 0.8, 1, 0.0, 1.2, Vec2::new(0.0, 30.0)),
    ]
}

fn stats() -> Vec<StatSpec> {
    let stat = |id: &str, min: f64, max: f64, decimals: u8, suffix: &str| StatSpec {
        id: id.to_string(),
        min,
        max,
        decimals,
        suffix: suffix.to_string(),
    };

    vec![
        stat("stat-visitors", 180.0, 320.0, 0, ""),
        stat("stat-energy", 6.5, 9.5, 1, ""),
        stat("stat-wait", 5.0, 25.0, 0, "m"),
        stat("stat-rating", 4.2, 4.9, 1, ""),
    ]
}

use niteglow::{InputSample, MountSet, Stage, Viewport, core::Vec2, presets};

fn painted(stage: &Stage, mount: &str) -> usize {
    stage
        .scene_frame(mount)
        .unwrap()
        .data()
        .chunks_exact(4)
        .filter(|px| px[3] != 0)
        .count()
}

fn stage_with(mount: &str) -> Stage {
    let mounts = MountSet::new().with(mount, Viewport::new(96, 54));
    Stage::build(&presets::nite_page(), &mounts).unwrap()
}

fn input(scroll: f64) -> InputSample {
    InputSample {
        scroll_progress: scroll,
        pointer: Vec2::new(0.5, 0.5),
    }
}

#[test]
fn every_preset_scene_renders_nonempty() {
    let page = presets::nite_page();
    for entry in &page.scenes {
        let mut stage = stage_with(&entry.mount);
        for _ in 0..5 {
            stage.advance(input(0.5));
        }
        assert!(painted(&stage, &entry.mount) > 0, "{} is blank", entry.mount);
    }
}

#[test]
fn hero_fills_the_whole_surface() {
    let mut stage = stage_with("hero-canvas");
    stage.advance(input(0.0));
    // Opaque clear plus geometry: every pixel carries alpha.
    let frame = stage.scene_frame("hero-canvas").unwrap();
    assert!(frame.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn world_map_lights_up_with_scroll() {
    let mut dormant = stage_with("vision-canvas");
    let mut lit = stage_with("vision-canvas");

    for _ in 0..10 {
        dormant.advance(input(0.0));
        lit.advance(input(1.0));
    }

    // Glows and links dwarf the nine dim idle dots.
    assert!(painted(&lit, "vision-canvas") > painted(&dormant, "vision-canvas") * 3);
}

#[test]
fn starfield_trails_accumulate() {
    let mut stage = stage_with("problem-canvas");
    stage.advance(input(0.0));
    let first = painted(&stage, "problem-canvas");
    for _ in 0..30 {
        stage.advance(input(0.0));
    }
    let later = painted(&stage, "problem-canvas");
    assert!(later >= first);
    assert!(later > 0);
}

#[test]
fn frames_encode_as_png() {
    let mut stage = stage_with("gameplay-canvas");
    for _ in 0..3 {
        stage.advance(input(0.0));
    }
    let frame = stage.scene_frame("gameplay-canvas").unwrap();
    let img =
        image::RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .expect("buffer matches dimensions");

    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    assert!(!bytes.into_inner().is_empty());
}

#[test]
fn pointer_moves_the_avatar_between_runs() {
    let mut left = stage_with("gameplay-canvas");
    let mut right = stage_with("gameplay-canvas");

    for _ in 0..60 {
        left.advance(InputSample {
            scroll_progress: 0.0,
            pointer: Vec2::new(0.1, 0.5),
        });
        right.advance(InputSample {
            scroll_progress: 0.0,
            pointer: Vec2::new(0.9, 0.5),
        });
    }

    assert_ne!(
        left.scene_frame("gameplay-canvas").unwrap().data(),
        right.scene_frame("gameplay-canvas").unwrap().data()
    );
}

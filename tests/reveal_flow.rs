use niteglow::{InputSample, MountSet, Stage, core::Vec2, presets};

fn advance_secs(stage: &mut Stage, secs: f64, scroll: f64) {
    let frames = (secs * 60.0).round() as u64;
    for _ in 0..frames {
        stage.advance(InputSample {
            scroll_progress: scroll,
            pointer: Vec2::new(0.5, 0.5),
        });
    }
}

#[test]
fn hero_intro_settles_without_any_scrolling() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();

    // Before the headline delay elapses everything is still hidden.
    advance_secs(&mut stage, 0.3, 0.0);
    assert_eq!(stage.reveal_style("hero-headline", 0).unwrap().opacity, 0.0);

    // Latest finisher: cta at delay 1.3 + duration 1.0.
    advance_secs(&mut stage, 3.0, 0.0);
    assert!(stage.reveal_settled("hero-headline"));
    assert!(stage.reveal_settled("hero-subtext"));
    assert!(stage.reveal_settled("hero-cta"));
}

#[test]
fn scroll_groups_fire_exactly_once() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();

    // Stay above the problem-list threshold: still hidden.
    advance_secs(&mut stage, 1.0, 0.1);
    let style = stage.reveal_style("problem-list", 0).unwrap();
    assert_eq!(style.opacity, 0.0);
    assert_eq!(style.offset, Vec2::new(-40.0, 0.0));

    // Cross the threshold, then scroll straight back to the top.
    advance_secs(&mut stage, 0.1, 0.25);
    advance_secs(&mut stage, 5.0, 0.0);

    // Fired once, fully settled, and no reverse on the way back up.
    assert!(stage.reveal_settled("problem-list"));
    for member in 0..4 {
        let s = stage.reveal_style("problem-list", member).unwrap();
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.offset, Vec2::ZERO);
    }

    // Crossing again later changes nothing.
    advance_secs(&mut stage, 0.5, 0.9);
    assert!(stage.reveal_style("problem-list", 0).unwrap().opacity == 1.0);
}

#[test]
fn deep_scroll_arms_every_scroll_group() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();
    advance_secs(&mut stage, 0.5, 1.0);
    advance_secs(&mut stage, 5.0, 1.0);

    for group in [
        "problem-list",
        "data-layers",
        "monetization-cards",
        "section-headers",
        "gameplay-features",
        "how-it-works-steps",
        "vision-text",
    ] {
        assert!(stage.reveal_settled(group), "{group} did not settle");
    }
}

#[test]
fn shallow_scroll_leaves_deep_groups_hidden() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();
    advance_secs(&mut stage, 5.0, 0.3);

    assert!(stage.reveal_settled("problem-list"));
    assert_eq!(stage.reveal_style("vision-text", 0).unwrap().opacity, 0.0);
    assert_eq!(
        stage.reveal_style("gameplay-features", 0).unwrap().opacity,
        0.0
    );
}

#[test]
fn unknown_reveal_targets_are_none() {
    let stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();
    assert!(stage.reveal_style("no-such-group", 0).is_none());
    assert!(stage.reveal_style("problem-list", 99).is_none());
}

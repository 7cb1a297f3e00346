use niteglow::{InputSample, MountSet, Stage, presets};

#[test]
fn dashboard_values_always_stay_in_their_ranges() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();

    // A minute of simulated time crosses every stat's tick period many times.
    for _ in 0..3600 {
        stage.advance(InputSample::default());

        let visitors = stage.stat_value("stat-visitors").unwrap();
        assert!((180.0..320.0).contains(&visitors));

        let energy = stage.stat_value("stat-energy").unwrap();
        assert!((6.5..9.5).contains(&energy));

        let wait = stage.stat_value("stat-wait").unwrap();
        assert!((5.0..25.0).contains(&wait));

        let rating = stage.stat_value("stat-rating").unwrap();
        assert!((4.2..4.9).contains(&rating));
    }
}

#[test]
fn display_text_matches_each_spec_format() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();
    for _ in 0..600 {
        stage.advance(InputSample::default());
    }

    // Integer stat, no suffix.
    let visitors = stage.stat_text("stat-visitors").unwrap();
    assert!(visitors.parse::<i64>().is_ok(), "visitors: {visitors}");

    // One decimal place.
    let energy = stage.stat_text("stat-energy").unwrap();
    let (_, frac) = energy.split_once('.').expect("energy has a decimal point");
    assert_eq!(frac.len(), 1, "energy: {energy}");

    // Integer with the minutes suffix.
    let wait = stage.stat_text("stat-wait").unwrap();
    let bare = wait.strip_suffix('m').expect("wait ends in m");
    assert!(bare.parse::<i64>().is_ok(), "wait: {wait}");

    let rating = stage.stat_text("stat-rating").unwrap();
    assert!(rating.parse::<f64>().is_ok(), "rating: {rating}");
}

#[test]
fn values_change_over_time() {
    let mut stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();

    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..3600 {
        stage.advance(InputSample::default());
        seen.insert(stage.stat_text("stat-visitors").unwrap().to_string());
    }
    assert!(seen.len() > 3, "stat never ticked: {seen:?}");
}

#[test]
fn unknown_stat_id_is_none() {
    let stage = Stage::build(&presets::nite_page(), &MountSet::new()).unwrap();
    assert!(stage.stat_text("stat-nope").is_none());
    assert!(stage.stat_value("stat-nope").is_none());
}

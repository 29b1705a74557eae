// Integration tests (native) for the `folio-widgets` crate.
// These exercise the pure radar and game logic through the public API so they
// run under `cargo test` on the host.

use folio_widgets::config::SiteConfig;
use folio_widgets::game::clock::SessionDriver;
use folio_widgets::game::{GameEvent, GameRules, GameSession, Phase, PlayArea};
use folio_widgets::radar::{DrawCommand, RadarOptions, SurfaceSize, render};
use folio_widgets::skills::{Category, Skill, skill_names};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn two_skills() -> Vec<Skill> {
    vec![
        Skill::new("A", 100, Category::Frontend),
        Skill::new("B", 0, Category::Backend),
    ]
}

#[test]
fn radar_scenario_full_and_empty_axis() {
    let size = SurfaceSize::new(500.0, 400.0);
    let cmds = render(&two_skills(), 1.0, size, &RadarOptions::default());
    let verts = cmds
        .iter()
        .find_map(|c| match c {
            DrawCommand::Polygon { vertices } => Some(vertices.clone()),
            _ => None,
        })
        .expect("polygon");
    let center = size.center();
    assert!((verts[0].distance(center) - size.axis_length()).abs() < 1e-9);
    assert!(verts[1].distance(center) < 1e-9);
    let markers = cmds
        .iter()
        .filter(|c| matches!(c, DrawCommand::Marker { .. }))
        .count();
    assert_eq!(markers, 2);
}

#[test]
fn radar_redraw_after_resize_uses_new_geometry() {
    let skills = two_skills();
    let opts = RadarOptions::default();
    let small = render(&skills, 1.0, SurfaceSize::new(200.0, 200.0), &opts);
    let large = render(&skills, 1.0, SurfaceSize::new(800.0, 600.0), &opts);
    assert_ne!(small, large);
    assert_eq!(
        large[0],
        DrawCommand::Clear {
            width: 800.0,
            height: 600.0
        }
    );
}

#[test]
fn full_session_through_driver_keeps_invariants() {
    let cfg = SiteConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut session = GameSession::new(skill_names(&cfg.skills), cfg.game.clone());
    let mut driver = SessionDriver::new();
    let area = PlayArea::new(800.0, 400.0);
    assert!(driver.start(&mut session, 0.0, &mut rng));

    // Simulated 60 fps loop; click every live target whose name matches.
    let mut now = 0.0;
    let mut last_time = session.time_remaining();
    while session.is_running() {
        now += 16.0;
        driver.advance(now, &mut session, area, &mut rng);
        assert!(session.target_count() <= 10);
        assert!(session.time_remaining() <= last_time);
        last_time = session.time_remaining();
        if session.is_running() {
            let active = session.active_skill().expect("active while running").to_string();
            assert!(cfg.skills.iter().any(|s| s.name == active));
            let wanted: Vec<u64> = session
                .targets()
                .filter(|t| t.skill_name == active)
                .map(|t| t.id)
                .collect();
            for id in wanted {
                let before = session.score();
                let out = session.hit(id).expect("live target");
                assert!(out.correct);
                assert_eq!(session.score(), before + 10);
            }
        }
    }
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.time_remaining(), 0);
    assert!(session.active_skill().is_none());
    assert!((30_000.0..30_100.0).contains(&now));
}

#[test]
fn wrong_clicks_never_push_score_below_zero() {
    let mut rng = StdRng::seed_from_u64(77);
    let skills = vec!["React".to_string(), "Vue".to_string()];
    let mut session = GameSession::new(skills, GameRules::default());
    let area = PlayArea::new(640.0, 400.0);
    session.apply(GameEvent::Start, area, &mut rng);
    for _ in 0..40 {
        session.apply(GameEvent::SpawnTick, area, &mut rng);
        let active = session.active_skill().unwrap().to_string();
        let wrong = session
            .targets()
            .find(|t| t.skill_name != active)
            .map(|t| t.id);
        if let Some(id) = wrong {
            session.apply(GameEvent::Hit(id), area, &mut rng);
        }
        // score is unsigned; make sure it stayed at the clamp
        assert_eq!(session.score(), 0);
    }
}

#[test]
fn configured_rules_drive_the_session_length() {
    let cfg = SiteConfig::from_json(r#"{"game": {"duration_secs": 5}}"#).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut session = GameSession::new(skill_names(&cfg.skills), cfg.game);
    let mut driver = SessionDriver::new();
    driver.start(&mut session, 1_000.0, &mut rng);
    driver.advance(5_999.0, &mut session, PlayArea::new(400.0, 400.0), &mut rng);
    assert!(session.is_running());
    driver.advance(6_000.0, &mut session, PlayArea::new(400.0, 400.0), &mut rng);
    assert_eq!(session.phase(), Phase::Completed);
}

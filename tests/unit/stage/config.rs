use super::*;

const MINIMAL: &str = r#"{
    "scenes": [
        {
            "name": "main",
            "templates": [
                { "name": "ball", "geometry": { "kind": "sphere", "radius": 1 }, "material": { "color": [255, 255, 255] } }
            ]
        }
    ]
}"#;

#[test]
fn defaults_fill_in_a_minimal_config() {
    let config = StageConfig::from_json_str(MINIMAL).unwrap();
    assert_eq!(config.canvas, Size::new(1920.0, 1080.0));
    assert_eq!(config.viewports, ViewportGrid::default());
    let scene = &config.scenes[0];
    assert_eq!(scene.distance, 5.0);
    assert_eq!(scene.transition_ms, 600.0);
    assert!(!scene.random_pick);
    assert_eq!(scene.slide.ease, Ease::InOutElastic);
    assert_eq!(scene.signal, SpanKind::Beat);
    assert_eq!(scene.trigger, TriggerMode::Wrap);
    assert!(scene.particles.is_none());
}

#[test]
fn round_trips_through_json() {
    let config = StageConfig::from_json_str(MINIMAL).unwrap();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(StageConfig::from_json_str(&text).unwrap(), config);
}

#[test]
fn scenes_must_fit_the_viewport_grid() {
    let mut config = StageConfig::from_json_str(MINIMAL).unwrap();
    let mut second = config.scenes[0].clone();
    second.name = "second".to_string();
    config.scenes.push(second);
    assert!(config.validate().is_err());

    config.viewports = ViewportGrid {
        cols: 2,
        rows: 1,
        gap: 0.0,
    };
    config.validate().unwrap();
}

#[test]
fn duplicate_names_are_rejected() {
    let mut config = StageConfig::from_json_str(MINIMAL).unwrap();
    config.viewports.cols = 2;
    config.scenes.push(config.scenes[0].clone());
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn scene_fields_are_checked() {
    let base = StageConfig::from_json_str(MINIMAL).unwrap().scenes[0].clone();

    let mut s = base.clone();
    s.templates.clear();
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.distance = 0.0;
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.transition_ms = f64::NAN;
    assert!(s.validate().is_err());

    let mut s = base;
    s.trigger = TriggerMode::Crossing { at: 2.0 };
    assert!(s.validate().is_err());
}

#[test]
fn particle_layouts_must_agree_on_count() {
    let particles = ParticleConfig {
        layouts: vec![
            InstanceLayout::Ring {
                count: 8,
                radius: 1.0,
            },
            InstanceLayout::SphereSurface {
                count: 9,
                radius: 1.0,
            },
        ],
        morph_ms: 100.0,
        ease: Ease::Linear,
        seed: 0,
    };
    assert!(particles.validate().is_err());

    let empty = ParticleConfig {
        layouts: vec![],
        ..particles
    };
    assert!(empty.validate().is_err());
}

#[test]
fn empty_stage_is_rejected() {
    assert!(StageConfig::from_json_str(r#"{ "scenes": [] }"#).is_err());
    assert!(matches!(
        StageConfig::from_json_str(r#"{ "scenes": 3 }"#).unwrap_err(),
        SlideError::Serde(_)
    ));
}

#[test]
fn oversized_particle_grid_is_a_validation_error() {
    let text = r#"{
        "scenes": [
            {
                "name": "main",
                "templates": [
                    { "name": "ball", "geometry": { "kind": "sphere", "radius": 1 }, "material": { "color": [255, 255, 255] } }
                ],
                "particles": {
                    "layouts": [
                        { "kind": "grid", "cols": 4294967296, "rows": 4294967296, "spacing": 1.0 }
                    ]
                }
            }
        ]
    }"#;
    assert!(matches!(
        StageConfig::from_json_str(text).unwrap_err(),
        SlideError::Validation(_)
    ));
}

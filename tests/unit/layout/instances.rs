use super::*;

fn ring(count: usize) -> InstanceLayout {
    InstanceLayout::Ring { count, radius: 1.0 }
}

#[test]
fn grid_count_multiplies_dimensions() {
    let layout: InstanceLayout =
        serde_json::from_str(r#"{ "kind": "grid", "cols": 4, "rows": 3, "spacing": 0.5 }"#)
            .unwrap();
    assert_eq!(layout.count(), 12);
    layout.validate().unwrap();
}

#[test]
fn invalid_layouts_are_rejected() {
    assert!(ring(0).validate().is_err());
    assert!(
        InstanceLayout::SphereSurface {
            count: 10,
            radius: -1.0
        }
        .validate()
        .is_err()
    );
}

#[test]
fn oversized_layouts_fail_validation() {
    let huge: InstanceLayout = serde_json::from_str(
        r#"{ "kind": "grid", "cols": 4294967296, "rows": 4294967296, "spacing": 1.0 }"#,
    )
    .unwrap();
    assert_eq!(huge.count(), usize::MAX);
    assert!(matches!(huge.validate().unwrap_err(), SlideError::Validation(_)));

    let at_limit = ring(InstanceLayout::MAX_INSTANCES);
    at_limit.validate().unwrap();
    assert!(ring(InstanceLayout::MAX_INSTANCES + 1).validate().is_err());
    assert!(
        InstanceLayout::SphereVolume {
            count: usize::MAX,
            radius: 1.0
        }
        .validate()
        .is_err()
    );
}

#[test]
fn same_seed_gives_same_field() {
    let layout = InstanceLayout::SphereVolume {
        count: 32,
        radius: 5.0,
    };
    let a = InstanceField::new(layout.clone(), 99).unwrap();
    let b = InstanceField::new(layout, 99).unwrap();
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.len(), 32);
}

#[test]
fn morph_reaches_the_target_layout() {
    let mut field = InstanceField::new(ring(4), 0).unwrap();
    let target = InstanceLayout::Grid {
        cols: 2,
        rows: 2,
        layers: 1,
        spacing: 2.0,
    };
    field.morph_to(target.clone(), 500.0, Ease::InOutCubic).unwrap();
    assert!(field.is_morphing());

    assert!(!field.update(ClockMs(250.0)));
    assert!(field.is_morphing());

    assert!(field.update(ClockMs(500.0)));
    assert!(!field.is_morphing());
    assert_eq!(field.layout(), &target);
    assert_eq!(field.positions()[0], Vec3::new(-1.0, -1.0, 0.0));
    assert_eq!(field.positions()[3], Vec3::new(1.0, 1.0, 0.0));

    assert!(!field.update(ClockMs(600.0)));
}

#[test]
fn morph_rejects_count_changes() {
    let mut field = InstanceField::new(ring(4), 0).unwrap();
    assert!(field.morph_to(ring(5), 100.0, Ease::Linear).is_err());
    assert!(!field.is_morphing());
    assert_eq!(field.layout(), &ring(4));
}

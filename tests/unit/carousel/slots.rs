use super::*;

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(Vec3::new(0.0, 0.0, 10.0), 90.0, 2.0).unwrap()
}

#[test]
fn viewing_is_in_front_of_the_camera() {
    let slots = SlotPositions::from_camera(&camera(), 4.0, SlideAxis::Horizontal).unwrap();
    assert_eq!(slots.viewing, Vec3::new(0.0, 0.0, 6.0));
}

#[test]
fn horizontal_offset_is_one_frustum_width() {
    let slots = SlotPositions::from_camera(&camera(), 4.0, SlideAxis::Horizontal).unwrap();
    // tan(45deg) * 4 * 2 = 8 high, 16 wide at aspect 2
    assert!((slots.staging - Vec3::new(16.0, 0.0, 6.0)).norm() < 1e-9);
    assert!((slots.exit - Vec3::new(-16.0, 0.0, 6.0)).norm() < 1e-9);
}

#[test]
fn vertical_offset_is_one_frustum_height() {
    let slots = SlotPositions::from_camera(&camera(), 4.0, SlideAxis::Vertical).unwrap();
    assert!((slots.staging - Vec3::new(0.0, -8.0, 6.0)).norm() < 1e-9);
    assert!((slots.exit - Vec3::new(0.0, 8.0, 6.0)).norm() < 1e-9);
}

#[test]
fn rejects_non_positive_distance() {
    assert!(SlotPositions::from_camera(&camera(), 0.0, SlideAxis::Horizontal).is_err());
    assert!(SlotPositions::from_camera(&camera(), f64::NAN, SlideAxis::Horizontal).is_err());
}

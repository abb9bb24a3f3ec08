use super::*;
use crate::scene::mesh::{Geometry, Material, Mesh, Shape};

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.5).unwrap()
}

fn mesh(name: &str) -> Mesh {
    Mesh::new(
        name,
        Geometry::new(Shape::Sphere { radius: 1.0 }).unwrap(),
        Material::solid([200, 200, 200]),
    )
}

fn carousel(n: usize) -> MeshSlide<Mesh> {
    let templates: Vec<Mesh> = (0..n).map(|i| mesh(&format!("m{i}"))).collect();
    let options = SlideOptions {
        seed: Some(7),
        ..SlideOptions::default()
    };
    MeshSlide::with_options(&camera(), 3.0, &templates, options).unwrap()
}

fn cube() -> Geometry {
    Geometry::new(Shape::Box {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    })
    .unwrap()
}

/// Run one full transition starting at `t` and return the completion time.
fn cycle(slide: &mut MeshSlide<Mesh>, t: f64, random: bool) -> f64 {
    slide.sync(ClockMs(t));
    assert!(matches!(
        slide.advance(100.0, random).unwrap(),
        AdvanceOutcome::Started { .. }
    ));
    assert!(slide.update(ClockMs(t + 100.0)).is_some());
    t + 100.0
}

#[test]
fn construction_places_first_at_viewing_rest_at_staging() {
    let slide = carousel(3);
    assert_eq!(slide.count(), 3);
    assert_eq!(slide.current_index(), 0);
    assert!(!slide.is_transitioning());
    assert_eq!(slide.object_at(0).unwrap().position, slide.viewing_position());
    assert_eq!(slide.object_at(1).unwrap().position, slide.staging_position());
    assert_eq!(slide.object_at(2).unwrap().position, slide.staging_position());
    assert_eq!(slide.visible_objects().count(), 1);
}

#[test]
fn construction_rejects_empty_templates() {
    let err = MeshSlide::<Mesh>::new(&camera(), 3.0, &[]).unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));
}

#[test]
fn sequential_advance_moves_to_successor_for_all_sizes() {
    for n in 2..=5 {
        let mut slide = carousel(n);
        let mut t = 0.0;
        for step in 1..=(2 * n) {
            t = cycle(&mut slide, t, false);
            assert_eq!(slide.current_index(), step % n, "n={n} step={step}");
        }
    }
}

#[test]
fn random_advance_never_repeats_and_spreads_evenly() {
    let mut slide = carousel(4);
    let mut hits = [0usize; 4];
    let mut t = 0.0;
    for _ in 0..2_000 {
        let before = slide.current_index();
        t = cycle(&mut slide, t, true);
        let after = slide.current_index();
        assert_ne!(before, after);
        hits[after] += 1;
    }
    for count in hits {
        assert!((400..=600).contains(&count), "{hits:?}");
    }
}

#[test]
fn random_advance_with_two_objects_alternates() {
    let mut slide = carousel(2);
    let mut t = 0.0;
    for step in 1..=10 {
        t = cycle(&mut slide, t, true);
        assert_eq!(slide.current_index(), step % 2);
    }
}

#[test]
fn advance_while_transitioning_is_a_no_op() {
    let mut slide = carousel(3);
    slide.advance(300.0, false).unwrap();
    slide.update(ClockMs(100.0));

    let positions: Vec<Vec3> = slide.objects().map(|m| m.position).collect();
    assert_eq!(slide.advance(300.0, true).unwrap(), AdvanceOutcome::Busy);
    assert_eq!(slide.current_index(), 0);
    assert!(slide.is_transitioning());
    let after: Vec<Vec3> = slide.objects().map(|m| m.position).collect();
    assert_eq!(positions, after);
    assert_eq!(slide.entry_at(2).unwrap().state, SlotState::Staging);
}

#[test]
fn three_object_scenario_at_300ms() {
    let mut slide = carousel(3);
    assert_eq!(
        slide.advance(300.0, false).unwrap(),
        AdvanceOutcome::Started { from: 0, to: 1 }
    );

    assert!(slide.update(ClockMs(150.0)).is_none());
    assert!(slide.is_transitioning());
    assert_eq!(slide.visible_objects().count(), 2);

    let done = slide.update(ClockMs(300.5)).unwrap();
    assert_eq!((done.from, done.to), (0, 1));
    assert!(!slide.is_transitioning());
    assert_eq!(slide.object_at(1).unwrap().position, slide.viewing_position());
    assert_eq!(slide.object_at(0).unwrap().position, slide.staging_position());
    assert_eq!(slide.entry_at(0).unwrap().state, SlotState::Staging);
    assert_eq!(slide.visible_objects().count(), 1);
}

#[test]
fn single_object_advance_is_a_usage_error() {
    let mut slide = carousel(1);
    let err = slide.advance(300.0, false).unwrap_err();
    assert!(matches!(err, SlideError::Usage(_)));
    assert_eq!(slide.current_index(), 0);
    assert!(!slide.is_transitioning());
}

#[test]
fn bad_duration_leaves_state_untouched() {
    let mut slide = carousel(3);
    assert!(slide.advance(-5.0, false).is_err());
    assert!(!slide.is_transitioning());
    assert_eq!(slide.entry_at(0).unwrap().state, SlotState::Viewing);
    assert_eq!(slide.entry_at(1).unwrap().state, SlotState::Staging);
}

#[test]
fn zero_duration_completes_on_next_update() {
    let mut slide = carousel(2);
    slide.advance(0.0, false).unwrap();
    assert!(slide.is_transitioning());
    let done = slide.update(ClockMs(0.0)).unwrap();
    assert_eq!(done.to, 1);
}

#[test]
fn geometry_change_on_parked_object_applies_immediately() {
    let mut slide = carousel(3);
    assert_eq!(
        slide.set_geometry_at(2, cube()).unwrap(),
        ChangeOutcome::Applied
    );
    assert_eq!(slide.object_at(2).unwrap().geometry, cube());
    assert!(slide.entry_at(2).unwrap().pending.is_empty());
}

#[test]
fn geometry_change_on_visible_object_waits_for_transition() {
    let mut slide = carousel(3);
    assert_eq!(
        slide.set_geometry_at(0, cube()).unwrap(),
        ChangeOutcome::Deferred
    );
    assert_eq!(slide.object_at(0).unwrap().geometry.shape.kind(), "sphere");

    slide.advance(200.0, false).unwrap();
    slide.update(ClockMs(100.0));
    assert_eq!(slide.object_at(0).unwrap().geometry.shape.kind(), "sphere");

    let done = slide.update(ClockMs(200.0)).unwrap();
    assert_eq!(done.applied_changes, 1);
    assert_eq!(slide.object_at(0).unwrap().geometry, cube());
    assert!(slide.entry_at(0).unwrap().pending.is_empty());

    let t = cycle(&mut slide, 200.0, false);
    assert!(t > 200.0);
    assert_eq!(slide.object_at(0).unwrap().geometry, cube());
}

#[test]
fn change_on_entering_object_stays_deferred_while_it_is_shown() {
    let mut slide = carousel(3);
    slide.advance(200.0, false).unwrap();
    assert_eq!(
        slide
            .set_material_at(1, Material::wireframe([1, 2, 3]))
            .unwrap(),
        ChangeOutcome::Deferred
    );

    let done = slide.update(ClockMs(200.0)).unwrap();
    assert_eq!(done.applied_changes, 0);
    assert!(!slide.object_at(1).unwrap().material.wireframe);
    assert!(slide.entry_at(1).unwrap().pending.material.is_some());

    let done = {
        slide.advance(200.0, false).unwrap();
        slide.update(ClockMs(400.0)).unwrap()
    };
    assert_eq!(done.from, 1);
    assert_eq!(done.applied_changes, 1);
    assert!(slide.object_at(1).unwrap().material.wireframe);
}

#[test]
fn pushed_objects_join_the_rotation() {
    let mut slide = carousel(2);
    let index = slide.push(&mesh("late"));
    assert_eq!(index, 2);
    assert_eq!(slide.count(), 3);
    assert_eq!(
        slide.object_at(2).unwrap().position,
        slide.staging_position()
    );

    let mut t = 0.0;
    t = cycle(&mut slide, t, false);
    cycle(&mut slide, t, false);
    assert_eq!(slide.current_index(), 2);
    assert_eq!(slide.object_at(2).unwrap().name, "late");
}

#[test]
fn out_of_range_access_is_an_error() {
    let mut slide = carousel(2);
    assert!(matches!(
        slide.object_at(2).unwrap_err(),
        SlideError::IndexOutOfRange { index: 2, len: 2 }
    ));
    assert!(slide.set_geometry_at(9, cube()).is_err());
    assert!(slide.set_material_at(9, Material::solid([0, 0, 0])).is_err());
}

#[test]
fn advance_with_uses_the_given_ease_for_both_tweens() {
    let mut slide = carousel(3);
    slide.advance_with(200.0, false, Ease::Linear).unwrap();
    slide.update(ClockMs(50.0));

    let viewing = slide.viewing_position();
    let quarter_out = viewing + (slide.exit_position() - viewing) * 0.25;
    let quarter_in = slide.staging_position() + (viewing - slide.staging_position()) * 0.25;
    assert!((slide.object_at(0).unwrap().position - quarter_out).norm() < 1e-9);
    assert!((slide.object_at(1).unwrap().position - quarter_in).norm() < 1e-9);
}

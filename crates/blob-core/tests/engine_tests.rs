// Engine-level behavior: input priority, regeneration triggers, teardown.

use blob_core::constants::PAUSE_THRESHOLD_SEC;
use blob_core::*;
use glam::Vec2;

fn make_engine() -> BlobEngine {
    BlobEngine::new(BlobControls::default(), 42)
}

#[test]
fn pointer_beats_tilt_in_fused_direction() {
    let mut engine = make_engine();
    engine.set_tilt_permission(TiltPermission::Granted);
    engine.orientation_changed(Some(-45.0), Some(-45.0));
    engine.pointer_moved(Vec2::new(0.5, 0.5), 0.0);
    assert_eq!(engine.snapshot().direction, Vec2::new(0.5, 0.5));
}

#[test]
fn tilt_drives_blobs_when_pointer_absent() {
    let mut engine = make_engine();
    engine.set_tilt_permission(TiltPermission::Granted);
    engine.orientation_changed(Some(22.5), Some(45.0));
    assert_eq!(engine.snapshot().direction, Vec2::new(1.0, 0.5));
    engine.pointer_moved(Vec2::ZERO, 0.0);
    engine.pointer_left();
    assert_eq!(engine.snapshot().direction, Vec2::new(1.0, 0.5));
}

#[test]
fn tilt_takes_over_again_after_touch_lift() {
    let mut engine = make_engine();
    engine.set_tilt_permission(TiltPermission::Granted);
    engine.pointer_moved(Vec2::new(-0.4, 0.2), 0.0);
    engine.orientation_changed(Some(45.0), Some(-22.5));
    assert_eq!(engine.snapshot().direction, Vec2::new(-0.4, 0.2));

    engine.pointer_left();
    assert_eq!(engine.snapshot().direction, Vec2::new(-0.5, 1.0));

    // After teardown the last pointer state is frozen.
    engine.pointer_moved(Vec2::new(0.3, 0.3), 0.1);
    engine.teardown();
    engine.pointer_left();
    assert_eq!(engine.snapshot().direction, Vec2::new(0.3, 0.3));
}

#[test]
fn pause_then_resume_regenerates_exactly_once() {
    let mut engine = make_engine();
    let before = *engine.profiles();
    let g0 = engine.generation();

    engine.pointer_moved(Vec2::new(0.1, 0.1), 0.0);
    assert_eq!(engine.generation(), g0);

    // No samples for longer than the pause threshold; ticks keep running.
    let mut now = 0.0;
    while now < PAUSE_THRESHOLD_SEC + 0.15 {
        now += 0.05;
        engine.tick(now);
    }

    engine.pointer_moved(Vec2::new(0.5, -0.3), now);
    assert_eq!(engine.generation(), g0 + 1);
    let after = *engine.profiles();
    for i in 0..3 {
        assert_ne!(before[i], after[i], "blob {i} kept its profile");
    }

    // Continued movement without another pause does not regenerate again.
    engine.pointer_moved(Vec2::new(0.8, -0.3), now + 0.05);
    engine.pointer_moved(Vec2::new(-0.2, 0.4), now + 0.1);
    assert_eq!(engine.generation(), g0 + 1);
}

#[test]
fn pause_detected_without_intervening_ticks() {
    let mut engine = make_engine();
    engine.pointer_moved(Vec2::ZERO, 0.0);
    engine.pointer_moved(Vec2::new(0.5, 0.0), 1.0);
    assert_eq!(engine.generation(), 1);
}

#[test]
fn steady_movement_never_regenerates() {
    let mut engine = make_engine();
    for i in 0..40 {
        let t = i as f64 * 0.03;
        engine.pointer_moved(Vec2::new(-1.0 + i as f32 * 0.06, 0.0), t);
    }
    assert_eq!(engine.generation(), 0);
}

#[test]
fn press_regenerates_and_engages() {
    let mut engine = make_engine();
    let before = *engine.profiles();
    engine.press(Vec2::new(0.6, 0.0), 0.0);
    assert_eq!(engine.generation(), 1);
    assert_ne!(before, *engine.profiles());
    assert_eq!(engine.interaction.phase, InteractionPhase::Engaging);
    assert!((engine.snapshot().overlay.offset.x - 9.0).abs() < 1e-5);
}

#[test]
fn press_px_normalizes_against_viewport() {
    let mut engine = make_engine();
    engine.press_px(Vec2::new(800.0, 300.0), Vec2::new(1000.0, 600.0), 0.0);
    let target = engine.interaction.target.offset;
    assert!((target.x - 18.0).abs() < 1e-4);
    assert_eq!(target.y, 0.0);

    // Empty viewport: dropped, no new press.
    engine.press_px(Vec2::ONE, Vec2::ZERO, 0.1);
    assert_eq!(engine.generation(), 1);
}

#[test]
fn interaction_lifecycle_through_engine() {
    let mut engine = make_engine();
    engine.press(Vec2::new(-1.0, 0.5), 0.0);
    let duration = engine.controls.interaction_intensity as f64;
    let mut now = 0.0;
    while now < duration {
        now += 1.0 / 60.0;
        engine.step_interaction(now);
    }
    assert_eq!(engine.interaction.phase, InteractionPhase::Held);
    engine.release();
    for _ in 0..200 {
        now += 1.0 / 60.0;
        engine.step_interaction(now);
    }
    assert_eq!(engine.interaction.phase, InteractionPhase::Idle);
    assert_eq!(engine.snapshot().overlay, Overlay::IDENTITY);
}

#[test]
fn clock_scales_with_animation_speed() {
    let mut engine = make_engine();
    engine.controls.animation_speed = 2.0;
    for i in 0..100 {
        engine.tick(i as f64 * 0.05);
    }
    assert!((engine.clock.sim_time - 2.0).abs() < 1e-4);

    engine.controls.animation_speed = 0.0;
    let frozen = engine.transforms();
    engine.tick(10.0);
    assert_eq!(engine.transforms()[0].x, frozen[0].x);
}

#[test]
fn switching_variant_regenerates_with_new_response() {
    let mut engine = make_engine();
    let controls = BlobControls {
        engine: EngineVariant::Classic,
        ..engine.controls.clone()
    };
    engine.set_controls(controls);
    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.profiles()[1].input_multiplier_x, 0.85);
    assert!(engine.transforms().iter().all(|t| t.rotation.is_none()));

    // Same variant: plain update, no regeneration.
    let mut same = engine.controls.clone();
    same.blur_amount = 10.0;
    engine.set_controls(same);
    assert_eq!(engine.generation(), 1);
}

#[test]
fn teardown_is_idempotent_and_stops_regeneration() {
    let mut engine = make_engine();
    engine.pointer_moved(Vec2::ZERO, 0.0);
    engine.teardown();
    engine.teardown();
    assert!(engine.is_torn_down());
    assert!(!engine.input.pause_pending());

    let sim_time = engine.clock.sim_time;
    engine.tick(5.0);
    engine.pointer_moved(Vec2::ONE, 5.0);
    engine.press(Vec2::ONE, 5.0);
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.clock.sim_time, sim_time);
}

#[test]
fn snapshot_is_detached_from_later_events() {
    let mut engine = make_engine();
    let snap = engine.snapshot();
    engine.pointer_moved(Vec2::new(0.9, 0.9), 0.0);
    engine.press(Vec2::ONE, 0.0);
    assert_eq!(snap.direction, Vec2::ZERO);
    assert_eq!(snap.overlay, Overlay::IDENTITY);
    assert_ne!(snap.profiles, *engine.profiles());
}

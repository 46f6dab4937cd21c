//! End-to-end drawing scenarios through the public API.

use glam::Vec3;
use sculpting::{
    Compositor, ControllerSample, DrawingSession, SessionEvent, SessionState, StrokeAccumulator,
};
use smart_mesh::{BoundaryTag, StitchError, hemisphere_cap, placement, ring};
use tubebrush_config::SculptConfig;

fn sample(z: f32, trigger: bool) -> ControllerSample {
    ControllerSample::new(Vec3::new(0.0, 0.0, z), trigger)
}

#[test]
fn test_press_move_extrude_release() {
    let config = SculptConfig::default();
    let longitude = config.brush.longitude_segments as usize;
    let latitude = config.brush.latitude_segments as usize;
    let cap_triangles = longitude + 2 * longitude * (latitude - 1);

    let mut session = DrawingSession::new(&config).unwrap();

    session.update(sample(0.0, true)).unwrap();
    assert_eq!(session.state(), SessionState::Drawing);

    // Past the start threshold, short of the extrusion threshold
    let event = session.update(sample(0.2, true)).unwrap();
    assert!(matches!(event, Some(SessionEvent::CapPlaced { .. })));
    let acc = session.accumulator().unwrap();
    assert_eq!(acc.segment_count(), 1);
    assert_eq!(acc.open_boundary().len(), longitude);
    assert_eq!(acc.triangle_count(), cap_triangles);

    // 0.15 from the cap
    let event = session.update(sample(0.35, true)).unwrap();
    assert!(matches!(event, Some(SessionEvent::RingStitched { .. })));
    let acc = session.accumulator().unwrap();
    assert_eq!(acc.segment_count(), 2);
    assert_eq!(acc.triangle_count(), cap_triangles + 2 * longitude);
    let running = acc.triangle_count();

    let Some(SessionEvent::GestureFinished { stroke }) =
        session.update(sample(0.35, false)).unwrap()
    else {
        panic!("release should finish the gesture");
    };
    assert_eq!(stroke.mesh.triangle_count(), running);
    assert_eq!(stroke.mesh.open_count(), longitude);
    assert!(stroke.mesh.validate().is_ok());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.accumulator().is_none());
}

#[test]
fn test_long_stroke_stays_manifold() {
    let config = SculptConfig::default();
    let mut session = DrawingSession::new(&config).unwrap();

    session.update(ControllerSample::held(Vec3::ZERO)).unwrap();
    let mut stitched = 0;
    for k in 1..=60 {
        let t = k as f32 * 0.05;
        let p = Vec3::new(t.sin(), 0.3 * t, t.cos() - 1.0);
        if let Some(SessionEvent::RingStitched { .. }) =
            session.update(ControllerSample::held(p)).unwrap()
        {
            stitched += 1;
        }
    }
    assert!(stitched > 5);

    let Some(SessionEvent::GestureFinished { stroke }) = session
        .update(ControllerSample::released(Vec3::ZERO))
        .unwrap()
    else {
        panic!("release should finish the gesture");
    };
    assert_eq!(stroke.segment_count, stitched + 1);

    let mesh = &stroke.mesh;
    assert!(mesh.validate().is_ok());
    let longitude = config.brush.longitude_segments as usize;
    assert_eq!(mesh.open_count(), longitude);
    assert_eq!(mesh.closed_count(), mesh.vertex_count() - longitude);

    let render = Compositor::from_config(&config).render(mesh);
    assert_eq!(render.vertex_count(), mesh.vertex_count());
    assert_eq!(render.triangle_count(), mesh.triangle_count());
}

#[test]
fn test_mismatched_ring_is_rejected_without_mutation() {
    let mut acc = StrokeAccumulator::begin();
    acc.extend(hemisphere_cap(1.0, 12, 4).unwrap()).unwrap();
    let before = acc.mesh().clone();

    let mut wrong = ring(1.0, 16).unwrap();
    wrong.transform(&placement(Vec3::new(0.0, 0.5, 0.0), Vec3::Y));
    let err = acc.extend(wrong).unwrap_err();

    assert_eq!(
        err,
        StitchError::TopologyMismatch {
            boundary: 12,
            ring: 16
        }
    );
    assert_eq!(acc.mesh(), &before);
    assert_eq!(acc.segment_count(), 1);
    assert!(acc
        .open_boundary()
        .iter()
        .all(|id| acc.mesh().vertex(*id).unwrap().tag == BoundaryTag::Open));
}

//! Integration tests for editor camera zoom behaviour

use forge_engine::config::CameraConfig;
use forge_engine::core::camera::EditorCamera;

fn position_matches(camera: &EditorCamera) -> bool {
    let expected = camera.target() - camera.forward() * camera.distance();
    (camera.position() - expected).length() < 1e-4
}

#[test]
fn test_scenario_single_zoom_step() {
    let mut camera = EditorCamera::default();
    assert!((camera.distance() - 1.04).abs() < 1e-6);

    camera.zoom(1.0);
    assert!((camera.distance() - 0.936).abs() < 1e-5);
}

#[test]
fn test_zoom_sequences_stay_in_range() {
    let deltas = [1.0, -3.0, 0.5, 12.0, -40.0, 0.0, 7.5, -0.25, 100.0, -100.0];
    let mut camera = EditorCamera::from_config(&CameraConfig::default());

    for round in 0..50 {
        for (i, &delta) in deltas.iter().enumerate() {
            camera.zoom(delta * ((round + i) % 3) as f32);
            assert!(camera.distance() >= camera.min_distance());
            assert!(camera.distance() <= camera.max_distance());
            assert!(position_matches(&camera));
        }
    }
}

#[test]
fn test_view_projection_keeps_target_in_clip_space() {
    let camera = EditorCamera::default();
    let clip = camera
        .view_projection(16.0 / 9.0)
        .project_point3(camera.target());
    assert!(clip.x.abs() < 1e-4);
    assert!(clip.y.abs() < 1e-4);
    assert!(clip.z > 0.0 && clip.z < 1.0);
}

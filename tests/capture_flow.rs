use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use photomark::alert::AlertKind;
use photomark::camera::{Camera, CameraFacing, PermissionStatus, StillImageCamera};
use photomark::config::CameraConfig;
use photomark::error::CaptureError;
use photomark::screens::{CaptureScreen, Navigation};

// Writes a small still image to stand in for a camera sensor
fn still_image(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("photomark-capture-flow");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.png"));
    RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 255])).save(&path).unwrap();
    path
}

fn camera(back: Option<PathBuf>, front: Option<PathBuf>, grant: bool) -> StillImageCamera {
    StillImageCamera::new(&CameraConfig {
        back,
        front,
        grant_on_request: grant,
    })
}

#[test]
fn test_permission_must_be_granted_before_capture() {
    let camera = camera(Some(still_image("back")), None, true);
    let mut screen = CaptureScreen::default();

    assert_eq!(screen.take_photo(&camera), Err(CaptureError::PermissionDenied));
    screen.request_permission(&camera).unwrap();
    assert_eq!(screen.poll(), None);
    assert_eq!(camera.permission(), PermissionStatus::Granted);

    screen.take_photo(&camera).unwrap();
    match screen.poll() {
        Some(Navigation::ToEditor(image)) => assert!(image.to_path().unwrap().ends_with("back.png")),
        other => panic!("expected editor navigation, got {other:?}"),
    }
}

#[test]
fn test_denied_permission_is_persistent() {
    let camera = camera(Some(still_image("denied")), None, false);
    let mut screen = CaptureScreen::default();

    for _ in 0..3 {
        screen.request_permission(&camera).unwrap();
        screen.poll();
        assert_eq!(camera.permission(), PermissionStatus::Denied);
        assert_eq!(screen.take_photo(&camera), Err(CaptureError::PermissionDenied));
    }
}

#[test]
fn test_capture_failure_does_not_navigate() {
    let camera = camera(Some(PathBuf::from("/no/such/sensor.png")), None, true);
    let mut screen = CaptureScreen::default();
    screen.request_permission(&camera).unwrap();
    screen.poll();

    screen.take_photo(&camera).unwrap();
    assert_eq!(screen.poll(), None);
    assert_eq!(screen.alert().map(|a| a.kind), Some(AlertKind::Error));
    assert!(!screen.is_busy());
}

#[test]
fn test_capture_uses_selected_facing() {
    let camera = camera(Some(still_image("rear")), Some(still_image("selfie")), true);
    let mut screen = CaptureScreen::new(CameraFacing::Back);
    screen.request_permission(&camera).unwrap();
    screen.poll();

    screen.toggle_facing();
    assert_eq!(screen.facing(), CameraFacing::Front);
    assert!(camera.preview_frame(screen.facing()).is_some());

    screen.take_photo(&camera).unwrap();
    match screen.poll() {
        Some(Navigation::ToEditor(image)) => assert!(image.to_path().unwrap().ends_with("selfie.png")),
        other => panic!("expected editor navigation, got {other:?}"),
    }

    screen.toggle_facing();
    assert_eq!(screen.facing(), CameraFacing::Back);
}

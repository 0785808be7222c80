//! End-to-end capture flow: arm the state, draw a frame, rasterize, persist.

use composely_lib::capture::{self, CaptureError, CaptureState, CapturingProgress};
use composely_lib::config::AppConfig;
use composely_lib::graphics::{Canvas, DrawError, Rect, Size, BLACK, WHITE};
use composely_lib::ui::{draw, render_frame, Modifier};
use composely_lib::MainScreen;
use std::collections::HashMap;
use std::path::Path;

fn config_for(dir: &Path, extra: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert(
        "COMPOSELY_OUTPUT_DIR".into(),
        dir.to_string_lossy().into_owned(),
    );
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

fn block(canvas: &mut dyn Canvas, size: Size) -> Result<(), DrawError> {
    canvas.fill_rect(Rect::from_size(size), BLACK);
    Ok(())
}

// ── State machine + hook ────────────────────────────────────────────

#[test]
fn idle_capture_render_yields_picture_of_bounds_width() {
    let state = CaptureState::new();
    assert!(matches!(state.progress(), CapturingProgress::Idle));

    state.capture();
    assert!(state.is_capturing());

    let modifier = Modifier::new().padding_all(8.0).capture(&state);
    render_frame(120, 80, WHITE, |canvas, size| {
        draw(&modifier, size, canvas, &mut block)
    })
    .unwrap();

    match state.progress() {
        CapturingProgress::Captured(picture) => {
            assert_eq!(picture.width(), 104);
            assert_eq!(picture.height(), 64);
        }
        other => panic!("expected captured, got {:?}", other),
    }
}

#[test]
fn throwing_render_pass_yields_error_state() {
    let state = CaptureState::new();
    state.capture();
    let modifier = Modifier::new().capture(&state);

    let frame = render_frame(10, 10, WHITE, |canvas, size| {
        draw(&modifier, size, canvas, &mut |_, _| {
            Err(DrawError::Content("layout exploded".into()))
        })
    });

    // Rendering itself is not failed by the capture.
    assert!(frame.is_ok());
    match state.progress() {
        CapturingProgress::Error(e) => {
            assert!(matches!(*e, CaptureError::Draw(_)));
            assert!(e.to_string().contains("layout exploded"));
        }
        other => panic!("expected error, got {:?}", other),
    }
}

#[test]
fn error_state_can_be_rearmed() {
    let state = CaptureState::new();
    state.capture();
    let modifier = Modifier::new().padding_all(50.0).capture(&state);
    render_frame(10, 10, WHITE, |canvas, size| {
        draw(&modifier, size, canvas, &mut block)
    })
    .unwrap();
    assert!(matches!(state.progress(), CapturingProgress::Error(_)));

    state.capture();
    assert!(state.is_capturing());
}

// ── Raster + persist ────────────────────────────────────────────────

#[test]
fn captured_picture_rasterizes_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let state = CaptureState::new();
    state.capture();
    let modifier = Modifier::new().capture(&state);
    render_frame(30, 20, WHITE, |canvas, size| {
        draw(&modifier, size, canvas, &mut block)
    })
    .unwrap();

    let CapturingProgress::Captured(picture) = state.progress() else {
        panic!("capture did not complete");
    };

    let exact = capture::rasterize(&picture).unwrap();
    assert_eq!(exact.dimensions(), (30, 20));
    assert_eq!(*exact.get_pixel(10, 10), BLACK);

    let lossy = capture::rasterize_with_quality(&picture, 40).unwrap();
    assert_eq!(lossy.dimensions(), (30, 20));

    let path = capture::save_as_file(&exact, dir.path(), Some("frame")).unwrap();
    assert_eq!(path, dir.path().join("frame.jpg"));
    assert!(path.is_file());
}

#[test]
fn unnamed_saves_produce_distinct_files() {
    let dir = tempfile::tempdir().unwrap();
    let buffer = image::RgbaImage::from_pixel(4, 4, WHITE);

    let first = capture::save_as_file(&buffer, dir.path(), None).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = capture::save_as_file(&buffer, dir.path(), None).unwrap();

    assert_ne!(first, second);
    assert!(first.is_file() && second.is_file());
}

#[test]
fn unwritable_directory_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    let buffer = image::RgbaImage::from_pixel(4, 4, WHITE);
    let result = capture::save_as_file(&buffer, &dir.path().join("nope").join("deeper"), None);
    assert!(result.is_none());
}

// ── Main screen ─────────────────────────────────────────────────────

#[tokio::test]
async fn main_screen_captures_to_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[("COMPOSELY_FILE_NAME", "greeting")]);
    let screen = MainScreen::new("Android", (200, 120));

    let saved = screen.capture_to_file(&config).await.unwrap();

    assert_eq!(saved, Some(dir.path().join("greeting.jpg")));
    assert!(matches!(
        screen.capture_state().progress(),
        CapturingProgress::Captured(_)
    ));

    let decoded = image::open(dir.path().join("greeting.jpg")).unwrap();
    // Frame minus the screen padding on both sides.
    assert_eq!((decoded.width(), decoded.height()), (168, 88));
}

#[tokio::test]
async fn main_screen_too_small_to_capture_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[]);
    let screen = MainScreen::new("Android", (20, 20));

    let saved = screen.capture_to_file(&config).await.unwrap();

    assert_eq!(saved, None);
    assert!(matches!(
        screen.capture_state().progress(),
        CapturingProgress::Error(_)
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn main_screen_frame_is_unchanged_after_capture() {
    let screen = MainScreen::new("Android", (100, 60));
    let before = screen.render().unwrap();

    screen.capture_state().capture();
    let during = screen.render().unwrap();
    assert!(matches!(
        screen.capture_state().progress(),
        CapturingProgress::Captured(_)
    ));

    assert_eq!(before, during);
}

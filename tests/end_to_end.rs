use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use egui::{Color32, Vec2, pos2};
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use image::{Rgba, RgbaImage};
use photomark::brush::Brush;
use photomark::camera::{Camera, CameraFacing, PermissionStatus};
use photomark::error::{CaptureError, ExportError, MediaError};
use photomark::flatten::SkiaFlattener;
use photomark::image_ref::{ImageRef, ImageStore};
use photomark::media::MediaLibrary;
use photomark::screens::{CaptureScreen, EditorScreen, Navigation};
use photomark::sticker::StickerTemplate;
use photomark::tools::EditorMode;

const CANVAS: Vec2 = Vec2::new(100.0, 100.0);

// Camera that "captures" a photo already registered in the store
struct FakeCamera;

impl Camera for FakeCamera {
    fn permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus> {
        future::ready(PermissionStatus::Granted).boxed_local()
    }

    fn preview_frame(&self, _facing: CameraFacing) -> Option<ImageRef> {
        None
    }

    fn take_picture(&self, _facing: CameraFacing) -> LocalBoxFuture<'static, Result<ImageRef, CaptureError>> {
        future::ready(Ok(ImageRef::new("mem://photo"))).boxed_local()
    }
}

// Library that records every raster it is asked to save
#[derive(Default)]
struct RecordingLibrary {
    writes: Cell<usize>,
    last: RefCell<Option<RgbaImage>>,
}

impl MediaLibrary for RecordingLibrary {
    fn save_to_library(&self, raster: RgbaImage) -> LocalBoxFuture<'static, Result<ImageRef, MediaError>> {
        self.writes.set(self.writes.get() + 1);
        *self.last.borrow_mut() = Some(raster);
        future::ready(Ok(ImageRef::new(format!("mem://saved/{}", self.writes.get())))).boxed_local()
    }
}

fn close(actual: &Rgba<u8>, expected: [u8; 4]) -> bool {
    actual.0.iter().zip(expected).all(|(a, e)| a.abs_diff(e) <= 3)
}

fn setup() -> (Arc<ImageStore>, SkiaFlattener) {
    let store = Arc::new(ImageStore::new());
    store.insert(ImageRef::new("mem://photo"), RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255])));
    store.insert(ImageRef::new("mem://sticker"), RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255])));
    let flattener = SkiaFlattener::new(store.clone(), 1.0, Color32::BLACK);
    (store, flattener)
}

fn capture_to_editor(store: &ImageStore) -> EditorScreen {
    let mut capture = CaptureScreen::default();
    capture.take_photo(&FakeCamera).unwrap();
    match capture.poll() {
        Some(Navigation::ToEditor(image)) => EditorScreen::new(image, store, CANVAS, Brush::new(Color32::RED, 6.0)),
        other => panic!("expected navigation to the editor, got {other:?}"),
    }
}

fn annotate(editor: &mut EditorScreen) {
    let session = editor.session_mut();
    session.set_mode(EditorMode::Draw);
    session.begin_gesture(pos2(0.0, 10.0));
    session.move_gesture(pos2(50.0, 10.0));
    session.move_gesture(pos2(99.0, 10.0));
    session.end_gesture();
    editor.pick_sticker(&StickerTemplate::new("blue", "mem://sticker"));
}

#[test]
fn test_capture_draw_sticker_export_writes_once() {
    let (store, flattener) = setup();
    let library = Rc::new(RecordingLibrary::default());

    let mut editor = capture_to_editor(&store);
    annotate(&mut editor);
    assert_eq!(editor.session().paths().len(), 1);
    assert_eq!(editor.session().stickers().len(), 1);

    // The sticker lands below this small canvas; drag it onto the photo so
    // it covers 25..125 on both axes
    let session = editor.session_mut();
    session.set_mode(EditorMode::Arrange);
    session.begin_gesture(pos2(50.0, 250.0));
    session.move_gesture(pos2(75.0, 75.0));
    session.end_gesture();
    assert_eq!(editor.session().stickers()[0].center(), pos2(75.0, 75.0));

    editor.start_export(&flattener, library.clone()).unwrap();
    assert!(editor.poll().unwrap().is_ok());
    assert_eq!(library.writes.get(), 1);

    let raster = library.last.borrow_mut().take().unwrap();
    assert_eq!(raster.dimensions(), (100, 100));
    // The stroke is red over the white photo
    assert!(close(raster.get_pixel(50, 10), [255, 0, 0, 255]));
    assert!(close(raster.get_pixel(75, 75), [0, 0, 255, 255]));
    // Left of the sticker the photo shows through
    assert!(close(raster.get_pixel(10, 50), [255, 255, 255, 255]));
}

#[test]
fn test_discard_before_export_writes_nothing() {
    let (store, _flattener) = setup();
    let library = Rc::new(RecordingLibrary::default());

    let mut editor = capture_to_editor(&store);
    annotate(&mut editor);
    let navigation = editor.discard();

    assert!(matches!(navigation, Some(Navigation::ToCapture { alert: Some(_) })));
    assert!(editor.session().is_empty());
    assert_eq!(library.writes.get(), 0);
}

#[test]
fn test_second_export_while_in_flight_is_busy() {
    struct SlowLibrary(Cell<usize>);
    impl MediaLibrary for SlowLibrary {
        fn save_to_library(&self, _raster: RgbaImage) -> LocalBoxFuture<'static, Result<ImageRef, MediaError>> {
            self.0.set(self.0.get() + 1);
            future::pending().boxed_local()
        }
    }

    let (store, flattener) = setup();
    let library = Rc::new(SlowLibrary(Cell::new(0)));
    let mut editor = capture_to_editor(&store);
    annotate(&mut editor);

    editor.start_export(&flattener, library.clone()).unwrap();
    assert!(editor.poll().is_none());
    assert!(matches!(editor.start_export(&flattener, library.clone()), Err(ExportError::Busy)));
    assert!(editor.poll().is_none());
    assert_eq!(library.0.get(), 1);
    assert!(editor.is_exporting());
}

#[test]
fn test_export_failure_keeps_session_for_retry() {
    struct BrokenLibrary;
    impl MediaLibrary for BrokenLibrary {
        fn save_to_library(&self, _raster: RgbaImage) -> LocalBoxFuture<'static, Result<ImageRef, MediaError>> {
            let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            future::ready(Err(MediaError::Write {
                path: "/library".into(),
                source: err,
            }))
            .boxed_local()
        }
    }

    let (store, flattener) = setup();
    let mut editor = capture_to_editor(&store);
    annotate(&mut editor);

    editor.start_export(&flattener, Rc::new(BrokenLibrary)).unwrap();
    assert!(matches!(editor.poll(), Some(Err(ExportError::Media(_)))));
    assert_eq!(editor.alert().map(|a| a.title.as_str()), Some("Error"));
    assert_eq!(editor.session().paths().len(), 1);
    assert_eq!(editor.session().stickers().len(), 1);

    let library = Rc::new(RecordingLibrary::default());
    editor.start_export(&flattener, library.clone()).unwrap();
    assert!(editor.poll().unwrap().is_ok());
    assert_eq!(library.writes.get(), 1);
}

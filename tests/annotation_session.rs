use photomark::brush::Brush;
use photomark::image_ref::ImageRef;
use photomark::session::AnnotationSession;
use photomark::tools::EditorMode;
use egui::{Color32, Pos2, pos2};
use std::collections::HashSet;

// Helper: one complete draw gesture through the given points
fn draw(session: &mut AnnotationSession, points: &[Pos2]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    session.begin_gesture(*first);
    for p in rest {
        session.move_gesture(*p);
    }
    session.end_gesture();
}

fn drawing_session() -> AnnotationSession {
    let mut session = AnnotationSession::with_brush(Brush::new(Color32::RED, 5.0));
    session.set_mode(EditorMode::Draw);
    session
}

#[test]
fn test_n_gestures_freeze_n_paths() {
    for n in 0..8 {
        let mut session = drawing_session();
        for i in 0..n {
            let y = i as f32 * 10.0;
            draw(&mut session, &[pos2(0.0, y), pos2(5.0, y + 1.0), pos2(10.0, y)]);
        }
        assert_eq!(session.paths().len(), n);
        assert!(session.current_path().is_none());
    }
}

#[test]
fn test_every_reported_point_is_kept_in_order() {
    let mut session = drawing_session();
    let points = [pos2(1.0, 1.0), pos2(1.0, 1.0), pos2(2.0, 3.0), pos2(1.5, 2.0)];
    draw(&mut session, &points);

    let path = &session.paths()[0];
    assert_eq!(path.points(), &points);
    assert_eq!(path.color(), Color32::RED);
    assert_eq!(path.width(), 5.0);
}

#[test]
fn test_undo_removes_exactly_the_last_path() {
    let mut session = drawing_session();
    assert!(!session.undo());
    assert_eq!(session.paths().len(), 0);

    for i in 0..4 {
        draw(&mut session, &[pos2(i as f32, 0.0), pos2(i as f32, 10.0)]);
    }
    for remaining in (0..4).rev() {
        assert!(session.undo());
        assert_eq!(session.paths().len(), remaining);
        if let Some(last) = session.paths().last() {
            assert_eq!(last.points()[0], pos2(remaining as f32 - 1.0, 0.0));
        }
    }
    assert!(!session.undo());
}

#[test]
fn test_brush_change_applies_to_next_path_only() {
    let mut session = drawing_session();
    session.begin_gesture(pos2(0.0, 0.0));
    session.set_brush_color(Color32::BLUE);
    session.set_brush_width(15.0);
    session.end_gesture();
    draw(&mut session, &[pos2(1.0, 1.0)]);

    assert_eq!(session.paths()[0].color(), Color32::RED);
    assert_eq!(session.paths()[1].color(), Color32::BLUE);
    assert_eq!(session.paths()[1].width(), 15.0);
}

#[test]
fn test_added_stickers_are_unique_unit_and_selected() {
    let mut session = AnnotationSession::new();
    let mut seen = HashSet::new();
    for n in 1..=20 {
        let id = session.add_sticker(ImageRef::new("builtin://star"), 390.0);
        assert!(seen.insert(id));
        assert_eq!(session.stickers().len(), n);
        assert_eq!(session.selected_sticker(), Some(id));

        let sticker = session.stickers().last().unwrap();
        assert_eq!(sticker.id(), id);
        assert_eq!(sticker.scale, 1.0);
        assert_eq!(sticker.rotation, 0.0);
        assert_eq!(sticker.position, pos2(145.0, 200.0));
    }
}

#[test]
fn test_gesture_on_other_sticker_transfers_selection() {
    let mut session = AnnotationSession::new();
    let a = session.add_sticker(ImageRef::new("mem://a"), 390.0);

    // Drag a below the default spot so the next sticker does not cover it
    session.begin_gesture(pos2(195.0, 250.0));
    session.move_gesture(pos2(195.0, 450.0));
    session.end_gesture();

    let b = session.add_sticker(ImageRef::new("mem://b"), 390.0);
    assert_eq!(session.selected_sticker(), Some(b));

    session.begin_gesture(pos2(195.0, 450.0));
    assert_eq!(session.selected_sticker(), Some(a));
    session.end_gesture();

    session.begin_gesture(pos2(195.0, 250.0));
    assert_eq!(session.selected_sticker(), Some(b));
}

#[test]
fn test_drag_is_relative_to_gesture_start() {
    let mut session = AnnotationSession::new();
    session.add_sticker(ImageRef::new("mem://a"), 390.0);
    let start = session.stickers()[0].position;

    session.begin_gesture(pos2(160.0, 210.0));
    for step in 1..=10 {
        session.move_gesture(pos2(160.0 + step as f32, 210.0 + 2.0 * step as f32));
    }
    session.end_gesture();

    assert_eq!(session.stickers()[0].position, start + egui::vec2(10.0, 20.0));
}

#[test]
fn test_draw_mode_never_moves_stickers() {
    let mut session = drawing_session();
    session.add_sticker(ImageRef::new("mem://a"), 390.0);
    let start = session.stickers()[0].position;

    draw(&mut session, &[pos2(195.0, 250.0), pos2(300.0, 600.0)]);
    assert_eq!(session.stickers()[0].position, start);
    assert_eq!(session.paths().len(), 1);
}

#[test]
fn test_arrange_mode_never_draws() {
    let mut session = AnnotationSession::new();
    assert_eq!(session.mode(), EditorMode::Arrange);
    draw(&mut session, &[pos2(5.0, 5.0), pos2(50.0, 50.0)]);
    assert!(session.paths().is_empty());
    assert!(session.is_empty());
}

use annokit_canvas::model::{CircleShape, LineShape, PointMarker};
use annokit_canvas::{tracker, Point, ShapeKind, ShapeStore, ShapeStyle, ShapeType};
use annokit_core::StoreError;

fn seed(store: &mut ShapeStore) -> Vec<u64> {
    let mut ids = Vec::new();
    ids.push(store.add_shape(
        ShapeKind::Point(PointMarker::new(Point::new(5.0, 5.0), "p1")),
        ShapeStyle::default(),
    ));
    ids.push(store.add_shape(
        ShapeKind::Line(LineShape::new(Point::new(0.0, 0.0), Point::new(50.0, 0.0))),
        ShapeStyle::default(),
    ));
    ids.push(store.add_shape(
        ShapeKind::Line(LineShape::new(Point::new(0.0, 20.0), Point::new(50.0, 20.0))),
        ShapeStyle::default(),
    ));
    ids.push(store.add_shape(
        ShapeKind::Circle(CircleShape::from_points(vec![
            Point::new(0.0, 50.0),
            Point::new(20.0, 50.0),
            Point::new(10.0, 70.0),
        ])),
        ShapeStyle::default(),
    ));
    ids
}

#[test]
fn test_entries_number_per_type() {
    let mut store = ShapeStore::new();
    seed(&mut store);

    let entries = tracker::entries(&store);
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["P1", "L1", "L2", "C1"]);
    assert_eq!(entries[1].shape_type, ShapeType::Line);
}

#[test]
fn test_entries_renumber_after_delete() {
    let mut store = ShapeStore::new();
    let ids = seed(&mut store);

    assert!(tracker::delete(&mut store, ids[1]));
    let entries = tracker::entries(&store);
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    // The surviving line takes the first slot of its type
    assert_eq!(labels, vec!["P1", "L1", "C1"]);
}

#[test]
fn test_entries_carry_style_and_selection() {
    let mut store = ShapeStore::new();
    let ids = seed(&mut store);
    store.select(Some(ids[2]));

    let entries = tracker::entries(&store);
    assert!(!entries[1].selected);
    assert!(entries[2].selected);
    assert_eq!(entries[0].color, ShapeStyle::default().color);
    assert_eq!(entries[0].font_color, ShapeStyle::default().font_color);
}

#[test]
fn test_select_updates_store() {
    let mut store = ShapeStore::new();
    let ids = seed(&mut store);

    tracker::select(&mut store, Some(ids[3]));
    assert_eq!(store.selected_id(), Some(ids[3]));
    tracker::select(&mut store, None);
    assert_eq!(store.selected_id(), None);
}

#[test]
fn test_set_color_updates_shape() {
    let mut store = ShapeStore::new();
    let ids = seed(&mut store);

    let applied = tracker::set_color(&mut store, ids[1], "#ff0000").unwrap();
    assert_eq!(applied, "#ff0000");
    assert_eq!(store.shape(ids[1]).unwrap().style.color, "#ff0000");
    // Color edits are undoable
    assert!(store.undo());
    assert_eq!(
        store.shape(ids[1]).unwrap().style.color,
        ShapeStyle::default().color
    );
}

#[test]
fn test_set_font_color_updates_shape() {
    let mut store = ShapeStore::new();
    let ids = seed(&mut store);

    tracker::set_font_color(&mut store, ids[0], "#123456").unwrap();
    assert_eq!(store.shape(ids[0]).unwrap().style.font_color, "#123456");
}

#[test]
fn test_set_color_unknown_id_reports_missing_shape() {
    let mut store = ShapeStore::new();
    seed(&mut store);

    match tracker::set_color(&mut store, 999, "#ff0000") {
        Err(StoreError::ShapeNotFound { id }) => assert_eq!(id, 999),
        other => panic!("expected ShapeNotFound, got {other:?}"),
    }
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut store = ShapeStore::new();
    seed(&mut store);
    let depth = store.undo_depth();

    assert!(!tracker::delete(&mut store, 999));
    assert_eq!(store.len(), 4);
    assert_eq!(store.undo_depth(), depth);
}

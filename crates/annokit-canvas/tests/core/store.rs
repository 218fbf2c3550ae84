use annokit_canvas::model::{LineShape, PointMarker};
use annokit_canvas::{Point, ShapeKind, ShapeStore, ShapeStyle, DEFAULT_HIT_THRESHOLD};

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> ShapeKind {
    ShapeKind::Line(LineShape::new(Point::new(x0, y0), Point::new(x1, y1)))
}

#[test]
fn test_new_store_is_empty() {
    let store = ShapeStore::new();
    assert!(store.is_empty());
    assert!(!store.can_undo());
    assert!(!store.can_redo());
    assert_eq!(store.undo_depth(), 0);
}

#[test]
fn test_add_shape_assigns_monotonic_ids() {
    let mut store = ShapeStore::new();
    let a = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    let b = store.add_shape(line(0.0, 5.0, 10.0, 5.0), ShapeStyle::default());
    assert_eq!(a, 1);
    assert_eq!(b, 2);
    store.remove_shape(a);
    let c = store.add_shape(line(0.0, 9.0, 10.0, 9.0), ShapeStyle::default());
    assert_eq!(c, 3);
}

#[test]
fn test_undo_redo_restores_same_id() {
    let mut store = ShapeStore::new();
    let id = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    assert!(store.undo());
    assert!(store.is_empty());
    assert!(store.redo());
    assert_eq!(store.shapes()[0].id, id);
}

#[test]
fn test_n_undos_return_to_baseline() {
    let mut store = ShapeStore::new();
    for i in 0..5 {
        store.add_shape(line(0.0, i as f64, 10.0, i as f64), ShapeStyle::default());
    }
    assert_eq!(store.undo_depth(), 5);
    for _ in 0..5 {
        assert!(store.undo());
    }
    assert!(store.is_empty());
    assert!(!store.can_undo());
    assert_eq!(store.redo_depth(), 5);
}

#[test]
fn test_record_after_undo_discards_redo_tail() {
    let mut store = ShapeStore::new();
    store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    store.add_shape(line(0.0, 5.0, 10.0, 5.0), ShapeStyle::default());
    store.undo();
    assert!(store.can_redo());
    store.add_shape(line(0.0, 9.0, 10.0, 9.0), ShapeStyle::default());
    assert!(!store.can_redo());
    assert_eq!(store.len(), 2);
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let mut store = ShapeStore::new();
    store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    let depth = store.undo_depth();
    assert!(!store.remove_shape(42));
    assert_eq!(store.len(), 1);
    assert_eq!(store.undo_depth(), depth);
}

#[test]
fn test_update_shape_unknown_id_is_noop() {
    let mut store = ShapeStore::new();
    let depth = store.undo_depth();
    assert!(!store.update_shape(7, |s| s.style.color = "#ff0000".to_string()));
    assert_eq!(store.undo_depth(), depth);
}

#[test]
fn test_update_shape_records_history() {
    let mut store = ShapeStore::new();
    let id = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    assert!(store.update_shape(id, |s| s.style.color = "#ff0000".to_string()));
    assert_eq!(store.shapes()[0].style.color, "#ff0000");
    assert!(store.undo());
    assert_eq!(store.shapes()[0].style.color, ShapeStyle::default().color);
}

#[test]
fn test_find_at_returns_topmost() {
    let mut store = ShapeStore::new();
    let bottom = store.add_shape(line(0.0, 0.0, 100.0, 0.0), ShapeStyle::default());
    let top = store.add_shape(line(0.0, 2.0, 100.0, 2.0), ShapeStyle::default());
    let hit = store.find_at(Point::new(50.0, 1.0), DEFAULT_HIT_THRESHOLD).unwrap();
    assert_eq!(hit.id, top);
    assert_ne!(hit.id, bottom);
}

#[test]
fn test_find_at_misses_past_threshold() {
    let mut store = ShapeStore::new();
    store.add_shape(line(0.0, 0.0, 100.0, 0.0), ShapeStyle::default());
    assert!(store.find_at(Point::new(50.0, 10.0), 10.0).is_some());
    assert!(store.find_at(Point::new(50.0, 10.5), 10.0).is_none());
}

#[test]
fn test_selection_follows_removal() {
    let mut store = ShapeStore::new();
    let id = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    store.select(Some(id));
    assert_eq!(store.selected_id(), Some(id));
    assert!(store.selected_shape().is_some());
    store.remove_shape(id);
    assert_eq!(store.selected_id(), None);
}

#[test]
fn test_undo_prunes_selection() {
    let mut store = ShapeStore::new();
    let id = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    store.select(Some(id));
    store.undo();
    assert_eq!(store.selected_id(), None);
}

#[test]
fn test_point_labels_count_up() {
    let mut store = ShapeStore::new();
    let l1 = store.next_point_label();
    let l2 = store.next_point_label();
    assert_eq!(l1, "p1");
    assert_eq!(l2, "p2");
}

#[test]
fn test_clear_restarts_both_counters() {
    let mut store = ShapeStore::new();
    let label = store.next_point_label();
    store.add_shape(
        ShapeKind::Point(PointMarker::new(Point::new(0.0, 0.0), label)),
        ShapeStyle::default(),
    );
    store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.next_point_label(), "p1");
    let id = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    assert_eq!(id, 1);
}

#[test]
fn test_clear_is_not_undoable() {
    let mut store = ShapeStore::new();
    store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    store.clear();
    assert!(!store.can_undo());
    assert!(!store.undo());
    assert!(store.is_empty());
}

#[test]
fn test_replace_shapes_bypasses_history() {
    let mut store = ShapeStore::new();
    store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    let depth = store.undo_depth();
    let mut shapes = store.shapes().to_vec();
    shapes[0].translate(5.0, 5.0);
    store.replace_shapes(shapes);
    assert_eq!(store.undo_depth(), depth);
    store.commit_current();
    assert_eq!(store.undo_depth(), depth + 1);
}

#[test]
fn test_commit_replaces_collection() {
    let mut store = ShapeStore::new();
    let keep = store.add_shape(line(0.0, 0.0, 10.0, 0.0), ShapeStyle::default());
    let discard = store.add_shape(line(0.0, 5.0, 10.0, 5.0), ShapeStyle::default());
    store.select(Some(discard));
    let survivors: Vec<_> = store
        .shapes()
        .iter()
        .filter(|s| s.id == keep)
        .cloned()
        .collect();
    store.commit(survivors);
    assert_eq!(store.len(), 1);
    assert_eq!(store.shapes()[0].id, keep);
    // Selection pointed at a removed shape and is dropped with it
    assert_eq!(store.selected_id(), None);
    assert!(store.can_undo());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ids_stay_unique_and_monotonic(adds in 1usize..40, removes in proptest::collection::vec(0u64..60, 0..20)) {
            let mut store = ShapeStore::new();
            let mut last = 0u64;
            for i in 0..adds {
                let id = store.add_shape(line(0.0, i as f64, 10.0, i as f64), ShapeStyle::default());
                prop_assert!(id > last);
                last = id;
            }
            for id in removes {
                store.remove_shape(id);
            }
            let next = store.add_shape(line(0.0, 99.0, 10.0, 99.0), ShapeStyle::default());
            prop_assert!(next > last);
            let mut seen: Vec<u64> = store.shapes().iter().map(|s| s.id).collect();
            let before = seen.len();
            seen.dedup();
            prop_assert_eq!(seen.len(), before);
        }

        #[test]
        fn undo_all_always_reaches_empty(edits in 1usize..25) {
            let mut store = ShapeStore::new();
            for i in 0..edits {
                store.add_shape(line(0.0, i as f64, 5.0, i as f64), ShapeStyle::default());
            }
            while store.can_undo() {
                prop_assert!(store.undo());
            }
            prop_assert!(store.is_empty());
        }
    }
}

//! Tests for the screenplay adapter against live screenplays and scenes.

use std::any::Any;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use sceneflow::model::{
    AdapterSource, BreakType, ElementListModel, MasterSlot, Scene, SceneKind, Screenplay,
    ScreenplayAdapter, ScreenplayElement, ScreenplayMetadata,
};
use sceneflow::{AdapterConfig, DeferredQueue};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scene_element(title: &str) -> Arc<ScreenplayElement> {
    ScreenplayElement::for_scene(Arc::new(Scene::new(title)))
}

fn screenplay_with(count: usize, current: i32) -> Arc<Screenplay> {
    let screenplay = Screenplay::new();
    for n in 0..count {
        screenplay
            .add_element(scene_element(&format!("Scene {n}")))
            .unwrap();
    }
    screenplay.set_current_element_index(current);
    screenplay
}

fn counter<Args: 'static>(signal: &sceneflow::Signal<Args>) -> Arc<Mutex<usize>> {
    let count = Arc::new(Mutex::new(0));
    let c = count.clone();
    signal.connect(move |_| *c.lock() += 1);
    count
}

fn recorder<Args: Clone + Send + 'static>(
    signal: &sceneflow::Signal<Args>,
) -> Arc<Mutex<Vec<Args>>> {
    let values = Arc::new(Mutex::new(Vec::new()));
    let v = values.clone();
    signal.connect(move |args: &Args| v.lock().push(args.clone()));
    values
}

/// The cached index is -1 or addresses the element the adapter reports.
fn assert_index_valid(adapter: &ScreenplayAdapter) {
    let index = adapter.current_index();
    if index == -1 {
        assert!(adapter.current_element().is_none());
        return;
    }
    assert!(index >= 0 && (index as usize) < adapter.row_count());
    let expected = adapter.element_at(index as usize).unwrap();
    assert!(Arc::ptr_eq(&adapter.current_element().unwrap(), &expected));
}

#[test]
fn test_current_index_never_dangles_across_edits() {
    init_tracing();
    let screenplay = screenplay_with(5, 2);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));

    // Check the invariant from inside every completion notification too.
    let weak: Weak<ScreenplayAdapter> = Arc::downgrade(&adapter);
    let w = weak.clone();
    adapter
        .signals()
        .rows_inserted
        .connect(move |_| assert_index_valid(&w.upgrade().unwrap()));
    let w = weak.clone();
    adapter
        .signals()
        .rows_removed
        .connect(move |_| assert_index_valid(&w.upgrade().unwrap()));

    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    for step in 0..300 {
        let len = screenplay.element_count();
        match next() % 3 {
            0 => {
                let row = next() % (len + 1);
                screenplay
                    .insert_element_at(row, scene_element(&format!("Insert {step}")))
                    .unwrap();
            }
            1 if len > 0 => {
                screenplay.remove_element_at(next() % len).unwrap();
            }
            _ => {
                let target = (next() % (len + 3)) as i32 - 1;
                adapter.set_current_index(target);
            }
        }

        assert_index_valid(&adapter);
        assert_eq!(adapter.current_index(), screenplay.current_element_index());
        assert_eq!(adapter.row_count(), screenplay.element_count());
    }
}

#[test]
fn test_scene_source_exposes_the_scene_at_row_zero() {
    let scene = Arc::new(Scene::new("INT. LIGHTHOUSE - NIGHT"));
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(scene.clone().into()));

    assert_eq!(adapter.row_count(), 1);
    let bundle = adapter.at(0);
    assert!(Arc::ptr_eq(bundle.get("scene").as_scene().unwrap(), &scene));
    assert_eq!(bundle.get("rowNumber").as_int(), Some(0));
    assert_eq!(bundle.get("id").as_str(), Some(scene.id().to_string().as_str()));
    assert!(adapter.at(1).is_none());
}

#[test]
fn test_master_metadata_is_copied_once() {
    let master = Screenplay::with_metadata(ScreenplayMetadata {
        title: "Harbour Lights".into(),
        subtitle: "Pilot".into(),
        author: "J. Mensah".into(),
        version: "Blue revision".into(),
    });
    let slot = Arc::new(MasterSlot::new());
    slot.set(&master);

    let adapter = ScreenplayAdapter::builder().master(slot.clone()).build();
    adapter.set_source(Some(Arc::new(Scene::new("Cold open")).into()));

    let synthesized = adapter.screenplay().unwrap();
    assert_eq!(synthesized.metadata(), master.metadata());

    master.set_title("Harbour Lights (retitled)");
    master.set_version("Pink revision");
    assert_eq!(synthesized.title(), "Harbour Lights");
    assert_eq!(synthesized.version(), "Blue revision");

    slot.clear();
    adapter.set_source(Some(Arc::new(Scene::new("Tag")).into()));
    assert_eq!(
        adapter.screenplay().unwrap().metadata(),
        ScreenplayMetadata::default()
    );
}

#[test]
fn test_master_metadata_copy_can_be_disabled() {
    let master = Screenplay::with_metadata(ScreenplayMetadata {
        title: "Ignored".into(),
        ..Default::default()
    });
    let adapter = ScreenplayAdapter::builder()
        .master(Arc::new(master.clone()))
        .copy_master_metadata(false)
        .build();

    adapter.set_source(Some(Arc::new(Scene::new("Scene")).into()));
    assert_eq!(adapter.screenplay().unwrap().title(), "");
}

#[test]
fn test_set_current_index_clamps_and_ignores_repeats() {
    let screenplay = screenplay_with(4, -1);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    let changes = recorder(&adapter.current_index_changed);

    adapter.set_current_index(10);
    assert_eq!(adapter.current_index(), 3);
    adapter.set_current_index(3);
    adapter.set_current_index(-5);
    assert_eq!(adapter.current_index(), -1);
    adapter.set_current_index(-1);

    assert_eq!(*changes.lock(), vec![3, -1]);
    assert_eq!(screenplay.current_element_index(), -1);

    let detached = ScreenplayAdapter::new();
    let detached_changes = counter(&detached.current_index_changed);
    detached.set_current_index(0);
    assert_eq!(detached.current_index(), -1);
    assert_eq!(*detached_changes.lock(), 0);
}

#[test]
fn test_switching_source_passes_through_no_selection() {
    let a = screenplay_with(5, 2);
    let b = screenplay_with(3, 1);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(a.clone().into()));
    assert_eq!(adapter.current_index(), 2);

    let seen_during_reset = Arc::new(Mutex::new(Vec::new()));
    let weak = Arc::downgrade(&adapter);
    let seen = seen_during_reset.clone();
    adapter.signals().model_about_to_reset.connect(move |_| {
        let adapter = weak.upgrade().unwrap();
        seen.lock().push(adapter.current_index());
    });
    let changes = recorder(&adapter.current_index_changed);
    let source_changes = counter(&adapter.source_changed);

    adapter.set_source(Some(b.clone().into()));

    assert_eq!(*seen_during_reset.lock(), vec![-1]);
    assert_eq!(*changes.lock(), vec![-1, 1]);
    assert_eq!(*source_changes.lock(), 1);
    assert_eq!(adapter.current_index(), 1);
    // The transient clear is never written back to the old screenplay.
    assert_eq!(a.current_element_index(), 2);

    // The old screenplay is no longer wired.
    a.set_current_element_index(4);
    assert_eq!(adapter.current_index(), 1);
}

#[test]
fn test_repeated_scene_source_synthesizes_fresh_collections() {
    let queue = Arc::new(DeferredQueue::new());
    let adapter = ScreenplayAdapter::builder().reclaimer(queue.clone()).build();
    let scene = Arc::new(Scene::new("EXT. BRIDGE - DUSK"));
    let source_changes = counter(&adapter.source_changed);

    adapter.set_source(Some(scene.clone().into()));
    let first: Weak<Screenplay> = Arc::downgrade(&adapter.screenplay().unwrap());

    adapter.set_source(Some(scene.clone().into()));
    let second = adapter.screenplay().unwrap();

    assert_eq!(*source_changes.lock(), 2);
    assert!(!Arc::ptr_eq(&first.upgrade().unwrap(), &second));
    assert_eq!(second.element_count(), 1);
    assert!(Arc::ptr_eq(second.element_at(0).unwrap().scene().unwrap(), &scene));

    // Superseded collection survives until the queue runs.
    assert_eq!(queue.pending_count(), 1);
    assert!(first.upgrade().is_some());
    queue.process_all();
    assert!(first.upgrade().is_none());
}

#[test]
fn test_default_adapter_reclaims_superseded_collections() {
    let adapter = ScreenplayAdapter::new();
    let scene = Arc::new(Scene::new("INT. CORRIDOR - LOOP"));

    let mut synthesized: Vec<Weak<Screenplay>> = Vec::new();
    for _ in 0..50 {
        adapter.set_source(Some(scene.clone().into()));
        synthesized.push(Arc::downgrade(&adapter.screenplay().unwrap()));
    }

    let current = synthesized.pop().unwrap();
    assert!(synthesized.iter().all(|weak| weak.upgrade().is_none()));
    assert!(current.upgrade().is_some());
    assert_eq!(adapter.reclaimer().pending_count(), 0);

    adapter.set_source(None);
    assert!(current.upgrade().is_none());
    assert!(!adapter.reclaimer().has_pending());
}

#[test]
fn test_superseded_collection_outlives_the_notification_turn() {
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(Arc::new(Scene::new("First")).into()));
    let first: Weak<Screenplay> = Arc::downgrade(&adapter.screenplay().unwrap());

    let alive_in_slot = Arc::new(Mutex::new(Vec::new()));
    let alive = alive_in_slot.clone();
    let watched = first.clone();
    adapter
        .source_changed
        .connect(move |_| alive.lock().push(watched.upgrade().is_some()));

    adapter.set_source(Some(Arc::new(Scene::new("Second")).into()));

    assert_eq!(*alive_in_slot.lock(), vec![true]);
    assert!(first.upgrade().is_none());
}

#[test]
fn test_shared_synthesized_collection_is_released_not_deferred() {
    let queue = Arc::new(DeferredQueue::new());
    let adapter = ScreenplayAdapter::builder().reclaimer(queue.clone()).build();
    adapter.set_source(Some(Arc::new(Scene::new("Kept")).into()));

    let held = adapter.screenplay().unwrap();
    adapter.set_source(None);

    assert_eq!(queue.pending_count(), 0);
    assert_eq!(Arc::strong_count(&held), 1);
    assert_eq!(held.element_count(), 1);
    assert_eq!(adapter.row_count(), 0);
}

#[test]
fn test_dropping_adapter_defers_synthesized_collection() {
    let queue = Arc::new(DeferredQueue::new());
    let adapter = ScreenplayAdapter::builder().reclaimer(queue.clone()).build();
    adapter.set_source(Some(Arc::new(Scene::new("Last")).into()));
    let synthesized = Arc::downgrade(&adapter.screenplay().unwrap());

    drop(adapter);
    assert!(synthesized.upgrade().is_some());
    assert_eq!(queue.process_all(), 1);
    assert!(synthesized.upgrade().is_none());
}

#[test]
fn test_out_of_range_rows_are_empty() {
    let adapter = ScreenplayAdapter::new();
    assert!(adapter.at(0).is_none());

    let screenplay = screenplay_with(2, 0);
    adapter.set_source(Some(screenplay.clone().into()));
    assert!(adapter.at(0).is_some());
    assert!(adapter.at(-1).is_none());
    assert!(adapter.at(2).is_none());
    assert!(adapter.at(i32::MAX).is_none());
    assert!(adapter.data_by_name(5, "scene").is_none());
}

#[test]
fn test_structural_changes_clear_then_restore() {
    let screenplay = screenplay_with(5, 2);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    let current = adapter.current_element().unwrap();

    let phases = Arc::new(Mutex::new(Vec::new()));
    let weak = Arc::downgrade(&adapter);
    let p = phases.clone();
    adapter.signals().rows_about_to_be_inserted.connect(move |_| {
        p.lock()
            .push(("about", weak.upgrade().unwrap().current_index()));
    });
    let weak = Arc::downgrade(&adapter);
    let p = phases.clone();
    adapter.signals().rows_inserted.connect(move |_| {
        p.lock()
            .push(("inserted", weak.upgrade().unwrap().current_index()));
    });
    let registry_changes = recorder(&screenplay.current_element_index_changed);
    let index_changes = recorder(&adapter.current_index_changed);
    let element_changes = counter(&adapter.current_element_changed);
    let counts = recorder(&adapter.element_count_changed);

    screenplay
        .insert_element_at(0, scene_element("Prologue"))
        .unwrap();

    // The cleared index is visible during the about-to phase only.
    assert_eq!(*phases.lock(), vec![("about", -1), ("inserted", 3)]);
    assert_eq!(adapter.current_index(), 3);
    assert!(Arc::ptr_eq(&adapter.current_element().unwrap(), &current));
    assert_eq!(*registry_changes.lock(), vec![3]);
    assert_eq!(*index_changes.lock(), vec![3]);
    assert_eq!(*element_changes.lock(), 0);
    assert_eq!(*counts.lock(), vec![6]);

    screenplay.remove_element(&current).unwrap();
    assert_eq!(adapter.current_index(), -1);
    assert!(adapter.current_element().is_none());
    assert_eq!(*index_changes.lock(), vec![3, -1]);
    assert_eq!(*element_changes.lock(), 1);
    assert_eq!(*counts.lock(), vec![6, 5]);

    screenplay.set_current_element_index(1);
    screenplay.move_element(1, 4).unwrap();
    assert_eq!(adapter.current_index(), 4);
    assert_eq!(*index_changes.lock(), vec![3, -1, 1, 4]);
    assert_eq!(*element_changes.lock(), 2);
    assert_eq!(*counts.lock(), vec![6, 5]);

    screenplay.clear_elements();
    assert_eq!(adapter.current_index(), -1);
    assert_eq!(adapter.row_count(), 0);
    assert_eq!(*index_changes.lock(), vec![3, -1, 1, 4, -1]);
    assert_eq!(*element_changes.lock(), 3);
    assert_eq!(*counts.lock(), vec![6, 5, 0]);
}

#[test]
fn test_edit_outside_the_selection_is_silent() {
    let screenplay = screenplay_with(5, 1);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    let index_changes = recorder(&adapter.current_index_changed);
    let element_changes = counter(&adapter.current_element_changed);
    let counts = recorder(&adapter.element_count_changed);

    screenplay.add_element(scene_element("Tail")).unwrap();
    screenplay.remove_element_at(5).unwrap();
    screenplay.move_element(3, 4).unwrap();

    assert!(index_changes.lock().is_empty());
    assert_eq!(*element_changes.lock(), 0);
    assert_eq!(*counts.lock(), vec![6, 5]);
    assert_eq!(adapter.current_index(), 1);
}

#[test]
fn test_current_element_changed_only_for_a_different_element() {
    let screenplay = screenplay_with(3, 1);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    let selected = adapter.current_element().unwrap();
    let index_changes = recorder(&adapter.current_index_changed);
    let element_changes = recorder(&adapter.current_element_changed);

    screenplay
        .insert_element_at(0, scene_element("Cold open"))
        .unwrap();
    assert_eq!(*index_changes.lock(), vec![2]);
    assert!(element_changes.lock().is_empty());
    assert!(Arc::ptr_eq(&adapter.current_element().unwrap(), &selected));

    adapter.set_current_index(0);
    assert_eq!(*index_changes.lock(), vec![2, 0]);
    let elements = element_changes.lock();
    assert_eq!(elements.len(), 1);
    assert!(Arc::ptr_eq(
        elements[0].as_ref().unwrap(),
        &screenplay.element_at(0).unwrap()
    ));
}

#[test]
fn test_set_source_signals_row_count_only_when_it_changes() {
    let adapter = ScreenplayAdapter::new();
    let counts = recorder(&adapter.element_count_changed);

    adapter.set_source(Some(Arc::new(Scene::new("One")).into()));
    adapter.set_source(Some(Arc::new(Scene::new("Two")).into()));
    let single = screenplay_with(1, 0);
    adapter.set_source(Some(single.clone().into()));
    let triple = screenplay_with(3, 0);
    adapter.set_source(Some(triple.clone().into()));
    adapter.set_source(None);
    adapter.set_source(None);

    assert_eq!(*counts.lock(), vec![1, 3, 0]);
}

#[test]
fn test_synthesized_collection_edits_keep_index_valid() {
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(Arc::new(Scene::new("Only")).into()));
    adapter.set_current_index(0);

    let synthesized = adapter.screenplay().unwrap();
    synthesized
        .insert_element_at(0, scene_element("Added"))
        .unwrap();

    // The selection follows its element; nothing is written back.
    assert_eq!(adapter.row_count(), 2);
    assert_eq!(adapter.current_index(), 1);
    assert_index_valid(&adapter);
    assert_eq!(synthesized.current_element_index(), -1);
}

#[test]
fn test_destroyed_screenplay_detaches_adapter() {
    let screenplay = screenplay_with(3, 1);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    let source_changes = counter(&adapter.source_changed);
    let index_changes = recorder(&adapter.current_index_changed);

    drop(screenplay);

    assert_eq!(*source_changes.lock(), 1);
    assert_eq!(*index_changes.lock(), vec![-1]);
    assert!(adapter.source().is_none());
    assert!(!adapter.is_source_screenplay());
    assert_eq!(adapter.row_count(), 0);
    assert_eq!(adapter.current_index(), -1);
    assert!(adapter.at(0).is_none());
}

#[test]
fn test_set_source_any_resolves_or_clears() {
    let adapter = ScreenplayAdapter::new();
    let source_changes = counter(&adapter.source_changed);

    let screenplay = screenplay_with(2, 0);
    let erased: Arc<dyn Any + Send + Sync> = screenplay.clone();
    adapter.set_source_any(Some(erased));
    assert!(adapter.is_source_screenplay());
    assert_eq!(adapter.row_count(), 2);

    let scene = Arc::new(Scene::new("Erased"));
    let erased: Arc<dyn Any + Send + Sync> = scene.clone();
    adapter.set_source_any(Some(erased));
    assert!(adapter.is_source_scene());
    assert_eq!(adapter.row_count(), 1);

    let unrelated: Arc<dyn Any + Send + Sync> = Arc::new(String::from("not a source"));
    adapter.set_source_any(Some(unrelated));
    assert!(!adapter.is_source_scene());
    assert!(!adapter.is_source_screenplay());
    assert_eq!(adapter.row_count(), 0);
    assert_eq!(adapter.current_index(), -1);

    assert_eq!(*source_changes.lock(), 3);
}

#[test]
fn test_metadata_and_scene_kind_forwarding() {
    let screenplay = screenplay_with(1, 0);
    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    let metadata_changes = counter(&adapter.metadata_changed);
    let kind_changes = recorder(&adapter.has_non_standard_scenes_changed);

    screenplay.set_author("A. Writer");
    let song = ScreenplayElement::for_scene(Arc::new(Scene::new("Song").with_kind(SceneKind::Song)));
    screenplay.add_element(song).unwrap();

    assert_eq!(*metadata_changes.lock(), 1);
    assert_eq!(*kind_changes.lock(), vec![true]);
    assert!(adapter.has_non_standard_scenes());

    adapter.set_source(None);
    screenplay.set_author("B. Writer");
    assert_eq!(*metadata_changes.lock(), 1);
    assert!(!adapter.has_non_standard_scenes());
}

#[test]
fn test_scene_navigation_delegates_to_screenplay_only() {
    let screenplay = Screenplay::new();
    screenplay.add_element(scene_element("One")).unwrap();
    screenplay
        .add_element(ScreenplayElement::for_break(BreakType::Act))
        .unwrap();
    screenplay.add_element(scene_element("Two")).unwrap();

    let adapter = ScreenplayAdapter::new();
    adapter.set_source(Some(screenplay.clone().into()));
    adapter.set_current_index(0);
    assert_eq!(adapter.next_scene_element_index(), 2);
    adapter.set_current_index(2);
    assert_eq!(adapter.previous_scene_element_index(), 0);

    adapter.set_source(Some(Arc::new(Scene::new("Alone")).into()));
    assert_eq!(adapter.next_scene_element_index(), 0);
    assert_eq!(adapter.previous_scene_element_index(), 0);
}

#[test]
fn test_adapter_rows_match_screenplay_rows() {
    let screenplay = screenplay_with(3, -1);
    let adapter = ScreenplayAdapter::builder()
        .config(AdapterConfig::from_json(r#"{ "reclaim_batch_size": 2 }"#).unwrap())
        .build();
    adapter.set_source(Some(AdapterSource::Screenplay(screenplay.clone())));

    for row in 0..3 {
        let ours = adapter.at(row as i32);
        let theirs = screenplay.data(row, sceneflow::model::ElementRole::ModelData);
        assert_eq!(ours, theirs);
    }
    assert_eq!(adapter.reclaimer().batch_size(), 2);
}

use super::*;
use anyhow::anyhow;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::models::event::{EventDraft, EventValidationError};
use crate::models::position::PositionError;
use crate::services::availability::Highlight;
use crate::services::persistence::{MockRosterStore, SqliteStore};
use crate::services::roster::GroupingError;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

fn sqlite_planner() -> Planner {
    let store = SqliteStore::in_memory().unwrap();
    Planner::open(Box::new(store), &AppConfig::default(), None)
}

fn add_interpreters(planner: &mut Planner, ids: &[&str]) {
    for id in ids {
        planner.upsert_interpreter(Interpreter::new((*id).into(), id, id));
    }
}

/// Event over days `first..=last` with the given interpreters assigned.
fn add_event(planner: &mut Planner, title: &str, first: u32, last: u32, ids: &[&str]) -> EventId {
    let id = planner
        .create_event(
            EventDraft::new()
                .title(title)
                .first_day(day(first))
                .last_day(day(last))
                .interpreters_needed(ids.len() as u32),
        )
        .unwrap();
    for interpreter in ids {
        assert!(planner.assign_interpreter(&id, &(*interpreter).into()));
    }
    id
}

fn permissive_mock() -> MockRosterStore {
    let mut store = MockRosterStore::new();
    store
        .expect_load()
        .returning(|| Ok(PersistedState::default()));
    store.expect_save_events().returning(|_| Ok(()));
    store.expect_save_interpreters().returning(|_| Ok(()));
    store.expect_save_groups().returning(|_| Ok(()));
    store.expect_append_activity().returning(|_| Ok(()));
    store
}

#[test]
fn test_create_event_uses_configured_location() {
    let config = AppConfig {
        default_location: "Macau".to_string(),
        ..AppConfig::default()
    };
    let mut planner = Planner::open(Box::new(SqliteStore::in_memory().unwrap()), &config, None);

    let id = planner
        .create_event(EventDraft::new().first_day(day(1)))
        .unwrap();
    let event = planner.event(&id).unwrap();
    assert_eq!(event.title, "Untitled");
    assert_eq!(event.location, "Macau");
    assert_eq!(event.end, day(2));
}

#[test]
fn test_create_event_requires_first_day() {
    let mut planner = sqlite_planner();
    assert_eq!(
        planner.create_event(EventDraft::new().title("Gala")),
        Err(EventValidationError::MissingStartDate)
    );
    assert!(planner.events().is_empty());
}

#[test]
fn test_update_event_keeps_roster() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b"]);
    let id = add_event(&mut planner, "Gala", 1, 3, &["a", "b"]);

    let updated = planner
        .update_event(&id, EventDraft::new().title("Gala Night").first_day(day(2)).last_day(day(5)))
        .unwrap();
    assert!(updated);

    let event = planner.event(&id).unwrap();
    assert_eq!(event.title, "Gala Night");
    assert_eq!(event.end, day(6));
    assert_eq!(event.interpreter_ids, vec![InterpreterId::from("a"), InterpreterId::from("b")]);
}

#[test]
fn test_changes_reach_the_store() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b"]);
    add_event(&mut planner, "Gala", 1, 3, &["a"]);

    let stored = planner.store.load().unwrap();
    assert_eq!(stored.interpreters.len(), 2);
    assert_eq!(stored.events[0].interpreter_ids, vec![InterpreterId::from("a")]);
    assert!(!planner.recent_activity().is_empty());
}

#[test]
fn test_event_status_follows_assignments() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b"]);
    let id = planner
        .create_event(EventDraft::new().first_day(day(1)).interpreters_needed(2))
        .unwrap();

    planner.assign_interpreter(&id, &"a".into());
    assert!(!planner.event(&id).unwrap().is_fully_assigned());
    assert_eq!(planner.event(&id).unwrap().interpreters_left(), 1);

    planner.assign_interpreter(&id, &"b".into());
    assert!(planner.event(&id).unwrap().is_fully_assigned());
    assert!(!planner.assign_interpreter(&id, &"b".into()));
    assert!(!planner.assign_interpreter(&id, &"ghost".into()));
}

#[test]
fn test_upcoming_events_use_exclusive_end() {
    let mut planner = sqlite_planner();
    add_event(&mut planner, "Past", 1, 3, &[]);
    add_event(&mut planner, "Current", 3, 6, &[]);

    let titles: Vec<_> = planner
        .upcoming_events(day(4))
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Current"]);

    let titles: Vec<_> = planner.upcoming_events(day(3)).iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Past", "Current"]);
}

#[test]
fn test_suggestions_split_quick_picks_and_usage_order() {
    let mut planner = sqlite_planner();
    let ids: Vec<String> = (0..15).map(|n| format!("i{:02}", n)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    add_interpreters(&mut planner, &id_refs);

    add_event(&mut planner, "Busy", 1, 1, &["i14"]);
    add_event(&mut planner, "Busier", 2, 2, &["i14", "i13"]);
    let target = add_event(&mut planner, "Target", 3, 3, &["i00"]);
    planner.assign_interpreter(&target, &"i14".into());

    let suggestions = planner.suggestions(&target).unwrap();
    assert_eq!(suggestions.quick_picks.len(), 11);
    assert!(!suggestions.quick_picks.contains(&"i00".into()));
    assert_eq!(suggestions.others, vec![InterpreterId::from("i13"), InterpreterId::from("i12")]);
}

#[test]
fn test_select_event_builds_roster_with_positions() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b"]);
    planner.set_interpreter_position(&"b".into(), "Lighting").unwrap();
    let id = add_event(&mut planner, "Gala", 1, 2, &["a", "b"]);

    assert!(planner.select_event(&id));
    let view = planner.roster_view().unwrap();
    assert_eq!(view.days, vec![day(1), day(2)]);
    let positions: Vec<_> = view.rows.iter().map(|r| r.position.as_str()).collect();
    assert_eq!(positions, vec!["Show Director", "Lighting"]);
    assert!(!view.group_column);
}

#[test]
fn test_reorder_updates_event_order_and_groups() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b", "c", "d"]);
    let id = add_event(&mut planner, "Gala", 1, 2, &["a", "b", "c", "d"]);
    planner.select_event(&id);

    planner.begin_group();
    planner.toggle_group_selection(&"b".into());
    planner.toggle_group_selection(&"c".into());
    planner.confirm_group_selection().unwrap();
    assert_eq!(planner.commit_group_name("Team1"), Some("Team1".to_string()));

    assert!(planner.move_roster_entry(&"b".into(), Some(&"a".into())));
    let order: Vec<_> = planner.event(&id).unwrap().interpreter_ids.iter().map(|i| i.as_str()).collect();
    assert_eq!(order, vec!["b", "a", "c", "d"]);

    let view = planner.roster_view().unwrap();
    assert_eq!(view.bands.len(), 1);
    assert_eq!((view.bands[0].first_row, view.bands[0].row_span), (2, 1));
    // a one-row band does not restart numbering
    let numbers: Vec<_> = view.rows.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    let stored = planner.store.load().unwrap();
    assert_eq!(stored.groups[0].start_id, InterpreterId::from("c"));
}

#[test]
fn test_non_consecutive_group_is_user_error() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b", "c"]);
    let id = add_event(&mut planner, "Gala", 1, 1, &["a", "b", "c"]);
    planner.select_event(&id);

    planner.begin_group();
    planner.toggle_group_selection(&"a".into());
    planner.toggle_group_selection(&"c".into());
    assert_eq!(
        planner.confirm_group_selection(),
        Err(GroupingError::NonConsecutiveSelection)
    );
    assert!(planner.roster_view().unwrap().selecting);
}

#[test]
fn test_stored_groups_apply_to_first_event_only() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .save_groups(&[Group::new("a".into(), "b".into(), "Team")])
        .unwrap();
    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), None);
    add_interpreters(&mut planner, &["a", "b"]);
    let first = add_event(&mut planner, "Gala", 1, 1, &["a", "b"]);
    let second = add_event(&mut planner, "Expo", 2, 2, &["a", "b"]);

    assert_eq!(planner.groups().len(), 1);
    planner.select_event(&first);
    assert_eq!(planner.roster_view().unwrap().bands.len(), 1);

    planner.select_event(&second);
    assert!(planner.roster_view().unwrap().bands.is_empty());
    // switching events does not touch the stored groups
    assert_eq!(planner.store.load().unwrap().groups.len(), 1);

    planner.clear_groups();
    assert!(planner.store.load().unwrap().groups.is_empty());
}

#[test]
fn test_unassign_from_open_roster_repairs_groups() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b", "c"]);
    let id = add_event(&mut planner, "Gala", 1, 1, &["a", "b", "c"]);
    planner.select_event(&id);
    planner.begin_group();
    planner.toggle_group_selection(&"a".into());
    planner.toggle_group_selection(&"b".into());
    planner.confirm_group_selection().unwrap();
    planner.commit_group_name("");

    assert!(planner.unassign_interpreter(&id, &"a".into()));
    let view = planner.roster_view().unwrap();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.bands[0].name, "Group 1");
    assert_eq!((view.bands[0].first_row, view.bands[0].row_span), (0, 1));
}

#[test]
fn test_delete_interpreter_cascades() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b"]);
    let id = add_event(&mut planner, "Gala", 1, 3, &["a", "b"]);
    planner.select_event(&id);
    planner.toggle_assign_mode(&"a".into());
    planner.set_working_day(day(1), true);

    assert!(planner.delete_interpreter(&"a".into()));
    assert!(planner.interpreter(&"a".into()).is_none());
    assert_eq!(planner.event(&id).unwrap().interpreter_ids, vec![InterpreterId::from("b")]);
    assert_eq!(planner.roster().ids(), vec![InterpreterId::from("b")]);
    assert!(planner.assigning_interpreter().is_none());
    assert_eq!(planner.assignments().get(&"a".into(), day(1)), None);
}

#[test]
fn test_delete_active_event_closes_roster() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a"]);
    let id = add_event(&mut planner, "Gala", 1, 3, &["a"]);
    planner.select_event(&id);
    planner.toggle_assign_mode(&"a".into());

    assert!(planner.delete_event(&id));
    assert!(planner.active_event().is_none());
    assert!(planner.roster_view().is_none());
    assert!(planner.assigning_interpreter().is_none());
    assert!(!planner.delete_event(&id));
}

#[test]
fn test_interpreter_directory_edits() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b", "c"]);
    planner.set_interpreter_position(&"a".into(), "Lighting").unwrap();

    let edited = Interpreter::new("a".into(), "Ann", "Ann Lee");
    assert!(!planner.upsert_interpreter(edited));
    let a = planner.interpreter(&"a".into()).unwrap();
    assert_eq!(a.name, "Ann");
    assert_eq!(a.position.as_deref(), Some("Lighting"));

    assert!(planner.move_interpreter(&"c".into(), Some(&"a".into())));
    let order: Vec<_> = planner.interpreters().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
    assert!(!planner.move_interpreter(&"c".into(), Some(&"c".into())));

    let fresh = planner.new_interpreter_id();
    assert!(planner.interpreter(&fresh).is_none());
}

#[test]
fn test_position_catalog_edits() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a"]);
    let id = add_event(&mut planner, "Gala", 1, 1, &["a"]);
    planner.select_event(&id);

    planner.add_position("Sound").unwrap();
    assert_eq!(
        planner.add_position("Sound"),
        Err(PositionError::Duplicate("Sound".to_string()))
    );
    assert_eq!(
        planner.set_interpreter_position(&"a".into(), "Catering"),
        Err(PositionError::Unknown("Catering".to_string()))
    );
    planner.set_interpreter_position(&"a".into(), "Sound").unwrap();
    assert_eq!(planner.roster_view().unwrap().rows[0].position, "Sound");

    planner.remove_position("Sound").unwrap();
    assert_eq!(
        planner.interpreter(&"a".into()).unwrap().position.as_deref(),
        Some("Show Director")
    );
    assert_eq!(planner.roster_view().unwrap().rows[0].position, "Show Director");
    assert!(!planner.store.load().unwrap().positions.unwrap().contains("Sound"));
}

#[test]
fn test_availability_scenario() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["x"]);
    add_event(&mut planner, "E1", 1, 3, &["x"]);
    add_event(&mut planner, "E2", 3, 5, &["x"]);
    let x = InterpreterId::from("x");

    assert_eq!(planner.classify(&x, day(3)), Highlight::Overlap);
    assert_eq!(planner.classify(&x, day(1)), Highlight::Single);
    assert_eq!(planner.classify(&x, day(6)), Highlight::None);

    assert!(!planner.set_working_day(day(7), true));
    planner.toggle_assign_mode(&x);
    planner.set_working_day(day(1), false);
    planner.set_working_day(day(7), true);
    assert_eq!(planner.classify(&x, day(1)), Highlight::Single);

    let month = planner.availability(&x, day(1), day(8));
    assert_eq!(month.len(), 7);
    assert_eq!(month[6], (day(7), Highlight::Working));
}

#[test]
fn test_roster_view_band_covers_every_row_of_its_group() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b", "c"]);
    let id = add_event(&mut planner, "Gala", 1, 1, &["a", "b", "c"]);
    planner.select_event(&id);
    planner.begin_group();
    planner.toggle_group_selection(&"a".into());
    planner.toggle_group_selection(&"b".into());
    planner.confirm_group_selection().unwrap();
    planner.commit_group_name("Booth");

    let view = planner.roster_view().unwrap();
    assert_eq!(view.band_at(0).map(|band| band.name.as_str()), Some("Booth"));
    assert_eq!(view.band_at(1), view.band_at(0));
    assert!(view.band_at(2).is_none());
    let numbers: Vec<_> = view.rows.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_roster_view_marks_working_days() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a"]);
    let id = add_event(&mut planner, "Gala", 1, 3, &["a"]);
    planner.select_event(&id);
    planner.toggle_assign_mode(&"a".into());
    planner.set_working_day(day(2), true);

    let view = planner.roster_view().unwrap();
    assert_eq!(view.rows[0].working_days, vec![false, true, false]);
}

#[test]
fn test_assign_mode_flushes_outgoing_interpreter() {
    let mut store = permissive_mock();
    // once for the mark, once for the switch
    store
        .expect_save_assignments()
        .times(2)
        .withf(|map| {
            map.get(&InterpreterId::from("a"))
                .and_then(|days| days.get(&day(1)))
                == Some(&true)
        })
        .returning(|_| Ok(()));

    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), None);
    add_interpreters(&mut planner, &["a", "b"]);

    assert_eq!(planner.toggle_assign_mode(&"a".into()), Some(&InterpreterId::from("a")));
    planner.set_working_day(day(1), true);
    assert_eq!(planner.toggle_assign_mode(&"b".into()), Some(&InterpreterId::from("b")));
    assert!(planner.take_warnings().is_empty());
}

#[test]
fn test_each_working_day_mark_is_saved() {
    let mut store = permissive_mock();
    let mut seq = mockall::Sequence::new();
    store
        .expect_save_assignments()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|map| map.get(&InterpreterId::from("a")).map(|days| days.len()) == Some(1))
        .returning(|_| Ok(()));
    store
        .expect_save_assignments()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|map| {
            map.get(&InterpreterId::from("a"))
                .and_then(|days| days.get(&day(3)))
                == Some(&false)
        })
        .returning(|_| Ok(()));

    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), None);
    add_interpreters(&mut planner, &["a"]);
    assert!(!planner.set_working_day(day(1), true));

    planner.toggle_assign_mode(&"a".into());
    assert!(planner.set_working_day(day(2), true));
    assert!(planner.set_working_day(day(3), false));
    assert!(planner.take_warnings().is_empty());
}

#[test]
fn test_working_day_survives_reopen_without_ending_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roster.db");
    let open = || {
        let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
        Planner::open(Box::new(store), &AppConfig::default(), None)
    };

    {
        let mut planner = open();
        add_interpreters(&mut planner, &["x"]);
        planner.toggle_assign_mode(&"x".into());
        assert!(planner.set_working_day(day(2), true));
        assert_eq!(planner.classify(&"x".into(), day(2)), Highlight::Working);
    }

    let planner = open();
    assert_eq!(planner.assignments().get(&"x".into(), day(2)), Some(true));
    assert_eq!(planner.classify(&"x".into(), day(2)), Highlight::Working);
}

#[test]
fn test_toggle_same_interpreter_ends_session() {
    let mut store = permissive_mock();
    store.expect_save_assignments().times(1).returning(|_| Ok(()));

    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), None);
    add_interpreters(&mut planner, &["a"]);
    planner.toggle_assign_mode(&"a".into());
    assert_eq!(planner.toggle_assign_mode(&"a".into()), None);
    assert_eq!(planner.toggle_assign_mode(&"ghost".into()), None);
}

#[test]
fn test_failed_save_keeps_memory_and_writes_cache() {
    let temp_dir = TempDir::new().unwrap();
    let cache = temp_dir.path().join("cache.json");

    let mut store = MockRosterStore::new();
    store
        .expect_load()
        .returning(|| Ok(PersistedState::default()));
    store
        .expect_save_events()
        .returning(|_| Err(anyhow!("network down")));
    store.expect_append_activity().returning(|_| Ok(()));

    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), Some(cache.clone()));
    let id = planner
        .create_event(EventDraft::new().title("Gala").first_day(day(1)))
        .unwrap();

    assert!(planner.event(&id).is_some());
    let warnings = planner.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].action, "save events");
    assert!(warnings[0].to_string().contains("network down"));
    assert!(planner.take_warnings().is_empty());

    let cached = load_snapshot(&cache).unwrap();
    assert_eq!(cached.events[0].id, id);
}

#[test]
fn test_failed_flush_still_switches_interpreter() {
    let mut store = permissive_mock();
    store
        .expect_save_assignments()
        .returning(|_| Err(anyhow!("quota exceeded")));

    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), None);
    add_interpreters(&mut planner, &["a", "b"]);
    planner.toggle_assign_mode(&"a".into());
    planner.set_working_day(day(1), true);
    planner.toggle_assign_mode(&"b".into());

    assert_eq!(planner.assigning_interpreter(), Some(&InterpreterId::from("b")));
    assert_eq!(planner.assignments().get(&"a".into(), day(1)), Some(true));
    assert_eq!(planner.take_warnings()[0].action, "save assignments");
}

#[test]
fn test_failed_load_falls_back_to_cache() {
    let temp_dir = TempDir::new().unwrap();
    let cache = temp_dir.path().join("cache.json");
    let cached = PersistedState {
        interpreters: vec![Interpreter::new("a".into(), "Ann", "Ann Lee")],
        ..PersistedState::default()
    };
    save_snapshot(&cache, &cached).unwrap();

    let mut store = MockRosterStore::new();
    store
        .expect_load()
        .returning(|| Err(anyhow!("permission denied")));

    let mut planner = Planner::open(Box::new(store), &AppConfig::default(), Some(cache));
    assert_eq!(planner.interpreters().len(), 1);
    assert_eq!(planner.positions(), &PositionCatalog::default());
    assert_eq!(planner.take_warnings()[0].action, "load roster data");
}

#[test]
fn test_reload_keeps_fitting_groups() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a", "b", "c"]);
    let id = add_event(&mut planner, "Gala", 1, 1, &["a", "b", "c"]);
    planner.select_event(&id);
    planner.begin_group();
    planner.toggle_group_selection(&"b".into());
    planner.toggle_group_selection(&"c".into());
    planner.confirm_group_selection().unwrap();
    planner.commit_group_name("Team");

    // another client removes "b" from the event
    let mut events = planner.events().to_vec();
    events[0].unassign(&"b".into());
    planner.store.save_events(&events).unwrap();

    planner.reload().unwrap();
    let view = planner.roster_view().unwrap();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.bands.len(), 1);
    assert_eq!(planner.groups()[0].start_id, InterpreterId::from("c"));
}

#[test]
fn test_clear_activity() {
    let mut planner = sqlite_planner();
    add_interpreters(&mut planner, &["a"]);
    assert_eq!(planner.recent_activity()[0].action, "Add interpreter");

    planner.clear_activity();
    assert!(planner.recent_activity().is_empty());
}

use lazyfocus_core::{
    FixedClock, NewNotification, NewTask, NotificationKind, NotificationStore, Priority, Task,
    MILLIS_PER_DAY,
};
use std::sync::Arc;
use uuid::Uuid;

const NOW: i64 = 1_750_000_000_000;

fn setup() -> (Arc<FixedClock>, NotificationStore) {
    let clock = Arc::new(FixedClock::new(NOW));
    let store = NotificationStore::new(clock.clone());
    (clock, store)
}

fn system_notice(title: &str) -> NewNotification {
    NewNotification {
        title: title.to_string(),
        message: format!("{title} body"),
        kind: NotificationKind::System,
        related_entity_id: None,
        read: false,
        priority: Priority::Low,
    }
}

#[test]
fn add_notification_prepends_and_stamps() {
    let (clock, mut store) = setup();

    let first = store.add_notification(system_notice("first"));
    clock.advance(500);
    let second = store.add_notification(system_notice("second"));

    assert_ne!(first, second);
    let items = store.notifications();
    assert_eq!(items[0].id, second);
    assert_eq!(items[0].timestamp, NOW + 500);
    assert_eq!(items[1].id, first);
    assert_eq!(items[1].timestamp, NOW);
    assert_eq!(items[1].kind, NotificationKind::System);
}

#[test]
fn mark_as_read_targets_one_notification() {
    let (_, mut store) = setup();
    let a = store.add_notification(system_notice("a"));
    store.add_notification(system_notice("b"));

    assert!(store.mark_notification_as_read(a));
    assert!(store.get_notification(a).unwrap().read);
    assert_eq!(store.unread_count(), 1);

    assert!(!store.mark_notification_as_read(Uuid::new_v4()));
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn mark_all_as_read_is_idempotent() {
    let (_, mut store) = setup();
    for title in ["a", "b", "c"] {
        store.add_notification(system_notice(title));
    }
    assert_eq!(store.unread_count(), 3);

    store.mark_all_notifications_as_read();
    let once = store.notifications().to_vec();
    store.mark_all_notifications_as_read();

    assert_eq!(store.notifications(), once.as_slice());
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn read_notifications_stay_read() {
    let (_, mut store) = setup();
    let mut notice = system_notice("pre-read");
    notice.read = true;
    let id = store.add_notification(notice);

    store.mark_notification_as_read(id);
    store.mark_all_notifications_as_read();

    assert!(store.get_notification(id).unwrap().read);
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn delete_notification_removes_only_match() {
    let (_, mut store) = setup();
    let a = store.add_notification(system_notice("a"));
    let b = store.add_notification(system_notice("b"));

    assert!(store.delete_notification(a));
    assert!(!store.delete_notification(a));
    assert_eq!(store.notifications().len(), 1);
    assert_eq!(store.notifications()[0].id, b);
}

#[test]
fn derivation_emits_nothing_for_completed_undated_task() {
    let (_, mut store) = setup();
    let mut task = Task::from_new(NewTask::titled("done"), NOW);
    task.completed = true;

    assert!(store.generate_task_notification(&task).is_empty());
    assert!(store.notifications().is_empty());
}

#[test]
fn derivation_uses_current_clock_for_due_window() {
    let (clock, mut store) = setup();
    let task = Task::from_new(
        NewTask::titled("report").with_due_date(NOW + 2 * MILLIS_PER_DAY),
        NOW,
    );

    assert_eq!(store.generate_task_notification(&task).len(), 1);

    clock.advance(MILLIS_PER_DAY);
    let emitted = store.generate_task_notification(&task);
    assert_eq!(emitted.len(), 2);
    let due = store.get_notification(emitted[1]).unwrap();
    assert_eq!(due.priority, Priority::High);
    assert_eq!(due.kind, NotificationKind::Task);
}

#[test]
fn derivation_does_not_deduplicate() {
    let (_, mut store) = setup();
    let task = Task::from_new(NewTask::titled("repeat"), NOW);

    store.generate_task_notification(&task);
    store.generate_task_notification(&task);

    let items = store.notifications();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].message, items[1].message);
    assert_ne!(items[0].id, items[1].id);
}

#[test]
fn notification_wire_shape_uses_type_field() {
    let (_, mut store) = setup();
    let task = Task::from_new(NewTask::titled("wire"), NOW);
    store.generate_task_notification(&task);

    let value = serde_json::to_value(&store.notifications()[0]).unwrap();
    assert_eq!(value["type"], "task");
    assert_eq!(value["relatedEntityId"], task.id.to_string());
    assert_eq!(value["priority"], "medium");
    assert_eq!(value["read"], false);
}

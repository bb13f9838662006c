use chrono::{DateTime, Utc};

use crate::config::NOTIFICATION_LIMIT;
use crate::core::helpers::new_id;
use crate::models::models::{Notification, Store};

/// Prepends an unread notification and drops the oldest beyond the limit.
pub fn add_notification(store: &mut Store, text: impl Into<String>, now: DateTime<Utc>) {
    store.notifications.insert(
        0,
        Notification {
            id: new_id(),
            text: text.into(),
            read: false,
            time: now,
        },
    );
    store.notifications.truncate(NOTIFICATION_LIMIT);
}

pub fn unread_count(store: &Store) -> usize {
    store.notifications.iter().filter(|n| !n.read).count()
}

pub fn mark_all_read(store: &mut Store) -> bool {
    let mut changed = false;
    for n in store.notifications.iter_mut().filter(|n| !n.read) {
        n.read = true;
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_capped_newest_first() {
        let mut store = Store::default();
        for i in 0..120 {
            add_notification(&mut store, format!("n{}", i), Utc::now());
        }
        assert_eq!(store.notifications.len(), NOTIFICATION_LIMIT);
        assert_eq!(store.notifications[0].text, "n119");
        assert_eq!(store.notifications[49].text, "n70");
    }

    #[test]
    fn mark_all_read_clears_the_badge() {
        let mut store = Store::default();
        add_notification(&mut store, "a", Utc::now());
        add_notification(&mut store, "b", Utc::now());
        assert_eq!(unread_count(&store), 2);
        assert!(mark_all_read(&mut store));
        assert_eq!(unread_count(&store), 0);
        assert!(!mark_all_read(&mut store));
    }
}

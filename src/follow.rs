use chrono::{DateTime, Utc};

use crate::config::SUGGESTION_LIMIT;
use crate::models::models::{Store, User};
use crate::notifications::add_notification;
use crate::users::find_user;

pub fn follow_user(store: &mut Store, following_id: &str) {
    if !store.me.is_following(following_id) {
        store.me.following.push(following_id.to_string());
    }
}

pub fn unfollow_user(store: &mut Store, following_id: &str) {
    store.me.following.retain(|id| id != following_id);
}

/// Flips whether "me" follows `user_id` and returns true when it is now followed.
/// With `notify`, a follow also produces a notification.
pub fn toggle_follow(store: &mut Store, user_id: &str, notify: bool, now: DateTime<Utc>) -> bool {
    if store.me.is_following(user_id) {
        unfollow_user(store, user_id);
        return false;
    }

    follow_user(store, user_id);
    if notify {
        let text = format!("{} followed {}", store.me.name, find_user(store, user_id).name);
        add_notification(store, text, now);
    }
    true
}

pub fn get_followings(store: &Store) -> &[String] {
    &store.me.following
}

/// The first known users, in the order they were added.
pub fn suggestions(store: &Store) -> &[User] {
    let end = store.users.len().min(SUGGESTION_LIMIT);
    &store.users[..end]
}

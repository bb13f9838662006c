use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::config::{ME_ID, PLACEHOLDER_NAME};
use crate::media::default_avatar;
use crate::models::models::{Store, User};

/// Resolves a user id; unknown ids get a synthesized placeholder.
pub fn find_user<'a>(store: &'a Store, id: &str) -> Cow<'a, User> {
    if id == ME_ID {
        return Cow::Borrowed(&store.me);
    }
    match store.users.iter().find(|u| u.id == id) {
        Some(user) => Cow::Borrowed(user),
        None => Cow::Owned(User {
            id: id.to_string(),
            name: PLACEHOLDER_NAME.to_string(),
            avatar: default_avatar(PLACEHOLDER_NAME),
            ..Default::default()
        }),
    }
}

/// Fields left as `None` (or blank after trimming) keep their current value.
/// Text is stored as typed and escaped when rendered.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Data URL of a newly uploaded avatar.
    #[serde(default)]
    pub avatar: Option<String>,
}

pub fn update_profile(store: &mut Store, update: &ProfileUpdate) {
    if let Some(name) = update.name.as_deref() {
        let name = name.trim();
        if !name.is_empty() {
            store.me.name = name.to_string();
        }
    }
    if let Some(bio) = update.bio.as_deref() {
        let bio = bio.trim();
        if !bio.is_empty() {
            store.me.bio = bio.to_string();
        }
    }
    if let Some(avatar) = &update.avatar {
        if !avatar.is_empty() {
            store.me.avatar = avatar.clone();
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Monetization {
    Tips,
    Shop,
    Subscriptions,
}

impl Monetization {
    pub fn notice(self) -> &'static str {
        match self {
            Monetization::Tips => "Tip button added to your profile (mock). To accept real tips, ask a parent to connect a real payment processor and follow platform rules.",
            Monetization::Shop => "Shop created (mock). You can sell digital items — get parental help to accept payments.",
            Monetization::Subscriptions => "Subscription enabled (mock). Real subscriptions need a payment platform and parental permission.",
        }
    }
}

/// Only flips a flag on "me"; nothing is charged anywhere.
pub fn enable_monetization(store: &mut Store, kind: Monetization) {
    match kind {
        Monetization::Tips => store.me.tips_enabled = true,
        Monetization::Shop => store.me.shop_enabled = true,
        Monetization::Subscriptions => store.me.sub_enabled = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_becomes_placeholder() {
        let store = Store::default();
        let user = find_user(&store, "ghost");
        assert_eq!(user.name, "Unknown");
        assert_eq!(user.id, "ghost");
        assert!(user.avatar.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(find_user(&store, "me").name, "You");
    }

    #[test]
    fn blank_fields_do_not_overwrite() {
        let mut store = Store::default();
        update_profile(
            &mut store,
            &ProfileUpdate {
                name: Some("   ".to_string()),
                bio: None,
                avatar: Some(String::new()),
            },
        );
        assert_eq!(store.me.name, "You");
        assert_eq!(store.me.bio, "Tell people about yourself.");
        assert_eq!(store.me.avatar, "");
    }

    #[test]
    fn markup_like_text_is_kept_as_typed() {
        let mut store = Store::default();
        update_profile(
            &mut store,
            &ProfileUpdate {
                name: Some(" <Me> ".to_string()),
                bio: Some("I style <div> tags & <b>bold</b> stuff".to_string()),
                avatar: None,
            },
        );
        assert_eq!(store.me.name, "<Me>");
        assert_eq!(store.me.bio, "I style <div> tags & <b>bold</b> stuff");
    }

    #[test]
    fn monetization_only_sets_flags() {
        let mut store = Store::default();
        enable_monetization(&mut store, Monetization::Shop);
        assert!(store.me.shop_enabled);
        assert!(!store.me.tips_enabled && !store.me.sub_enabled);
    }
}

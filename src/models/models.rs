use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ME_ID;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub bio: String,
    /// Data URL, empty when the user never uploaded one.
    pub avatar: String,
    pub following: Vec<String>,
    pub tips_enabled: bool,
    pub shop_enabled: bool,
    pub sub_enabled: bool,
}

impl User {
    pub fn new(id: &str, name: &str, bio: &str) -> Self {
        User {
            id: id.to_string(),
            name: name.to_string(),
            bio: bio.to_string(),
            ..Default::default()
        }
    }

    pub fn me() -> Self {
        User::new(ME_ID, "You", "Tell people about yourself.")
    }

    pub fn is_following(&self, user_id: &str) -> bool {
        self.following.iter().any(|id| id == user_id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub image: String,
    pub likes: u64,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    /// Display name of the author when the comment was written.
    pub by: String,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Notification {
    pub id: String,
    pub text: String,
    pub read: bool,
    pub time: DateTime<Utc>,
}

/// Whole application state, persisted as one JSON document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Store {
    pub me: User,
    #[serde(with = "users_by_id")]
    pub users: Vec<User>,
    /// Newest first.
    pub posts: Vec<Post>,
    /// Newest first.
    pub notifications: Vec<Notification>,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            me: User::me(),
            users: Vec::new(),
            posts: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

/// `users` is a JSON object keyed by user id; insertion order is kept
/// because suggestions are taken from the front of it.
mod users_by_id {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::User;

    pub fn serialize<S: Serializer>(users: &[User], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(users.len()))?;
        for user in users {
            map.serialize_entry(&user.id, user)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<User>, D::Error> {
        deserializer.deserialize_map(UsersVisitor)
    }

    struct UsersVisitor;

    impl<'de> Visitor<'de> for UsersVisitor {
        type Value = Vec<User>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of users keyed by id")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut users: Vec<User> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, mut user)) = access.next_entry::<String, User>()? {
                if user.id.is_empty() {
                    user.id = key;
                }
                // later duplicates win, like JSON.parse
                match users.iter_mut().find(|u| u.id == user.id) {
                    Some(existing) => *existing = user,
                    None => users.push(user),
                }
            }
            Ok(users)
        }
    }
}

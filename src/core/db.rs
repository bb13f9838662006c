use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::core::helpers::new_id;
use crate::core::storage::{Storage, StorageExt};
use crate::models::models::{Post, Store, User};

/// Example data for a first start.
pub fn seed_store(now: DateTime<Utc>) -> Store {
    let mut store = Store::default();
    store.users.push(User::new("u1", "ChefMia", "Recipes & vibes"));
    store.users.push(User::new("u2", "ArtByLex", "digital art"));

    store.posts.push(Post {
        id: new_id(),
        user_id: "u1".to_string(),
        text: "Quick pancake hack! #food".to_string(),
        likes: 5,
        created_at: now,
        ..Default::default()
    });
    store.posts.push(Post {
        id: new_id(),
        user_id: "u2".to_string(),
        text: "New drawing — feedback welcome #art".to_string(),
        likes: 8,
        created_at: now,
        ..Default::default()
    });
    store
}

/// Reads the store under `key`. Absent data is seeded and persisted;
/// unreadable data is dropped and replaced by the seed.
pub fn load_store(storage: &mut dyn Storage, key: &str, now: DateTime<Utc>) -> anyhow::Result<Store> {
    match storage.get_json::<Store>(key) {
        Ok(Some(store)) => {
            info!(posts = store.posts.len(), users = store.users.len(), "loaded store");
            return Ok(store);
        }
        Ok(None) => info!("no stored data, seeding example users and posts"),
        Err(e) => {
            warn!(error = %e, "corrupt store, resetting");
            storage.delete(key)?;
        }
    }

    let store = seed_store(now);
    persist_store(storage, key, &store)?;
    Ok(store)
}

pub fn persist_store(storage: &mut dyn Storage, key: &str, store: &Store) -> anyhow::Result<()> {
    storage.set_json(key, store)?;
    debug!(key, "persisted store");
    Ok(())
}

pub fn reset_store(storage: &mut dyn Storage, key: &str, now: DateTime<Utc>) -> anyhow::Result<Store> {
    storage.delete(key)?;
    info!(key, "store reset");
    load_store(storage, key, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    #[test]
    fn first_load_seeds_and_persists() {
        let mut storage = MemoryStorage::new();
        let store = load_store(&mut storage, "k", Utc::now()).unwrap();

        assert_eq!(store.users.len(), 2);
        assert_eq!(store.posts[0].text, "Quick pancake hack! #food");
        assert_eq!(store.posts[1].likes, 8);
        assert_eq!(storage.get_json::<Store>("k").unwrap(), Some(store));
    }

    #[test]
    fn corrupt_data_is_replaced_by_seed() {
        let mut storage = MemoryStorage::new();
        storage.set("k", b"{not json").unwrap();

        let store = load_store(&mut storage, "k", Utc::now()).unwrap();
        assert_eq!(store.posts.len(), 2);
        assert!(storage.get_json::<Store>("k").unwrap().is_some());
    }

    #[test]
    fn persist_then_load_round_trips() {
        let mut storage = MemoryStorage::new();
        let mut store = seed_store(Utc::now());
        store.me.following.push("u2".to_string());
        store.me.tips_enabled = true;

        persist_store(&mut storage, "k", &store).unwrap();
        assert_eq!(load_store(&mut storage, "k", Utc::now()).unwrap(), store);
    }

    #[test]
    fn users_keep_insertion_order_through_json() {
        let json = r#"{"users": {"zed": {"name": "Zed"}, "amy": {"id": "amy", "name": "Amy"}}}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = store.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["zed", "amy"]);
        assert_eq!(store.me.id, "me");
    }
}

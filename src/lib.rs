//! MiniSocial: a single-page social feed over one JSON document in a
//! key-value slot. Every action mutates the owned [`App`], writes the whole
//! store back and re-renders the whole UI tree.

pub mod backup;
pub mod clipboard;
pub mod config;
pub mod core;
pub mod follow;
pub mod handlers;
pub mod media;
pub mod models;
pub mod notifications;
pub mod posts;
pub mod templates;
pub mod trending;
pub mod users;
pub mod widgets;

use tracing::info;

pub use crate::clipboard::{Clipboard, MemoryClipboard, NoClipboard};
pub use crate::core::errors::{AppError, AppResult};
pub use crate::core::storage::{FileStorage, MemoryStorage, Storage};
pub use crate::handlers::{Action, Frame};
pub use crate::models::models::{Comment, Notification, Post, Store, User};
pub use crate::templates::{Modal, ViewState};
pub use crate::widgets::{Alert, Download, Widget};

use crate::core::db::{load_store, persist_store};
use crate::core::helpers::now;

pub struct App {
    store: Store,
    view: ViewState,
    storage: Box<dyn Storage>,
    clipboard: Box<dyn Clipboard>,
    key: String,
}

impl App {
    /// Loads the store from `storage` under the configured key, seeding it on
    /// first start or when the stored document cannot be read.
    pub fn load(storage: Box<dyn Storage>) -> anyhow::Result<App> {
        App::load_with_key(storage, &config::storage_key())
    }

    pub fn load_with_key(mut storage: Box<dyn Storage>, key: &str) -> anyhow::Result<App> {
        let store = load_store(storage.as_mut(), key, now())?;
        info!(key, "app loaded");
        Ok(App {
            store,
            view: ViewState::default(),
            storage,
            clipboard: Box::new(NoClipboard),
            key: key.to_string(),
        })
    }

    /// Loads and renders the first frame.
    pub fn start(storage: Box<dyn Storage>) -> anyhow::Result<(App, Frame)> {
        let app = App::load(storage)?;
        let frame = Frame { view: app.render(), alert: None, download: None };
        Ok((app, frame))
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn render(&self) -> Widget {
        templates::render_app(&self.store, &self.view, now())
    }

    pub fn render_html(&self) -> anyhow::Result<String> {
        templates::render_page(&self.render(), &self.store)
    }

    /// Writes the whole store back under the storage key.
    pub fn persist(&mut self) -> AppResult<()> {
        persist_store(self.storage.as_mut(), &self.key, &self.store)?;
        Ok(())
    }

    pub fn export(&mut self) -> Frame {
        self.dispatch(Action::Export)
    }

    /// Replaces the store with `json`; on a parse error the store is untouched
    /// and the frame carries an "Import failed" alert.
    pub fn import(&mut self, json: &str) -> Frame {
        self.dispatch(Action::Import { json: json.to_string() })
    }
}

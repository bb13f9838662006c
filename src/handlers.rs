use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backup::{export_store, parse_import};
use crate::core::db::reset_store;
use crate::core::errors::{AppError, AppResult};
use crate::core::helpers::now;
use crate::follow::toggle_follow;
use crate::notifications::mark_all_read;
use crate::posts::{add_comment, create_post, find_post, like_post, share_link};
use crate::templates::Modal;
use crate::users::{enable_monetization, update_profile, Monetization, ProfileUpdate};
use crate::widgets::{Alert, Download, Widget};
use crate::App;

/// One user interaction, addressed by ids rather than by references into the store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    Like { post_id: String },
    ToggleComments { post_id: String },
    Comment { post_id: String, text: String },
    /// Follow button on a post card; following notifies.
    FollowAuthor { user_id: String },
    /// Follow button in the suggestions list.
    FollowSuggested { user_id: String },
    Share { post_id: String },
    Publish {
        text: String,
        #[serde(default)]
        image: String,
    },
    SaveProfile(ProfileUpdate),
    Monetize { kind: Monetization },
    Search { query: String },
    FilterTag { tag: String },
    MarkNotificationsRead,
    OpenModal { modal: Modal },
    CloseModal,
    Export,
    Import { json: String },
    Reset,
}

/// What the host shows after an action: the freshly rendered tree plus
/// at most one alert and one file to save.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Frame {
    pub view: Widget,
    pub alert: Option<Alert>,
    pub download: Option<Download>,
}

#[derive(Default)]
struct Reply {
    mutated: bool,
    alert: Option<Alert>,
    download: Option<Download>,
}

impl Reply {
    fn mutated() -> Self {
        Reply { mutated: true, ..Default::default() }
    }

    fn view_only() -> Self {
        Reply::default()
    }

    fn alert(mut self, message: impl Into<String>) -> Self {
        self.alert = Some(Alert::new(message));
        self
    }
}

impl App {
    /// Applies `action`, persists the whole store if it changed, and
    /// re-renders everything.
    pub fn dispatch(&mut self, action: Action) -> Frame {
        debug!(?action, "dispatch");
        let (alert, download) = match self.handle(action) {
            Ok(reply) => {
                let persisted = if reply.mutated { self.persist() } else { Ok(()) };
                match persisted {
                    Ok(()) => (reply.alert, reply.download),
                    Err(e) => (Some(e.into()), reply.download),
                }
            }
            Err(e) => {
                debug!(error = %e, "action rejected");
                (Some(e.into()), None)
            }
        };

        Frame { view: self.render(), alert, download }
    }

    fn handle(&mut self, action: Action) -> AppResult<Reply> {
        let now = now();
        match action {
            Action::Like { post_id } => {
                like_post(&mut self.store, &post_id, now)?;
                Ok(Reply::mutated())
            }
            Action::ToggleComments { post_id } => {
                find_post(&self.store, &post_id)?;
                if !self.view.open_comments.remove(&post_id) {
                    self.view.open_comments.insert(post_id);
                }
                Ok(Reply::view_only())
            }
            Action::Comment { post_id, text } => {
                let added = add_comment(&mut self.store, &post_id, &text, now)?;
                Ok(if added { Reply::mutated() } else { Reply::view_only() })
            }
            Action::FollowAuthor { user_id } => {
                toggle_follow(&mut self.store, &user_id, true, now);
                Ok(Reply::mutated())
            }
            Action::FollowSuggested { user_id } => {
                toggle_follow(&mut self.store, &user_id, false, now);
                Ok(Reply::mutated())
            }
            Action::Share { post_id } => {
                find_post(&self.store, &post_id)?;
                let link = share_link(&post_id);
                if let Err(e) = self.clipboard.write_text(&link) {
                    warn!(error = %e, "copy to clipboard failed");
                    return Err(AppError::Clipboard(e.to_string()));
                }
                Ok(Reply::view_only().alert(format!("Link copied: {}", link)))
            }
            Action::Publish { text, image } => {
                create_post(&mut self.store, &text, &image, now)?;
                self.view.modal = None;
                Ok(Reply::mutated())
            }
            Action::SaveProfile(update) => {
                update_profile(&mut self.store, &update);
                self.view.modal = None;
                Ok(Reply::mutated())
            }
            Action::Monetize { kind } => {
                enable_monetization(&mut self.store, kind);
                Ok(Reply::mutated().alert(kind.notice()))
            }
            Action::Search { query } => {
                self.view.filter = query;
                Ok(Reply::view_only())
            }
            Action::FilterTag { tag } => {
                self.view.filter = tag.trim_start_matches('#').to_string();
                Ok(Reply::view_only())
            }
            Action::MarkNotificationsRead => Ok(if mark_all_read(&mut self.store) {
                Reply::mutated()
            } else {
                Reply::view_only()
            }),
            Action::OpenModal { modal } => {
                self.view.modal = Some(modal);
                Ok(Reply::view_only())
            }
            Action::CloseModal => {
                self.view.modal = None;
                Ok(Reply::view_only())
            }
            Action::Export => {
                let download = export_store(&self.store)?;
                Ok(Reply { download: Some(download), ..Reply::view_only() })
            }
            Action::Import { json } => {
                self.store = parse_import(&json)?;
                self.view.open_comments.clear();
                Ok(Reply::mutated().alert("Imported"))
            }
            Action::Reset => {
                self.store = reset_store(self.storage.as_mut(), &self.key, now)?;
                self.view = Default::default();
                Ok(Reply::view_only())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_an_op_tag() {
        let action: Action = serde_json::from_str(r#"{"op": "publish", "text": "hi"}"#).unwrap();
        assert_eq!(action, Action::Publish { text: "hi".into(), image: String::new() });

        let action: Action =
            serde_json::from_str(r#"{"op": "save_profile", "bio": "new bio"}"#).unwrap();
        assert_eq!(
            action,
            Action::SaveProfile(ProfileUpdate { bio: Some("new bio".into()), ..Default::default() })
        );

        let json = serde_json::to_string(&Action::Monetize { kind: Monetization::Tips }).unwrap();
        assert_eq!(json, r#"{"op":"monetize","kind":"tips"}"#);
    }
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

use crate::core::helpers::time_ago;
use crate::follow::suggestions;
use crate::handlers::Action;
use crate::media::avatar_src;
use crate::models::models::{Post, Store, User};
use crate::notifications::unread_count;
use crate::posts::{filter_feed, filter_post_content};
use crate::trending::{stats, trending_tags};
use crate::users::{find_user, Monetization};
use crate::widgets::{FormKind, InputKind, Widget};

#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    Composer,
    ProfileEditor,
}

/// UI state that is never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub filter: String,
    pub open_comments: HashSet<String>,
    pub modal: Option<Modal>,
}

/// Builds the whole UI from the store. Called after every action.
pub fn render_app(store: &Store, view: &ViewState, now: DateTime<Utc>) -> Widget {
    let mut children = vec![
        render_topbar(store, view),
        Widget::container(
            "layout",
            vec![
                render_left(store),
                render_feed(store, view, now),
                render_right(store),
            ],
        ),
    ];
    match view.modal {
        Some(Modal::Composer) => children.push(render_composer()),
        Some(Modal::ProfileEditor) => children.push(render_profile_editor(&store.me)),
        None => {}
    }
    Widget::container("app", children)
}

fn render_topbar(store: &Store, view: &ViewState) -> Widget {
    Widget::container(
        "topbar",
        vec![
            Widget::image("profile-avatar", avatar_src(&store.me.avatar, &store.me.name)),
            Widget::text("profile-name", store.me.name.as_str()),
            Widget::form(
                "search",
                FormKind::Search,
                vec![Widget::input(InputKind::Search, "query", &view.filter, "Search posts or people")],
            ),
            Widget::button(
                "new-post-btn",
                "New post",
                Action::OpenModal { modal: Modal::Composer },
            ),
            Widget::button(
                "notif-badge",
                format!("🔔 {}", unread_count(store)),
                Action::MarkNotificationsRead,
            ),
        ],
    )
}

fn render_left(store: &Store) -> Widget {
    let me = &store.me;
    let mut monetization = vec![
        Widget::button("tips-btn", "Enable tips", Action::Monetize { kind: Monetization::Tips }),
        Widget::button("shop-btn", "Open shop", Action::Monetize { kind: Monetization::Shop }),
        Widget::button(
            "subscribe-btn",
            "Offer subscriptions",
            Action::Monetize { kind: Monetization::Subscriptions },
        ),
    ];
    let flags = [
        (me.tips_enabled, "Tips on (mock)"),
        (me.shop_enabled, "Shop open (mock)"),
        (me.sub_enabled, "Subscriptions on (mock)"),
    ];
    for (enabled, label) in flags {
        if enabled {
            monetization.push(Widget::text("mock-flag", label));
        }
    }

    Widget::container(
        "left-col",
        vec![
            Widget::container(
                "profile-card",
                vec![
                    Widget::image("left-avatar", avatar_src(&me.avatar, &me.name)),
                    Widget::text("left-name", me.name.as_str()),
                    Widget::text("left-bio", me.bio.as_str()),
                    Widget::button(
                        "edit-profile-btn",
                        "Edit profile",
                        Action::OpenModal { modal: Modal::ProfileEditor },
                    ),
                ],
            ),
            Widget::container("monetization", monetization),
            render_stats(store),
        ],
    )
}

fn render_stats(store: &Store) -> Widget {
    let st = stats(store);
    let item = |label: &str, value: String| {
        Widget::container(
            "stats-item",
            vec![Widget::text("stats-label", label), Widget::text("stats-value", value)],
        )
    };
    Widget::container(
        "stats-area",
        vec![
            item("Posts", st.posts.to_string()),
            item("Total likes", st.likes.to_string()),
            item("Following", st.following.to_string()),
        ],
    )
}

fn render_feed(store: &Store, view: &ViewState, now: DateTime<Utc>) -> Widget {
    let posts = filter_feed(store, &view.filter);
    if posts.is_empty() {
        return Widget::container("feed", vec![Widget::text("empty", "No posts to show")]);
    }
    let cards = posts
        .into_iter()
        .map(|p| render_post_card(store, p, view.open_comments.contains(&p.id), now))
        .collect();
    Widget::container("feed", cards)
}

pub fn render_post_card(store: &Store, post: &Post, comments_open: bool, now: DateTime<Utc>) -> Widget {
    let user = find_user(store, &post.user_id);

    let mut body = vec![Widget::Markup {
        class: "post-text".to_string(),
        html: filter_post_content(&post.text),
    }];
    if !post.image.is_empty() {
        body.push(Widget::image("post-img", post.image.as_str()));
    }

    let follow_label = if store.me.is_following(&post.user_id) { "Unfollow" } else { "Follow" };
    let actions = vec![
        Widget::button("icon-btn like-btn", format!("❤️ {}", post.likes), Action::Like { post_id: post.id.clone() }),
        Widget::button(
            "icon-btn comment-toggle",
            "💬 Comment",
            Action::ToggleComments { post_id: post.id.clone() },
        ),
        Widget::button(
            "icon-btn follow-btn",
            follow_label,
            Action::FollowAuthor { user_id: post.user_id.clone() },
        ),
        Widget::button("icon-btn share-btn", "🔗 Share", Action::Share { post_id: post.id.clone() }),
    ];
    body.push(Widget::container("post-actions", actions));

    if comments_open {
        let comments = post
            .comments
            .iter()
            .map(|c| {
                Widget::container(
                    "comment",
                    vec![
                        Widget::text("comment-by", c.by.as_str()),
                        Widget::text("comment-age", format!("· {}", time_ago(c.at, now))),
                        Widget::text("comment-text", c.text.as_str()),
                    ],
                )
            })
            .collect();
        body.push(Widget::container(
            "comment-area",
            vec![
                Widget::container("comments-list", comments),
                Widget::form(
                    "comment-box",
                    FormKind::Comment { post_id: post.id.clone() },
                    vec![
                        Widget::input(InputKind::Text, "text", "", "Write a comment..."),
                        Widget::submit("Send"),
                    ],
                ),
            ],
        ));
    }

    Widget::container(
        "post-card",
        vec![
            Widget::container(
                "post-header",
                vec![
                    Widget::image("post-avatar", avatar_src(&user.avatar, &user.name)),
                    Widget::text("post-author", user.name.as_str()),
                    Widget::text("post-age", format!("· {}", time_ago(post.created_at, now))),
                    Widget::text("post-bio", user.bio.as_str()),
                ],
            ),
            Widget::container("post-body", body),
        ],
    )
}

fn render_right(store: &Store) -> Widget {
    let suggested = suggestions(store)
        .iter()
        .map(|user| {
            let label = if store.me.is_following(&user.id) { "Unfollow" } else { "Follow" };
            Widget::container(
                "user",
                vec![
                    Widget::image("user-avatar", avatar_src(&user.avatar, &user.name)),
                    Widget::text("user-name", user.name.as_str()),
                    Widget::text("user-bio", user.bio.as_str()),
                    Widget::button(
                        "icon-btn follow-sug",
                        label,
                        Action::FollowSuggested { user_id: user.id.clone() },
                    ),
                ],
            )
        })
        .collect();

    let tags = trending_tags(store)
        .into_iter()
        .map(|t| {
            Widget::button(
                "tag",
                format!("{} · {}", t.tag, t.count),
                Action::FilterTag { tag: t.filter().to_string() },
            )
        })
        .collect();

    Widget::container(
        "right-col",
        vec![Widget::container("suggest-list", suggested), Widget::container("tags-list", tags)],
    )
}

fn render_composer() -> Widget {
    Widget::container(
        "modal",
        vec![
            Widget::form(
                "composer",
                FormKind::Publish,
                vec![
                    Widget::input(InputKind::TextArea, "text", "", "What's on your mind?"),
                    Widget::input(InputKind::Image, "image", "", ""),
                    Widget::submit("Publish"),
                ],
            ),
            Widget::button("close-modal", "Close", Action::CloseModal),
        ],
    )
}

fn render_profile_editor(me: &User) -> Widget {
    Widget::container(
        "modal",
        vec![
            Widget::form(
                "profile-editor",
                FormKind::SaveProfile,
                vec![
                    Widget::input(InputKind::Text, "name", &me.name, "Name"),
                    Widget::input(InputKind::TextArea, "bio", &me.bio, "Bio"),
                    Widget::input(InputKind::Image, "avatar", "", ""),
                    Widget::submit("Save"),
                ],
            ),
            Widget::button("close-modal", "Close", Action::CloseModal),
        ],
    )
}

/// Serializes the tree into the embedded page shell.
pub fn render_page(view: &Widget, store: &Store) -> anyhow::Result<String> {
    let template = Assets::get("index.html")
        .ok_or_else(|| anyhow::anyhow!("Page template not found"))?
        .data
        .to_vec();

    let html = String::from_utf8(template)?;
    let title = format!("MiniSocial · {}", store.me.name);
    Ok(html
        .replace("PAGE_TITLE", &html_escape::encode_text(&title))
        .replace("PAGE_BODY", &view.to_html()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::seed_store;

    fn texts<'a>(tree: &'a Widget, class: &str) -> Vec<&'a str> {
        tree.find_by_class(class)
            .into_iter()
            .filter_map(|w| match w {
                Widget::Text { text, .. } => Some(text.as_str()),
                Widget::Button { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn feed_keeps_store_order_and_binds_ids() {
        let store = seed_store(Utc::now());
        let tree = render_app(&store, &ViewState::default(), Utc::now());

        assert_eq!(texts(&tree, "post-author"), ["ChefMia", "ArtByLex"]);
        assert_eq!(texts(&tree, "like-btn"), ["❤️ 5", "❤️ 8"]);
        assert!(tree.actions().contains(&&Action::Like { post_id: store.posts[1].id.clone() }));
    }

    #[test]
    fn missing_author_renders_as_unknown() {
        let mut store = Store::default();
        store.posts.push(Post { id: "p".into(), user_id: "gone".into(), ..Default::default() });
        let tree = render_app(&store, &ViewState::default(), Utc::now());
        assert_eq!(texts(&tree, "post-author"), ["Unknown"]);
    }

    #[test]
    fn comments_only_show_when_open() {
        let mut store = seed_store(Utc::now());
        let id = store.posts[0].id.clone();
        crate::posts::add_comment(&mut store, &id, "yum", Utc::now()).unwrap();

        let closed = render_app(&store, &ViewState::default(), Utc::now());
        assert!(closed.find_by_class("comment-area").is_empty());

        let view = ViewState { open_comments: HashSet::from([id]), ..Default::default() };
        let open = render_app(&store, &view, Utc::now());
        assert_eq!(texts(&open, "comment-text"), ["yum"]);
    }

    #[test]
    fn sidebar_shows_stats_tags_and_suggestions() {
        let mut store = seed_store(Utc::now());
        store.me.following.push("u1".into());
        let tree = render_app(&store, &ViewState::default(), Utc::now());

        assert_eq!(texts(&tree, "stats-value"), ["2", "13", "1"]);
        assert_eq!(texts(&tree, "tag"), ["#food · 1", "#art · 1"]);
        assert_eq!(texts(&tree, "follow-sug"), ["Unfollow", "Follow"]);
    }

    #[test]
    fn page_embeds_the_escaped_tree() {
        let mut store = seed_store(Utc::now());
        store.me.name = "<Me>".into();
        let tree = render_app(&store, &ViewState::default(), Utc::now());
        let html = render_page(&tree, &store).unwrap();

        assert!(html.contains("<title>MiniSocial · &lt;Me&gt;</title>"));
        assert!(html.contains(r#"<span class="profile-name">&lt;Me&gt;</span>"#));
        assert!(!html.contains("PAGE_BODY"));
    }
}

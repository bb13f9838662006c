use std::collections::HashSet;
use std::sync::OnceLock;

use ammonia::Builder;
use chrono::{DateTime, Utc};
use regex::Regex;

use crate::config::{share_base_url, ME_ID};
use crate::core::errors::{AppError, AppResult};
use crate::core::helpers::new_id;
use crate::models::models::{Comment, Post, Store};
use crate::notifications::add_notification;
use crate::users::find_user;

pub fn find_post<'a>(store: &'a Store, post_id: &str) -> AppResult<&'a Post> {
    store
        .posts
        .iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))
}

fn post_index(store: &Store, post_id: &str) -> AppResult<usize> {
    store
        .posts
        .iter()
        .position(|p| p.id == post_id)
        .ok_or_else(|| AppError::PostNotFound(post_id.to_string()))
}

/// Publishes a post by "me" at the top of the feed.
pub fn create_post<'a>(
    store: &'a mut Store,
    text: &str,
    image: &str,
    now: DateTime<Utc>,
) -> AppResult<&'a Post> {
    let text = text.trim();
    if text.is_empty() && image.is_empty() {
        return Err(AppError::EmptyPost);
    }

    let post = Post {
        id: new_id(),
        user_id: ME_ID.to_string(),
        text: text.to_string(),
        image: image.to_string(),
        likes: 0,
        comments: Vec::new(),
        created_at: now,
    };
    store.posts.insert(0, post);
    add_notification(store, "Post published", now);

    Ok(&store.posts[0])
}

pub fn like_post(store: &mut Store, post_id: &str, now: DateTime<Utc>) -> AppResult<u64> {
    let idx = post_index(store, post_id)?;
    store.posts[idx].likes = store.posts[idx].likes.saturating_add(1);

    let author = find_user(store, &store.posts[idx].user_id).name.clone();
    let text = format!("{} liked a post by {}", store.me.name, author);
    add_notification(store, text, now);

    Ok(store.posts[idx].likes)
}

/// Appends a comment signed with the current display name of "me".
/// Blank text is ignored and reported as `Ok(false)`.
pub fn add_comment(store: &mut Store, post_id: &str, text: &str, now: DateTime<Utc>) -> AppResult<bool> {
    let idx = post_index(store, post_id)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(false);
    }

    let comment = Comment {
        id: new_id(),
        by: store.me.name.clone(),
        text: text.to_string(),
        at: now,
    };
    store.posts[idx].comments.push(comment);

    let author = find_user(store, &store.posts[idx].user_id).name.clone();
    let text = format!("{} commented on {}'s post", store.me.name, author);
    add_notification(store, text, now);

    Ok(true)
}

/// Posts whose text or author name contains `filter`, ignoring case, in feed order.
pub fn filter_feed<'a>(store: &'a Store, filter: &str) -> Vec<&'a Post> {
    if filter.is_empty() {
        return store.posts.iter().collect();
    }
    let needle = filter.to_lowercase();
    store
        .posts
        .iter()
        .filter(|p| {
            let haystack = format!("{} {}", p.text, find_user(store, &p.user_id).name);
            haystack.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn share_link(post_id: &str) -> String {
    format!("{}{}", share_base_url(), urlencoding::encode(post_id))
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("Regex should compile"))
}

/// Post text as safe markup: escaped, with http(s) URLs turned into links.
pub fn filter_post_content(text: &str) -> String {
    // URLs are found in the raw text so entities never end up inside a link
    let mut linked = String::with_capacity(text.len());
    let mut last = 0;
    for m in url_regex().find_iter(text) {
        linked.push_str(&html_escape::encode_text(&text[last..m.start()]));
        linked.push_str(&format!(
            r#"<a href="{}" target="_blank">{}</a>"#,
            html_escape::encode_double_quoted_attribute(m.as_str()),
            html_escape::encode_text(m.as_str())
        ));
        last = m.end();
    }
    linked.push_str(&html_escape::encode_text(&text[last..]));

    Builder::default()
        .tags(HashSet::from(["a"]))
        .add_tag_attributes("a", &["target"])
        .url_schemes(HashSet::from(["http", "https"]))
        .link_rel(Some("noopener noreferrer"))
        .clean(&linked)
        .to_string()
}

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::TRENDING_LIMIT;
use crate::follow::get_followings;
use crate::models::models::Store;

fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#\w+").expect("Regex should compile"))
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TagCount {
    /// Lower-cased, with the leading `#`.
    pub tag: String,
    pub count: usize,
}

impl TagCount {
    /// The feed filter a click on this tag applies.
    pub fn filter(&self) -> &str {
        self.tag.trim_start_matches('#')
    }
}

/// Most used hashtags across all posts. Equal counts keep first-seen order.
pub fn trending_tags(store: &Store) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for post in &store.posts {
        for m in tag_regex().find_iter(&post.text) {
            let tag = m.as_str().to_lowercase();
            match index.get(&tag) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(tag.clone(), counts.len());
                    counts.push(TagCount { tag, count: 1 });
                }
            }
        }
    }

    // stable sort keeps insertion order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TRENDING_LIMIT);
    counts
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub posts: usize,
    pub likes: u64,
    /// Accounts "me" follows.
    pub following: usize,
}

pub fn stats(store: &Store) -> Stats {
    Stats {
        posts: store.posts.len(),
        likes: store.posts.iter().map(|p| p.likes).fold(0, u64::saturating_add),
        following: get_followings(store).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::models::Post;

    fn post(text: &str) -> Post {
        Post {
            text: text.to_string(),
            likes: 2,
            ..Default::default()
        }
    }

    #[test]
    fn tags_are_counted_case_insensitively() {
        let mut store = Store::default();
        store.posts = vec![post("#Food and #art"), post("more #food"), post("#FOOD #zen")];

        let tags = trending_tags(&store);
        assert_eq!(tags[0], TagCount { tag: "#food".into(), count: 3 });
        // ties keep first-seen order
        assert_eq!(tags[1].tag, "#art");
        assert_eq!(tags[2].tag, "#zen");
        assert_eq!(tags[0].filter(), "food");
    }

    #[test]
    fn only_the_top_eight_are_kept() {
        let mut store = Store::default();
        let text: Vec<String> = (0..12).map(|i| format!("#t{}", i)).collect();
        store.posts = vec![post(&text.join(" "))];
        assert_eq!(trending_tags(&store).len(), TRENDING_LIMIT);
    }

    #[test]
    fn stats_are_recomputed_from_the_store() {
        let mut store = Store::default();
        store.posts = vec![post("a"), post("b"), post("c")];
        store.me.following = vec!["u1".into(), "u2".into()];
        assert_eq!(stats(&store), Stats { posts: 3, likes: 6, following: 2 });
    }

    #[test]
    fn total_likes_saturate() {
        let mut store = Store::default();
        store.posts = vec![post("a"), post("b")];
        store.posts[0].likes = u64::MAX;
        assert_eq!(stats(&store).likes, u64::MAX);
    }
}

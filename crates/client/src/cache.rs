//! Identity-keyed feed cache.
//!
//! Entries are addressed by post id, never by position: list indices shift
//! as pages append, so reconciliation always resolves targets by identity.
//! Updates replace whole entries; nothing is mutated in place.

use pictor_common::PostView;
use std::collections::HashMap;

/// An id-indexed map of cached posts plus their display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedCache {
    entries: HashMap<String, PostView>,
    order: Vec<String>,
}

impl FeedCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of posts in display order.
    ///
    /// An id already present keeps its display position and has its entry
    /// replaced with the fresher copy.
    pub fn append(&mut self, posts: Vec<PostView>) {
        for post in posts {
            if !self.entries.contains_key(&post.id) {
                self.order.push(post.id.clone());
            }
            self.entries.insert(post.id.clone(), post);
        }
    }

    /// Look up a post by id.
    #[must_use]
    pub fn get(&self, post_id: &str) -> Option<&PostView> {
        self.entries.get(post_id)
    }

    /// Replace a cached entry with an updated copy.
    ///
    /// A miss is ignored: the entry may have been dropped between building
    /// the replacement and applying it.
    pub fn replace(&mut self, post: PostView) {
        if self.entries.contains_key(&post.id) {
            self.entries.insert(post.id.clone(), post);
        }
    }

    /// Posts in display order.
    pub fn posts(&self) -> impl Iterator<Item = &PostView> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Ids of cached posts written by `username`.
    #[must_use]
    pub fn post_ids_by_poster(&self, username: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| {
                self.entries
                    .get(*id)
                    .is_some_and(|p| p.poster.username == username)
            })
            .cloned()
            .collect()
    }

    /// Id of the cached post containing `comment_id`, if any.
    #[must_use]
    pub fn post_id_with_comment(&self, comment_id: &str) -> Option<String> {
        self.order
            .iter()
            .find(|id| {
                self.entries
                    .get(*id)
                    .is_some_and(|p| p.comments.iter().any(|c| c.id == comment_id))
            })
            .cloned()
    }

    /// Number of cached posts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pictor_common::UserView;

    fn post(id: &str, poster: &str) -> PostView {
        PostView {
            id: id.to_string(),
            poster: UserView {
                username: poster.to_string(),
                name: None,
                avatar_url: None,
                posts: 1,
                followers: 0,
                following: 0,
                am_following: false,
            },
            text: "hello".to_string(),
            media_url: None,
            created_at: Utc::now(),
            likes: 0,
            have_liked: false,
            comments: vec![],
        }
    }

    #[test]
    fn test_append_preserves_order_and_dedupes() {
        let mut cache = FeedCache::new();
        cache.append(vec![post("p1", "alice"), post("p2", "bob")]);
        cache.append(vec![post("p2", "bob"), post("p3", "alice")]);

        let ids: Vec<_> = cache.posts().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "p3"]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_replace_ignores_missing_entry() {
        let mut cache = FeedCache::new();
        cache.append(vec![post("p1", "alice")]);

        cache.replace(post("p9", "bob"));

        assert_eq!(cache.len(), 1);
        assert!(cache.get("p9").is_none());
    }

    #[test]
    fn test_lookups_resolve_by_identity() {
        let mut cache = FeedCache::new();
        let mut commented = post("p2", "bob");
        commented.comments.push(pictor_common::CommentView {
            id: "c1".to_string(),
            post_id: "p2".to_string(),
            parent_comment_id: None,
            poster: "alice".to_string(),
            text: "nice".to_string(),
            likes: 0,
            have_liked: false,
        });
        cache.append(vec![post("p1", "alice"), commented, post("p3", "alice")]);

        assert_eq!(cache.post_ids_by_poster("alice"), ["p1", "p3"]);
        assert_eq!(cache.post_id_with_comment("c1").as_deref(), Some("p2"));
        assert_eq!(cache.post_id_with_comment("c9"), None);
    }
}

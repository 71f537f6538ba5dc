//! Feed controller state machine.
//!
//! Drives a viewing session over [`FeedApi`]: the initial fetch lands in
//! `Loaded` (or `Suggestions` when the feed is empty, or `Error`), further
//! pages append at the cursor, and follow/like/comment actions reconcile the
//! server's answer into the cache one whole entry at a time.
//!
//! Targets are resolved by identity against the cache; a target that has
//! scrolled out is a silent no-op. A failed action leaves the cache exactly
//! as it was and the session stays in `Loaded`; only failed reads (the
//! initial fetch, further pages, the suggestions fallback) move to `Error`.

use pictor_common::{PostView, UserView};
use tracing::{debug, warn};

use crate::api::FeedApi;
use crate::cache::FeedCache;
use crate::error::ClientError;

/// Controller states.
///
/// `Suggestions` and `Error` are stable until [`FeedController::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing fetched yet.
    Init,
    /// Feed pages are cached; further pages and actions are available.
    Loaded,
    /// The feed was empty; follow suggestions are shown instead.
    Suggestions,
    /// A read path failed.
    Error,
}

/// Client-side orchestrator for one viewing session.
pub struct FeedController<A: FeedApi> {
    api: A,
    page_size: u64,
    state: ControllerState,
    cache: FeedCache,
    suggestions: Vec<UserView>,
    cursor: u64,
    exhausted: bool,
    last_error: Option<String>,
}

impl<A: FeedApi> FeedController<A> {
    /// Create a controller fetching `page_size` posts per page.
    pub fn new(api: A, page_size: u64) -> Self {
        Self {
            api,
            page_size,
            state: ControllerState::Init,
            cache: FeedCache::new(),
            suggestions: Vec::new(),
            cursor: 0,
            exhausted: false,
            last_error: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Cached posts in display order.
    pub fn posts(&self) -> impl Iterator<Item = &PostView> {
        self.cache.posts()
    }

    /// The cached feed.
    #[must_use]
    pub const fn cache(&self) -> &FeedCache {
        &self.cache
    }

    /// Follow suggestions, populated when the feed came back empty.
    #[must_use]
    pub fn suggestions(&self) -> &[UserView] {
        &self.suggestions
    }

    /// Whether the feed has no further pages.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Message of the most recent failure, if any. Read failures also move
    /// the controller to `Error`; action failures only record the message.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch page zero and settle into `Loaded`, `Suggestions`, or `Error`.
    pub async fn start(&mut self) {
        if self.state != ControllerState::Init {
            return;
        }

        match self.api.get_posts(0, self.page_size).await {
            Ok(slice) if slice.posts.is_empty() => {
                // An empty feed is not an error; offer people to follow.
                match self.api.get_suggestions().await {
                    Ok(suggestions) => {
                        self.suggestions = suggestions;
                        self.state = ControllerState::Suggestions;
                    }
                    Err(err) => self.fail(&err),
                }
            }
            Ok(slice) => {
                self.cursor = slice.posts.len() as u64;
                self.exhausted = slice.remaining == 0;
                self.cache.append(slice.posts);
                self.state = ControllerState::Loaded;
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Fetch the next page at the cursor.
    ///
    /// Only meaningful in `Loaded`; once the feed is exhausted this stops
    /// issuing requests entirely.
    pub async fn fetch_more(&mut self) {
        if self.state != ControllerState::Loaded || self.exhausted {
            return;
        }

        match self.api.get_posts(self.cursor, self.page_size).await {
            Ok(slice) if slice.posts.is_empty() => {
                // End of feed, distinct from a failure.
                self.exhausted = true;
            }
            Ok(slice) => {
                self.cursor += slice.posts.len() as u64;
                self.exhausted = slice.remaining == 0;
                self.cache.append(slice.posts);
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Toggle following the poster of the cached posts by `username`.
    ///
    /// Flips `am_following` on every cached post by that poster: follow state
    /// is a viewer-to-poster property, not a per-post one.
    pub async fn toggle_follow(&mut self, username: &str) {
        if self.state != ControllerState::Loaded {
            return;
        }
        let post_ids = self.cache.post_ids_by_poster(username);
        if post_ids.is_empty() {
            debug!(username, "follow target not in cache, ignoring");
            return;
        }

        match self.api.toggle_follow(username).await {
            Ok(following) => {
                for id in post_ids {
                    if let Some(post) = self.cache.get(&id) {
                        let mut updated = post.clone();
                        updated.poster.am_following = following;
                        self.cache.replace(updated);
                    }
                }
            }
            Err(err) => self.action_failed(&err),
        }
    }

    /// Toggle the viewer's like on a cached post.
    pub async fn toggle_post_like(&mut self, post_id: &str) {
        if self.state != ControllerState::Loaded {
            return;
        }
        let Some(post) = self.cache.get(post_id).cloned() else {
            debug!(post_id, "like target not in cache, ignoring");
            return;
        };

        match self.api.toggle_post_like(post_id).await {
            Ok(have_liked) => {
                let mut updated = post;
                updated.likes = adjust_count(updated.likes, updated.have_liked, have_liked);
                updated.have_liked = have_liked;
                self.cache.replace(updated);
            }
            Err(err) => self.action_failed(&err),
        }
    }

    /// Toggle the viewer's like on a cached comment.
    pub async fn toggle_comment_like(&mut self, comment_id: &str) {
        if self.state != ControllerState::Loaded {
            return;
        }
        let Some(post_id) = self.cache.post_id_with_comment(comment_id) else {
            debug!(comment_id, "like target not in cache, ignoring");
            return;
        };

        match self.api.toggle_comment_like(comment_id).await {
            Ok(have_liked) => {
                if let Some(post) = self.cache.get(&post_id) {
                    let mut updated = post.clone();
                    for comment in &mut updated.comments {
                        if comment.id == comment_id {
                            comment.likes =
                                adjust_count(comment.likes, comment.have_liked, have_liked);
                            comment.have_liked = have_liked;
                        }
                    }
                    self.cache.replace(updated);
                }
            }
            Err(err) => self.action_failed(&err),
        }
    }

    /// Comment on a cached post, appending the created comment.
    pub async fn add_comment(
        &mut self,
        post_id: &str,
        text: &str,
        parent_comment_id: Option<&str>,
    ) {
        if self.state != ControllerState::Loaded {
            return;
        }
        let Some(post) = self.cache.get(post_id).cloned() else {
            debug!(post_id, "comment target not in cache, ignoring");
            return;
        };

        match self
            .api
            .create_comment(post_id, text, parent_comment_id)
            .await
        {
            Ok(comment) => {
                let mut updated = post;
                updated.comments.push(comment);
                self.cache.replace(updated);
            }
            Err(err) => self.action_failed(&err),
        }
    }

    /// Return to `Init`, dropping all session state.
    pub fn reset(&mut self) {
        self.state = ControllerState::Init;
        self.cache = FeedCache::new();
        self.suggestions.clear();
        self.cursor = 0;
        self.exhausted = false;
        self.last_error = None;
    }

    /// A read path failed: the session has nothing valid to show.
    fn fail(&mut self, err: &ClientError) {
        warn!(error = %err, "fetch failed");
        self.last_error = Some(err.to_string());
        self.state = ControllerState::Error;
    }

    /// An action failed: the cached feed is still valid, so the session
    /// stays in `Loaded` and further pages and actions keep working.
    fn action_failed(&mut self, err: &ClientError) {
        warn!(error = %err, "action failed, cache left unchanged");
        self.last_error = Some(err.to_string());
    }
}

/// Project a like count from the flag transition the server reported.
const fn adjust_count(count: u64, was_liked: bool, is_liked: bool) -> u64 {
    match (was_liked, is_liked) {
        (false, true) => count + 1,
        (true, false) => count.saturating_sub(1),
        _ => count,
    }
}

//! Social graph service.

use std::sync::Arc;

use pictor_common::{AppError, AppResult, Config, IdGenerator, UserView};
use pictor_db::{
    entities::{following, user},
    repositories::{FollowingRepository, UserRepository},
};
use sea_orm::Set;

use crate::projection::Projector;
use crate::suggestion::{RecencyRanking, SuggestionRanking};

/// How many candidates to fetch per suggestion slot, so non-trivial rankings
/// have a pool to choose from.
const CANDIDATE_FACTOR: u64 = 5;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    user_repo: UserRepository,
    following_repo: FollowingRepository,
    projector: Projector,
    ranking: Arc<dyn SuggestionRanking>,
    suggestion_limit: u64,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service with the default recency ranking.
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        following_repo: FollowingRepository,
        projector: Projector,
        config: &Config,
    ) -> Self {
        Self::with_ranking(
            user_repo,
            following_repo,
            projector,
            config,
            Arc::new(RecencyRanking),
        )
    }

    /// Create a new follow service with a specific suggestion ranking.
    #[must_use]
    pub fn with_ranking(
        user_repo: UserRepository,
        following_repo: FollowingRepository,
        projector: Projector,
        config: &Config,
        ranking: Arc<dyn SuggestionRanking>,
    ) -> Self {
        Self {
            user_repo,
            following_repo,
            projector,
            ranking,
            suggestion_limit: config.feed.suggestion_limit,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the viewer's follow edge to `target_username`.
    ///
    /// Returns whether the viewer is following the target afterwards. The
    /// delete runs first; its row count says whether an edge existed, and
    /// the insert uses the unique pair index to stay single-edged under
    /// concurrent toggles.
    pub async fn toggle_follow(
        &self,
        viewer: &user::Model,
        target_username: &str,
    ) -> AppResult<bool> {
        let target = self.user_repo.get_by_username(target_username).await?;

        if target.id == viewer.id {
            return Err(AppError::Validation("Cannot follow yourself".to_string()));
        }

        let deleted = self
            .following_repo
            .delete_by_pair(&viewer.id, &target.id)
            .await?;
        if deleted > 0 {
            tracing::debug!(follower_id = %viewer.id, followee_id = %target.id, "Unfollowed");
            return Ok(false);
        }

        let model = following::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(viewer.id.clone()),
            followee_id: Set(target.id.clone()),
            ..Default::default()
        };
        self.following_repo.insert_ignore(model).await?;

        tracing::debug!(follower_id = %viewer.id, followee_id = %target.id, "Followed");
        Ok(true)
    }

    /// Get follow suggestions for the viewer: users they do not already
    /// follow, excluding themselves, ordered by the configured ranking.
    pub async fn get_suggestions(&self, viewer: &user::Model) -> AppResult<Vec<UserView>> {
        let followees = self.following_repo.find_followee_ids(&viewer.id).await?;
        let candidates = self
            .user_repo
            .find_suggestion_candidates(
                &viewer.id,
                &followees,
                self.suggestion_limit * CANDIDATE_FACTOR,
            )
            .await?;

        let ranked = self.ranking.rank(candidates);

        let mut views = Vec::new();
        for candidate in ranked.into_iter().take(self.suggestion_limit as usize) {
            // By construction the viewer follows none of the candidates.
            views.push(
                self.projector
                    .user_view_with_follow_state(&candidate, false)
                    .await?,
            );
        }

        Ok(views)
    }
}

//! Database repositories.

mod comment;
mod comment_like;
mod following;
mod post;
mod post_like;
mod user;

pub use comment::CommentRepository;
pub use comment_like::CommentLikeRepository;
pub use following::FollowingRepository;
pub use post::PostRepository;
pub use post_like::PostLikeRepository;
pub use user::UserRepository;

//! Business logic services.

pub mod account;
pub mod comment;
pub mod feed;
pub mod follow;
pub mod interaction;
pub mod post;

pub use account::{AccountService, RegisterInput, Session};
pub use comment::{CommentService, CreateCommentInput};
pub use feed::{FeedPage, FeedService};
pub use follow::FollowService;
pub use interaction::InteractionService;
pub use post::{CreatePostInput, PostService};

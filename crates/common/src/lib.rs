//! Common utilities and shared types for pictor.
//!
//! This crate provides foundational components used across all pictor crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Views**: Viewer-relative wire types ([`UserView`], [`PostView`], [`CommentView`])
//!
//! # Example
//!
//! ```no_run
//! use pictor_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use views::{CommentView, PostView, UserView};

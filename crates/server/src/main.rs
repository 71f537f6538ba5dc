//! Pictor server entry point.

#![allow(clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use pictor_api::{AppState, auth_middleware, router as api_router};
use pictor_common::Config;
use pictor_core::{
    AccountService, CommentService, FeedService, FollowService, InteractionService, PostService,
    Projector,
};
use pictor_db::repositories::{
    CommentLikeRepository, CommentRepository, FollowingRepository, PostLikeRepository,
    PostRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pictor=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting pictor server...");

    let config = Config::load()?;

    let db = pictor_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    pictor_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let following_repo = FollowingRepository::new(Arc::clone(&db));
    let post_like_repo = PostLikeRepository::new(Arc::clone(&db));
    let comment_like_repo = CommentLikeRepository::new(Arc::clone(&db));

    let projector = Projector::new(
        user_repo.clone(),
        post_repo.clone(),
        comment_repo.clone(),
        following_repo.clone(),
        post_like_repo.clone(),
        comment_like_repo.clone(),
    );

    // Initialize services
    let account_service = AccountService::new(user_repo.clone(), projector.clone());
    let feed_service = FeedService::new(
        user_repo.clone(),
        post_repo.clone(),
        following_repo.clone(),
        projector.clone(),
        &config,
    );
    let follow_service = FollowService::new(
        user_repo.clone(),
        following_repo,
        projector.clone(),
        &config,
    );
    let interaction_service = InteractionService::new(
        post_repo.clone(),
        comment_repo.clone(),
        post_like_repo,
        comment_like_repo,
    );
    let comment_service = CommentService::new(post_repo.clone(), comment_repo);
    let post_service = PostService::new(post_repo, projector);

    let state = AppState {
        account_service,
        feed_service,
        follow_service,
        interaction_service,
        comment_service,
        post_service,
    };

    // Build router
    let app = api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

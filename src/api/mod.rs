//! All API endpoint setup

use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;

pub use request::Form;
pub use request::PathParameters;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod friendships;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let friendships = Router::new()
        .route("/", get(friendships::list::<S>))
        .route("/", post(friendships::create::<S>))
        .route("/", delete(friendships::delete_all::<S>))
        .route("/:friendship", get(friendships::single::<S>))
        .route("/:friendship", delete(friendships::delete::<S>));

    Router::new().nest("/friendships", friendships)
}

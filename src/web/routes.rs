use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;

use super::{handlers, AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/post/:id", get(handlers::show_post))
        .route(
            "/new_post",
            get(handlers::new_post_form).post(handlers::create_post),
        )
        .route(
            "/edit_post/:id",
            get(handlers::edit_post_form)
                .post(handlers::update_post)
                .patch(handlers::update_post),
        )
        .route(
            "/delete/:id",
            get(handlers::delete_post_by_query)
                .post(handlers::delete_post)
                .delete(handlers::delete_post_by_query),
        )
        .route("/about", get(handlers::about))
        .route("/contact", get(handlers::contact))
        .route("/health", get(handlers::health))
        .layer(CookieManagerLayer::new())
}

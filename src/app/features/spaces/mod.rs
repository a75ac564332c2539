mod create;
mod list;
mod show;

use axum::{
    routing::{get, post},
    Router,
};

use crate::app::{config::Config, AppState};

/// Space list, creation and space-scoped pages.
///
/// `<prefix>/new` is a static route sharing the space prefix; its slug is reserved.
pub fn routes(config: &Config) -> Router<AppState> {
    let prefix = &config.space_path_prefix;
    Router::new()
        .route(&config.space_list_path, get(list::show))
        .route(&format!("{prefix}/new"), post(create::submit))
        .route(&format!("{prefix}/:slug"), get(show::show))
        .route(&format!("{prefix}/:slug/*rest"), get(show::show_nested))
}

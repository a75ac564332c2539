pub mod logout;

use axum::Router;
use crate::app::AppState;

/// Authentication routes. Sign-in belongs to the external auth provider.
pub fn routes() -> Router<AppState> {
    Router::new().merge(logout::routes())
}

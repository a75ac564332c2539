pub mod app;
pub mod seeds;
pub mod site;

use axum::{middleware, Router};

/// Build the full application router. Used by main and by integration tests.
///
/// The space gate wraps every route and the fallback, so it runs before routing decisions.
pub fn create_router(state: app::AppState) -> Router {
    Router::new()
        .merge(site::home::routes())
        .merge(app::routes(&state.config))
        .fallback(site::not_found)
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            app::gate::space_gate,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

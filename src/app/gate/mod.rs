//! Space resolution gate.
//!
//! Runs before routing on every request that is not an API route, static asset
//! or well-known file. Stages run in order and the first match wins:
//!
//! 1. `/` with a session cookie redirects to the space list.
//! 2. Admin paths require an admin session, otherwise redirect to `/`.
//! 3. Space paths with a reserved slug pass through without any lookup.
//! 4. Space paths resolve the session and membership, then pass, canonicalize,
//!    switch the active space and reload, or redirect to the space list.
//!
//! Store failures on admin paths fail closed (redirect to `/`). Store failures
//! while resolving a space fail open (pass through) and page-level checks apply.

mod decision;
mod path;
mod reserved;
mod resolve;
pub mod stores;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::app::session;

pub use decision::{decide, resolution_for, Action, Resolution, SpaceRequest};
pub use path::{classify, is_excluded, PathClass};
pub use reserved::ReservedSlugs;
pub use resolve::{admin_user, find_member_space, validate_session, SessionState, DEFAULT_SLUG};
pub use stores::{MembershipStore, SessionStore, SessionUser, SqliteStore};

/// Gate parameters. Immutable once the router is built.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub admin_prefix: String,
    pub space_prefix: String,
    pub space_list_path: String,
    pub reserved: ReservedSlugs,
    pub excluded_prefixes: Vec<String>,
    pub excluded_files: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            admin_prefix: "/admin".to_string(),
            space_prefix: "/space".to_string(),
            space_list_path: "/spaces".to_string(),
            reserved: ReservedSlugs::new(crate::app::config::DEFAULT_RESERVED_SLUGS.iter().copied()),
            excluded_prefixes: vec!["/api".to_string(), "/static".to_string()],
            excluded_files: vec![
                "/favicon.ico".to_string(),
                "/sitemap.xml".to_string(),
                "/robots.txt".to_string(),
            ],
        }
    }
}

/// Final answer for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Pass,
    Redirect(String),
}

/// The gate with its stores. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct SpaceGate {
    config: Arc<GateConfig>,
    sessions: Arc<dyn SessionStore>,
    memberships: Arc<dyn MembershipStore>,
}

impl SpaceGate {
    pub fn new(
        config: GateConfig,
        sessions: Arc<dyn SessionStore>,
        memberships: Arc<dyn MembershipStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            memberships,
        }
    }

    /// Gate backed by the application database for both stores.
    pub fn sqlite(config: GateConfig, pool: sqlx::SqlitePool) -> Self {
        let store = Arc::new(SqliteStore::new(pool));
        Self::new(config, store.clone(), store)
    }

    /// Decide what to do with a request for `path`/`query` carrying `token`.
    pub async fn evaluate(&self, path: &str, query: Option<&str>, token: Option<&str>) -> GateOutcome {
        if is_excluded(path, &self.config) {
            return GateOutcome::Pass;
        }

        match classify(path, &self.config) {
            PathClass::Root => match token {
                Some(_) => GateOutcome::Redirect(self.config.space_list_path.clone()),
                None => GateOutcome::Pass,
            },
            PathClass::Admin => self.check_admin(path, token).await,
            PathClass::Space { slug, .. } if self.config.reserved.contains(slug) => {
                tracing::debug!(slug, "reserved slug, skipping space resolution");
                GateOutcome::Pass
            }
            PathClass::Space { slug, rest } => {
                let Some(token) = token else {
                    return GateOutcome::Pass;
                };
                let request = SpaceRequest {
                    prefix: &self.config.space_prefix,
                    slug,
                    rest,
                    query,
                };
                self.resolve_space(&request, token).await
            }
            PathClass::Other => GateOutcome::Pass,
        }
    }

    async fn check_admin(&self, path: &str, token: Option<&str>) -> GateOutcome {
        match admin_user(self.sessions.as_ref(), token).await {
            Ok(Some(_)) => GateOutcome::Pass,
            Ok(None) => {
                tracing::debug!(path, "admin access denied");
                GateOutcome::Redirect("/".to_string())
            }
            Err(err) => {
                tracing::error!(%err, path, "session lookup failed on admin path");
                GateOutcome::Redirect("/".to_string())
            }
        }
    }

    async fn resolve_space(&self, request: &SpaceRequest<'_>, token: &str) -> GateOutcome {
        let state = match validate_session(self.sessions.as_ref(), token).await {
            Ok(state) => state,
            Err(err) => {
                tracing::error!(%err, slug = request.slug, "session lookup failed, passing through");
                return GateOutcome::Pass;
            }
        };
        let SessionState::Authenticated { user, active } = state else {
            return GateOutcome::Pass;
        };

        let resolution = if active.as_ref().is_some_and(|a| a.slug == request.slug) {
            Resolution::ActiveMatchesRequested
        } else {
            match find_member_space(self.memberships.as_ref(), request.slug, &user.user_id).await {
                Ok(found) => resolution_for(request.slug, found),
                Err(err) => {
                    tracing::error!(%err, slug = request.slug, "membership lookup failed, passing through");
                    return GateOutcome::Pass;
                }
            }
        };

        tracing::debug!(slug = request.slug, user_id = %user.user_id, ?resolution, "space resolved");

        match decide(resolution, request, &self.config.space_list_path) {
            Action::Pass => GateOutcome::Pass,
            Action::Redirect(location) => GateOutcome::Redirect(location),
            Action::SwitchAndReload {
                organization_id,
                location,
            } => match self.sessions.set_active_space(token, &organization_id).await {
                Ok(()) => GateOutcome::Redirect(location),
                Err(err) => {
                    tracing::warn!(%err, %organization_id, "active space switch failed");
                    GateOutcome::Pass
                }
            },
        }
    }
}

/// Axum middleware entry point. Install with `middleware::from_fn_with_state`.
pub async fn space_gate(State(gate): State<SpaceGate>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let query = request.uri().query().map(str::to_owned);
    let token = session::session_token(&CookieJar::from_headers(request.headers()));

    let outcome = gate
        .evaluate(&path, query.as_deref(), token.as_deref())
        .await;

    match outcome {
        GateOutcome::Pass => next.run(request).await,
        GateOutcome::Redirect(location) => Redirect::to(&location).into_response(),
    }
}

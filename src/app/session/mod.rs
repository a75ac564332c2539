use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::app::{db, domain::UserRole, error::AppError, AppState};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

pub fn session_cookie(session_id: impl Into<String>) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.into()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .into()
}

/// Raw session token from the cookie jar. No I/O; an empty value counts as absent.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Session data available to handlers behind [`AuthenticatedSession`].
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_id: String,
    pub user_id: String,
    pub role: UserRole,
    pub active_organization_id: Option<String>,
}

/// Page-level session requirement. Rejects with 401 when the cookie is missing or stale.
pub struct AuthenticatedSession(pub CurrentSession);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar)
            .ok_or_else(|| AppError::Auth("Not signed in".to_string()))?;

        let session = db::sessions::find_valid_with_user(&state.db, &token)
            .await?
            .ok_or_else(|| AppError::Auth("Session expired".to_string()))?;

        Ok(Self(CurrentSession {
            role: UserRole::from_column(&session.user_role),
            session_id: session.id,
            user_id: session.user_id,
            active_organization_id: session.active_organization_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn jar(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn reads_session_token() {
        assert_eq!(
            session_token(&jar("theme=dark; session_id=01ABC")),
            Some("01ABC".to_string())
        );
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert_eq!(session_token(&jar("theme=dark")), None);
        assert_eq!(session_token(&jar("session_id=")), None);
        assert_eq!(session_token(&CookieJar::new()), None);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc");
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}

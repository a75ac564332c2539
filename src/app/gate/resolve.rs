//! Session, admin and membership resolution against the stores.

use crate::app::{db::SpaceRef, error::AppError};

use super::stores::{MembershipStore, SessionStore, SessionUser};

/// Placeholder slug that resolves to the user's first space.
pub const DEFAULT_SLUG: &str = "default";

/// Outcome of validating a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No usable session. Not an error: the request passes through.
    Unauthenticated,
    Authenticated {
        user: SessionUser,
        active: Option<SpaceRef>,
    },
}

/// Resolve the session and its active space for `token`.
///
/// Both lookups are issued together and awaited jointly. A token that resolves
/// to no session (expired, unknown, tampered) is `Unauthenticated`.
pub async fn validate_session(
    sessions: &dyn SessionStore,
    token: &str,
) -> Result<SessionState, AppError> {
    let (user, active) = tokio::try_join!(
        sessions.get_session(token),
        sessions.get_active_space(token)
    )?;

    Ok(match user {
        Some(user) if !user.user_id.is_empty() => SessionState::Authenticated { user, active },
        _ => SessionState::Unauthenticated,
    })
}

/// The session's user when it carries the admin role, otherwise None.
pub async fn admin_user(
    sessions: &dyn SessionStore,
    token: Option<&str>,
) -> Result<Option<SessionUser>, AppError> {
    let Some(token) = token else {
        return Ok(None);
    };
    let user = sessions.get_session(token).await?;
    Ok(user.filter(|u| !u.user_id.is_empty() && u.role.is_admin()))
}

/// Find the space `slug` refers to for this user, matching slug or id.
///
/// `default` picks the user's first membership instead of a space named "default".
pub async fn find_member_space(
    memberships: &dyn MembershipStore,
    slug: &str,
    user_id: &str,
) -> Result<Option<SpaceRef>, AppError> {
    if slug == DEFAULT_SLUG {
        memberships.first_space_for_user(user_id).await
    } else {
        memberships.find_space_for_user(slug, user_id).await
    }
}

//! Per-request space decision and the redirect targets it produces.

use crate::app::db::SpaceRef;

/// Where a space-scoped request ended up after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The requested slug is already the session's active space.
    ActiveMatchesRequested,
    /// A membership was found but under a different canonical slug (an id, or a renamed slug).
    ResolvedDifferentCanonicalSlug(SpaceRef),
    /// A membership was found under the requested slug and is not active yet.
    ResolvedMatchingSlug(SpaceRef),
    /// No membership for the slug, including `default` with zero memberships.
    NotFound,
}

/// What the gate does with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Continue to normal routing untouched.
    Pass,
    /// Redirect to `location`.
    Redirect(String),
    /// Set the session's active space, then redirect to `location` (the original URL).
    SwitchAndReload {
        organization_id: String,
        location: String,
    },
}

/// The request being resolved, enough to rebuild its URL.
#[derive(Debug, Clone, Copy)]
pub struct SpaceRequest<'a> {
    pub prefix: &'a str,
    pub slug: &'a str,
    pub rest: &'a str,
    pub query: Option<&'a str>,
}

impl SpaceRequest<'_> {
    /// The same URL with `slug` substituted.
    pub fn url_with_slug(&self, slug: &str) -> String {
        let mut url = format!("{}/{}{}", self.prefix, slug, self.rest);
        if let Some(query) = self.query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    /// The original URL, for a reload.
    pub fn url(&self) -> String {
        self.url_with_slug(self.slug)
    }
}

/// Classify a lookup result against the requested slug.
pub fn resolution_for(requested: &str, found: Option<SpaceRef>) -> Resolution {
    match found {
        None => Resolution::NotFound,
        Some(space) if space.slug == requested => Resolution::ResolvedMatchingSlug(space),
        Some(space) => Resolution::ResolvedDifferentCanonicalSlug(space),
    }
}

/// Terminal decision for one request.
pub fn decide(resolution: Resolution, request: &SpaceRequest<'_>, space_list_path: &str) -> Action {
    match resolution {
        Resolution::ActiveMatchesRequested => Action::Pass,
        Resolution::ResolvedDifferentCanonicalSlug(space) => {
            Action::Redirect(request.url_with_slug(&space.slug))
        }
        Resolution::ResolvedMatchingSlug(space) => Action::SwitchAndReload {
            organization_id: space.id,
            location: request.url(),
        },
        Resolution::NotFound => Action::Redirect(space_list_path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(id: &str, slug: &str) -> SpaceRef {
        SpaceRef {
            id: id.to_string(),
            slug: slug.to_string(),
        }
    }

    fn request<'a>(slug: &'a str, rest: &'a str, query: Option<&'a str>) -> SpaceRequest<'a> {
        SpaceRequest {
            prefix: "/space",
            slug,
            rest,
            query,
        }
    }

    #[test]
    fn active_space_passes() {
        let action = decide(Resolution::ActiveMatchesRequested, &request("alpha", "", None), "/spaces");
        assert_eq!(action, Action::Pass);
    }

    #[test]
    fn id_lookup_redirects_to_canonical_slug() {
        let found = Some(space("abc123", "my-team"));
        let resolution = resolution_for("abc123", found);
        assert_eq!(
            decide(resolution, &request("abc123", "/moods", Some("week=3")), "/spaces"),
            Action::Redirect("/space/my-team/moods?week=3".to_string())
        );
    }

    #[test]
    fn matching_slug_switches_and_reloads_same_url() {
        let resolution = resolution_for("beta", Some(space("01BETA", "beta")));
        assert_eq!(
            decide(resolution, &request("beta", "/medications", None), "/spaces"),
            Action::SwitchAndReload {
                organization_id: "01BETA".to_string(),
                location: "/space/beta/medications".to_string(),
            }
        );
    }

    #[test]
    fn missing_membership_goes_to_space_list() {
        let resolution = resolution_for("beta", None);
        assert_eq!(resolution, Resolution::NotFound);
        assert_eq!(
            decide(resolution, &request("beta", "", None), "/spaces"),
            Action::Redirect("/spaces".to_string())
        );
    }

    #[test]
    fn empty_query_is_dropped() {
        assert_eq!(request("alpha", "/", Some("")).url(), "/space/alpha/");
    }
}

use std::collections::HashSet;
use std::sync::Arc;

/// Slugs that collide with static routes under the space prefix.
///
/// Built once at startup and never mutated; clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct ReservedSlugs(Arc<HashSet<String>>);

impl ReservedSlugs {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(slugs.into_iter().map(Into::into).collect()))
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact() {
        let reserved = ReservedSlugs::new(["new", "join"]);
        assert!(reserved.contains("new"));
        assert!(reserved.contains("join"));
        assert!(!reserved.contains("New"));
        assert!(!reserved.contains("newer"));
    }

    #[test]
    fn default_set_reserves_nothing() {
        let reserved = ReservedSlugs::default();
        assert!(!reserved.contains("new"));
        assert!(!reserved.contains(""));
    }
}

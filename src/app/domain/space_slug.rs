//! URL-safe space slug.

const MAX_LEN: usize = 64;

/// Errors produced when a string is not a valid space slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpaceSlugError {
    #[error("Slug cannot be empty.")]
    Empty,
    #[error("Slug must be at most 64 characters.")]
    TooLong,
    #[error("Slug may only contain lowercase letters, digits and '-'.")]
    InvalidCharacter,
    #[error("Slug cannot start or end with '-'.")]
    EdgeHyphen,
}

/// Validated space slug: lowercase ASCII letters, digits and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpaceSlug(String);

impl SpaceSlug {
    pub fn new(value: impl Into<String>) -> Result<Self, SpaceSlugError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SpaceSlugError::Empty);
        }
        if value.len() > MAX_LEN {
            return Err(SpaceSlugError::TooLong);
        }
        if !value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(SpaceSlugError::InvalidCharacter);
        }
        if value.starts_with('-') || value.ends_with('-') {
            return Err(SpaceSlugError::EdgeHyphen);
        }
        Ok(Self(value))
    }

    /// Derive a slug from a display name ("Jane's Journal" -> "jane-s-journal").
    pub fn from_name(name: &str) -> Result<Self, SpaceSlugError> {
        let mut slug = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let trimmed: String = slug.trim_matches('-').chars().take(MAX_LEN).collect();
        Self::new(trimmed.trim_end_matches('-'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpaceSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub mod organization_id;
pub mod organization_role;
pub mod space_slug;
pub mod user_id;
pub mod user_role;

pub use organization_id::OrganizationId;
pub use organization_role::OrganizationRole;
pub use space_slug::{SpaceSlug, SpaceSlugError};
pub use user_id::UserId;
pub use user_role::UserRole;

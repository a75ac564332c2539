pub mod organizations;
pub mod sessions;
pub mod users;

pub use organizations::{Membership, NewOrganization, Organization, SpaceRef};
pub use sessions::{Session, SessionWithUser};
pub use users::{NewUser, User};

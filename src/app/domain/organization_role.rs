use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Role of a member inside a space. A space holds one patient and at most one caregiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrganizationRole {
    Patient,
    Caregiver,
}

//! Parent contact reference data, used only for broadcast resolution.

use serde::{Deserialize, Serialize};

pub type ParentId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentContact {
    pub id: ParentId,
    pub name: String,
    pub child_name: String,
    pub phone: String,
    pub last_contact_date: String,
}

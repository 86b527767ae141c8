use serde::Deserialize;
use ts_rs::TS;

use super::entities::ProfileField;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct ProfileChangeRequest {
    pub field: ProfileField,
    pub new_value: String,
}


//! The normalized field mapping handed to the template renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder names, in the order templates conventionally list them.
pub const FIELD_NAMES: [&str; 23] = [
    "date",
    "first_name",
    "last_name",
    "dob",
    "address",
    "city",
    "state",
    "zip",
    "phone",
    "weight",
    "height",
    "insurance",
    "policy_num",
    "dr_name",
    "dr_npi",
    "dr_address",
    "dr_city",
    "dr_state",
    "dr_zip",
    "dr_phone",
    "dr_fax",
    "L",
    "R",
];

/// Display strings for every template placeholder.
///
/// Every field is a plain `String`, so a context can never be partial: a
/// value the source record lacks is simply empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContext {
    pub date: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub weight: String,
    pub height: String,
    pub insurance: String,
    pub policy_num: String,
    pub dr_name: String,
    pub dr_npi: String,
    pub dr_address: String,
    pub dr_city: String,
    pub dr_state: String,
    pub dr_zip: String,
    pub dr_phone: String,
    pub dr_fax: String,
    #[serde(rename = "L")]
    pub left: String,
    #[serde(rename = "R")]
    pub right: String,
}

impl NormalizedContext {
    /// Look up a field by its placeholder name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "date" => &self.date,
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "dob" => &self.dob,
            "address" => &self.address,
            "city" => &self.city,
            "state" => &self.state,
            "zip" => &self.zip,
            "phone" => &self.phone,
            "weight" => &self.weight,
            "height" => &self.height,
            "insurance" => &self.insurance,
            "policy_num" => &self.policy_num,
            "dr_name" => &self.dr_name,
            "dr_npi" => &self.dr_npi,
            "dr_address" => &self.dr_address,
            "dr_city" => &self.dr_city,
            "dr_state" => &self.dr_state,
            "dr_zip" => &self.dr_zip,
            "dr_phone" => &self.dr_phone,
            "dr_fax" => &self.dr_fax,
            "L" => &self.left,
            "R" => &self.right,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// `(name, value)` pairs in [`FIELD_NAMES`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FIELD_NAMES
            .iter()
            .map(move |name| (*name, self.get(name).unwrap_or_default()))
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect()
    }
}

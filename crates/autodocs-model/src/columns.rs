//! Column headers of the patient dataset.
//!
//! These names are the fixed contract with whoever exports the dataset.
//! Lookups trim surrounding whitespace but are otherwise exact.

pub const FULL_NAME: &str = "Full Name";
pub const LAST_NAME: &str = "Last Name";
pub const DATE_OF_BIRTH: &str = "Date of Birth";
pub const ADDRESS: &str = "Address";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const ZIP_CODE: &str = "ZIP Code";
pub const PRIMARY_PHONE: &str = "Primary Phone";
pub const WEIGHT: &str = "Weight";
pub const HEIGHT: &str = "Height";
pub const PRIMARY_INSURANCE: &str = "Primary Insurance";
pub const MCN: &str = "MCN";
pub const DR_NAME: &str = "Dr Name";
pub const NPI: &str = "NPI";
pub const DR_ADDRESS: &str = "Dr Address";
pub const DR_CITY: &str = "Dr City";
pub const DR_STATE: &str = "Dr State";
pub const DR_ZIP_CODE: &str = "Dr ZIP Code";
pub const DR_PHONE: &str = "Dr Phone Number";
pub const DR_FAX: &str = "Dr Fax";
pub const PRODUCTS: &str = "Products";

/// Every column the context builder reads.
pub const ALL: [&str; 21] = [
    FULL_NAME,
    LAST_NAME,
    DATE_OF_BIRTH,
    ADDRESS,
    CITY,
    STATE,
    ZIP_CODE,
    PRIMARY_PHONE,
    WEIGHT,
    HEIGHT,
    PRIMARY_INSURANCE,
    MCN,
    DR_NAME,
    NPI,
    DR_ADDRESS,
    DR_CITY,
    DR_STATE,
    DR_ZIP_CODE,
    DR_PHONE,
    DR_FAX,
    PRODUCTS,
];

use crate::core::fields::FormFields;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body posted to a contact backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub year: String,
    pub instrument: String,
    pub subject: String,
    pub message: String,
}

impl ContactPayload {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.name.clone(),
            email: fields.email.clone(),
            year: fields.resolved_year().to_string(),
            instrument: fields.instrument.clone(),
            subject: fields.interest_subject.clone(),
            message: fields.message.clone(),
        }
    }
}

/// Body posted to a spreadsheet webhook: the contact payload plus the
/// submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    pub timestamp: String,
    #[serde(flatten)]
    pub contact: ContactPayload,
}

impl RelayPayload {
    pub fn new(contact: ContactPayload, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            contact,
        }
    }
}

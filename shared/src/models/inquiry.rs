use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Stored in place of the username when the sender has none.
pub const UNKNOWN_USERNAME: &str = "unknown";

/// A confirmed service inquiry, as stored in the `inquiries` collection.
///
/// Field names are camelCase so records line up with documents that already
/// exist in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// Catalog name of the requested service
    #[builder(setter(into))]
    pub service: String,
    /// Contact address, taken verbatim from the user
    #[builder(setter(into))]
    pub email: String,
    /// Free-text project description
    #[builder(setter(into))]
    pub description: String,
    /// Telegram id of the author
    pub user_id: i64,
    /// Telegram username of the author, or [`UNKNOWN_USERNAME`]
    #[builder(setter(into), default = UNKNOWN_USERNAME.to_string())]
    pub username: String,
    #[builder(default = Utc::now())]
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}
impl Inquiry {
    pub fn builder() -> InquiryBuilder {
        InquiryBuilder::default()
    }
}
impl InquiryBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(service) = self.service.as_ref() {
            if service.trim().is_empty() {
                return Err(String::from("service must not be empty"));
            }
        }
        if let Some(email) = self.email.as_ref() {
            if email.trim().is_empty() {
                return Err(String::from("email must not be empty"));
            }
        }
        if let Some(description) = self.description.as_ref() {
            if description.trim().is_empty() {
                return Err(String::from("description must not be empty"));
            }
        }
        if let Some(user_id) = self.user_id {
            if user_id <= 0 {
                return Err(String::from("user id must be greater than 0"));
            }
        }
        Ok(())
    }
}

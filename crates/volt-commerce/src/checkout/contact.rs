//! Contact and delivery details captured at checkout.

use serde::{Deserialize, Serialize};

/// Contact and delivery-address fields snapshotted onto an order.
///
/// Catalog price changes never touch historical orders; the same applies
/// to a customer editing their profile, which is why the order keeps its
/// own copy of these fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// City.
    pub city: String,
    /// Street address.
    pub address: String,
    /// Postal code.
    pub zip_code: String,
    /// Optional note from the customer.
    pub comment: Option<String>,
}

impl ContactInfo {
    /// Create contact info with the required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
            city: city.into(),
            address: address.into(),
            zip_code: zip_code.into(),
            comment: None,
        }
    }

    /// Attach a customer comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check that every required field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.phone.is_empty()
            && !self.email.is_empty()
            && !self.city.is_empty()
            && !self.address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_creation() {
        let contact = ContactInfo::new(
            "Anna",
            "Petrova",
            "+7 999 123-45-67",
            "anna@example.com",
            "Moscow",
            "Tverskaya 1, apt 5",
            "125009",
        );
        assert_eq!(contact.full_name(), "Anna Petrova");
        assert!(contact.is_complete());
        assert!(contact.comment.is_none());
    }

    #[test]
    fn test_incomplete_contact() {
        let contact = ContactInfo::default();
        assert!(!contact.is_complete());
    }
}

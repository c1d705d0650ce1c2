//! Caller identity and buyer contact details.

use serde::{Deserialize, Serialize};

/// Who is checking out, as supplied by the authentication provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Identity {
    /// No logged-in user.
    #[default]
    Anonymous,
    /// Logged-in user. Profile fields are optional and only used to
    /// prefill the order form.
    Authenticated {
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    },
}

impl Identity {
    /// An authenticated identity with no profile fields.
    pub fn authenticated() -> Self {
        Identity::Authenticated {
            name: None,
            email: None,
            phone: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { name, .. } => name.as_deref(),
            Identity::Anonymous => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { email, .. } => email.as_deref(),
            Identity::Anonymous => None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { phone, .. } => phone.as_deref(),
            Identity::Anonymous => None,
        }
    }
}

/// Contact fields entered on the order form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BuyerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl BuyerDetails {
    /// Start from whatever the identity provides; the rest is entered by hand.
    pub fn prefilled(identity: &Identity) -> Self {
        Self {
            name: identity.name().unwrap_or_default().to_string(),
            email: identity.email().unwrap_or_default().to_string(),
            phone: identity.phone().unwrap_or_default().to_string(),
            notes: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Email and phone are both present after trimming.
    pub fn has_contact_info(&self) -> bool {
        !self.email.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled_from_identity() {
        let identity = Identity::Authenticated {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            phone: None,
        };
        let buyer = BuyerDetails::prefilled(&identity);
        assert_eq!(buyer.name, "Ada");
        assert_eq!(buyer.email, "ada@example.com");
        assert!(buyer.phone.is_empty());
        assert!(!buyer.has_contact_info());
    }

    #[test]
    fn test_prefilled_anonymous_is_blank() {
        assert_eq!(BuyerDetails::prefilled(&Identity::Anonymous), BuyerDetails::default());
    }

    #[test]
    fn test_contact_info_is_trimmed() {
        let buyer = BuyerDetails::default()
            .with_email("  ")
            .with_phone("555-0100");
        assert!(!buyer.has_contact_info());
        assert!(buyer.with_email(" a@b.c ").has_contact_info());
    }
}

use serde::{Deserialize, Serialize};

/// Name shown before the merchant has identified themselves.
pub const DEFAULT_USER_NAME: &str = "User";

/// Identity and business contact fields of the merchant.
///
/// Every field is independent; empty strings mean "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub ic_number: String,
    pub phone_number: String,
    pub business_name: String,
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_NAME.into(),
            ic_number: String::new(),
            phone_number: String::new(),
            business_name: String::new(),
            email: String::new(),
        }
    }
}

impl Profile {
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_identity(&self, name: impl Into<String>, ic_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ic_number: ic_number.into(),
            ..self.clone()
        }
    }

    pub fn with_phone_number(&self, phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            ..self.clone()
        }
    }

    pub fn with_business_name(&self, business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            ..self.clone()
        }
    }

    pub fn with_email(&self, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..self.clone()
        }
    }

    /// Returns the value or the dashboard's "Not Set" placeholder.
    pub fn display_or_unset(value: &str) -> &str {
        if value.is_empty() {
            "Not Set"
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_uses_placeholder_name() {
        let profile = Profile::default();
        assert_eq!(profile.name, "User");
        assert!(profile.ic_number.is_empty());
        assert!(profile.phone_number.is_empty());
        assert!(profile.business_name.is_empty());
        assert!(profile.email.is_empty());
    }

    #[test]
    fn with_identity_keeps_contact_fields() {
        let profile = Profile::default()
            .with_email("shop@example.com")
            .with_identity("Aisha", "900101-14-5678");
        assert_eq!(profile.name, "Aisha");
        assert_eq!(profile.ic_number, "900101-14-5678");
        assert_eq!(profile.email, "shop@example.com");
    }

    #[test]
    fn unset_fields_render_placeholder() {
        assert_eq!(Profile::display_or_unset(""), "Not Set");
        assert_eq!(Profile::display_or_unset("Kopi Corner"), "Kopi Corner");
    }
}

use serde::{Deserialize, Serialize};

/// Identity of the business printed on receipts and used for follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinetProfile {
    pub name: String,
    pub principal: String,
    pub title: String,
    pub contact: String,
    pub email: String,
    pub legal: String,
}

impl Default for CabinetProfile {
    fn default() -> Self {
        Self {
            name: "Formation Nexus Compétences-BF".into(),
            principal: "BAMOUNI Joseph Koaladuy".into(),
            title: "Consultant - PDG du Cabinet".into(),
            contact: "22674042686".into(),
            email: "nexuscompetencesbf@gmail.com".into(),
            legal: "RCCM: BF-OUA-01-XXXX-B13 / IFU: 00XXXXXX".into(),
        }
    }
}

/// Editable profile fields, addressed by name from the settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Principal,
    Title,
    Contact,
    Email,
    Legal,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Name,
        ProfileField::Principal,
        ProfileField::Title,
        ProfileField::Contact,
        ProfileField::Email,
        ProfileField::Legal,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Principal => "principal",
            ProfileField::Title => "title",
            ProfileField::Contact => "contact",
            ProfileField::Email => "email",
            ProfileField::Legal => "legal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Organization name",
            ProfileField::Principal => "Principal",
            ProfileField::Title => "Title",
            ProfileField::Contact => "Contact number",
            ProfileField::Email => "Email",
            ProfileField::Legal => "Legal references",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        let needle = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|field| field.key() == needle)
    }
}

impl CabinetProfile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Principal => &self.principal,
            ProfileField::Title => &self.title,
            ProfileField::Contact => &self.contact,
            ProfileField::Email => &self.email,
            ProfileField::Legal => &self.legal,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Principal => self.principal = value,
            ProfileField::Title => self.title = value,
            ProfileField::Contact => self.contact = value,
            ProfileField::Email => self.email = value,
            ProfileField::Legal => self.legal = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip_through_keys() {
        let mut profile = CabinetProfile::default();
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::parse(field.key()), Some(field));
        }
        profile.set(ProfileField::Email, "contact@example.org");
        assert_eq!(profile.get(ProfileField::Email), "contact@example.org");
        assert_eq!(ProfileField::parse("PHONE"), None);
    }
}

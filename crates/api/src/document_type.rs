use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of document a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    IdCard,
    Passport,
    DriverLicense,
    ResidencePermit,
    Statutes,
    CompanyRegistration,
    BeneficialsOwnerRegister,
}

impl DocumentType {
    /// Every accepted value, in the order the API documents them.
    pub const ALL: [Self; 7] = [
        Self::IdCard,
        Self::Passport,
        Self::DriverLicense,
        Self::ResidencePermit,
        Self::Statutes,
        Self::CompanyRegistration,
        Self::BeneficialsOwnerRegister,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IdCard => "id_card",
            Self::Passport => "passport",
            Self::DriverLicense => "driver_license",
            Self::ResidencePermit => "residence_permit",
            Self::Statutes => "statutes",
            Self::CompanyRegistration => "company_registration",
            Self::BeneficialsOwnerRegister => "beneficials_owner_register",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// `id_card, passport, ...` as used in error messages.
    #[must_use]
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

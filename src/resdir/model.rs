use crate::error::DirectoryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stable identifier of a directory entity. Assigned by the store, never
/// reinterpreted by the core.
pub type EntityId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Advocacy,
    EmploymentSupport,
    EducationTraining,
    HealthcareServices,
    HousingAssistance,
    Transportation,
    Counseling,
    AssistiveTechnology,
    RecreationSocial,
    LegalServices,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Advocacy => "advocacy",
            ServiceCategory::EmploymentSupport => "employment_support",
            ServiceCategory::EducationTraining => "education_training",
            ServiceCategory::HealthcareServices => "healthcare_services",
            ServiceCategory::HousingAssistance => "housing_assistance",
            ServiceCategory::Transportation => "transportation",
            ServiceCategory::Counseling => "counseling",
            ServiceCategory::AssistiveTechnology => "assistive_technology",
            ServiceCategory::RecreationSocial => "recreation_social",
            ServiceCategory::LegalServices => "legal_services",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Advocacy => "Advocacy",
            ServiceCategory::EmploymentSupport => "Employment Support",
            ServiceCategory::EducationTraining => "Education & Training",
            ServiceCategory::HealthcareServices => "Healthcare Services",
            ServiceCategory::HousingAssistance => "Housing Assistance",
            ServiceCategory::Transportation => "Transportation",
            ServiceCategory::Counseling => "Counseling",
            ServiceCategory::AssistiveTechnology => "Assistive Technology",
            ServiceCategory::RecreationSocial => "Recreation & Social",
            ServiceCategory::LegalServices => "Legal Services",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advocacy" => Ok(ServiceCategory::Advocacy),
            "employment_support" => Ok(ServiceCategory::EmploymentSupport),
            "education_training" => Ok(ServiceCategory::EducationTraining),
            "healthcare_services" => Ok(ServiceCategory::HealthcareServices),
            "housing_assistance" => Ok(ServiceCategory::HousingAssistance),
            "transportation" => Ok(ServiceCategory::Transportation),
            "counseling" => Ok(ServiceCategory::Counseling),
            "assistive_technology" => Ok(ServiceCategory::AssistiveTechnology),
            "recreation_social" => Ok(ServiceCategory::RecreationSocial),
            "legal_services" => Ok(ServiceCategory::LegalServices),
            other => Err(DirectoryError::Api(format!(
                "Unknown service category: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedCategory {
    MobilityImpairment,
    VisualImpairment,
    HearingImpairment,
    CognitiveDisability,
    ChronicHealthConditions,
}

impl NeedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeedCategory::MobilityImpairment => "mobility_impairment",
            NeedCategory::VisualImpairment => "visual_impairment",
            NeedCategory::HearingImpairment => "hearing_impairment",
            NeedCategory::CognitiveDisability => "cognitive_disability",
            NeedCategory::ChronicHealthConditions => "chronic_health_conditions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NeedCategory::MobilityImpairment => "Mobility Impairment",
            NeedCategory::VisualImpairment => "Visual Impairment",
            NeedCategory::HearingImpairment => "Hearing Impairment",
            NeedCategory::CognitiveDisability => "Cognitive Disability",
            NeedCategory::ChronicHealthConditions => "Chronic Health Conditions",
        }
    }
}

impl std::fmt::Display for NeedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NeedCategory {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobility_impairment" => Ok(NeedCategory::MobilityImpairment),
            "visual_impairment" => Ok(NeedCategory::VisualImpairment),
            "hearing_impairment" => Ok(NeedCategory::HearingImpairment),
            "cognitive_disability" => Ok(NeedCategory::CognitiveDisability),
            "chronic_health_conditions" => Ok(NeedCategory::ChronicHealthConditions),
            other => Err(DirectoryError::Api(format!(
                "Unknown need category: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organization,
    Program,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Organization => "organization",
            EntityKind::Program => "program",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Organization => "Organization",
            EntityKind::Program => "Program",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" => Ok(EntityKind::Organization),
            "program" => Ok(EntityKind::Program),
            other => Err(DirectoryError::Api(format!("Unknown entity kind: {}", other))),
        }
    }
}

/// A single directory record. Immutable from the engine's perspective;
/// `id` and `created_at` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location_zip: String,
    pub service_category: ServiceCategory,
    pub need_category: NeedCategory,
    pub kind: EntityKind,
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied part of a new entity. The store fills in `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDraft {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location_zip: String,
    pub service_category: ServiceCategory,
    pub need_category: NeedCategory,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub zip_codes: usize,
    pub services: usize,
    pub entities: usize,
}

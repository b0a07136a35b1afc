//! Company profile records: office details, partners and the team roster.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{ContentKind, ContentRecord, one_of};

const CITIES: [&str; 8] = [
    "Nairobi",
    "Mogadishu",
    "Dubai",
    "Dodoma",
    "Accra",
    "Addis Ababa",
    "Dakar",
    "Kigali",
];

const OFFICE_LOCATIONS: [&str; 8] = [
    "Nairobi, Kenya",
    "Mogadishu, Somalia",
    "Dubai, UAE",
    "Dodoma, Tanzania",
    "Accra, Ghana",
    "Ethiopia, Addis Ababa",
    "Dakar, Senegal",
    "Kigali, Rwanda",
];

const COUNTRIES: [&str; 9] = [
    "Global", "Kenya", "Somalia", "Dubai", "Ethiopia", "Rwanda", "Tanzania", "Senegal", "Ghana",
];

const DEPARTMENTS: [&str; 16] = [
    "Executive",
    "Sales",
    "Human Resources",
    "Engineering",
    "Marketing",
    "Finance",
    "Operations",
    "Customer Support",
    "Software Development",
    "Data Science",
    "Blockchain",
    "Cybersecurity",
    "UI/UX Design",
    "DevOps",
    "Graphic Design",
    "SEO & Marketing",
];

const TEAM_ROLES: [&str; 22] = [
    "Founder",
    "Co-Founder",
    "CEO",
    "CTO",
    "CFO",
    "CMO",
    "HR Manager",
    "Sales Lead",
    "Marketing Lead",
    "Software Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Data Scientist",
    "Blockchain Developer",
    "Cybersecurity Analyst",
    "DevOps Engineer",
    "UI/UX Designer",
    "Customer Support Representative",
    "Graphic Designer",
    "SEO Expert",
    "Social Media Marketer",
];

/// Office contact details.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyInfo {
    /// Office city.
    #[serde(default = "default_city")]
    #[validate(custom(function = "validate_city"))]
    pub city: String,
    /// Street address.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub address: Option<String>,
    /// Office phone.
    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,
    /// Office email.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Office location label.
    #[serde(default = "default_office_location")]
    #[validate(custom(function = "validate_office_location"))]
    pub office_location: String,
    /// Map link.
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL."))]
    pub google_map_link: Option<String>,
}

impl ContentRecord for CompanyInfo {
    const KIND: ContentKind = ContentKind::CompanyInfo;
}

/// Partner shown in the logo strip.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Partner {
    /// Partner name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Logo URL.
    #[validate(url(message = "Enter a valid URL."))]
    pub logo: String,
}

impl ContentRecord for Partner {
    const KIND: ContentKind = ContentKind::Partner;
}

/// Team roster entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeamMember {
    /// Full name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Job title.
    #[validate(custom(function = "validate_team_role"))]
    pub role: String,
    /// Home country.
    #[serde(default = "default_country")]
    #[validate(custom(function = "validate_country"))]
    pub country: String,
    /// Department; members without one are listed as unassigned.
    #[serde(default)]
    #[validate(custom(function = "validate_department"))]
    pub department: Option<String>,
    /// Short bio.
    #[serde(default)]
    pub description: Option<String>,
    /// Portrait URL.
    #[validate(url(message = "Enter a valid URL."))]
    pub image: String,
    /// LinkedIn profile.
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL."))]
    pub linkedin: Option<String>,
    /// Twitter profile.
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL."))]
    pub twitter: Option<String>,
}

impl ContentRecord for TeamMember {
    const KIND: ContentKind = ContentKind::TeamMember;
}

fn default_city() -> String {
    CITIES[0].to_string()
}

fn default_office_location() -> String {
    OFFICE_LOCATIONS[0].to_string()
}

fn default_country() -> String {
    "Kenya".to_string()
}

fn validate_city(value: &str) -> Result<(), ValidationError> {
    one_of(value, &CITIES)
}

fn validate_office_location(value: &str) -> Result<(), ValidationError> {
    one_of(value, &OFFICE_LOCATIONS)
}

fn validate_country(value: &str) -> Result<(), ValidationError> {
    one_of(value, &COUNTRIES)
}

fn validate_department(value: &str) -> Result<(), ValidationError> {
    one_of(value, &DEPARTMENTS)
}

fn validate_team_role(value: &str) -> Result<(), ValidationError> {
    one_of(value, &TEAM_ROLES)
}

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the world universities reference list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstitutionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domains: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub web_pages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub alpha_two_code: String,
    #[serde(rename = "state-province", deserialize_with = "null_as_default")]
    pub state_province: String,
}

// ---- extracted profile ----

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub profile: Profile,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_location_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_country_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "null_as_default")]
    pub publications: Vec<Publication>,
    #[serde(deserialize_with = "null_as_default")]
    pub honors: Vec<Honor>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "null_as_default")]
    pub volunteer: Vec<Volunteer>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearMonth {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimePeriod {
    pub start_date: Option<YearMonth>,
    pub end_date: Option<YearMonth>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub school_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree_name: String,
    pub time_period: Option<TimePeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub geo_location_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub time_period: Option<TimePeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub date: Option<PublicationDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Honor {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issuer: String,
    pub issue_date: Option<YearMonth>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub license_number: String,
    pub company: Option<Company>,
    pub time_period: Option<TimePeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volunteer {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub time_period: Option<TimePeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email_address: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(deserialize_with = "null_as_default")]
    pub websites: Vec<Website>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneNumber {
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Website {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

// ---- renderer context ----

/// Flat context handed to the document template renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeContext {
    pub name: String,
    pub about: String,
    pub title: String,
    pub telephone: String,
    pub city: String,
    pub email: String,
    pub linkedin: String,
    pub websites: Vec<WebsiteEntry>,
    pub educations: Vec<EducationEntry>,
    pub publications: Vec<PublicationEntry>,
    pub works: Vec<WorkEntry>,
    pub honors: Vec<HonorEntry>,
    pub certificates: Vec<CertificateEntry>,
    pub volunteers: Vec<VolunteerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub bullet: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteEntry {
    pub domain: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school_name: String,
    pub country: String,
    pub start_month: String,
    pub end_month: String,
    pub degree_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationEntry {
    pub title: String,
    pub date: String,
    pub journal: String,
    pub key_points: Vec<KeyPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub name: String,
    pub roles: Vec<RoleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub title: String,
    pub start_month: String,
    pub end_month: String,
    pub location: String,
    pub key_points: Vec<KeyPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HonorEntry {
    pub title: String,
    pub month: String,
    pub issued_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateEntry {
    pub title: String,
    pub month: String,
    pub license_number: String,
    pub issued_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerEntry {
    pub title: String,
    pub start_month: String,
    pub end_month: String,
    pub company_name: String,
    pub key_points: Vec<KeyPoint>,
}

use crate::core::identity::IdentityExtractor;
use crate::core::institution::InstitutionMatcher;
use crate::domain::model::{
    Certification, CertificateEntry, EducationEntry, Experience, HonorEntry, KeyPoint,
    ProfileRecord, PublicationDate, PublicationEntry, ResumeContext, RoleEntry, TimePeriod,
    VolunteerEntry, WebsiteEntry, WorkEntry, YearMonth,
};
use chrono::NaiveDate;

const BULLET_MARKERS: [char; 4] = ['*', '•', '-', '+'];

/// `"{year}-{month}"`, with the dash only when either part is present.
pub fn format_year_month(date: Option<&YearMonth>) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let year = date.year.map(|y| y.to_string()).unwrap_or_default();
    let month = date.month.map(|m| m.to_string()).unwrap_or_default();
    if year.is_empty() && month.is_empty() {
        String::new()
    } else {
        format!("{}-{}", year, month)
    }
}

pub fn period_months(period: Option<&TimePeriod>) -> (String, String) {
    let start = period.and_then(|p| p.start_date.as_ref());
    let end = period.and_then(|p| p.end_date.as_ref());
    (format_year_month(start), format_year_month(end))
}

/// Splits a free-text description into lines, flagging bullet lines.
pub fn key_points(description: &str) -> Vec<KeyPoint> {
    description
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix(&BULLET_MARKERS[..]) {
            Some(rest) => KeyPoint {
                bullet: true,
                text: rest.trim().to_string(),
            },
            None => KeyPoint {
                bullet: false,
                text: line.to_string(),
            },
        })
        .collect()
}

/// `YYYY-MM-DD`, or empty when the date is incomplete or invalid.
pub fn publication_date(date: Option<&PublicationDate>) -> String {
    date.and_then(|d| NaiveDate::from_ymd_opt(d.year?, d.month?, d.day?))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Groups roles by company, companies in order of first appearance.
pub fn group_works(experience: &[Experience]) -> Vec<WorkEntry> {
    let mut works: Vec<WorkEntry> = Vec::new();

    for role in experience {
        let Some(company) = role.company_name.as_deref() else {
            continue;
        };
        let (start_month, end_month) = period_months(role.time_period.as_ref());
        let entry = RoleEntry {
            title: role.title.clone(),
            start_month,
            end_month,
            location: role.geo_location_name.clone(),
            key_points: key_points(&role.description),
        };
        match works.iter_mut().find(|work| work.name == company) {
            Some(work) => work.roles.push(entry),
            None => works.push(WorkEntry {
                name: company.to_string(),
                roles: vec![entry],
            }),
        }
    }

    works
}

/// Newest first by start date; undated certificates sort last.
pub fn sort_certificates(certifications: &[Certification]) -> Vec<CertificateEntry> {
    let mut keyed: Vec<((i32, u32), CertificateEntry)> = certifications
        .iter()
        .map(|certificate| {
            let start = certificate
                .time_period
                .as_ref()
                .and_then(|p| p.start_date.as_ref());
            let key = (
                start.and_then(|d| d.year).unwrap_or(0),
                start.and_then(|d| d.month).unwrap_or(0),
            );
            let entry = CertificateEntry {
                title: certificate.name.clone(),
                month: format_year_month(start),
                license_number: certificate.license_number.clone(),
                issued_by: certificate
                    .company
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
            };
            (key, entry)
        })
        .collect();

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Splits an identity label like `"GitHub: octocat"` into its two halves.
pub fn website_entry(label: &str) -> WebsiteEntry {
    match label.split_once(": ") {
        Some((domain, user)) => WebsiteEntry {
            domain: domain.to_string(),
            user: user.to_string(),
        },
        None => WebsiteEntry {
            domain: label.to_string(),
            user: String::new(),
        },
    }
}

/// Builds the renderer context from an extracted profile.
pub struct ResumeBuilder<'a> {
    matcher: &'a InstitutionMatcher,
    extractor: &'a IdentityExtractor,
    profile_id: &'a str,
}

impl<'a> ResumeBuilder<'a> {
    pub fn new(
        matcher: &'a InstitutionMatcher,
        extractor: &'a IdentityExtractor,
        profile_id: &'a str,
    ) -> Self {
        Self {
            matcher,
            extractor,
            profile_id,
        }
    }

    pub fn build(&self, record: &ProfileRecord) -> ResumeContext {
        let profile = &record.profile;
        let contact = &record.contact;

        let websites = contact
            .websites
            .iter()
            .map(|site| website_entry(&self.extractor.extract(&site.url)))
            .collect();

        let educations = profile
            .education
            .iter()
            .map(|education| {
                let (start_month, end_month) = period_months(education.time_period.as_ref());
                EducationEntry {
                    school_name: education.school_name.clone(),
                    country: self.matcher.country_of(&education.school_name),
                    start_month,
                    end_month,
                    degree_name: education.degree_name.clone(),
                }
            })
            .collect();

        let publications = profile
            .publications
            .iter()
            .map(|publication| PublicationEntry {
                title: publication.name.clone(),
                date: publication_date(publication.date.as_ref()),
                journal: publication.publisher.clone(),
                key_points: key_points(&publication.description),
            })
            .collect();

        let honors = profile
            .honors
            .iter()
            .map(|honor| {
                let issued = honor.issue_date.unwrap_or_default();
                HonorEntry {
                    title: honor.title.clone(),
                    month: format!(
                        "{}-{}",
                        issued.year.map(|y| y.to_string()).unwrap_or_default(),
                        issued.month.map(|m| m.to_string()).unwrap_or_default()
                    ),
                    issued_by: honor.issuer.clone(),
                }
            })
            .collect();

        let volunteers = profile
            .volunteer
            .iter()
            .map(|role| {
                let (start_month, end_month) = period_months(role.time_period.as_ref());
                VolunteerEntry {
                    title: role.role.clone(),
                    start_month,
                    end_month,
                    company_name: role.company_name.clone(),
                    key_points: key_points(&role.description),
                }
            })
            .collect();

        ResumeContext {
            name: format!("{} {}", profile.first_name, profile.last_name),
            about: profile.summary.clone(),
            title: profile.headline.clone(),
            telephone: contact
                .phone_numbers
                .first()
                .map(|phone| phone.number.clone())
                .unwrap_or_default(),
            city: format!("{}, {}", profile.geo_location_name, profile.geo_country_name),
            email: contact.email_address.clone().unwrap_or_default(),
            linkedin: self.profile_id.to_string(),
            websites,
            educations,
            publications,
            works: group_works(&profile.experience),
            honors,
            certificates: sort_certificates(&profile.certifications),
            volunteers,
        }
    }
}

use anyhow::Result;
use httpmock::prelude::*;
use resume_etl::utils::validation::Validate;
use resume_etl::{
    CachedReferenceList, CliConfig, EtlEngine, FileProfileSource, HttpProfileSource,
    LocalStorage, ResumeContext, ResumePipeline,
};
use std::time::Duration;
use tempfile::TempDir;

fn universities() -> serde_json::Value {
    serde_json::json!([
        {"name": "University of Cambridge", "country": "United Kingdom", "alpha_two_code": "GB",
         "domains": ["cam.ac.uk"], "web_pages": ["https://www.cam.ac.uk/"], "state-province": null},
        {"name": "University of Canberra", "country": "Australia", "alpha_two_code": "AU",
         "domains": ["canberra.edu.au"], "web_pages": ["https://www.canberra.edu.au/"], "state-province": "ACT"}
    ])
}

fn profile_document() -> serde_json::Value {
    serde_json::json!({
        "profile": {
            "firstName": "Alan",
            "lastName": "Turing",
            "headline": "Mathematician",
            "summary": "Computing pioneer",
            "geoLocationName": "Manchester",
            "geoCountryName": "United Kingdom",
            "education": [{
                "schoolName": "Univ. of Cambridge",
                "degreeName": "PhD",
                "timePeriod": {"startDate": {"year": 1934}, "endDate": {"year": 1938}}
            }],
            "experience": [
                {"companyName": "GCHQ", "title": "Cryptanalyst",
                 "timePeriod": {"startDate": {"year": 1939, "month": 9}},
                 "description": "Broke ciphers\n* Designed the bombe\n+ Led Hut 8"},
                {"companyName": "University of Manchester", "title": "Reader"},
                {"companyName": "GCHQ", "title": "Consultant"}
            ],
            "publications": [{"name": "On Computable Numbers", "publisher": "Proc. LMS",
                              "date": {"year": 1936, "month": 11, "day": 12}}],
            "certifications": [
                {"name": "Old", "timePeriod": {"startDate": {"year": 1930, "month": 1}}},
                {"name": "New", "licenseNumber": "42", "company": {"name": "Royal Society"},
                 "timePeriod": {"startDate": {"year": 1951, "month": 3}}}
            ],
            "honors": [{"title": "OBE", "issuer": "The Crown", "issueDate": {"year": 1946, "month": 6}}],
            "volunteer": [{"role": "Runner", "companyName": "Walton AC"}]
        },
        "contact": {
            "email_address": "alan@example.com",
            "phone_numbers": [{"number": "+44 161"}],
            "websites": [
                {"url": "https://github.com/aturing"},
                {"url": "https://turing.example.org/papers/a.pdf"}
            ]
        }
    })
}

#[tokio::test]
async fn test_end_to_end_with_file_profile() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();
    let profile_path = temp_dir.path().join("alan.json");
    std::fs::write(&profile_path, profile_document().to_string()).unwrap();

    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/universities.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(universities());
    });

    let config = CliConfig {
        profile_id: Some("alan-turing".to_string()),
        profile_path: Some(profile_path.to_str().unwrap().to_string()),
        output_path: Some(output_path.clone()),
        universities_cache: Some(
            temp_dir.path().join("cache.json").to_str().unwrap().to_string(),
        ),
        universities_url: Some(server.url("/universities.json")),
        ..Default::default()
    };
    let settings = config.resolve().unwrap();
    settings.validate().unwrap();

    let institutions =
        CachedReferenceList::new(&settings.universities_cache, &settings.universities_url);
    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = ResumePipeline::new(
        storage,
        FileProfileSource::new(&profile_path),
        institutions,
        settings,
    );

    let written = EtlEngine::new(pipeline).run().await.unwrap();
    list_mock.assert();

    assert!(written.ends_with("resume_context.json"));
    let full_path = std::path::Path::new(&output_path).join("resume_context.json");
    let context: ResumeContext =
        serde_json::from_slice(&std::fs::read(full_path).unwrap()).unwrap();

    assert_eq!(context.name, "Alan Turing");
    assert_eq!(context.title, "Mathematician");
    assert_eq!(context.about, "Computing pioneer");
    assert_eq!(context.city, "Manchester, United Kingdom");
    assert_eq!(context.email, "alan@example.com");
    assert_eq!(context.telephone, "+44 161");
    assert_eq!(context.linkedin, "alan-turing");

    assert_eq!(context.websites[0].domain, "GitHub");
    assert_eq!(context.websites[0].user, "aturing");
    assert_eq!(context.websites[1].domain, "Turing");
    assert_eq!(context.websites[1].user, "papers");

    assert_eq!(context.educations[0].country, "United Kingdom");
    assert_eq!(context.educations[0].start_month, "1934-");

    assert_eq!(context.works.len(), 2);
    assert_eq!(context.works[0].name, "GCHQ");
    assert_eq!(context.works[0].roles.len(), 2);
    assert_eq!(context.works[0].roles[0].start_month, "1939-9");
    assert_eq!(context.works[0].roles[0].key_points.len(), 3);
    assert!(context.works[0].roles[0].key_points[1].bullet);

    assert_eq!(context.publications[0].date, "1936-11-12");
    assert_eq!(context.certificates[0].title, "New");
    assert_eq!(context.certificates[0].issued_by, "Royal Society");
    assert_eq!(context.honors[0].month, "1946-6");
    assert_eq!(context.volunteers[0].company_name, "Walton AC");
}

#[tokio::test]
async fn test_end_to_end_with_http_profile_and_cached_list() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_string_lossy().to_string();
    let cache = temp_dir.path().join("cache.json");
    std::fs::write(&cache, universities().to_string())?;

    let server = MockServer::start();
    let profile_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/alan-turing");
        then.status(200).json_body(profile_document());
    });
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/universities.json");
        then.status(200).json_body(serde_json::json!([]));
    });

    let config = CliConfig {
        profile_id: Some("alan-turing".to_string()),
        profile_endpoint: Some(server.url("/profiles")),
        output_path: Some(output_path.clone()),
        output_file: Some("alan.json".to_string()),
        ..Default::default()
    };
    let settings = config.resolve()?;

    let pipeline = ResumePipeline::new(
        LocalStorage::new(settings.output_path.clone()),
        HttpProfileSource::new(server.url("/profiles"), Duration::from_secs(3)),
        CachedReferenceList::new(&cache, server.url("/universities.json")),
        settings,
    );

    let written = EtlEngine::new(pipeline).run().await?;

    profile_mock.assert();
    list_mock.assert_hits(0);
    assert!(written.ends_with("alan.json"));
    let context: ResumeContext =
        serde_json::from_slice(&std::fs::read(temp_dir.path().join("alan.json"))?)?;
    assert_eq!(context.educations[0].country, "United Kingdom");
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_unreachable_profile() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/profiles/ghost");
        then.status(500);
    });

    let config = CliConfig {
        profile_id: Some("ghost".to_string()),
        profile_endpoint: Some(server.url("/profiles")),
        output_path: Some(temp_dir.path().to_str().unwrap().to_string()),
        ..Default::default()
    };
    let settings = config.resolve().unwrap();

    let pipeline = ResumePipeline::new(
        LocalStorage::new(settings.output_path.clone()),
        HttpProfileSource::new(server.url("/profiles"), Duration::from_secs(3)),
        CachedReferenceList::new(temp_dir.path().join("cache.json"), server.url("/list")),
        settings,
    );

    let result = EtlEngine::new(pipeline).run().await;
    assert!(result.is_err());
    assert!(!temp_dir.path().join("resume_context.json").exists());
}

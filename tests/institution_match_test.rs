use resume_etl::core::institution::levenshtein_distance;
use resume_etl::{find_best_match, EtlError, InstitutionMatcher, InstitutionRecord};

fn reference_list() -> Vec<InstitutionRecord> {
    serde_json::from_value(serde_json::json!([
        {"name": "MIT", "country": "United States"},
        {"name": "Massachusetts Institute of Technology", "country": "United States",
         "domains": ["mit.edu"], "web_pages": ["http://web.mit.edu/"], "alpha_two_code": "US"},
        {"name": "École Polytechnique Fédérale de Lausanne", "country": "Switzerland"},
        {"name": "Universidad de Buenos Aires", "country": "Argentina"},
        {"country": "Nowhere"}
    ]))
    .unwrap()
}

#[test]
fn test_short_name_prefers_exact_record() {
    let records = reference_list();
    let best = find_best_match("MIT", &records).unwrap();
    assert!(std::ptr::eq(best, &records[0]));
}

#[test]
fn test_result_is_always_a_member_of_the_list() {
    let records = reference_list();
    for query in ["", "EPFL", "Universidad Buenos Aires", "🙂", "Massachusets Inst. of Tech"] {
        let best = find_best_match(query, &records).unwrap();
        assert!(records.iter().any(|r| std::ptr::eq(r, best)), "query {:?}", query);
    }
}

#[test]
fn test_exact_name_has_zero_distance() {
    let records = reference_list();
    for record in records.iter().filter(|r| !r.name.is_empty()) {
        let best = find_best_match(&record.name, &records).unwrap();
        assert_eq!(levenshtein_distance(&best.name, &record.name), 0);
    }
}

#[test]
fn test_missing_name_matches_empty_query() {
    let records = reference_list();
    assert_eq!(find_best_match("", &records).unwrap().country, "Nowhere");
}

#[test]
fn test_misspelling_maps_to_closest_name() {
    let records = reference_list();
    let best = find_best_match("Universidad de Buenos Aries", &records).unwrap();
    assert_eq!(best.country, "Argentina");
}

#[test]
fn test_empty_reference_list() {
    assert!(matches!(
        find_best_match("MIT", &[]),
        Err(EtlError::EmptyReferenceList)
    ));
    assert!(InstitutionMatcher::new(Vec::new()).is_empty());
}

#[test]
fn test_distance_is_symmetric() {
    let pairs = [("", "abc"), ("Lausanne", "Losanna"), ("MIT", "Massachusetts")];
    for (a, b) in pairs {
        assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
        assert_eq!(levenshtein_distance(a, a), 0);
    }
}

#[test]
fn test_closest_name_is_not_necessarily_the_right_school() {
    // No confidence threshold: word order costs more than a different city.
    let records: Vec<InstitutionRecord> = serde_json::from_value(serde_json::json!([
        {"name": "University of Cambridge", "country": "United Kingdom"},
        {"name": "University of Canberra", "country": "Australia"}
    ]))
    .unwrap();
    let best = find_best_match("Cambridge University", &records).unwrap();
    assert_eq!(best.country, "Australia");
}

use crate::domain::model::InstitutionRecord;
use crate::utils::error::{EtlError, Result};

/// Character based Levenshtein distance.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Returns the record whose name has the smallest edit distance to `query`.
///
/// Ties go to the earliest record in `records`. There is no confidence
/// threshold: the result is the closest name in the list, which is not
/// necessarily the institution the caller meant. Callers must not treat it
/// as a verified match.
pub fn find_best_match<'a>(
    query: &str,
    records: &'a [InstitutionRecord],
) -> Result<&'a InstitutionRecord> {
    let mut best: Option<(usize, &InstitutionRecord)> = None;

    for record in records {
        let distance = levenshtein_distance(query, &record.name);
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, record)),
        }
        if distance == 0 {
            break;
        }
    }

    best.map(|(_, record)| record)
        .ok_or(EtlError::EmptyReferenceList)
}

/// Owns a loaded reference list for the transform stage.
#[derive(Debug, Clone, Default)]
pub struct InstitutionMatcher {
    records: Vec<InstitutionRecord>,
}

impl InstitutionMatcher {
    pub fn new(records: Vec<InstitutionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn best_match(&self, query: &str) -> Result<&InstitutionRecord> {
        find_best_match(query, &self.records)
    }

    /// Country of the closest institution, or an empty string when no list is loaded.
    pub fn country_of(&self, school_name: &str) -> String {
        match self.best_match(school_name) {
            Ok(record) => {
                tracing::debug!("Matched school '{}' to '{}'", school_name, record.name);
                record.country.clone()
            }
            Err(e) => {
                tracing::debug!("No institution match for '{}': {}", school_name, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, country: &str) -> InstitutionRecord {
        InstitutionRecord {
            name: name.to_string(),
            country: country.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_levenshtein_distance_basics() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("MIT", "MIT"), 0);
        assert_eq!(
            levenshtein_distance("Harvard", "Stanford"),
            levenshtein_distance("Stanford", "Harvard")
        );
    }

    #[test]
    fn test_levenshtein_counts_characters_not_bytes() {
        assert_eq!(levenshtein_distance("Zürich", "Zurich"), 1);
    }

    #[test]
    fn test_exact_match_wins() {
        let records = vec![
            record("MIT", "United States"),
            record("Massachusetts Institute of Technology", "United States"),
        ];
        let best = find_best_match("MIT", &records).unwrap();
        assert!(std::ptr::eq(best, &records[0]));
    }

    #[test]
    fn test_closest_name_is_selected() {
        let records = vec![
            record("University of Oxford", "United Kingdom"),
            record("University of Toronto", "Canada"),
            record("University of Tokyo", "Japan"),
        ];
        let best = find_best_match("Univ of Tokyo", &records).unwrap();
        assert_eq!(best.country, "Japan");
    }

    #[test]
    fn test_ties_go_to_earliest_record() {
        let records = vec![record("abd", "First"), record("abe", "Second")];
        let best = find_best_match("abc", &records).unwrap();
        assert_eq!(best.country, "First");
    }

    #[test]
    fn test_duplicate_names_return_first() {
        let records = vec![record("Open University", "UK"), record("Open University", "NL")];
        assert_eq!(find_best_match("Open University", &records).unwrap().country, "UK");
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let err = find_best_match("MIT", &[]).unwrap_err();
        assert!(matches!(err, EtlError::EmptyReferenceList));
    }

    #[test]
    fn test_nonsense_query_still_returns_a_member() {
        let records = vec![
            record("Yale University", "United States"),
            record("ETH Zurich", "Switzerland"),
        ];
        let best = find_best_match("zzzzzzzzzzzzzzzzzzzz", &records).unwrap();
        assert!(records.iter().any(|r| std::ptr::eq(r, best)));
    }

    #[test]
    fn test_matcher_country_of() {
        let matcher = InstitutionMatcher::new(vec![record("Peking University", "China")]);
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.country_of("Peking Univ."), "China");
        assert_eq!(InstitutionMatcher::default().country_of("Peking University"), "");
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let records = vec![
            record("Rice University", "United States"),
            record("Keio University", "Japan"),
        ];
        let first = find_best_match("Kei University", &records).unwrap();
        let second = find_best_match("Kei University", &records).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}

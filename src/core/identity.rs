//! Turns a personal website URL into a short `"Service: handle"` label.
//!
//! The handle is guessed by scoring every path segment and query value that
//! looks like an identifier. Longer tokens and tokens closer to the start
//! score higher; query values are discounted unless their key names a user.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

/// Service names whose casing differs from plain capitalization.
pub const KNOWN_SERVICES: &[&str] = &[
    "ORCID",
    "GitHub",
    "LinkedIn",
    "TikTok",
    "YouTube",
    "ResearchGate",
    "SoundCloud",
];

/// Query keys that name a user get a flat bonus. Searched, not anchored.
pub const USER_KEY_PATTERN: &str = r"(?i)user(name|id)?";

const TOKEN_PATTERN: &str = r"^[\w-]+$";
const QUERY_KEY_BONUS: f64 = 10.0;
const POSITION_WEIGHT: f64 = 10.0;

static DEFAULT_EXTRACTOR: LazyLock<IdentityExtractor> =
    LazyLock::new(IdentityExtractor::default);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Path,
    Query,
}

/// A token that might be the person's handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: String,
    pub position: usize,
    pub source: CandidateSource,
    pub key_bonus: bool,
}

impl Candidate {
    pub fn score(&self) -> f64 {
        let length = self.value.chars().count() as f64;
        let position = POSITION_WEIGHT / (self.position as f64 + 1.0);
        match self.source {
            CandidateSource::Path => length + position,
            CandidateSource::Query => {
                let bonus = if self.key_bonus { QUERY_KEY_BONUS } else { 0.0 };
                length + position / 2.0 + bonus
            }
        }
    }
}

/// Picks the highest scoring candidate.
///
/// An exact score tie goes to the longer token, then to the one seen first.
pub fn select_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<(f64, &Candidate)> = None;
    for candidate in candidates {
        let score = candidate.score();
        let replace = match best {
            None => true,
            Some((best_score, current)) => {
                score > best_score
                    || (score == best_score
                        && candidate.value.chars().count() > current.value.chars().count())
            }
        };
        if replace {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// The pieces of a URL the extractor looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Network location as written, port included.
    pub host: String,
    pub path: String,
    /// Query values grouped by key, keys in first-seen order.
    pub query: Vec<(String, Vec<String>)>,
}

impl UrlParts {
    /// Splits `input` as written, without normalising the path.
    /// Only the scheme is checked by `url`.
    pub fn parse(input: &str) -> Self {
        // url 解析前會去掉前後的控制字元與空白，切片前先對齊
        let input = input.trim_matches(|c: char| c <= ' ');
        let rest = match Url::parse(input) {
            Ok(url) => input.get(url.scheme().len() + 1..).unwrap_or(input),
            Err(e) => {
                tracing::debug!("Treating '{}' as a relative reference: {}", input, e);
                input
            }
        };

        let before_fragment = rest.split('#').next().unwrap_or("");
        let (target, query) = before_fragment
            .split_once('?')
            .unwrap_or((before_fragment, ""));
        let (host, path) = match target.strip_prefix("//") {
            Some(authority) => match authority.find('/') {
                Some(index) => authority.split_at(index),
                None => (authority, ""),
            },
            None => ("", target),
        };

        Self {
            host: host.to_string(),
            path: path.to_string(),
            query: group_query(query),
        }
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn group_query(query: &str) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match grouped.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => grouped.push((key.into_owned(), vec![value.into_owned()])),
        }
    }
    grouped
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized: String = first.to_uppercase().collect();
            capitalized.push_str(&chars.as_str().to_lowercase());
            capitalized
        }
        None => String::new(),
    }
}

pub struct IdentityExtractor {
    services: HashMap<String, &'static str>,
    user_key: Regex,
    token: Regex,
}

impl IdentityExtractor {
    /// Panics if `user_key_pattern` is not a valid regex.
    pub fn new(services: &[&'static str], user_key_pattern: &str) -> Self {
        Self {
            services: services
                .iter()
                .map(|service| (service.to_lowercase(), *service))
                .collect(),
            user_key: Regex::new(user_key_pattern).expect("invalid user key pattern"),
            token: Regex::new(TOKEN_PATTERN).expect("invalid token pattern"),
        }
    }

    /// First host label without `www`, capitalized or in its canonical casing.
    pub fn format_host(&self, host: &str) -> String {
        let mut labels = host.split('.');
        let mut first = labels.next().unwrap_or("");
        if first == "www" {
            first = labels.next().unwrap_or("");
        }

        let capitalized = capitalize(first);
        match self.services.get(&capitalized.to_lowercase()) {
            Some(canonical) => canonical.to_string(),
            None => capitalized,
        }
    }

    pub fn candidates(&self, path: &str, query: &[(String, Vec<String>)]) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (position, part) in path.trim_matches('/').split('/').enumerate() {
            let part = decode_segment(part);
            if self.token.is_match(&part) {
                candidates.push(Candidate {
                    value: part,
                    position,
                    source: CandidateSource::Path,
                    key_bonus: false,
                });
            }
        }

        for (key, values) in query {
            let key_bonus = self.user_key.is_match(key);
            for (position, value) in values.iter().enumerate() {
                if self.token.is_match(value) {
                    candidates.push(Candidate {
                        value: value.clone(),
                        position,
                        source: CandidateSource::Query,
                        key_bonus,
                    });
                }
            }
        }

        candidates
    }

    pub fn extract_username(&self, path: &str, query: &[(String, Vec<String>)]) -> Option<String> {
        let candidates = self.candidates(path, query);
        select_candidate(&candidates).map(|candidate| candidate.value.clone())
    }

    /// `"Service: handle"`, or the raw host and path when no handle is found.
    pub fn extract(&self, url: &str) -> String {
        let parts = UrlParts::parse(url);
        match self.extract_username(&parts.path, &parts.query) {
            Some(username) => format!("{}: {}", self.format_host(&parts.host), username),
            None => format!("{}{}", parts.host, parts.path),
        }
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new(KNOWN_SERVICES, USER_KEY_PATTERN)
    }
}

pub fn extract_identity(url: &str) -> String {
    DEFAULT_EXTRACTOR.extract(url)
}

//! Name search and duplicate-person detection

use crate::error::{Result, StoreError};
use crate::memory::InMemoryStore;
use lineage_calendar::day_number;
use lineage_domain::{DateValue, Person, PersonId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest query that is searched at all
pub const MIN_QUERY_LEN: usize = 2;

/// Most candidates returned by [`InMemoryStore::find_potential_matches`]
pub const MAX_MATCHES: usize = 20;

/// Paging and matching options for [`InMemoryStore::search_persons`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Page size
    pub limit: usize,
    /// Results skipped before the page
    pub offset: usize,
    /// Whether maiden names are searched
    pub include_maiden_name: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            include_maiden_name: true,
        }
    }
}

/// A person who may be a duplicate of another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialMatch {
    /// Candidate record
    pub person: Person,
    /// Similarity score, 0 to 100
    pub score: u32,
}

impl InMemoryStore {
    /// People whose names contain `query`, case-insensitively
    ///
    /// First, middle, surname, nickname and (optionally) maiden names are
    /// searched, as are "first middle surname" and "first surname". Results
    /// are ordered by surname, first name, then id. Queries shorter than
    /// [`MIN_QUERY_LEN`] characters return nothing.
    pub fn search_persons(&self, query: &str, options: &SearchOptions) -> Vec<&Person> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let mut found: Vec<&Person> = self
            .persons
            .values()
            .filter(|p| name_haystacks(p, options.include_maiden_name).any(|h| h.contains(&needle)))
            .collect();
        found.sort_by(|a, b| (&a.surname, &a.first_name, a.id).cmp(&(&b.surname, &b.first_name, b.id)));

        debug!(query = %needle, hits = found.len(), "Searched people");
        found
            .into_iter()
            .skip(options.offset)
            .take(options.limit)
            .collect()
    }

    /// Other people who may be the same individual as `id`
    ///
    /// A candidate must agree with every name and birth detail the person
    /// has: the first name, the surname (as surname or maiden name) and the
    /// birth date. Candidates are scored with [`match_score`] and returned
    /// best first, at most [`MAX_MATCHES`]. A person with none of those
    /// details has no matches.
    pub fn find_potential_matches(&self, id: PersonId) -> Result<Vec<PotentialMatch>> {
        let person = self
            .persons
            .get(&id)
            .ok_or(StoreError::PersonNotFound(id))?;

        if person.first_name.is_none() && person.surname.is_none() && person.birth_date.is_none() {
            return Ok(Vec::new());
        }

        let mut matches: Vec<PotentialMatch> = self
            .persons
            .values()
            .filter(|other| other.id != id && is_candidate(person, other))
            .map(|other| PotentialMatch {
                person: other.clone(),
                score: match_score(person, other),
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.person.id.cmp(&b.person.id)));
        matches.truncate(MAX_MATCHES);
        Ok(matches)
    }
}

/// Similarity of two person records, 0 to 100
///
/// | Agreement                           | Points |
/// |-------------------------------------|--------|
/// | first name                          | 25     |
/// | surname (or surname = maiden name)  | 25 (20)|
/// | middle name                         | 10     |
/// | birth date                          | 30     |
/// | birth place                         | 10     |
///
/// Names compare case-insensitively; birth dates compare by day, so the
/// same date recorded in two calendars agrees.
pub fn match_score(a: &Person, b: &Person) -> u32 {
    let mut score = 0;

    if same_name(&a.first_name, &b.first_name) {
        score += 25;
    }
    if same_name(&a.surname, &b.surname) {
        score += 25;
    } else if same_name(&a.surname, &b.maiden_name) {
        score += 20;
    }
    if same_name(&a.middle_name, &b.middle_name) {
        score += 10;
    }
    if same_date(a.birth_date.as_ref(), b.birth_date.as_ref()) {
        score += 30;
    }
    if a.birth_place.is_some() && a.birth_place == b.birth_place {
        score += 10;
    }

    score
}

fn is_candidate(person: &Person, other: &Person) -> bool {
    let first = person.first_name.is_none() || same_name(&person.first_name, &other.first_name);
    let surname = person.surname.is_none()
        || same_name(&person.surname, &other.surname)
        || same_name(&person.surname, &other.maiden_name);
    let birth = person.birth_date.is_none()
        || same_date(person.birth_date.as_ref(), other.birth_date.as_ref());
    first && surname && birth
}

fn same_name(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

fn same_date(a: Option<&DateValue>, b: Option<&DateValue>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    match (day_number(&a.value, a.calendar), day_number(&b.value, b.calendar)) {
        (Some(x), Some(y)) => x == y,
        _ => a.calendar == b.calendar && a.value.trim() == b.value.trim(),
    }
}

fn name_haystacks(person: &Person, include_maiden: bool) -> impl Iterator<Item = String> + '_ {
    let parts = [
        person.first_name.as_deref(),
        person.middle_name.as_deref(),
        person.surname.as_deref(),
        person.nickname.as_deref(),
        person.maiden_name.as_deref().filter(|_| include_maiden),
    ];
    let full = [&person.first_name, &person.middle_name, &person.surname]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let short = [&person.first_name, &person.surname]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    parts
        .into_iter()
        .flatten()
        .map(str::to_string)
        .chain([full, short])
        .map(|h| h.to_lowercase())
}

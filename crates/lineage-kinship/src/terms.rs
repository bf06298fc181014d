//! Kinship terms from path tallies
//!
//! [`classify`] is a total function over `(ups, downs, spouse_steps)` and the
//! target's gender. Guards are evaluated top to bottom and the first match
//! wins, so the specific cases (siblings, aunts) sit above the general cousin
//! formula.

use crate::path::PathTally;
use lineage_domain::Gender;

/// Term for the same person
pub const SELF: &str = "Self";

/// Term when no path exists
pub const NOT_RELATED: &str = "Not related";

/// Fallback for paths no rule names
pub const DISTANT_RELATIVE: &str = "Distant relative";

const ORDINALS: [&str; 8] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth",
];

/// Pick the noun for the target's gender; other and unknown get the neutral form
fn gendered(gender: Gender, male: &str, female: &str, neutral: &str) -> String {
    match gender {
        Gender::Male => male,
        Gender::Female => female,
        _ => neutral,
    }
    .to_string()
}

/// Name the relationship a path describes
///
/// `gender` is the gender of the person at the end of the path.
///
/// # Examples
///
/// ```
/// use lineage_domain::Gender;
/// use lineage_kinship::{classify, PathTally};
///
/// assert_eq!(classify(PathTally::new(2, 0, 0), Gender::Male), "Grandfather");
/// assert_eq!(classify(PathTally::new(2, 3, 0), Gender::Female), "First Cousin, Once Removed");
/// assert_eq!(classify(PathTally::new(0, 5, 0), Gender::Unknown), "Great-Great-Great-Grandchild");
/// ```
pub fn classify(tally: PathTally, gender: Gender) -> String {
    let PathTally {
        ups,
        downs,
        spouse_steps,
    } = tally;

    match (ups, downs, spouse_steps) {
        (0, 0, 0) => SELF.to_string(),
        (0, 0, 1) => gendered(gender, "Husband", "Wife", "Spouse"),

        (1, 0, 0) => gendered(gender, "Father", "Mother", "Parent"),
        (0, 1, 0) => gendered(gender, "Son", "Daughter", "Child"),
        (1, 1, 0) => gendered(gender, "Brother", "Sister", "Sibling"),
        (2, 1, 0) => gendered(gender, "Uncle", "Aunt", "Parent's Sibling"),
        (1, 2, 0) => gendered(gender, "Nephew", "Niece", "Sibling's Child"),

        (up, 0, 0) if up >= 2 => gendered(
            gender,
            &grand(up, "father"),
            &grand(up, "mother"),
            &grand(up, "parent"),
        ),
        (0, down, 0) if down >= 2 => gendered(
            gender,
            &grand(down, "son"),
            &grand(down, "daughter"),
            &grand(down, "child"),
        ),

        (up, down, 0) if up >= 2 && down >= 2 => cousin(up, down),

        (1, 0, 1) => gendered(gender, "Father-in-law", "Mother-in-law", "Parent-in-law"),
        (0, 1, 1) => gendered(gender, "Son-in-law", "Daughter-in-law", "Child-in-law"),
        (1, 1, 1) => gendered(gender, "Brother-in-law", "Sister-in-law", "Sibling-in-law"),

        _ => DISTANT_RELATIVE.to_string(),
    }
}

/// Direct-line noun `generations` away
///
/// Two generations is "Grandfather" and three "Great-grandfather". From four
/// on, every segment is capitalized: "Great-Great-Grandfather".
fn grand(generations: u32, noun: &str) -> String {
    match generations {
        0..=2 => format!("Grand{}", noun),
        3 => format!("Great-grand{}", noun),
        n => format!("{}Grand{}", "Great-".repeat(n as usize - 2), noun),
    }
}

/// Cousin term for two lines that meet at a common ancestor
fn cousin(ups: u32, downs: u32) -> String {
    let degree = ups.min(downs) - 1;
    let removed = ups.abs_diff(downs);
    let base = format!("{} Cousin", ordinal(degree));

    match removed {
        0 => base,
        1 => format!("{}, Once Removed", base),
        2 => format!("{}, Twice Removed", base),
        n => format!("{}, {} Times Removed", base, n),
    }
}

/// Ordinal word for small numbers, numeric ordinal past eight
pub fn ordinal(n: u32) -> String {
    if let Some(word) = (n as usize)
        .checked_sub(1)
        .and_then(|i| ORDINALS.get(i))
    {
        return (*word).to_string();
    }

    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(ups: u32, downs: u32, spouse_steps: u32, gender: Gender) -> String {
        classify(PathTally::new(ups, downs, spouse_steps), gender)
    }

    #[test]
    fn test_direct_line() {
        assert_eq!(term(1, 0, 0, Gender::Female), "Mother");
        assert_eq!(term(0, 1, 0, Gender::Male), "Son");
        assert_eq!(term(2, 0, 0, Gender::Male), "Grandfather");
        assert_eq!(term(0, 2, 0, Gender::Female), "Granddaughter");
        assert_eq!(term(3, 0, 0, Gender::Female), "Great-grandmother");
        assert_eq!(term(0, 3, 0, Gender::Male), "Great-grandson");
        assert_eq!(term(4, 0, 0, Gender::Male), "Great-Great-Grandfather");
        assert_eq!(term(0, 6, 0, Gender::Female), "Great-Great-Great-Great-Granddaughter");
        assert_eq!(term(5, 0, 0, Gender::Other), "Great-Great-Great-Grandparent");
    }

    #[test]
    fn test_collateral_line() {
        assert_eq!(term(1, 1, 0, Gender::Female), "Sister");
        assert_eq!(term(2, 1, 0, Gender::Male), "Uncle");
        assert_eq!(term(1, 2, 0, Gender::Female), "Niece");
    }

    #[test]
    fn test_cousins() {
        assert_eq!(term(2, 2, 0, Gender::Male), "First Cousin");
        assert_eq!(term(3, 3, 0, Gender::Male), "Second Cousin");
        assert_eq!(term(9, 9, 0, Gender::Male), "Eighth Cousin");
        assert_eq!(term(10, 10, 0, Gender::Male), "9th Cousin");
        assert_eq!(term(2, 3, 0, Gender::Male), "First Cousin, Once Removed");
        assert_eq!(term(3, 2, 0, Gender::Male), "First Cousin, Once Removed");
        assert_eq!(term(3, 5, 0, Gender::Male), "Second Cousin, Twice Removed");
        assert_eq!(term(2, 6, 0, Gender::Male), "First Cousin, 4 Times Removed");
    }

    #[test]
    fn test_spouse_and_in_laws() {
        assert_eq!(term(0, 0, 1, Gender::Female), "Wife");
        assert_eq!(term(0, 0, 1, Gender::Male), "Husband");
        assert_eq!(term(1, 0, 1, Gender::Female), "Mother-in-law");
        assert_eq!(term(0, 1, 1, Gender::Male), "Son-in-law");
        assert_eq!(term(1, 1, 1, Gender::Male), "Brother-in-law");
    }

    #[test]
    fn test_neutral_nouns() {
        assert_eq!(term(0, 0, 1, Gender::Unknown), "Spouse");
        assert_eq!(term(1, 0, 0, Gender::Other), "Parent");
        assert_eq!(term(1, 1, 0, Gender::Unknown), "Sibling");
        assert_eq!(term(2, 0, 0, Gender::Unknown), "Grandparent");
        assert_eq!(term(1, 1, 1, Gender::Other), "Sibling-in-law");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(term(0, 0, 0, Gender::Male), SELF);
        assert_eq!(term(3, 1, 0, Gender::Male), DISTANT_RELATIVE);
        assert_eq!(term(0, 0, 2, Gender::Male), DISTANT_RELATIVE);
        assert_eq!(term(2, 2, 1, Gender::Male), DISTANT_RELATIVE);
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal(1), "First");
        assert_eq!(ordinal(8), "Eighth");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(112), "112th");
    }
}

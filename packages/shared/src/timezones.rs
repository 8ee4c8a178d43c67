//! Canonical IANA timezone names, backed by the `chrono-tz` database.

use chrono_tz::{Tz, TZ_VARIANTS};

/// Every timezone name the selector may offer, sorted.
pub fn canonical_timezones() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    names.sort_unstable();
    names
}

pub fn is_canonical_timezone(name: &str) -> bool {
    name.parse::<Tz>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("America/New_York")]
    #[case("Europe/Paris")]
    #[case("Asia/Tokyo")]
    #[case("UTC")]
    fn test_known_names_are_canonical(#[case] name: &str) {
        assert!(is_canonical_timezone(name));
    }

    #[rstest]
    #[case("")]
    #[case("Mars/Olympus_Mons")]
    #[case("europe/paris ")]
    fn test_unknown_names_are_rejected(#[case] name: &str) {
        assert!(!is_canonical_timezone(name));
    }

    #[test]
    fn test_catalogue_is_sorted_and_complete() {
        let names = canonical_timezones();
        assert_eq!(names.len(), TZ_VARIANTS.len());
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(names.contains(&"Europe/Paris"));
    }
}

use std::sync::LazyLock;

use regex::Regex;

use crate::runway::{RunwayDesignator, RunwayRole};

/// Runways announced by a single advisory. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryRunways {
    pub departure: Option<RunwayDesignator>,
    pub arrival: Option<RunwayDesignator>,
}

/// Finds the runway for `role` in the advisory lines.
///
/// Lines are scanned in order and the first one containing `DEP RWY <rwy>`
/// (or `ARR RWY <rwy>`) wins, later lines are never looked at. Matching is
/// case-insensitive. `None` just means the advisory does not say.
pub fn find_runway_in_atis<S: AsRef<str>>(
    lines: &[S],
    role: RunwayRole,
) -> Option<RunwayDesignator> {
    static DEP: LazyLock<Regex> = LazyLock::new(|| runway_regex(RunwayRole::Departure));
    static ARR: LazyLock<Regex> = LazyLock::new(|| runway_regex(RunwayRole::Arrival));

    let re = match role {
        RunwayRole::Departure => &DEP,
        RunwayRole::Arrival => &ARR,
    };

    lines
        .iter()
        .find_map(|line| re.captures(line.as_ref()))
        .and_then(|c| c[1].parse().ok())
}

/// ASCII digits only, `\d` would also take digits from other scripts.
fn runway_regex(role: RunwayRole) -> Regex {
    Regex::new(&format!(r"(?i){} RWY ([0-9]{{1,2}}[LRC]?)", role.advisory_tag())).unwrap()
}

pub fn find_runways_in_atis<S: AsRef<str>>(lines: &[S]) -> AdvisoryRunways {
    AdvisoryRunways {
        departure: find_runway_in_atis(lines, RunwayRole::Departure),
        arrival: find_runway_in_atis(lines, RunwayRole::Arrival),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rwy(s: &str) -> Option<RunwayDesignator> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_first_matching_line_wins() {
        let lines = ["ARR RWY 07L", "DEP RWY 7", "DEP RWY 25L"];
        assert_eq!(find_runway_in_atis(&lines, RunwayRole::Departure), rwy("07"));
        assert_eq!(find_runway_in_atis(&lines, RunwayRole::Arrival), rwy("07L"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let lines = ["greater rockford information alpha", "dep rwy 25l arr rwy 7r"];
        let runways = find_runways_in_atis(&lines);
        assert_eq!(runways.departure, rwy("25L"));
        assert_eq!(runways.arrival, rwy("07R"));
    }

    #[test]
    fn test_no_runway_information() {
        let lines = ["PERTH INFORMATION BRAVO", "QNH 1013", "RWY 29 IN USE"];
        assert_eq!(find_runways_in_atis(&lines), AdvisoryRunways::default());
        let empty: [&str; 0] = [];
        assert_eq!(find_runways_in_atis(&empty), AdvisoryRunways::default());
    }

    #[test]
    fn test_non_ascii_digits_are_not_runways() {
        let lines = ["DEP RWY \u{667}", "ARR RWY \u{664}\u{662}", "DEP RWY 07", "ARR RWY 25R"];
        assert_eq!(find_runway_in_atis(&lines, RunwayRole::Departure), rwy("07"));
        assert_eq!(find_runway_in_atis(&lines, RunwayRole::Arrival), rwy("25R"));
    }

    #[test]
    fn test_patterns_follow_advisory_tags() {
        for role in [RunwayRole::Departure, RunwayRole::Arrival] {
            let line = format!("{} RWY 9C", role.advisory_tag());
            assert_eq!(find_runway_in_atis(&[line], role), rwy("09C"));
        }
        assert_eq!(find_runway_in_atis(&["DEP RWY 09C"], RunwayRole::Arrival), None);
    }

    #[test]
    fn test_realistic_advisory() {
        let lines = vec![
            "Greater Rockford Information CHARLIE".to_string(),
            "Time 1420Z".to_string(),
            "DEP RWY 25L ARR RWY 25R".to_string(),
            "Wind 250/12 Visibility 10KM".to_string(),
            "Acknowledge information CHARLIE on first contact".to_string(),
        ];
        let runways = find_runways_in_atis(&lines);
        assert_eq!(runways.departure, rwy("25L"));
        assert_eq!(runways.arrival, rwy("25R"));
    }
}

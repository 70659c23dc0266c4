//! Matching configured rider names against the show roster.

use tracing::{info, warn};

use crate::foxvillage::RosterEntry;

use super::normalize::extract_rider_name;

/// A configured rider name resolved to a roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRider {
    pub rider_id: i64,
    /// Roster name with its HTML wrapper removed.
    pub rider_name: String,
    /// The configured name that matched.
    pub original_name: String,
}

/// Whether two names refer to the same rider: either contains the other.
///
/// Case-sensitive, so "Jane" matches "Jane Doe" but "jane" does not.
fn names_match(roster_name: &str, target: &str) -> bool {
    roster_name.contains(target) || target.contains(roster_name)
}

/// Resolve each target name to the first matching roster entry.
///
/// Results follow the order of `targets`. Names without a match are logged
/// and left out. Two targets may resolve to the same rider; both are kept.
pub fn find_riders_by_names<S: AsRef<str>>(
    roster: &[RosterEntry],
    targets: &[S],
) -> Vec<MatchedRider> {
    targets
        .iter()
        .map(|name| name.as_ref())
        .filter_map(|name| {
            let found = roster.iter().find_map(|entry| {
                let clean = extract_rider_name(&entry.rider_name);
                names_match(clean, name).then_some((entry, clean))
            });

            match found {
                Some((entry, clean)) => {
                    info!(name, rider = clean, rider_id = entry.rider_id, "found rider");
                    Some(MatchedRider {
                        rider_id: entry.rider_id,
                        rider_name: clean.to_string(),
                        original_name: name.to_string(),
                    })
                }
                None => {
                    warn!(name, "rider not found in roster");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, name: &str) -> RosterEntry {
        RosterEntry {
            rider_id: id,
            rider_name: name.to_string(),
        }
    }

    fn roster() -> Vec<RosterEntry> {
        vec![
            entry(1, "<a href=\"#\">Jane Doe</a>"),
            entry(2, "<a href=\"#\">John Roe</a>"),
            entry(3, "<a href=\"#\">Jane Smith</a>"),
        ]
    }

    #[test]
    fn partial_name_matches() {
        let riders = find_riders_by_names(&[entry(1, ">Jane Doe<")], &["Jane"]);

        assert_eq!(
            riders,
            vec![MatchedRider {
                rider_id: 1,
                rider_name: "Jane Doe".into(),
                original_name: "Jane".into(),
            }]
        );
    }

    #[test]
    fn longer_target_contains_roster_name() {
        let riders = find_riders_by_names(&roster(), &["Dr. John Roe Jr."]);

        assert_eq!(riders.len(), 1);
        assert_eq!(riders[0].rider_id, 2);
        assert_eq!(riders[0].rider_name, "John Roe");
    }

    #[test]
    fn unknown_name_is_dropped() {
        assert!(find_riders_by_names(&[entry(1, ">Jane Doe<")], &["Zed"]).is_empty());
    }

    #[test]
    fn first_roster_entry_wins() {
        let riders = find_riders_by_names(&roster(), &["Jane"]);

        assert_eq!(riders.len(), 1);
        assert_eq!(riders[0].rider_id, 1);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(find_riders_by_names(&roster(), &["jane doe"]).is_empty());
    }

    #[test]
    fn results_follow_target_order_without_dedup() {
        let targets = vec![
            "Jane Smith".to_string(),
            "Nobody".to_string(),
            "John".to_string(),
            "Jane Smith".to_string(),
        ];

        let ids: Vec<_> = find_riders_by_names(&roster(), &targets)
            .into_iter()
            .map(|r| (r.rider_id, r.original_name))
            .collect();

        assert_eq!(
            ids,
            vec![
                (3, "Jane Smith".to_string()),
                (2, "John".to_string()),
                (3, "Jane Smith".to_string()),
            ]
        );
    }

    #[test]
    fn unwrapped_roster_names_match() {
        let riders = find_riders_by_names(&[entry(9, "Marie Côté")], &["Côté"]);

        assert_eq!(riders[0].rider_name, "Marie Côté");
    }

    #[test]
    fn empty_inputs() {
        let no_targets: [&str; 0] = [];
        assert!(find_riders_by_names(&roster(), &no_targets).is_empty());
        assert!(find_riders_by_names(&[], &["Jane"]).is_empty());
    }
}

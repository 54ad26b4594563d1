//! Team identity canonicalization.
//!
//! Scraped team names carry engine suppliers and sponsors ("Red Bull Racing
//! Honda RBPT", "Aston Martin Aramco Mercedes") that change from race to race
//! and season to season. Stripping them yields one stable name per team.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::aggregate::TeamTally;
use crate::error::SeasonError;
use crate::models::PerEntitySeries;

/// Sponsor and engine-supplier tokens removed from multi-word team names.
pub const SPONSOR_DENYLIST: &[&str] = &[
    "Ferrari", "Mercedes", "Renault", "Honda", "RBPT", "Cosworth", "Toyota", "BMW", "Petronas",
    "Ford", "Asiatech", "Peugeot", "Scuderia", "Racing", "TAG", "Heuer", "BWT", "Aramco", "Kick",
    "European", "Acer", "Playlife", "Fondmetal", "Mugen", "Supertec", "Marlboro",
];

/// Denylisted tokens that are also works teams in their own right. Used when
/// stripping would otherwise leave nothing ("Scuderia Ferrari Marlboro").
pub const MANUFACTURERS: &[&str] = &[
    "Ferrari", "Mercedes", "Renault", "Honda", "Toyota", "BMW", "Ford", "Peugeot",
];

/// Kept when it opens the name ("Racing Point", "Racing Bulls").
const LEADING_KEEP: &str = "Racing";

/// Literal remaps applied after stripping
const REMAPS: &[(&str, &str)] = &[("RBR", "Red Bull"), ("STR", "Toro Rosso")];

/// Canonical display name for a team name as scraped.
pub fn canonical_team_name(scraped: &str) -> String {
    let tokens: Vec<&str> = scraped.split_whitespace().collect();

    let stripped = if tokens.len() <= 1 {
        tokens.join(" ")
    } else {
        let kept: Vec<&str> = tokens
            .iter()
            .enumerate()
            .filter(|&(i, token)| (i == 0 && *token == LEADING_KEEP) || !SPONSOR_DENYLIST.contains(token))
            .map(|(_, token)| *token)
            .collect();

        if kept.is_empty() {
            tokens
                .iter()
                .find(|token| MANUFACTURERS.contains(*token))
                .map(|token| token.to_string())
                .unwrap_or_else(|| tokens.join(" "))
        } else {
            kept.join(" ")
        }
    };

    REMAPS
        .iter()
        .find(|(from, _)| *from == stripped)
        .map(|(_, to)| to.to_string())
        .unwrap_or(stripped)
}

/// Canonical team series for one season plus the name mapping used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTeams {
    pub teams: BTreeMap<String, PerEntitySeries>,
    /// Scraped name -> canonical name
    pub team_names: BTreeMap<String, String>,
}

/// Re-key team series by canonical name, summing series whose scraped names
/// collapse together.
///
/// Collapsing is expected when a team's sponsor string changes between
/// events. When two collapsed names both fielded entries in the same event it
/// was probably two distinct teams; that case is reported alongside the
/// result and merged all the same.
pub fn canonicalize_teams(
    raw: &BTreeMap<String, TeamTally>,
) -> (CanonicalTeams, Vec<SeasonError>) {
    let mut groups: BTreeMap<String, Vec<(&String, &TeamTally)>> = BTreeMap::new();
    let mut team_names = BTreeMap::new();

    for (scraped, tally) in raw {
        let canonical = canonical_team_name(scraped);
        team_names.insert(scraped.clone(), canonical.clone());
        groups.entry(canonical).or_default().push((scraped, tally));
    }

    let mut ambiguities = Vec::new();
    let mut teams = BTreeMap::new();

    for (canonical, members) in groups {
        if members.len() > 1 {
            debug!(team = %canonical, variants = members.len(), "Merging team name variants");
            if let Some(ambiguity) = find_overlap(&canonical, &members) {
                warn!(error = %ambiguity, "Team canonicalization ambiguity");
                ambiguities.push(ambiguity);
            }
        }

        let merged = members
            .iter()
            .skip(1)
            .fold(members[0].1.series.clone(), |acc, (_, tally)| acc.merged_with(&tally.series));
        teams.insert(canonical, merged);
    }

    (CanonicalTeams { teams, team_names }, ambiguities)
}

/// First event index at which two or more variants of one canonical team
/// both fielded entries.
fn find_overlap(canonical: &str, members: &[(&String, &TeamTally)]) -> Option<SeasonError> {
    let event_count = members.first()?.1.entered.len();
    (0..event_count).find_map(|index| {
        let names: Vec<String> = members
            .iter()
            .filter(|(_, tally)| tally.entered.get(index).copied().unwrap_or(false))
            .map(|(name, _)| (*name).clone())
            .collect();
        (names.len() > 1).then(|| SeasonError::CanonicalizationAmbiguity {
            canonical: canonical.to_string(),
            names,
            index,
        })
    })
}

/// Map each competitor to the canonical form of their last scraped team, and
/// each canonical team to its competitors.
pub fn assign_competitors(
    competitor_teams: &BTreeMap<String, String>,
    team_names: &BTreeMap<String, String>,
) -> (BTreeMap<String, String>, BTreeMap<String, Vec<String>>) {
    let mut by_competitor = BTreeMap::new();
    let mut by_team: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (competitor, scraped) in competitor_teams {
        let canonical = team_names
            .get(scraped)
            .cloned()
            .unwrap_or_else(|| canonical_team_name(scraped));
        by_team.entry(canonical.clone()).or_default().push(competitor.clone());
        by_competitor.insert(competitor.clone(), canonical);
    }

    (by_competitor, by_team)
}

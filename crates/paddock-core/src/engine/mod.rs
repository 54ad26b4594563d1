//! Season aggregation engine.
//!
//! Pure, synchronous transforms from fetched result rows to ranked series:
//!
//! 1. `ledger` files each row under (competitor code, scraped team) at its
//!    event index
//! 2. `aggregate` folds buckets into delta and cumulative series
//! 3. `teams` collapses sponsor-decorated team names into canonical teams
//! 4. `rank` orders entities by final total

pub mod aggregate;
pub mod ledger;
pub mod rank;
pub mod teams;

use tracing::debug;

pub use aggregate::{aggregate, Aggregation, TeamTally};
pub use ledger::{build_ledger, Contribution, EventRows, Ledger, LedgerBucket, LedgerKey, Slot};
pub use rank::rank;
pub use teams::{assign_competitors, canonical_team_name, canonicalize_teams, CanonicalTeams};

use crate::error::SeasonError;
use crate::models::SeasonResult;

/// Derive the full season result from a completed ledger.
///
/// Returns the result together with any canonicalization ambiguities, which
/// are informational only.
pub fn compute_season(
    year: u16,
    locations: Vec<String>,
    ledger: &Ledger,
    missing_events: Vec<usize>,
) -> (SeasonResult, Vec<SeasonError>) {
    let Aggregation { competitors, teams } = aggregate(ledger);
    let (canonical, ambiguities) = canonicalize_teams(&teams);
    let (competitor_teams, team_competitors) =
        assign_competitors(ledger.competitor_teams(), &canonical.team_names);

    debug!(
        year,
        competitors = competitors.len(),
        teams = canonical.teams.len(),
        "Season aggregated"
    );

    let result = SeasonResult {
        year,
        competitor_names: ledger.competitor_names().clone(),
        competitors: rank(competitors),
        teams: rank(canonical.teams),
        team_names: canonical.team_names,
        team_competitors,
        competitor_teams,
        locations,
        missing_events,
        missing_secondary_events: Vec::new(),
    };
    (result, ambiguities)
}

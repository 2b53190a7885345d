//! Turning the voter list's query string into a parameterized `WHERE`.

use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

use super::models::Election;

/// The list page's query string as submitted. Blank selects arrive as empty
/// strings, and a checked election arrives as a non-empty value.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct VoterQuery {
    pub party: String,
    pub score: String,
    pub min_year: String,
    pub max_year: String,
    pub v20state: String,
    pub v21town: String,
    pub v21primary: String,
    pub v22general: String,
    pub v23town: String,
    pub page: String,
}

impl VoterQuery {
    fn checked(&self, election: Election) -> bool {
        let value = match election {
            Election::State2020 => &self.v20state,
            Election::Town2021 => &self.v21town,
            Election::Primary2021 => &self.v21primary,
            Election::General2022 => &self.v22general,
            Election::Town2023 => &self.v23town,
        };
        !value.is_empty()
    }

    /// 1-based; anything unreadable is the first page.
    pub fn page(&self) -> i64 {
        self.page.trim().parse().unwrap_or(1)
    }
}

/// Every condition is optional; an empty filter matches everyone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VoterFilter {
    /// Compared without regard to case.
    pub party: Option<String>,
    pub score: Option<i64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    /// Elections the voter must have taken part in, all of them.
    pub elections: Vec<Election>,
}

fn number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

impl From<&VoterQuery> for VoterFilter {
    fn from(query: &VoterQuery) -> Self {
        let party = query.party.trim();
        VoterFilter {
            party: (!party.is_empty()).then(|| party.to_owned()),
            score: number(&query.score),
            min_year: number(&query.min_year),
            max_year: number(&query.max_year),
            elections: Election::ALL
                .into_iter()
                .filter(|election| query.checked(*election))
                .collect(),
        }
    }
}

impl VoterFilter {
    /// Appends the `WHERE` clause. Values are bound; only column names from
    /// [`Election::column`] are written into the sql text.
    pub fn push_where(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        query.push(" WHERE 1=1");
        if let Some(party) = &self.party {
            query
                .push(" AND party_affiliation = ")
                .push_bind(party.clone())
                .push(" COLLATE NOCASE");
        }
        if let Some(score) = self.score {
            query.push(" AND voter_score = ").push_bind(score);
        }
        if let Some(min_year) = self.min_year {
            query
                .push(" AND CAST(strftime('%Y', date_of_birth) AS INTEGER) >= ")
                .push_bind(min_year);
        }
        if let Some(max_year) = self.max_year {
            query
                .push(" AND CAST(strftime('%Y', date_of_birth) AS INTEGER) <= ")
                .push_bind(max_year);
        }
        for election in &self.elections {
            query.push(" AND ").push(election.column()).push(" = 1");
        }
    }

    /// The filter as query-string pairs, for links that keep it.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(party) = &self.party {
            pairs.push(("party", party.clone()));
        }
        if let Some(score) = self.score {
            pairs.push(("score", score.to_string()));
        }
        if let Some(min_year) = self.min_year {
            pairs.push(("min_year", min_year.to_string()));
        }
        if let Some(max_year) = self.max_year {
            pairs.push(("max_year", max_year.to_string()));
        }
        for election in &self.elections {
            pairs.push((election.column(), "on".to_owned()));
        }
        pairs
    }
}

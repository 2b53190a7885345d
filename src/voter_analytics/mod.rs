//! Voter analytics: the Newton voter roll, filterable and paged.

pub mod filter;
pub mod import;
pub mod models;
pub mod store;

use axum::{
    Router, debug_handler,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use sqlx::SqlitePool;
use time::{Date, macros::format_description};

use crate::{AppError, AppResult, AppState, OrNotFound, include_res, res::{self, escape, fill}};

use filter::{VoterFilter, VoterQuery};
use models::{Election, Voter};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(voters))
        .route("/voter/{id}", get(voter))
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[month repr:long] [day padding:none], [year]"))
        .unwrap_or_else(|_| date.to_string())
}

fn party(voter: &Voter) -> &str {
    voter.party_affiliation.as_deref().unwrap_or("none")
}

fn page_link(filter: &VoterFilter, page: i64, text: &str) -> String {
    let mut pairs = filter.to_pairs();
    pairs.push(("page", page.to_string()));
    let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!(r#"<a href="/voter_analytics?{}">{text}</a>"#, escape(&query))
}

fn filter_form_values(filter: &VoterFilter) -> [(&'static str, String); 5] {
    let number = |value: Option<i32>| value.map(|n| n.to_string()).unwrap_or_default();

    let score_options: String = std::iter::once(None)
        .chain((0..=5).map(Some))
        .map(|score: Option<i64>| {
            let value = score.map(|s| s.to_string()).unwrap_or_default();
            let label = score.map(|s| s.to_string()).unwrap_or_else(|| "any".to_owned());
            let selected = if score == filter.score { " selected" } else { "" };
            format!(r#"<option value="{value}"{selected}>{label}</option>"#)
        })
        .collect();

    let election_boxes: String = Election::ALL
        .into_iter()
        .map(|election| {
            let checked = if filter.elections.contains(&election) { " checked" } else { "" };
            format!(
                r#"<label><input type="checkbox" name="{}"{checked}> {}</label>"#,
                election.column(),
                election.label()
            )
        })
        .collect();

    [
        ("party", escape(filter.party.as_deref().unwrap_or_default())),
        ("score_options", score_options),
        ("min_year", number(filter.min_year)),
        ("max_year", number(filter.max_year)),
        ("election_boxes", election_boxes),
    ]
}

#[debug_handler]
async fn voters(Query(query): Query<VoterQuery>, State(db_pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let filter = VoterFilter::from(&query);
    let count = store::count_voters(&db_pool, &filter).await?;
    let pages = ((count + store::PAGE_SIZE - 1) / store::PAGE_SIZE).max(1);
    let page = query.page().clamp(1, pages);
    let voters = store::list_voters(&db_pool, &filter, page).await?;
    tracing::debug!("{count} voters match {filter:?}, showing page {page}");

    let voter_rows: String = if voters.is_empty() {
        r#"    <tr><td colspan="5">No voters match.</td></tr>"#.to_owned()
    } else {
        voters
            .iter()
            .map(|voter| {
                fill(
                    include_res!(str, "/pages/voter_analytics/voter_row.html"),
                    &[
                        ("id", voter.id.to_string()),
                        ("name", escape(&voter.full_name())),
                        ("address", escape(&voter.address())),
                        ("born", format_date(voter.date_of_birth)),
                        ("party", escape(party(voter))),
                        ("score", voter.voter_score.to_string()),
                    ],
                )
            })
            .collect()
    };
    let previous = if page > 1 { page_link(&filter, page - 1, "previous") } else { String::new() };
    let next = if page < pages { page_link(&filter, page + 1, "next") } else { String::new() };

    let mut values = filter_form_values(&filter).to_vec();
    values.extend([
        ("count", count.to_string()),
        ("page", page.to_string()),
        ("pages", pages.to_string()),
        ("voter_rows", voter_rows),
        ("previous", previous),
        ("next", next),
    ]);

    Ok(res::page(
        "Voters",
        &fill(include_res!(str, "/pages/voter_analytics/voters.html"), &values),
    ))
}

#[debug_handler]
async fn voter(Path(voter_id): Path<String>, State(db_pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let id: i64 = voter_id.parse().map_err(|_| AppError::NotFound("voter"))?;
    let voter = store::get_voter(&db_pool, id).await?.or_not_found("voter")?;

    let map_query = serde_urlencoded::to_string(vec![("api", "1"), ("query", voter.address().as_str())])
        .unwrap_or_default();
    let elections: String = Election::ALL
        .into_iter()
        .map(|election| {
            let voted = if voter.voted_in(election) { "voted" } else { "did not vote" };
            format!("<li>{}: {voted}</li>", election.label())
        })
        .collect();

    Ok(res::page(
        &voter.full_name(),
        &fill(
            include_res!(str, "/pages/voter_analytics/voter.html"),
            &[
                ("name", escape(&voter.full_name())),
                ("address", escape(&voter.address())),
                ("map_url", escape(&format!("https://www.google.com/maps/search/?{map_query}"))),
                ("born", format_date(voter.date_of_birth)),
                ("registered", format_date(voter.registration_date)),
                ("party", escape(party(&voter))),
                ("precinct", escape(&voter.precinct_number)),
                ("score", voter.voter_score.to_string()),
                ("elections", elections),
            ],
        ),
    ))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn dates_read_naturally() {
        assert_eq!(format_date(date!(1961 - 04 - 06)), "April 6, 1961");
    }

    #[test]
    fn page_links_keep_the_filter() {
        let filter = VoterFilter {
            party: Some("R".to_owned()),
            elections: vec![Election::Primary2021],
            ..VoterFilter::default()
        };
        assert_eq!(
            page_link(&filter, 3, "next"),
            r#"<a href="/voter_analytics?party=R&amp;v21primary=on&amp;page=3">next</a>"#
        );
    }

    #[test]
    fn form_shows_the_current_filter() {
        let filter = VoterFilter {
            score: Some(4),
            min_year: Some(1950),
            elections: vec![Election::Town2023],
            ..VoterFilter::default()
        };
        let values = filter_form_values(&filter);
        let value = |key: &str| values.iter().find(|(name, _)| *name == key).map(|(_, v)| v.as_str());

        assert_eq!(value("min_year"), Some("1950"));
        assert_eq!(value("max_year"), Some(""));
        assert!(value("score_options").unwrap().contains(r#"<option value="4" selected>4</option>"#));
        assert!(value("election_boxes").unwrap().contains(r#"name="v23town" checked"#));
        assert!(!value("election_boxes").unwrap().contains(r#"name="v20state" checked"#));
    }
}

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{
    filter::VoterFilter,
    models::{NewVoter, Voter},
};

pub const PAGE_SIZE: i64 = 100;

const VOTER_COLUMNS: &str = "id,last_name,first_name,street_number,street_name,apartment_number,zip_code,\
    date_of_birth,registration_date,party_affiliation,precinct_number,\
    v20state,v21town,v21primary,v22general,v23town,voter_score";

/// One page of matching voters, by name.
pub async fn list_voters(db_pool: &SqlitePool, filter: &VoterFilter, page: i64) -> sqlx::Result<Vec<Voter>> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {VOTER_COLUMNS} FROM voters"));
    filter.push_where(&mut query);
    query
        .push(" ORDER BY last_name,first_name,id LIMIT ")
        .push_bind(PAGE_SIZE)
        .push(" OFFSET ")
        .push_bind((page.max(1) - 1) * PAGE_SIZE);

    query.build_query_as().fetch_all(db_pool).await
}

pub async fn count_voters(db_pool: &SqlitePool, filter: &VoterFilter) -> sqlx::Result<i64> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM voters");
    filter.push_where(&mut query);
    query.build_query_scalar().fetch_one(db_pool).await
}

pub async fn get_voter(db_pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Voter>> {
    sqlx::query_as(&format!("SELECT {VOTER_COLUMNS} FROM voters WHERE id=?"))
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

/// All or nothing.
pub async fn insert_voters(db_pool: &SqlitePool, voters: &[NewVoter]) -> sqlx::Result<u64> {
    let mut tx = db_pool.begin().await?;
    for voter in voters {
        sqlx::query(
            "INSERT INTO voters (last_name,first_name,street_number,street_name,apartment_number,zip_code,\
             date_of_birth,registration_date,party_affiliation,precinct_number,\
             v20state,v21town,v21primary,v22general,v23town,voter_score) \
             VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)",
        )
        .bind(&voter.last_name)
        .bind(&voter.first_name)
        .bind(&voter.street_number)
        .bind(&voter.street_name)
        .bind(&voter.apartment_number)
        .bind(&voter.zip_code)
        .bind(voter.date_of_birth)
        .bind(voter.registration_date)
        .bind(&voter.party_affiliation)
        .bind(&voter.precinct_number)
        .bind(voter.v20state)
        .bind(voter.v21town)
        .bind(voter.v21primary)
        .bind(voter.v22general)
        .bind(voter.v23town)
        .bind(voter.voter_score)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!("imported {} voters", voters.len());
    Ok(voters.len() as u64)
}

pub async fn voter_count(db_pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM voters").fetch_one(db_pool).await
}

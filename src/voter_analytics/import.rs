//! Loading the Newton voter export (CSV) into an empty `voters` table.

use std::{io, path::Path};

use anyhow::Context;
use sqlx::SqlitePool;

use super::{models::NewVoter, store};

pub fn read_voters<R: io::Read>(reader: R) -> anyhow::Result<Vec<NewVoter>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize()
        .enumerate()
        .map(|(row, voter)| voter.with_context(|| format!("voter file row {}", row + 2)))
        .collect()
}

/// Imports `path` unless voters are already loaded. Returns how many rows went in.
pub async fn load_if_empty(db_pool: &SqlitePool, path: &Path) -> anyhow::Result<u64> {
    let existing = store::voter_count(db_pool).await?;
    if existing > 0 {
        tracing::debug!("{existing} voters already loaded, skipping {}", path.display());
        return Ok(0);
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let voters = read_voters(bytes.as_slice())?;
    Ok(store::insert_voters(db_pool, &voters).await?)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::db;

    const HEADER: &str = "Voter ID Number,Last Name,First Name,Residential Address - Street Number,\
        Residential Address - Street Name,Residential Address - Apartment Number,Residential Address - Zip Code,\
        Date of Birth,Date of Registration,Party Affiliation,Precinct Number,\
        v20state,v21town,v21primary,v22general,v23town,voter_score\n";

    fn sample() -> String {
        format!(
            "{HEADER}\
             04MSN1234000,KIM,JUNE,  45 ,CHESTNUT ST,,02465,1961-04-16,1983-09-02,D ,2,TRUE,FALSE,FALSE,TRUE,TRUE,3\n\
             05RRE0001000,ORTIZ,LEO,7,BEACON ST,3B,02459,2001-11-30,2019-10-12,,8,FALSE,FALSE,FALSE,FALSE,FALSE,0\n"
        )
    }

    #[test]
    fn reads_the_export_format() {
        let voters = read_voters(sample().as_bytes()).unwrap();
        assert_eq!(voters.len(), 2);

        let kim = &voters[0];
        assert_eq!(kim.last_name, "KIM");
        assert_eq!(kim.street_number, "45");
        assert_eq!(kim.apartment_number, None);
        assert_eq!(kim.party_affiliation.as_deref(), Some("D"));
        assert_eq!(kim.date_of_birth, date!(1961 - 04 - 16));
        assert!(kim.v20state && kim.v22general && kim.v23town);
        assert!(!kim.v21town);
        assert_eq!(kim.voter_score, 3);

        let ortiz = &voters[1];
        assert_eq!(ortiz.apartment_number.as_deref(), Some("3B"));
        assert_eq!(ortiz.party_affiliation, None);
    }

    #[test]
    fn names_the_bad_row() {
        let broken = format!("{HEADER}X,A,B,1,ST,,02465,16/04/1961,1983-09-02,D,2,TRUE,FALSE,FALSE,TRUE,TRUE,3\n");
        let err = read_voters(broken.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("row 2"), "{err:#}");
    }

    #[tokio::test]
    async fn loads_only_once() {
        let db_pool = db::memory().await;
        let path = std::env::temp_dir().join(format!("voters-{}.csv", uuid::Uuid::now_v7()));
        tokio::fs::write(&path, sample()).await.unwrap();

        assert_eq!(load_if_empty(&db_pool, &path).await.unwrap(), 2);
        assert_eq!(load_if_empty(&db_pool, &path).await.unwrap(), 0);
        assert_eq!(store::voter_count(&db_pool).await.unwrap(), 2);

        tokio::fs::remove_file(&path).await.unwrap();
    }
}

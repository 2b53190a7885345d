use serde::{Deserialize, Deserializer};
use time::{Date, macros::format_description};

/// A registered voter and the elections they took part in.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Voter {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub street_number: String,
    pub street_name: String,
    pub apartment_number: Option<String>,
    pub zip_code: String,
    pub date_of_birth: Date,
    pub registration_date: Date,
    pub party_affiliation: Option<String>,
    pub precinct_number: String,
    pub v20state: bool,
    pub v21town: bool,
    pub v21primary: bool,
    pub v22general: bool,
    pub v23town: bool,
    pub voter_score: i64,
}

impl Voter {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn address(&self) -> String {
        match &self.apartment_number {
            Some(apartment) => format!(
                "{} {}, Apt {}, Newton, MA {}",
                self.street_number, self.street_name, apartment, self.zip_code
            ),
            None => format!("{} {}, Newton, MA {}", self.street_number, self.street_name, self.zip_code),
        }
    }

    pub fn voted_in(&self, election: Election) -> bool {
        match election {
            Election::State2020 => self.v20state,
            Election::Town2021 => self.v21town,
            Election::Primary2021 => self.v21primary,
            Election::General2022 => self.v22general,
            Election::Town2023 => self.v23town,
        }
    }
}

/// The five elections tracked per voter. Each one is a boolean column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Election {
    State2020,
    Town2021,
    Primary2021,
    General2022,
    Town2023,
}

impl Election {
    pub const ALL: [Election; 5] = [
        Election::State2020,
        Election::Town2021,
        Election::Primary2021,
        Election::General2022,
        Election::Town2023,
    ];

    /// Column name, also used as the query-string key.
    pub fn column(self) -> &'static str {
        match self {
            Election::State2020 => "v20state",
            Election::Town2021 => "v21town",
            Election::Primary2021 => "v21primary",
            Election::General2022 => "v22general",
            Election::Town2023 => "v23town",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Election::State2020 => "2020 state",
            Election::Town2021 => "2021 town",
            Election::Primary2021 => "2021 primary",
            Election::General2022 => "2022 general",
            Election::Town2023 => "2023 town",
        }
    }
}

/// One row of the Newton voter export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewVoter {
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Residential Address - Street Number")]
    pub street_number: String,
    #[serde(rename = "Residential Address - Street Name")]
    pub street_name: String,
    #[serde(rename = "Residential Address - Apartment Number", default)]
    pub apartment_number: Option<String>,
    #[serde(rename = "Residential Address - Zip Code")]
    pub zip_code: String,
    #[serde(rename = "Date of Birth", deserialize_with = "iso_date")]
    pub date_of_birth: Date,
    #[serde(rename = "Date of Registration", deserialize_with = "iso_date")]
    pub registration_date: Date,
    #[serde(rename = "Party Affiliation", default)]
    pub party_affiliation: Option<String>,
    #[serde(rename = "Precinct Number")]
    pub precinct_number: String,
    #[serde(deserialize_with = "flag")]
    pub v20state: bool,
    #[serde(deserialize_with = "flag")]
    pub v21town: bool,
    #[serde(deserialize_with = "flag")]
    pub v21primary: bool,
    #[serde(deserialize_with = "flag")]
    pub v22general: bool,
    #[serde(deserialize_with = "flag")]
    pub v23town: bool,
    pub voter_score: i64,
}

fn iso_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Date::parse(&raw, format_description!("[year]-[month]-[day]")).map_err(serde::de::Error::custom)
}

/// The export spells booleans as `TRUE`/`FALSE`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

use rand::{Rng, seq::IndexedRandom};
use serde::Deserialize;
use time::{Duration, OffsetDateTime, macros::format_description};

pub const DAILY_SPECIALS: [&str; 4] = [
    "Fluffy Cloud Yumberry",
    "Fluffy Cloud Mango",
    "Fluffy Cloud Crisp Grape",
    "Fluffy Cloud Strawberry",
];

pub const SPECIAL_PRICE_CENTS: u32 = 899;

/// The regular menu, prices in cents.
pub const MENU: [(&str, u32); 7] = [
    ("Cloud Matcha Latte", 799),
    ("Brown Sugar Boba", 799),
    ("Coco Water Matcha", 799),
    ("Coco Water Jasmine", 799),
    ("Match Bobo shake", 799),
    ("Hot Supreme Matcha Latte", 899),
    ("Hot Matcha Jasmine Latte", 699),
];

pub const EXTRAS: [(&str, u32); 2] = [("Boba Pearls", 100), ("Grass Jelly", 100)];

pub fn pick_daily_special() -> &'static str {
    DAILY_SPECIALS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(DAILY_SPECIALS[0])
}

pub fn is_daily_special(name: &str) -> bool {
    DAILY_SPECIALS.contains(&name)
}

fn price_of(table: &[(&str, u32)], name: &str) -> u32 {
    table
        .iter()
        .find(|(item, _)| *item == name)
        .map(|(_, cents)| *cents)
        .unwrap_or(0)
}

pub fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// One submitted order. The daily special is whatever the order page
/// offered this customer, carried through the form in a hidden field.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Order {
    pub name: String,
    pub email: String,
    pub items: Vec<String>,
    pub extras: Vec<String>,
    pub instructions: String,
    pub daily_special: Option<String>,
}

impl Order {
    /// Forgets a daily special that was never on offer.
    pub fn checked(mut self) -> Order {
        if self.daily_special.as_deref().is_some_and(|special| !is_daily_special(special)) {
            tracing::warn!("ignoring unknown daily special {:?}", self.daily_special);
            self.daily_special = None;
        }
        self
    }

    /// The special, if the customer actually ticked it.
    pub fn chosen_special(&self) -> Option<&str> {
        self.daily_special
            .as_deref()
            .filter(|special| self.items.iter().any(|item| item.as_str() == *special))
    }

    pub fn total_cents(&self) -> u32 {
        let items: u32 = self
            .items
            .iter()
            .map(|item| match self.chosen_special() {
                Some(special) if special == item.as_str() => SPECIAL_PRICE_CENTS,
                _ => price_of(&MENU, item),
            })
            .sum();
        let extras: u32 = self.extras.iter().map(|extra| price_of(&EXTRAS, extra)).sum();
        items + extras
    }
}

/// Somewhere between half an hour and an hour from `now`.
pub fn ready_time(now: OffsetDateTime) -> OffsetDateTime {
    now + Duration::minutes(rand::rng().random_range(30..=60))
}

pub fn format_clock(at: OffsetDateTime) -> String {
    let format = format_description!("[hour repr:12]:[minute] [period]");
    at.format(format).unwrap_or_else(|_| at.time().to_string())
}

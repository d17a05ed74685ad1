use crate::domain_model::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct FilmId(pub i64);

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FilmId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(FilmId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mpa {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32, // minutes
    pub mpa: Option<Mpa>,
    pub genres: Vec<Genre>,
    pub likes: Vec<UserId>,
}

/// A film not yet stored. Genre and MPA names are resolved by storage when it
/// keeps a catalogue of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewFilm {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    #[serde(default)]
    pub mpa: Option<Mpa>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// No film can be released before the first public screening.
fn first_screening() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

impl NewFilm {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        let description_chars = self.description.chars().count();
        if description_chars == 0 || description_chars > MAX_DESCRIPTION_CHARS {
            return Err(format!(
                "description must hold 1 to {MAX_DESCRIPTION_CHARS} characters"
            ));
        }
        if self.release_date <= first_screening() {
            return Err(format!("release date {} is too early", self.release_date));
        }
        if self.duration == 0 {
            return Err("duration must be positive".to_string());
        }
        Ok(())
    }

    pub fn stored(self, id: FilmId) -> Film {
        Film {
            id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa: self.mpa,
            genres: self.genres,
            likes: Vec::new(),
        }
    }
}

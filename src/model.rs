//! Stored entities and the typed inputs that create or modify them.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// `DD.MM.YYYY`, the only accepted and rendered date format.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    /// Ids of movies this actor appears in.
    pub filmography: BTreeSet<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub genre: String,
    /// Ids of actors appearing in this movie.
    pub cast: BTreeSet<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewActor {
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl ActorPatch {
    pub fn apply(self, actor: &mut Actor) {
        if let Some(name) = self.name {
            actor.name = name;
        }
        if let Some(gender) = self.gender {
            actor.gender = gender;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            actor.date_of_birth = date_of_birth;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub name: String,
    pub year: i32,
    pub genre: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl MoviePatch {
    pub fn apply(self, movie: &mut Movie) {
        if let Some(name) = self.name {
            movie.name = name;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
    }
}

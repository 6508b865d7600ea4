//! Response projections. Each view carries exactly the registry fields of its entity.

use crate::model::{Actor, Movie, DATE_FORMAT};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActorView {
    pub id: i64,
    pub name: String,
    pub gender: String,
    /// Rendered as `DD.MM.YYYY`, the same format it is accepted in.
    pub date_of_birth: String,
}

impl From<&Actor> for ActorView {
    fn from(a: &Actor) -> Self {
        ActorView {
            id: a.id,
            name: a.name.clone(),
            gender: a.gender.clone(),
            date_of_birth: a.date_of_birth.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MovieView {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub genre: String,
}

impl From<&Movie> for MovieView {
    fn from(m: &Movie) -> Self {
        MovieView {
            id: m.id,
            name: m.name.clone(),
            year: m.year,
            genre: m.genre.clone(),
        }
    }
}

/// Actor projection plus the filmography, as returned by the relation endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct ActorRelationsView {
    #[serde(flatten)]
    pub actor: ActorView,
    pub filmography: String,
}

impl From<&Actor> for ActorRelationsView {
    fn from(a: &Actor) -> Self {
        ActorRelationsView {
            actor: a.into(),
            filmography: render_ids(&a.filmography),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieRelationsView {
    #[serde(flatten)]
    pub movie: MovieView,
    pub cast: String,
}

impl From<&Movie> for MovieRelationsView {
    fn from(m: &Movie) -> Self {
        MovieRelationsView {
            movie: m.into(),
            cast: render_ids(&m.cast),
        }
    }
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub const DELETED: MessageBody = MessageBody {
    message: "Record successfully deleted",
};

/// `[1, 2, 3]`, ascending; `[]` when empty.
pub fn render_ids(ids: &BTreeSet<i64>) -> String {
    let parts: Vec<String> = ids.iter().map(i64::to_string).collect();
    format!("[{}]", parts.join(", "))
}

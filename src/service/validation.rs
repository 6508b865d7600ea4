//! Request validation against the field registry, producing typed store inputs.

use crate::error::{AppError, FIELDS_SHOULD_EXIST};
use crate::extractors::RequestData;
use crate::model::{ActorPatch, MoviePatch, NewActor, NewMovie, DATE_FORMAT};
use crate::registry::{ActorField, EntityKind, FieldSet, MovieField, ID_FIELD};
use chrono::NaiveDate;
use std::str::FromStr;

pub const DATE_ERROR: &str = "Date of birth should be in format DD.MM.YYYY";
pub const YEAR_ERROR: &str = "Year should be an integer";
pub const NUL_ERROR: &str = "Text fields must not contain NUL characters";

/// Ids of both ends of one association row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationIds {
    pub actor_id: i64,
    pub movie_id: i64,
}

pub struct RequestValidator;

impl RequestValidator {
    /// `id` must be present and integral.
    pub fn require_id(data: &RequestData) -> Result<i64, AppError> {
        let raw = data
            .get(ID_FIELD)
            .ok_or_else(|| AppError::MissingFields("No id specified".into()))?;
        parse_int(raw).ok_or_else(|| AppError::InvalidFormat("Id must be integer".into()))
    }

    pub fn new_actor(data: &RequestData) -> Result<NewActor, AppError> {
        check_required::<ActorField>(data)?;
        check_allowed::<ActorField>(data, false)?;
        Ok(NewActor {
            name: text(field(data, ActorField::Name)?)?,
            gender: text(field(data, ActorField::Gender)?)?,
            date_of_birth: parse_date(field(data, ActorField::DateOfBirth)?)?,
        })
    }

    /// Partial update; `id` is the lookup key and is skipped by the allowlist.
    pub fn actor_patch(data: &RequestData) -> Result<ActorPatch, AppError> {
        check_allowed::<ActorField>(data, true)?;
        Ok(ActorPatch {
            name: data.get(ActorField::Name.as_str()).map(text).transpose()?,
            gender: data.get(ActorField::Gender.as_str()).map(text).transpose()?,
            date_of_birth: data
                .get(ActorField::DateOfBirth.as_str())
                .map(parse_date)
                .transpose()?,
        })
    }

    pub fn new_movie(data: &RequestData) -> Result<NewMovie, AppError> {
        check_required::<MovieField>(data)?;
        check_allowed::<MovieField>(data, false)?;
        Ok(NewMovie {
            name: text(field(data, MovieField::Name)?)?,
            year: parse_year(field(data, MovieField::Year)?)?,
            genre: text(field(data, MovieField::Genre)?)?,
        })
    }

    pub fn movie_patch(data: &RequestData) -> Result<MoviePatch, AppError> {
        check_allowed::<MovieField>(data, true)?;
        Ok(MoviePatch {
            name: data.get(MovieField::Name.as_str()).map(text).transpose()?,
            year: data.get(MovieField::Year.as_str()).map(parse_year).transpose()?,
            genre: data.get(MovieField::Genre.as_str()).map(text).transpose()?,
        })
    }

    /// Accepts `{id, relation_id}` (own id first) or `{actor_id, movie_id}`; never a mix.
    pub fn relation(data: &RequestData, kind: EntityKind) -> Result<RelationIds, AppError> {
        const OWN_KEYS: [&str; 2] = ["id", "relation_id"];
        const NAMED_KEYS: [&str; 2] = ["actor_id", "movie_id"];

        let keys = if data.keys().all(|k| OWN_KEYS.contains(&k)) {
            OWN_KEYS
        } else if data.keys().all(|k| NAMED_KEYS.contains(&k)) {
            NAMED_KEYS
        } else {
            return Err(AppError::BadKeySet("Wrong key".into()));
        };

        let (Some(first), Some(second)) = (data.get(keys[0]), data.get(keys[1])) else {
            return Err(AppError::BadKeySet(format!(
                "Both {} and {} should be specified",
                keys[0], keys[1]
            )));
        };
        let (Some(first), Some(second)) = (parse_int::<i64>(first), parse_int::<i64>(second)) else {
            return Err(AppError::InvalidFormat("Ids must be integers".into()));
        };

        Ok(match (keys == NAMED_KEYS, kind) {
            (true, _) | (false, EntityKind::Actor) => RelationIds { actor_id: first, movie_id: second },
            (false, EntityKind::Movie) => RelationIds { actor_id: second, movie_id: first },
        })
    }
}

/// Integer parse tolerant of surrounding whitespace.
fn parse_int<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// PostgreSQL TEXT cannot hold NUL, so no backend accepts it.
fn text(raw: &str) -> Result<String, AppError> {
    if raw.contains('\0') {
        return Err(AppError::InvalidFormat(NUL_ERROR.into()));
    }
    Ok(raw.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidFormat(DATE_ERROR.into()))
}

fn parse_year(raw: &str) -> Result<i32, AppError> {
    parse_int(raw).ok_or_else(|| AppError::InvalidFormat(YEAR_ERROR.into()))
}

fn field<F: FieldSet>(data: &RequestData, f: F) -> Result<&str, AppError> {
    data.get(f.as_str())
        .ok_or_else(|| AppError::MissingFields(FIELDS_SHOULD_EXIST.into()))
}

fn check_required<F: FieldSet>(data: &RequestData) -> Result<(), AppError> {
    if F::REQUIRED.iter().all(|f| data.contains(f.as_str())) {
        Ok(())
    } else {
        Err(AppError::MissingFields(FIELDS_SHOULD_EXIST.into()))
    }
}

fn check_allowed<F: FieldSet>(data: &RequestData, allow_id: bool) -> Result<(), AppError> {
    for key in data.keys() {
        if allow_id && key == ID_FIELD {
            continue;
        }
        if F::from_name(key).is_none() {
            let entity = F::KIND;
            tracing::debug!(%entity, field = key, "field not in registry");
            return Err(AppError::UnknownField(key.to_string()));
        }
    }
    Ok(())
}

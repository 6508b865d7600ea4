//! Field registry: the fixed set of attribute names each entity accepts and returns.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Actor,
    Movie,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Actor => "actor",
            EntityKind::Movie => "movie",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key used for lookups; never assignable.
pub const ID_FIELD: &str = "id";

const ACTOR_FIELDS: &[&str] = &["id", "name", "gender", "date_of_birth"];
const MOVIE_FIELDS: &[&str] = &["id", "name", "year", "genre"];

/// Attribute names echoed in a projection of `kind`, `id` first. Relation
/// collections (`filmography`, `cast`) are not registry fields.
pub fn fields_for(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Actor => ACTOR_FIELDS,
        EntityKind::Movie => MOVIE_FIELDS,
    }
}

/// Assignable attributes of one entity type.
pub trait FieldSet: Copy + Sized + 'static {
    const KIND: EntityKind;
    const ALL: &'static [Self];
    const REQUIRED: &'static [Self];

    fn as_str(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorField {
    Name,
    Gender,
    DateOfBirth,
}

impl FieldSet for ActorField {
    const KIND: EntityKind = EntityKind::Actor;
    const ALL: &'static [Self] = &[ActorField::Name, ActorField::Gender, ActorField::DateOfBirth];
    const REQUIRED: &'static [Self] = Self::ALL;

    fn as_str(self) -> &'static str {
        match self {
            ActorField::Name => "name",
            ActorField::Gender => "gender",
            ActorField::DateOfBirth => "date_of_birth",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovieField {
    Name,
    Year,
    Genre,
}

impl FieldSet for MovieField {
    const KIND: EntityKind = EntityKind::Movie;
    const ALL: &'static [Self] = &[MovieField::Name, MovieField::Year, MovieField::Genre];
    const REQUIRED: &'static [Self] = Self::ALL;

    fn as_str(self) -> &'static str {
        match self {
            MovieField::Name => "name",
            MovieField::Year => "year",
            MovieField::Genre => "genre",
        }
    }
}

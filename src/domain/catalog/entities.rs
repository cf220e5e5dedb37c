use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::validation::{Rule, RuleTable, Validatable, Violations};

pub const GENDERS: &[&str] = &["male", "female"];

/// Caller-supplied actor fields
#[derive(Debug, Clone, PartialEq)]
pub struct ActorDraft {
  pub name: String,
  pub gender: String,
  pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
  pub id: Uuid,
  pub name: String,
  pub gender: String,
  pub birthday: Option<NaiveDate>,
}

impl Actor {
  /// New actor with a fresh id
  pub fn create(draft: ActorDraft) -> Result<Self, Violations> {
    Self::build(Uuid::new_v4(), draft)
  }

  /// Validated actor for a known id
  pub fn build(id: Uuid, draft: ActorDraft) -> Result<Self, Violations> {
    let actor = Self {
      id,
      name: draft.name,
      gender: draft.gender,
      birthday: draft.birthday,
    };
    actor.validate()?;
    Ok(actor)
  }
}

impl Validatable for Actor {
  fn rules(&self) -> RuleTable<'_> {
    RuleTable::new()
      .field("id", self.id, &[Rule::Required, Rule::UuidV4])
      .field("name", &self.name, &[Rule::Required, Rule::MinLength(1), Rule::MaxLength(100)])
      .field("gender", &self.gender, &[Rule::Required, Rule::OneOf(GENDERS)])
      .field("birthday", self.birthday, &[Rule::Required, Rule::PastDate])
  }
}

/// Caller-supplied film fields
#[derive(Debug, Clone, PartialEq)]
pub struct FilmDraft {
  pub name: String,
  pub description: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub rate: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Film {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub rate: f32,
}

impl Film {
  pub const MIN_RATE: f64 = 0.0;
  pub const MAX_RATE: f64 = 10.0;

  pub fn create(draft: FilmDraft) -> Result<Self, Violations> {
    Self::build(Uuid::new_v4(), draft)
  }

  pub fn build(id: Uuid, draft: FilmDraft) -> Result<Self, Violations> {
    let film = Self {
      id,
      name: draft.name,
      description: draft.description,
      release_date: draft.release_date,
      rate: draft.rate,
    };
    film.validate()?;
    Ok(film)
  }
}

impl Validatable for Film {
  fn rules(&self) -> RuleTable<'_> {
    RuleTable::new()
      .field("id", self.id, &[Rule::Required, Rule::UuidV4])
      .field("name", &self.name, &[Rule::Required, Rule::MinLength(1), Rule::MaxLength(150)])
      .field("description", self.description.as_deref(), &[Rule::MaxLength(1000)])
      .field("release_date", self.release_date, &[Rule::Required])
      .field("rate", self.rate, &[Rule::Min(Film::MIN_RATE), Rule::Max(Film::MAX_RATE)])
  }
}

/// Actor with the films it is linked to, when loaded
#[derive(Debug, Clone, PartialEq)]
pub struct ActorAggregate {
  pub actor: Actor,
  pub films: Vec<Film>,
}

impl ActorAggregate {
  pub fn new(actor: Actor) -> Self {
    Self {
      actor,
      films: Vec::new(),
    }
  }
}

/// Film with the actors linked to it, when loaded
#[derive(Debug, Clone, PartialEq)]
pub struct FilmAggregate {
  pub film: Film,
  pub actors: Vec<Actor>,
}

impl FilmAggregate {
  pub fn new(film: Film) -> Self {
    Self {
      film,
      actors: Vec::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Days, Utc};

  fn film_draft(rate: f32) -> FilmDraft {
    FilmDraft {
      name: "The Matrix".to_string(),
      description: Some("A hacker learns the truth".to_string()),
      release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
      rate,
    }
  }

  #[test]
  fn test_actor_reports_every_invalid_field_in_order() {
    let tomorrow = Utc::now().date_naive().checked_add_days(Days::new(1));

    let violations = Actor::create(ActorDraft {
      name: String::new(),
      gender: String::new(),
      birthday: tomorrow,
    })
    .unwrap_err();

    assert_eq!(violations.fields(), vec!["name", "gender", "birthday"]);
    assert_eq!(violations.rule_for("name"), Some(Rule::Required));
    assert_eq!(violations.rule_for("gender"), Some(Rule::Required));
    assert_eq!(violations.rule_for("birthday"), Some(Rule::PastDate));
  }

  #[test]
  fn test_actor_gender_must_be_known() {
    let violations = Actor::create(ActorDraft {
      name: "Keanu Reeves".to_string(),
      gender: "unknown".to_string(),
      birthday: NaiveDate::from_ymd_opt(1964, 9, 2),
    })
    .unwrap_err();

    assert_eq!(violations.rule_for("gender"), Some(Rule::OneOf(GENDERS)));
  }

  #[test]
  fn test_valid_actor() {
    let actor = Actor::create(ActorDraft {
      name: "Carrie-Anne Moss".to_string(),
      gender: "female".to_string(),
      birthday: NaiveDate::from_ymd_opt(1967, 8, 21),
    })
    .unwrap();

    assert_eq!(actor.id.get_version_num(), 4);
  }

  #[test]
  fn test_film_rate_bounds() {
    assert!(Film::create(film_draft(0.0)).is_ok());
    assert!(Film::create(film_draft(10.0)).is_ok());

    let high = Film::create(film_draft(11.0)).unwrap_err();
    assert_eq!(high.fields(), vec!["rate"]);

    let low = Film::create(film_draft(-1.0)).unwrap_err();
    assert_eq!(low.fields(), vec!["rate"]);
  }

  #[test]
  fn test_film_optional_description() {
    let mut draft = film_draft(8.7);
    draft.description = None;
    assert!(Film::create(draft.clone()).is_ok());

    draft.description = Some("x".repeat(1001));
    assert_eq!(Film::create(draft).unwrap_err().fields(), vec!["description"]);
  }

  #[test]
  fn test_film_requires_name_and_release_date() {
    let violations = Film::create(FilmDraft {
      name: String::new(),
      description: None,
      release_date: None,
      rate: 5.0,
    })
    .unwrap_err();

    assert_eq!(violations.fields(), vec!["name", "release_date"]);
  }
}

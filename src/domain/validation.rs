//! Declarative field validation for domain aggregates.
//!
//! Each aggregate describes its invariants as a [`RuleTable`]: an ordered list
//! of fields, each with the rules it must satisfy. Evaluation reports every
//! failing field in declaration order, one violation per field (the first rule
//! that fails). Fields that are empty and not marked [`Rule::Required`] are
//! skipped entirely.

use chrono::{NaiveDate, Utc};
use std::fmt;
use thiserror::Error;
use uuid::{Uuid, Version};

/// A single constraint applied to a field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
  Required,
  MinLength(usize),
  MaxLength(usize),
  Min(f64),
  Max(f64),
  OneOf(&'static [&'static str]),
  UuidV4,
  PastDate,
}

impl Rule {
  fn holds(&self, value: &Value<'_>, today: NaiveDate) -> bool {
    match (self, value) {
      (Rule::Required, value) => !value.is_empty(),
      (Rule::MinLength(min), value) => value
        .text()
        .is_some_and(|text| text.chars().count() >= *min),
      (Rule::MaxLength(max), value) => value
        .text()
        .is_some_and(|text| text.chars().count() <= *max),
      (Rule::Min(min), Value::Number(number)) => number >= min,
      (Rule::Max(max), Value::Number(number)) => number <= max,
      (Rule::OneOf(allowed), value) => value.text().is_some_and(|text| allowed.contains(&text)),
      (Rule::UuidV4, Value::Id(id)) => id.get_version() == Some(Version::Random),
      (Rule::UuidV4, value) => value
        .text()
        .and_then(|text| Uuid::parse_str(text).ok())
        .is_some_and(|id| id.get_version() == Some(Version::Random)),
      (Rule::PastDate, Value::Date(Some(date))) => *date < today,
      // A rule that does not apply to the value's type never holds
      _ => false,
    }
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Rule::Required => f.write_str("is required"),
      Rule::MinLength(min) => write!(f, "must be at least {} characters", min),
      Rule::MaxLength(max) => write!(f, "must be at most {} characters", max),
      Rule::Min(min) => write!(f, "must be at least {}", min),
      Rule::Max(max) => write!(f, "must be at most {}", max),
      Rule::OneOf(allowed) => write!(f, "must be one of: {}", allowed.join(", ")),
      Rule::UuidV4 => f.write_str("must be a UUID v4"),
      Rule::PastDate => f.write_str("must be a date before today"),
    }
  }
}

/// Borrowed view of a field value, as seen by the rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
  Text(&'a str),
  OptionalText(Option<&'a str>),
  Id(Uuid),
  Number(f64),
  Date(Option<NaiveDate>),
}

impl Value<'_> {
  fn is_empty(&self) -> bool {
    match self {
      Value::Text(text) => text.is_empty(),
      Value::OptionalText(text) => text.is_none(),
      Value::Id(id) => id.is_nil(),
      Value::Number(_) => false,
      Value::Date(date) => date.is_none(),
    }
  }

  fn text(&self) -> Option<&str> {
    match self {
      Value::Text(text) => Some(text),
      Value::OptionalText(text) => *text,
      _ => None,
    }
  }
}

impl<'a> From<&'a str> for Value<'a> {
  fn from(value: &'a str) -> Self {
    Value::Text(value)
  }
}

impl<'a> From<&'a String> for Value<'a> {
  fn from(value: &'a String) -> Self {
    Value::Text(value.as_str())
  }
}

impl<'a> From<Option<&'a str>> for Value<'a> {
  fn from(value: Option<&'a str>) -> Self {
    Value::OptionalText(value)
  }
}

impl From<Uuid> for Value<'_> {
  fn from(value: Uuid) -> Self {
    Value::Id(value)
  }
}

impl From<f32> for Value<'_> {
  fn from(value: f32) -> Self {
    Value::Number(f64::from(value))
  }
}

impl From<Option<NaiveDate>> for Value<'_> {
  fn from(value: Option<NaiveDate>) -> Self {
    Value::Date(value)
  }
}

/// A failed rule on a named field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
  pub field: &'static str,
  pub rule: Rule,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.field, self.rule)
  }
}

/// All violations found for one aggregate, in field declaration order
#[derive(Debug, Clone, PartialEq, Error)]
pub struct Violations(Vec<Violation>);

impl Violations {
  pub fn single(field: &'static str, rule: Rule) -> Self {
    Self(vec![Violation { field, rule }])
  }

  pub fn fields(&self) -> Vec<&'static str> {
    self.0.iter().map(|violation| violation.field).collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Violation> {
    self.0.iter()
  }

  pub fn rule_for(&self, field: &str) -> Option<Rule> {
    self
      .0
      .iter()
      .find(|violation| violation.field == field)
      .map(|violation| violation.rule)
  }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
    f.write_str(&messages.join("; "))
  }
}

struct FieldRules<'a> {
  name: &'static str,
  value: Value<'a>,
  rules: &'static [Rule],
}

/// Ordered set of field rules for one value
#[derive(Default)]
pub struct RuleTable<'a> {
  fields: Vec<FieldRules<'a>>,
}

impl<'a> RuleTable<'a> {
  pub fn new() -> Self {
    Self { fields: Vec::new() }
  }

  pub fn field(mut self, name: &'static str, value: impl Into<Value<'a>>, rules: &'static [Rule]) -> Self {
    self.fields.push(FieldRules {
      name,
      value: value.into(),
      rules,
    });
    self
  }

  pub fn check(&self) -> Result<(), Violations> {
    self.check_on(Utc::now().date_naive())
  }

  fn check_on(&self, today: NaiveDate) -> Result<(), Violations> {
    let violations: Vec<Violation> = self
      .fields
      .iter()
      .filter(|field| !field.value.is_empty() || field.rules.contains(&Rule::Required))
      .filter_map(|field| {
        field
          .rules
          .iter()
          .find(|rule| !rule.holds(&field.value, today))
          .map(|rule| Violation {
            field: field.name,
            rule: *rule,
          })
      })
      .collect();

    if violations.is_empty() {
      Ok(())
    } else {
      Err(Violations(violations))
    }
  }
}

/// Implemented by every aggregate guarded by a rule table
pub trait Validatable {
  fn rules(&self) -> RuleTable<'_>;

  fn validate(&self) -> Result<(), Violations> {
    self.rules().check()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Days;

  const GENDERS: &[&str] = &["male", "female"];

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
  }

  #[test]
  fn test_reports_all_failing_fields_in_declaration_order() {
    let result = RuleTable::new()
      .field("name", "", &[Rule::Required, Rule::MinLength(1)])
      .field("ok", "fine", &[Rule::Required])
      .field("gender", "", &[Rule::Required, Rule::OneOf(GENDERS)])
      .field("birthday", Some(today()), &[Rule::Required, Rule::PastDate])
      .check_on(today());

    let violations = result.unwrap_err();
    assert_eq!(violations.fields(), vec!["name", "gender", "birthday"]);
    assert_eq!(violations.rule_for("name"), Some(Rule::Required));
    assert_eq!(violations.rule_for("birthday"), Some(Rule::PastDate));
  }

  #[test]
  fn test_first_failing_rule_wins_per_field() {
    let violations = RuleTable::new()
      .field("gender", "robot", &[Rule::Required, Rule::OneOf(GENDERS)])
      .check_on(today())
      .unwrap_err();

    assert_eq!(violations.rule_for("gender"), Some(Rule::OneOf(GENDERS)));
  }

  #[test]
  fn test_length_counts_characters() {
    let table = RuleTable::new().field("name", "Жан", &[Rule::MinLength(3), Rule::MaxLength(3)]);
    assert!(table.check_on(today()).is_ok());
  }

  #[test]
  fn test_numeric_bounds_are_inclusive() {
    for rate in [0.0_f32, 10.0] {
      let table = RuleTable::new().field("rate", rate, &[Rule::Min(0.0), Rule::Max(10.0)]);
      assert!(table.check_on(today()).is_ok());
    }

    let low = RuleTable::new().field("rate", -1.0_f32, &[Rule::Min(0.0), Rule::Max(10.0)]);
    assert_eq!(low.check_on(today()).unwrap_err().rule_for("rate"), Some(Rule::Min(0.0)));

    let high = RuleTable::new().field("rate", 11.0_f32, &[Rule::Min(0.0), Rule::Max(10.0)]);
    assert_eq!(high.check_on(today()).unwrap_err().rule_for("rate"), Some(Rule::Max(10.0)));
  }

  #[test]
  fn test_optional_field_skipped_when_absent() {
    let absent = RuleTable::new().field("description", None::<&str>, &[Rule::MaxLength(5)]);
    assert!(absent.check_on(today()).is_ok());

    let too_long = RuleTable::new().field("description", Some("abcdef"), &[Rule::MaxLength(5)]);
    assert_eq!(too_long.check_on(today()).unwrap_err().fields(), vec!["description"]);
  }

  #[test]
  fn test_uuid_v4_rule() {
    let ok = RuleTable::new().field("id", Uuid::new_v4(), &[Rule::Required, Rule::UuidV4]);
    assert!(ok.check_on(today()).is_ok());

    let nil = RuleTable::new().field("id", Uuid::nil(), &[Rule::Required, Rule::UuidV4]);
    assert_eq!(nil.check_on(today()).unwrap_err().rule_for("id"), Some(Rule::Required));

    let text = RuleTable::new().field("id", "not-a-uuid", &[Rule::UuidV4]);
    assert!(text.check_on(today()).is_err());
  }

  #[test]
  fn test_past_date_rule_rejects_today() {
    let date = today();
    let same_day = RuleTable::new().field("birthday", Some(date), &[Rule::PastDate]);
    assert!(same_day.check_on(date).is_err());

    let yesterday = date.checked_sub_days(Days::new(1));
    let past = RuleTable::new().field("birthday", yesterday, &[Rule::PastDate]);
    assert!(past.check_on(date).is_ok());
  }

  #[test]
  fn test_violations_display() {
    let violations = Violations::single("name", Rule::MinLength(3));
    assert_eq!(violations.to_string(), "name must be at least 3 characters");
  }
}

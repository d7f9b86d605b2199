//! # Registration Validator
//!
//! Checks a raw registration form ([`MemberCandidate`]) and either rejects it with
//! every field problem found ([`Violations`]) or accepts it as a normalized
//! [`ValidatedMember`], the only input the store accepts.
//!
//! Lengths are counted in characters after trimming surrounding whitespace.
//! Which optional fields take part depends on the active [`SchemaFeatures`].

use crate::address::{AddressFields, PostalCode};
use crate::age::{Clock, SystemClock, age_on};
use album_kernel::domain::config::ValidationConfig;
use album_kernel::domain::schema::SchemaFeatures;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::LazyLock;

const MIN_NAME: usize = 3;
const MIN_ADDRESS: usize = 5;
const MIN_TEXT: usize = 2;

static RE_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

/// Raw registration form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberCandidate {
    pub name: String,
    pub age: Option<String>,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    /// Free-text address.
    pub address: Option<String>,
    #[serde(flatten)]
    pub address_fields: AddressFields,
    pub time_at_church: String,
    pub role: String,
    /// `yes` or `no`.
    pub serves_in_ministry: String,
    pub ministries_served: Option<String>,
    /// `yes` or `no`.
    pub is_baptized: Option<String>,
    pub data_ai_hint: Option<String>,
}

/// Form fields a violation can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Age,
    BirthDate,
    Address,
    PostalCode,
    TimeAtChurch,
    Role,
    ServesInMinistry,
    MinistriesServed,
    IsBaptized,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::BirthDate => "birthDate",
            Self::Address => "address",
            Self::PostalCode => "postalCode",
            Self::TimeAtChurch => "timeAtChurch",
            Self::Role => "role",
            Self::ServesInMinistry => "servesInMinistry",
            Self::MinistriesServed => "ministriesServed",
            Self::IsBaptized => "isBaptized",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem with one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: Field,
    pub message: Cow<'static, str>,
}

/// Every problem found in a rejected form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    fn push(&mut self, field: Field, message: impl Into<Cow<'static, str>>) {
        self.0.push(Violation { field, message: message.into() });
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Messages reported for `field`.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &str> {
        self.0.iter().filter(move |v| v.field == field).map(|v| v.message.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

/// Form data that passed validation, normalized.
///
/// Only [`Validator::validate`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMember {
    pub(crate) name: String,
    pub(crate) age: u32,
    pub(crate) birth_date: NaiveDate,
    pub(crate) address: Option<String>,
    pub(crate) address_fields: Option<AddressFields>,
    pub(crate) time_at_church: String,
    pub(crate) role: String,
    pub(crate) serves_in_ministry: bool,
    pub(crate) ministries_served: Option<String>,
    pub(crate) is_baptized: Option<bool>,
    pub(crate) data_ai_hint: Option<String>,
}

impl ValidatedMember {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub const fn address_fields(&self) -> Option<&AddressFields> {
        self.address_fields.as_ref()
    }

    #[must_use]
    pub fn time_at_church(&self) -> &str {
        &self.time_at_church
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub const fn serves_in_ministry(&self) -> bool {
        self.serves_in_ministry
    }

    #[must_use]
    pub fn ministries_served(&self) -> Option<&str> {
        self.ministries_served.as_deref()
    }

    #[must_use]
    pub const fn is_baptized(&self) -> Option<bool> {
        self.is_baptized
    }

    #[must_use]
    pub fn data_ai_hint(&self) -> Option<&str> {
        self.data_ai_hint.as_deref()
    }
}

/// Outcome of [`Validator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted(ValidatedMember),
    Rejected(Violations),
}

impl Validation {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Converts into a `Result` for `?`-style callers.
    ///
    /// # Errors
    /// Returns the violations of a rejected form.
    pub fn into_result(self) -> Result<ValidatedMember, Violations> {
        match self {
            Self::Accepted(member) => Ok(member),
            Self::Rejected(violations) => Err(violations),
        }
    }
}

/// Registration form validator.
#[derive(Debug, Clone)]
pub struct Validator<C = SystemClock> {
    rules: ValidationConfig,
    clock: C,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl Validator {
    #[must_use]
    pub const fn new(rules: ValidationConfig) -> Self {
        Self { rules, clock: SystemClock }
    }
}

impl<C: Clock> Validator<C> {
    #[must_use]
    pub const fn with_clock(rules: ValidationConfig, clock: C) -> Self {
        Self { rules, clock }
    }

    #[must_use]
    pub const fn rules(&self) -> &ValidationConfig {
        &self.rules
    }

    /// Validates `candidate`, collecting every violation.
    #[must_use]
    pub fn validate(&self, candidate: &MemberCandidate) -> Validation {
        let schema = self.rules.schema;
        let mut violations = Violations::default();

        let name = candidate.name.trim();
        if char_len(name) < MIN_NAME {
            violations.push(Field::Name, format!("Name must have at least {MIN_NAME} characters."));
        }

        let supplied_age = if schema.contains(SchemaFeatures::AGE) {
            self.check_age(candidate.age.as_deref(), &mut violations)
        } else {
            None
        };

        let birth_date = check_birth_date(&candidate.birth_date, &mut violations);

        let address_fields = if schema.contains(SchemaFeatures::STRUCTURED_ADDRESS) {
            check_structured_address(&candidate.address_fields, &mut violations)
        } else {
            None
        };

        let address = non_blank(candidate.address.as_deref());
        match address {
            Some(text) if char_len(text) < MIN_ADDRESS => violations.push(
                Field::Address,
                format!("Address must have at least {MIN_ADDRESS} characters."),
            ),
            None if address_fields.is_none() => violations.push(Field::Address, "Address is required."),
            _ => {},
        }

        let time_at_church = candidate.time_at_church.trim();
        if char_len(time_at_church) < MIN_TEXT {
            violations.push(Field::TimeAtChurch, "Time at church is required.");
        }

        let role = candidate.role.trim();
        if char_len(role) < MIN_TEXT {
            violations.push(Field::Role, "Role is required.");
        }

        let serves_in_ministry = parse_answer(&candidate.serves_in_ministry);
        if serves_in_ministry.is_none() {
            violations.push(Field::ServesInMinistry, "Answer yes or no.");
        }
        let ministries_served = match serves_in_ministry {
            Some(true) => {
                let ministries = non_blank(candidate.ministries_served.as_deref());
                if ministries.is_none_or(|m| char_len(m) < MIN_TEXT) {
                    violations.push(
                        Field::MinistriesServed,
                        "Tell which ministries the member serves in.",
                    );
                }
                ministries
            },
            _ => None,
        };

        let is_baptized = if schema.contains(SchemaFeatures::BAPTISM) {
            check_baptism(candidate.is_baptized.as_deref(), &mut violations)
        } else {
            None
        };

        let Some(birth_date) = birth_date else {
            return Validation::Rejected(violations);
        };
        if !violations.is_empty() {
            return Validation::Rejected(violations);
        }

        let age = supplied_age.unwrap_or_else(|| age_on(birth_date, self.clock.today()));
        let data_ai_hint = non_blank(candidate.data_ai_hint.as_deref())
            .map(str::to_owned)
            .or_else(|| self.rules.synthesize_hints.then(|| self.hint_for(name, age)));

        Validation::Accepted(ValidatedMember {
            name: name.to_owned(),
            age,
            birth_date,
            address: address.map(str::to_owned),
            address_fields,
            time_at_church: time_at_church.to_owned(),
            role: role.to_owned(),
            serves_in_ministry: serves_in_ministry.unwrap_or_default(),
            ministries_served: ministries_served.map(str::to_owned),
            is_baptized,
            data_ai_hint,
        })
    }

    fn check_age(&self, raw: Option<&str>, violations: &mut Violations) -> Option<u32> {
        let raw = non_blank(raw)?;
        // `30.0` is a whole number too
        let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
        if !fraction.bytes().all(|b| b == b'0') {
            violations.push(Field::Age, "Age must be a whole number.");
            return None;
        }
        let age = match whole.parse::<i64>() {
            Ok(age) => age,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
            Err(_) => {
                violations.push(Field::Age, "Age must be a whole number.");
                return None;
            },
        };

        if age < i64::from(self.rules.min_age) {
            violations.push(Field::Age, format!("Age must be at least {}.", self.rules.min_age));
            return None;
        }
        let Ok(age) = u32::try_from(age) else {
            violations.push(Field::Age, "Age is out of range.");
            return None;
        };
        Some(age)
    }

    /// First word of the name plus an age tag, e.g. `maria adult`.
    fn hint_for(&self, name: &str, age: u32) -> String {
        let first = name.split_whitespace().next().unwrap_or_default().to_lowercase();
        let tag = if age > self.rules.adult_age { "adult" } else { "person" };
        format!("{first} {tag}")
    }
}

fn check_baptism(raw: Option<&str>, violations: &mut Violations) -> Option<bool> {
    let Some(raw) = non_blank(raw) else {
        violations.push(Field::IsBaptized, "Baptism answer is required.");
        return None;
    };
    let answer = parse_answer(raw);
    if answer.is_none() {
        violations.push(Field::IsBaptized, "Answer yes or no.");
    }
    answer
}

fn check_birth_date(raw: &str, violations: &mut Violations) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        violations.push(Field::BirthDate, "Birth date is required.");
        return None;
    }
    if !RE_ISO_DATE.is_match(raw) {
        violations.push(Field::BirthDate, "Birth date must use the YYYY-MM-DD format.");
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    if parsed.is_none() {
        violations.push(Field::BirthDate, "Birth date is not a valid calendar date.");
    }
    parsed
}

fn check_structured_address(
    fields: &AddressFields,
    violations: &mut Violations,
) -> Option<AddressFields> {
    let mut fields = fields.normalized();
    if let Some(raw) = fields.postal_code.take() {
        match PostalCode::parse(&raw) {
            Some(code) => fields.postal_code = Some(code.as_str().to_owned()),
            None => {
                violations.push(Field::PostalCode, "Postal code must look like 00000-000.");
            },
        }
    }
    (!fields.is_empty()).then_some(fields)
}

fn parse_answer(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

//! Field rules for workout payloads.
//!
//! One rule set guards every write: the HTTP service runs [`validate_payload`] on
//! incoming JSON, the stores run [`check_input`] before touching storage, and the
//! client runs [`validate_payload`] before sending anything.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::dto::workout::WorkoutPayload;
use crate::models::WorkoutInput;

pub const EXERCISE_NAME: &str = "exerciseName";
pub const DURATION: &str = "duration";
pub const CALORIES_BURNED: &str = "caloriesBurned";
pub const DATE: &str = "date";

/// Reporting order of field errors.
pub const FIELD_ORDER: [&str; 4] = [EXERCISE_NAME, DURATION, CALORIES_BURNED, DATE];

// Same text as the `message` of each rule below; the derive only takes literals.
const EXERCISE_NAME_LENGTH: &str = "Exercise name must be between 2 and 100 characters";
const DURATION_RANGE: &str = "Duration must be between 1 and 1440 minutes (24 hours)";
const CALORIES_BURNED_RANGE: &str = "Calories burned must be between 1 and 10000";

/// Length and range rules. Fields left as `None` are skipped, so the same
/// rules apply to partially coerced payloads and to complete inputs.
#[derive(Debug, Default, Validate)]
struct WorkoutCandidate {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Exercise name must be between 2 and 100 characters"
    ))]
    exercise_name: Option<String>,

    #[validate(range(
        min = 1,
        max = 1440,
        message = "Duration must be between 1 and 1440 minutes (24 hours)"
    ))]
    duration: Option<i64>,

    #[validate(range(
        min = 1,
        max = 10000,
        message = "Calories burned must be between 1 and 10000"
    ))]
    calories_burned: Option<i64>,
}

/// Rust field name of each rule on [`WorkoutCandidate`], paired with its wire name.
const CANDIDATE_FIELDS: [(&str, &str); 3] = [
    ("exercise_name", EXERCISE_NAME),
    ("duration", DURATION),
    ("calories_burned", CALORIES_BURNED),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Failed fields, at most one message each, kept in [`FIELD_ORDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message recorded for `field` (wire name), if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        if self.contains(field) {
            return;
        }

        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self.errors.sort_by_key(|e| field_rank(&e.field));
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for FieldErrors {}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

/// Turns an untyped payload into a [`WorkoutInput`].
///
/// Every field is checked; all failures are returned together. `today` is the
/// latest acceptable `date`.
pub fn validate_payload(
    payload: &WorkoutPayload,
    today: NaiveDate,
) -> Result<WorkoutInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    let exercise_name = coerce_exercise_name(payload.exercise_name.as_ref())
        .map_err(|message| errors.push(EXERCISE_NAME, message))
        .ok();
    let duration = coerce_whole_number(payload.duration.as_ref(), &DURATION_MESSAGES)
        .map_err(|message| errors.push(DURATION, message))
        .ok();
    let calories_burned =
        coerce_whole_number(payload.calories_burned.as_ref(), &CALORIES_MESSAGES)
            .map_err(|message| errors.push(CALORIES_BURNED, message))
            .ok();
    let date = coerce_date(payload.date.as_ref())
        .map_err(|message| errors.push(DATE, message))
        .ok();

    let candidate = WorkoutCandidate {
        exercise_name,
        duration,
        calories_burned,
    };
    apply_rules(&candidate, date, today, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    // Every field coerced and passed its range check, so the narrowing below holds.
    match (
        candidate.exercise_name,
        candidate.duration,
        candidate.calories_burned,
        date,
    ) {
        (Some(exercise_name), Some(duration), Some(calories_burned), Some(date)) => {
            Ok(WorkoutInput {
                exercise_name,
                duration: duration as i32,
                calories_burned: calories_burned as i32,
                date,
            })
        }
        _ => Err(errors),
    }
}

/// Re-checks an already typed input; used by stores before every write.
pub fn check_input(input: &WorkoutInput, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let exercise_name = input.exercise_name.trim();
    if exercise_name.is_empty() {
        errors.push(EXERCISE_NAME, "Exercise name is required");
    } else if exercise_name.len() != input.exercise_name.len() {
        errors.push(EXERCISE_NAME, "Exercise name must be trimmed");
    }

    let candidate = WorkoutCandidate {
        exercise_name: Some(exercise_name.to_string()),
        duration: Some(i64::from(input.duration)),
        calories_burned: Some(i64::from(input.calories_burned)),
    };
    apply_rules(&candidate, Some(input.date), today, &mut errors);

    errors.into_result()
}

/// Field errors for a CHECK constraint of the `workouts` table, so writes the
/// database refuses read the same as ones refused here.
pub fn constraint_errors(constraint: &str) -> Option<FieldErrors> {
    let (field, message) = match constraint {
        "workouts_exercise_name_length" => (EXERCISE_NAME, EXERCISE_NAME_LENGTH),
        "workouts_duration_range" => (DURATION, DURATION_RANGE),
        "workouts_calories_burned_range" => (CALORIES_BURNED, CALORIES_BURNED_RANGE),
        _ => return None,
    };

    let mut errors = FieldErrors::default();
    errors.push(field, message);
    Some(errors)
}

fn apply_rules(
    candidate: &WorkoutCandidate,
    date: Option<NaiveDate>,
    today: NaiveDate,
    errors: &mut FieldErrors,
) {
    if let Err(rule_errors) = candidate.validate() {
        let by_field = rule_errors.field_errors();
        for (rust_name, field) in CANDIDATE_FIELDS {
            if let Some(first) = by_field.get(rust_name).and_then(|errs| errs.first()) {
                errors.push(field, rule_message(first));
            }
        }
    }

    if let Some(date) = date
        && date > today
    {
        errors.push(DATE, "Date cannot be in the future");
    }
}

fn rule_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

struct NumberMessages {
    required: &'static str,
    not_a_number: &'static str,
    not_whole: &'static str,
}

const DURATION_MESSAGES: NumberMessages = NumberMessages {
    required: "Duration is required",
    not_a_number: "Duration must be a number",
    not_whole: "Duration must be a whole number of minutes",
};

const CALORIES_MESSAGES: NumberMessages = NumberMessages {
    required: "Calories burned is required",
    not_a_number: "Calories burned must be a number",
    not_whole: "Calories burned must be a whole number",
};

/// `None`, `null` and blank strings all count as missing.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn coerce_exercise_name(value: Option<&Value>) -> Result<String, &'static str> {
    match present(value) {
        None => Err("Exercise name is required"),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err("Exercise name must be text"),
    }
}

fn coerce_whole_number(
    value: Option<&Value>,
    messages: &NumberMessages,
) -> Result<i64, &'static str> {
    let value = present(value).ok_or(messages.required)?;

    let number = match value {
        Value::Number(n) => match n.as_i64() {
            Some(whole) => return Ok(whole),
            None => n.as_f64().ok_or(messages.not_a_number)?,
        },
        Value::String(s) => {
            let s = s.trim();
            if let Ok(whole) = s.parse::<i64>() {
                return Ok(whole);
            }
            s.parse::<f64>().map_err(|_| messages.not_a_number)?
        }
        _ => return Err(messages.not_a_number),
    };

    if !number.is_finite() {
        return Err(messages.not_a_number);
    }
    if number.fract() != 0.0 {
        return Err(messages.not_whole);
    }

    // Saturates for huge magnitudes, which the range rule then rejects.
    Ok(number as i64)
}

fn coerce_date(value: Option<&Value>) -> Result<NaiveDate, &'static str> {
    const INVALID: &str = "Date must be a valid date (YYYY-MM-DD)";

    match present(value) {
        None => Err("Date is required"),
        Some(Value::String(s)) => parse_calendar_date(s.trim()).ok_or(INVALID),
        Some(_) => Err(INVALID),
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, whose UTC date is used.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

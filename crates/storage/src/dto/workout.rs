use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::WorkoutInput;

/// Request payload for creating or replacing a workout.
///
/// Fields are kept as raw JSON so that strings such as `"30"` coming from HTML
/// forms are coerced by the validation rules instead of being rejected by serde.
/// Only a JSON object is accepted; `null` fields count as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    #[schema(value_type = String, example = "Running")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<Value>,

    #[schema(value_type = i32, example = 30)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,

    #[schema(value_type = i32, example = 300)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<Value>,

    #[schema(value_type = String, example = "2024-01-01")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
}

impl<'de> Deserialize<'de> for WorkoutPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut take = |key: &str| fields.remove(key).filter(|value| !value.is_null());

        Ok(Self {
            exercise_name: take("exerciseName"),
            duration: take("duration"),
            calories_burned: take("caloriesBurned"),
            date: take("date"),
        })
    }
}

impl From<&WorkoutInput> for WorkoutPayload {
    fn from(input: &WorkoutInput) -> Self {
        Self {
            exercise_name: Some(Value::from(input.exercise_name.clone())),
            duration: Some(Value::from(input.duration)),
            calories_burned: Some(Value::from(input.calories_burned)),
            date: Some(Value::from(input.date.format("%Y-%m-%d").to_string())),
        }
    }
}

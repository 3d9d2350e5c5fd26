//! Typed HTTP client for the workout API.
//!
//! Payloads are checked with the same rules the server enforces before they are
//! sent, so obviously bad input never costs a round trip.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use storage::{
    dto::{
        common::{DataResponse, Empty, ErrorResponse, ListResponse},
        workout::WorkoutPayload,
    },
    models::{Workout, WorkoutStats},
    validation,
};
use uuid::Uuid;

pub mod error;

pub use error::{ClientError, Result};

pub struct WorkoutClient {
    client: Client,
    base_url: String,
}

impl WorkoutClient {
    /// Create a client for the API served at `base_url` (e.g. "http://localhost:5000")
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/workouts{}", self.base_url, path)
    }

    pub async fn list(&self) -> Result<Vec<Workout>> {
        let response = self.client.get(self.url("")).send().await?;
        let body: ListResponse<Workout> = decode(response).await?;

        Ok(body.data)
    }

    pub async fn get(&self, id: Uuid) -> Result<Workout> {
        let response = self.client.get(self.url(&format!("/{}", id))).send().await?;
        let body: DataResponse<Workout> = decode(response).await?;

        Ok(body.data)
    }

    pub async fn create(&self, payload: &WorkoutPayload) -> Result<Workout> {
        let input = precheck(payload)?;

        let response = self.client.post(self.url("")).json(&input).send().await?;
        let body: DataResponse<Workout> = decode(response).await?;
        tracing::debug!(id = %body.data.id, "Workout created");

        Ok(body.data)
    }

    pub async fn update(&self, id: Uuid, payload: &WorkoutPayload) -> Result<Workout> {
        let input = precheck(payload)?;

        let response = self
            .client
            .put(self.url(&format!("/{}", id)))
            .json(&input)
            .send()
            .await?;
        let body: DataResponse<Workout> = decode(response).await?;

        Ok(body.data)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await?;
        let _: DataResponse<Empty> = decode(response).await?;

        Ok(())
    }

    pub async fn stats(&self) -> Result<WorkoutStats> {
        let response = self.client.get(self.url("/stats")).send().await?;
        let body: DataResponse<WorkoutStats> = decode(response).await?;

        Ok(body.data)
    }
}

fn precheck(payload: &WorkoutPayload) -> Result<storage::models::WorkoutInput> {
    validation::validate_payload(payload, Utc::now().date_naive()).map_err(ClientError::Validation)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let messages = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error.into_messages(),
        Err(_) => vec![
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        ],
    };
    tracing::warn!("Workout API returned {}: {:?}", status, messages);

    Err(ClientError::Api {
        status: status.as_u16(),
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_building() {
        let client = WorkoutClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.url(""), "http://localhost:5000/api/workouts");
        assert_eq!(client.url("/stats"), "http://localhost:5000/api/workouts/stats");
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected_before_sending() {
        // Nothing listens on the discard port; a request would fail with Http.
        let client = WorkoutClient::new("http://127.0.0.1:9").unwrap();
        let payload: WorkoutPayload = serde_json::from_value(json!({
            "exerciseName": "R",
            "duration": 30,
            "caloriesBurned": 300,
            "date": "2024-01-01"
        }))
        .unwrap();

        match client.create(&payload).await {
            Err(ClientError::Validation(errors)) => {
                assert!(errors.contains(validation::EXERCISE_NAME));
            }
            other => panic!("expected local validation failure, got {other:?}"),
        }
    }
}

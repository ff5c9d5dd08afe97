use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::task;

use crate::{
    HalfwayError,
    geocoding::Geocoder,
    listings::ListingSource,
    meeting_point::{self, AddressSet, MeetingPoint},
    models::ScoredListing,
    ranking::{self, RankingRequest},
};

/// Shared collaborators, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub listings: Arc<dyn ListingSource>,
}

#[derive(Serialize, Deserialize)]
pub struct MeetingPointRequest {
    pub addresses: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ranking", get(ranking_status).post(rank))
        .route("/ranking/", get(ranking_status).post(rank))
        .route("/meeting-point", post(find_meeting_point))
        .with_state(state)
}

async fn ranking_status() -> Json<Value> {
    Json(json!({ "message": "Ranking API" }))
}

async fn rank(
    State(state): State<AppState>,
    payload: Result<Json<RankingRequest>, JsonRejection>,
) -> Result<Json<Vec<ScoredListing>>, ApiError> {
    let Json(request) = payload?;
    let listings = Arc::clone(&state.listings);
    let ranked = task::spawn_blocking(move || ranking::rank_listings(listings.as_ref(), &request))
        .await
        .map_err(|e| HalfwayError::from(std::io::Error::other(e)))??;
    Ok(Json(ranked))
}

async fn find_meeting_point(
    State(state): State<AppState>,
    payload: Result<Json<MeetingPointRequest>, JsonRejection>,
) -> Result<Json<MeetingPoint>, ApiError> {
    let Json(request) = payload?;
    let addresses = AddressSet::from_slice(&request.addresses)?;
    let point = meeting_point::locate(state.geocoder.as_ref(), &addresses).await?;
    Ok(Json(point))
}

/// Maps library errors onto HTTP responses
pub struct ApiError(HalfwayError);

impl From<HalfwayError> for ApiError {
    fn from(err: HalfwayError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(HalfwayError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HalfwayError::Validation { .. } | HalfwayError::ShapeMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
            HalfwayError::DegenerateInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HalfwayError::GeocodeFailure { .. } => StatusCode::NOT_FOUND,
            HalfwayError::Api { .. } => StatusCode::BAD_GATEWAY,
            HalfwayError::Config { .. } | HalfwayError::Dataset { .. } | HalfwayError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body;
    use rstest::rstest;

    #[rstest]
    #[case::validation(HalfwayError::validation("bad"), StatusCode::BAD_REQUEST)]
    #[case::shape_mismatch(
        HalfwayError::ShapeMismatch { expected: 2, weights: 3, impacts: 2 },
        StatusCode::BAD_REQUEST
    )]
    #[case::degenerate(HalfwayError::degenerate("flat"), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case::geocode_failure(HalfwayError::geocode_failure("atlantis"), StatusCode::NOT_FOUND)]
    #[case::api(HalfwayError::api("timeout"), StatusCode::BAD_GATEWAY)]
    #[case::config(HalfwayError::config("port"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::dataset(HalfwayError::dataset("missing"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case::io(
        HalfwayError::from(std::io::Error::other("disk")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[tokio::test]
    async fn test_error_status_and_body(#[case] err: HalfwayError, #[case] expected: StatusCode) {
        let message = err.user_message();

        let response = ApiError(err).into_response();

        assert_eq!(response.status(), expected);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, json!({ "error": message }));
    }

    #[tokio::test]
    async fn test_json_rejection_is_validation() {
        let request = axum::http::Request::builder()
            .method("POST")
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(r#"{"addresses": 3}"#))
            .unwrap();
        let rejection = <Json<MeetingPointRequest> as axum::extract::FromRequest<()>>::from_request(
            request,
            &(),
        )
        .await
        .err()
        .unwrap();

        let ApiError(err) = ApiError::from(rejection);

        assert!(matches!(err, HalfwayError::Validation { .. }));
    }
}

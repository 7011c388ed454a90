use axum::{
    Router,
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ErrorBody, HealthRes, HealthService, ScoreInfo, ScoreListRes, ScoreResponse};
use medscore_core::registry;
use medscore_core::ScoreError;

#[derive(OpenApi)]
#[openapi(
    paths(health, list_scores, calculate_score),
    components(schemas(HealthRes, ScoreListRes, ScoreInfo, ScoreResponse, ErrorBody))
)]
struct ApiDoc;

/// Main entry point for the medscore service
///
/// Serves the calculator catalog over REST on port 3000 (configurable via
/// MEDSCORE_REST_ADDR), with interactive docs at /swagger-ui.
///
/// # Environment Variables
/// - `MEDSCORE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medscore=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MEDSCORE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting medscore REST on {}", rest_addr);
    tracing::info!("++ Serving {} calculators", registry::CATALOG.len());

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/scores", get(list_scores))
        .route("/:score_id", post(calculate_score))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps a calculation failure to its HTTP representation.
///
/// Unknown score ids are 404; every validation failure (range, literal,
/// cross-field, malformed body) is 422 with the offending field when one
/// can be named.
fn error_response(err: ScoreError) -> (StatusCode, Json<ErrorBody>) {
    let (status, error) = match err {
        ScoreError::UnknownScore(_) => (StatusCode::NOT_FOUND, "ScoreNotFound"),
        _ => (StatusCode::UNPROCESSABLE_ENTITY, "ValidationError"),
    };
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            message: err.to_string(),
            field: err.field().map(str::to_string),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Used for monitoring and load balancer health checks.
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[derive(Debug, Deserialize)]
struct ListScoresQuery {
    category: Option<String>,
    search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/scores",
    params(
        ("category" = Option<String>, Query, description = "Filter by medical specialty"),
        ("search" = Option<String>, Query, description = "Keyword search over id, title, and description")
    ),
    responses(
        (status = 200, description = "List of available calculators", body = ScoreListRes)
    )
)]
/// List the available calculators
///
/// Returns the full catalog, optionally narrowed by specialty and/or a
/// keyword search. Both filters are case-insensitive.
async fn list_scores(Query(query): Query<ListScoresQuery>) -> Json<ScoreListRes> {
    let scores = registry::list(query.category.as_deref(), query.search.as_deref());
    let total = scores.len();
    Json(ScoreListRes { scores, total })
}

#[utoipa::path(
    post,
    path = "/{score_id}",
    params(
        ("score_id" = String, Path, description = "Calculator id, e.g. child_pugh_score")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Calculated score", body = ScoreResponse),
        (status = 404, description = "Unknown score id", body = ErrorBody),
        (status = 422, description = "Input failed validation", body = ErrorBody)
    )
)]
/// Run one calculator
///
/// Takes the calculator's JSON request body and returns the uniform score
/// response. Inputs outside the documented contract are rejected, never
/// clamped.
async fn calculate_score(
    Path(score_id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ScoreResponse>, (StatusCode, Json<ErrorBody>)> {
    match registry::calculate(&score_id, body) {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Score calculation error for {}: {}", score_id, e);
            Err(error_response(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_score_maps_to_404() {
        let (status, Json(body)) =
            error_response(ScoreError::UnknownScore("nope".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "ScoreNotFound");
        assert!(body.field.is_none());
    }

    #[test]
    fn test_out_of_range_maps_to_422_with_field() {
        let (status, Json(body)) = error_response(ScoreError::OutOfRange {
            field: "age",
            allowed: "18 to 120 years".into(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, "ValidationError");
        assert_eq!(body.field.as_deref(), Some("age"));
    }

    #[test]
    fn test_invalid_literal_maps_to_422_with_field() {
        let (status, Json(body)) = error_response(ScoreError::InvalidValue {
            field: "flag".into(),
            allowed: "`yes` or `no`".into(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, "ValidationError");
        assert_eq!(body.field.as_deref(), Some("flag"));
    }

    #[test]
    fn test_malformed_body_maps_to_422() {
        let (status, Json(body)) = error_response(ScoreError::Malformed("missing field".into()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.field.is_none());
    }
}

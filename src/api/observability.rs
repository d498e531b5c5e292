use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::AppState;
use super::auth::Superuser;

/// `GET /metrics` in Prometheus text format.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    ClientError,
    ServerError,
}

impl Outcome {
    const fn from_status(status: u16) -> Self {
        match status {
            500.. => Self::ServerError,
            400..500 => Self::ClientError,
            _ => Self::Success,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

/// Opens the per-request span (the auth middleware fills in `user_id`) and
/// records request count and latency.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.as_deref(),
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();
        let outcome = Outcome::from_status(status);

        let labels = [
            ("method", method.to_string()),
            ("route", route.unwrap_or(path)),
            ("status", status.to_string()),
        ];
        metrics::counter!("mealplan_http_requests_total", &labels).increment(1);
        metrics::histogram!("mealplan_http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if outcome == Outcome::ServerError {
            warn!(duration_ms, status_code = status, outcome = outcome.as_str(), "Request failed");
        } else {
            info!(
                duration_ms,
                status_code = status,
                outcome = outcome.as_str(),
                "Request finished"
            );
        }

        response
    }
    .instrument(span)
    .await
}

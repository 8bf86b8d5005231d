use crate::error::DashboardError;
use crate::server::state::AppState;
use crate::utils::constants::{DASHBOARD_TITLE, YEAR_HINT_MAX, YEAR_HINT_MIN};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const PAGE_TEMPLATE: &str = include_str!("../../assets/dashboard.html");

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

impl YearQuery {
    fn resolve<'a>(&'a self, state: &'a AppState) -> &'a str {
        self.year.as_deref().unwrap_or(&state.default_year)
    }
}

/// Request failure rendered as `{"error": "..."}`.
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DashboardError::InvalidYear { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("request failed ({}): {}", status, self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/figures", get(get_figures))
        .route("/api/aggregates", get(get_aggregates))
        .route("/api/years", get(get_years))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.default_year))
}

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

pub async fn get_figures(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Response, ApiError> {
    let year = query.resolve(&state);
    let aggregates = state.aggregator.aggregate(&state.dataset, year)?;
    let figures = state.charts.build_all(&aggregates);

    info!(
        "Built {} figures for year {} ({} rows)",
        figures.panels.len(),
        figures.year,
        aggregates.iter().map(|t| t.len()).sum::<usize>()
    );
    Ok(Json(figures).into_response())
}

pub async fn get_aggregates(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Response, ApiError> {
    let year = query.resolve(&state);
    let aggregates = state.aggregator.aggregate(&state.dataset, year)?;
    Ok(Json(aggregates).into_response())
}

pub async fn get_years(State(state): State<AppState>) -> Json<Vec<i32>> {
    Json(state.dataset.years())
}

pub fn render_page(default_year: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{TITLE}}", DASHBOARD_TITLE)
        .replace("{{DEFAULT_YEAR}}", &escape_attr(default_year))
        .replace("{{YEAR_MIN}}", &YEAR_HINT_MIN.to_string())
        .replace("{{YEAR_MAX}}", &YEAR_HINT_MAX.to_string())
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, DelayCause, FlightRecordBuilder};
    use axum::body::to_bytes;
    use serde_json::Value;

    fn state() -> AppState {
        let records = vec![
            FlightRecordBuilder::new()
                .year(2010)
                .month(3)
                .airline("AA")
                .delay(DelayCause::Carrier, 10.0)
                .build()
                .unwrap(),
            FlightRecordBuilder::new()
                .year(2010)
                .month(3)
                .airline("AA")
                .delay(DelayCause::Carrier, 20.0)
                .build()
                .unwrap(),
            FlightRecordBuilder::new()
                .year(2014)
                .month(8)
                .airline("WN")
                .build()
                .unwrap(),
        ];
        AppState::new(Dataset::new(records))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn query(year: Option<&str>) -> Query<YearQuery> {
        Query(YearQuery {
            year: year.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_figures_for_year() {
        let response = get_figures(State(state()), query(Some("2010")))
            .await
            .unwrap_or_else(|e| e.into_response());
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["year"], 2010);
        assert_eq!(json["panels"].as_array().unwrap().len(), 5);
        assert_eq!(json["panels"][0]["id"], "carrier-plot");
        assert_eq!(json["panels"][0]["figure"]["data"][0]["name"], "AA");
        assert_eq!(json["panels"][0]["figure"]["data"][0]["y"][0], 15.0);
    }

    #[tokio::test]
    async fn test_missing_year_uses_default() {
        let response = get_figures(State(state()), query(None))
            .await
            .unwrap_or_else(|e| e.into_response());
        let json = body_json(response).await;
        assert_eq!(json["year"], 2010);
    }

    #[tokio::test]
    async fn test_invalid_year_is_bad_request() {
        let response = get_figures(State(state()), query(Some("20x0")))
            .await
            .unwrap_or_else(|e| e.into_response());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("20x0"));
    }

    #[tokio::test]
    async fn test_unknown_year_gives_empty_charts() {
        let response = get_figures(State(state()), query(Some("2099")))
            .await
            .unwrap_or_else(|e| e.into_response());
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        for panel in json["panels"].as_array().unwrap() {
            assert!(panel["figure"]["data"].as_array().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_aggregates_and_years() {
        let response = get_aggregates(State(state()), query(Some("2014")))
            .await
            .unwrap_or_else(|e| e.into_response());
        let json = body_json(response).await;
        assert_eq!(json["tables"][0]["rows"][0]["Reporting_Airline"], "WN");
        assert_eq!(json["tables"][0]["rows"][0]["CarrierDelay"], Value::Null);

        let Json(years) = get_years(State(state())).await;
        assert_eq!(years, vec![2010, 2014]);
    }

    #[tokio::test]
    async fn test_index_page() {
        let Html(page) = index(State(state().with_default_year("2012"))).await;
        assert!(page.contains("Flight Delay Time Statistics"));
        assert!(page.contains("value=\"2012\""));
        assert!(page.contains("late-plot"));
        assert!(!page.contains("{{"));
    }
}

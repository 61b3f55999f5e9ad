use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use finlens_core::{compute_kpis, DateSelection, DistinctValues, FilterSet};
use finlens_similarity::{RecommendationError, SimilarityEngine};
use finlens_storage::{parse_date, DatasetStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_ROW_LIMIT: usize = 20;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub engine: SimilarityEngine,
}

impl AppState {
    pub fn new(store: Arc<DatasetStore>, engine: SimilarityEngine) -> Self {
        Self { store, engine }
    }
}

#[derive(Serialize)]
struct EntitiesResponse {
    result: Vec<String>,
    default: Option<String>,
}

#[derive(Serialize)]
struct RowsResponse {
    result: Vec<serde_json::Map<String, serde_json::Value>>,
    total: usize,
}

/// Query parameters shared by the read endpoints.
/// `country`, `rating`, `currency` and `index` may repeat.
#[derive(Debug, Default)]
struct DashboardQuery {
    filters: FilterSet,
    limit: Option<usize>,
}

impl DashboardQuery {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut query = Self::default();
        let mut start = None;
        let mut end = None;

        for (key, value) in pairs {
            let f = &mut query.filters;
            match key.as_str() {
                "country" => f.countries.push(value.clone()),
                "rating" => f.credit_ratings.push(value.clone()),
                "currency" => f.currencies.push(value.clone()),
                "index" => f.stock_indices.push(value.clone()),
                "start_date" => start = parse_date(value),
                "end_date" => end = parse_date(value),
                "limit" => query.limit = value.parse().ok(),
                _ => {}
            }
        }

        // a range needs both ends; anything else leaves dates unfiltered
        if let (Some(start), Some(end)) = (start, end) {
            query.filters.dates = Some(DateSelection::Range { start, end });
        }

        query
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, host: String, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(Self::routes)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/entities", web::get().to(list_entities))
            .route("/recommend", web::get().to(recommend))
            .route("/meta", web::get().to(meta))
            .route("/kpis", web::get().to(kpis))
            .route("/rows", web::get().to(rows))
            .route("/reload", web::post().to(reload));
    }
}

/// JSON body reported when no recommendation is available
pub fn error_body(e: &RecommendationError) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

fn error_response(e: RecommendationError) -> HttpResponse {
    warn!("Recommendation unavailable: {}", e);
    let body = error_body(&e);
    match e {
        RecommendationError::EntityNotFound(_) | RecommendationError::IncompleteFeatures(_) => {
            HttpResponse::NotFound().json(body)
        }
        RecommendationError::MissingRequiredColumns(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        RecommendationError::EmptyQuery | RecommendationError::InvalidConfig(_) => {
            HttpResponse::BadRequest().json(body)
        }
    }
}

async fn list_entities(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let dataset = state.store.snapshot();
    match state.engine.eligible_entities(&dataset) {
        Ok(entities) => Ok(HttpResponse::Ok().json(EntitiesResponse {
            default: entities.first().cloned(),
            result: entities,
        })),
        Err(e) => Ok(error_response(e)),
    }
}

async fn recommend(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let dataset = state.store.snapshot();

    let requested = query
        .iter()
        .find(|(key, value)| key == "country" && !value.is_empty())
        .map(|(_, value)| value.clone());

    let country = match requested {
        Some(country) => country,
        None => match state.engine.eligible_entities(&dataset) {
            Ok(entities) => match entities.into_iter().next() {
                Some(first) => first,
                None => {
                    return Ok(HttpResponse::NotFound().json(serde_json::json!({
                        "error": "No entity has complete data for a recommendation"
                    })));
                }
            },
            Err(e) => return Ok(error_response(e)),
        },
    };

    match state.engine.recommend(&dataset, &country) {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Ok(error_response(e)),
    }
}

async fn meta(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let dataset = state.store.snapshot();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": DistinctValues::from_dataset(&dataset)
    })))
}

async fn kpis(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let query = DashboardQuery::from_pairs(&query);
    let filtered = query.filters.apply(&state.store.snapshot());
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": compute_kpis(&filtered)
    })))
}

async fn rows(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let query = DashboardQuery::from_pairs(&query);
    let filtered = query.filters.apply(&state.store.snapshot());
    Ok(HttpResponse::Ok().json(RowsResponse {
        result: filtered.to_records(query.limit.unwrap_or(DEFAULT_ROW_LIMIT)),
        total: filtered.len(),
    }))
}

async fn reload(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    match state.store.reload() {
        Ok(rows) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": true,
            "rows": rows
        }))),
        Err(e) => {
            warn!("Dataset reload failed: {}", e);
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use chrono::NaiveDate;
    use finlens_core::{columns, Cell, Dataset};
    use serde_json::Value;

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    fn obs(country: &str, d: Cell, growth: f64, inflation: f64, rating: &str, cap: f64) -> Vec<Cell> {
        vec![
            Cell::Text(country.into()),
            d,
            Cell::Number(growth),
            Cell::Number(inflation),
            Cell::Text(rating.into()),
            Cell::Number(cap),
        ]
    }

    fn state() -> AppState {
        let dataset = Dataset::from_rows(
            vec![
                columns::COUNTRY.into(),
                columns::DATE.into(),
                columns::GDP_GROWTH.into(),
                columns::INFLATION.into(),
                columns::CREDIT_RATING.into(),
                columns::MARKET_CAP.into(),
            ],
            vec![
                obs("A", date(2024, 1, 1), 2.0, 3.0, "AAA", 10.0),
                obs("B", date(2024, 1, 1), 2.1, 3.1, "AAA", 5.0),
                obs("C", date(2024, 1, 1), -5.0, 20.0, "D", 1.0),
                obs("A", date(2023, 1, 1), 1.0, 2.0, "AA", 9.0),
            ],
        )
        .unwrap();
        AppState::new(
            Arc::new(DatasetStore::from_dataset(dataset)),
            SimilarityEngine::default(),
        )
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(RestApi::routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_entities_with_default() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/entities").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        // equal latest dates fall back to file order
        assert_eq!(body["result"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(body["default"], "A");
    }

    #[actix_web::test]
    async fn test_recommend_explicit_country() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/recommend?country=A").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query"], "A");
        assert_eq!(body["result"][0]["entity"], "B");
        assert_eq!(body["result"][1]["entity"], "C");
        assert_eq!(body["stats"]["results_count"], 2);
    }

    #[actix_web::test]
    async fn test_recommend_defaults_to_first_eligible() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/recommend").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query"], "A");
    }

    #[actix_web::test]
    async fn test_recommend_unknown_country() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/recommend?country=Atlantis").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Atlantis"));
    }

    #[actix_web::test]
    async fn test_recommend_missing_columns() {
        let dataset = Dataset::from_rows(vec![columns::COUNTRY.into()], vec![]).unwrap();
        let state = AppState::new(
            Arc::new(DatasetStore::from_dataset(dataset)),
            SimilarityEngine::default(),
        );
        let app = app!(state);
        let req = test::TestRequest::get().uri("/recommend?country=A").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_kpis_filtered() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/kpis?country=A&country=B&start_date=2024-01-01&end_date=2024-12-31")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"][0]["label"], "Total Market Cap (T$)");
        assert_eq!(body["result"][0]["value"], 15.0);
        assert_eq!(body["result"][1]["label"], "Avg GDP Growth (%)");
        assert_eq!(body["result"][1]["value"], 2.05);
    }

    #[actix_web::test]
    async fn test_rows_limit_and_total() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/rows?rating=AAA&limit=1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["result"].as_array().unwrap().len(), 1);
        assert_eq!(body["result"][0]["Country"], "A");
        assert_eq!(body["result"][0]["Date"], "2024-01-01");
    }

    #[actix_web::test]
    async fn test_meta() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/meta").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["countries"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(body["result"]["credit_ratings"], serde_json::json!(["AA", "AAA", "D"]));
        assert_eq!(body["result"]["currencies"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_reload_without_source() {
        let app = app!(state());
        let req = test::TestRequest::post().uri("/reload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[::core::prelude::v1::test]
    fn test_error_body_shape() {
        let body = error_body(&RecommendationError::EntityNotFound("Atlantis".into()));
        assert_eq!(
            body,
            serde_json::json!({ "error": "Entity 'Atlantis' not found in the latest snapshot" })
        );
    }

    #[::core::prelude::v1::test]
    fn test_query_parsing() {
        let pairs = vec![
            ("country".to_string(), "A".to_string()),
            ("country".to_string(), "B".to_string()),
            ("rating".to_string(), "AA".to_string()),
            ("start_date".to_string(), "2024-01-01".to_string()),
            ("limit".to_string(), "5".to_string()),
        ];
        let query = DashboardQuery::from_pairs(&pairs);
        assert_eq!(query.filters.countries, vec!["A", "B"]);
        assert_eq!(query.filters.credit_ratings, vec!["AA"]);
        // only one end of the range given
        assert!(query.filters.dates.is_none());
        assert_eq!(query.limit, Some(5));
    }
}

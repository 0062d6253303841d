//! HTTP front end serving the dashboard page and its chart endpoint.

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};

use crate::charts::Dashboard;
use crate::data::filter::FilterCriteria;
use crate::data::model::Dataset;

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

/// Query string of `/api/charts`.
///
/// Fields are taken as raw text so that no value is ever rejected: a missing or
/// empty field falls back to the default selection, and a year that is not a
/// number selects nothing.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub genre: Option<String>,
    pub year_min: Option<String>,
    pub year_max: Option<String>,
}

impl ChartQuery {
    fn into_criteria(self, dataset: &Dataset) -> FilterCriteria {
        let defaults = FilterCriteria::full_range(dataset);
        let genre = self
            .genre
            .filter(|g| !g.is_empty())
            .unwrap_or(defaults.genre);

        let year_min = year_bound(self.year_min.as_deref(), defaults.year_min);
        let year_max = year_bound(self.year_max.as_deref(), defaults.year_max);
        match (year_min, year_max) {
            (Some(year_min), Some(year_max)) => FilterCriteria::new(genre, year_min, year_max),
            _ => {
                log::debug!("Unparseable year bound, answering with empty charts");
                FilterCriteria::new(genre, i32::MAX, i32::MIN)
            }
        }
    }
}

/// `None` when `raw` is present but not an integer year.
fn year_bound(raw: Option<&str>, default: i32) -> Option<i32> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(text) => text.parse().ok(),
    }
}

/// What the page needs to populate its controls.
#[derive(Debug, Serialize)]
pub struct Controls<'a> {
    pub genres: &'a [String],
    pub years: &'a [i32],
    pub year_bounds: Option<(i32, i32)>,
    pub default: FilterCriteria,
}

/// Dashboard page
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(DASHBOARD_HTML)
}

/// Control domains and the initial selection
async fn controls(dataset: web::Data<Dataset>) -> HttpResponse {
    HttpResponse::Ok().json(Controls {
        genres: dataset.genres(),
        years: dataset.years(),
        year_bounds: dataset.year_bounds(),
        default: FilterCriteria::full_range(&dataset),
    })
}

/// All five chart specs for one selection
async fn charts(dataset: web::Data<Dataset>, query: web::Query<ChartQuery>) -> HttpResponse {
    let criteria = query.into_inner().into_criteria(&dataset);
    HttpResponse::Ok().json(Dashboard::build(&dataset, &criteria))
}

/// Health check endpoint
async fn health_check(dataset: web::Data<Dataset>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "rows": dataset.len(),
    }))
}

/// Register the dashboard routes on an actix `ServiceConfig`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/controls", web::get().to(controls))
        .route("/api/charts", web::get().to(charts))
        .route("/health", web::get().to(health_check));
}

/// Serve the dashboard for `dataset` until the process is stopped
pub async fn run_server(dataset: Dataset, host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(dataset);

    log::info!("Dashboard: http://{host}:{port}/");
    log::info!("Health check: http://{host}:{port}/health");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::ScheduleError;
use crate::export::result_set_to_csv_string;
use crate::parser::normalize_roster;
use crate::schedule::{self, parse_date, unmatched_blackouts, week_range, Assignment, Blackouts, Person, ResultSet, Week};

// Last generated schedules, kept in memory for viewing and export
pub struct AppState {
    pub config: GeneratorConfig,
    pub last: Mutex<Option<GeneratedSchedules>>,
}

impl AppState {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            last: Mutex::new(None),
        }
    }
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    personnel: Vec<Person>,
    start: String,
    end: String,
    #[serde(default)]
    blackouts: Blackouts,
    quota: Option<usize>,
    attempt_budget: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedules {
    pub weeks: Vec<Week>,
    pub schedules: Vec<Vec<Option<String>>>,
    pub attempts: usize,
    #[serde(skip)]
    result: ResultSet,
}

impl GeneratedSchedules {
    fn new(weeks: Vec<Week>, result: ResultSet) -> Self {
        let schedules = result.assignments.iter().map(assignment_names).collect();
        Self {
            weeks,
            schedules,
            attempts: result.attempts,
            result,
        }
    }
}

fn assignment_names(assignment: &Assignment) -> Vec<Option<String>> {
    assignment
        .slots()
        .iter()
        .map(|s| s.name().map(str::to_string))
        .collect()
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": message.to_string()}))
}

fn lock_error<T>(_: T) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("schedule state unavailable")
}

// Generation endpoint; the search runs on the blocking pool
async fn generate_schedules(
    req: web::Json<GenerateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut req = req.into_inner();

    req.personnel = match normalize_roster(std::mem::take(&mut req.personnel)) {
        Ok(personnel) => personnel,
        Err(e) => return Ok(bad_request(e)),
    };
    if req.personnel.is_empty() {
        return Ok(bad_request(ScheduleError::EmptyRoster));
    }
    let config = match state.config.with_overrides(req.quota, req.attempt_budget) {
        Ok(config) => config,
        Err(e) => return Ok(bad_request(e)),
    };
    let weeks = match parse_date(&req.start)
        .and_then(|start| parse_date(&req.end).and_then(|end| week_range(start, end)))
    {
        Ok(weeks) => weeks,
        Err(e) => return Ok(bad_request(e)),
    };

    let blackouts: Blackouts = req
        .blackouts
        .into_iter()
        .map(|(name, blocked)| {
            let normalized: HashSet<Week> = blocked.into_iter().map(|w| Week::containing(w.date())).collect();
            (name, normalized)
        })
        .collect();
    for (name, week) in unmatched_blackouts(&weeks, &blackouts) {
        warn!(name = %name, week = %week, "Blackout outside the schedule period is ignored");
    }

    let personnel = req.personnel;
    let run_weeks = weeks.clone();
    let result = web::block(move || schedule::generate(&personnel, &run_weeks, &blackouts, &config)).await?;

    info!(options = result.len(), attempts = result.attempts, "Generated schedules over HTTP");
    let generated = GeneratedSchedules::new(weeks, result);
    *state.last.lock().map_err(lock_error)? = Some(generated.clone());

    Ok(HttpResponse::Ok().json(generated))
}

// Last result endpoint
async fn get_schedules(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = state.last.lock().map_err(lock_error)?;
    match last.as_ref() {
        Some(generated) => Ok(HttpResponse::Ok().json(generated)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedules generated yet"}))),
    }
}

// CSV export endpoint
async fn export_schedules(state: web::Data<AppState>) -> Result<HttpResponse> {
    let last = state.last.lock().map_err(lock_error)?;
    let Some(generated) = last.as_ref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedules to export"})));
    };

    let csv = result_set_to_csv_string(&generated.result, &generated.weeks)
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(("Content-Disposition", "attachment; filename=\"call_schedules.csv\""))
        .body(csv))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/generate", web::post().to(generate_schedules))
        .route("/api/schedules", web::get().to(get_schedules))
        .route("/api/schedules/export", web::get().to(export_schedules));
}

pub async fn start_server(port: u16, config: GeneratorConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config));

    info!(port, "Starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

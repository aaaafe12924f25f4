// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::DateTime;
use chrono_tz::Tz;
use clap::Parser;
use proctor_api::{
    ApiError, ExamFormRequest, ExamInfo, ListExamsResponse, ListUsersResponse,
    RegisterUserRequest, UserInfo, ValidationIssue, clock, create_exam, get_exam, list_exams,
    list_users, register_user, update_exam,
};
use proctor_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Proctor Server - HTTP server for the Proctor exam system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone name exam submissions are interpreted in
    #[arg(short, long, default_value = "UTC")]
    timezone: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the configured local zone.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for users and exams.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// The configured local zone for exam submissions.
    zone: Tz,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Rule violations for rejected submissions, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    issues: Vec<ValidationIssue>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Rule violations, if the error is a rejected submission.
    issues: Vec<ValidationIssue>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            issues: self.issues,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ValidationFailed { ref issues } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
                issues: issues.clone(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
                issues: Vec::new(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
                issues: Vec::new(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                    issues: Vec::new(),
                }
            }
        }
    }
}

/// POST /users - registers a user account.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let info: UserInfo = register_user(&persistence, &request)?;
    drop(persistence);

    Ok(Json(info))
}

/// GET /users - lists every registered user account.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_users(&persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// POST /exams - validates a submission and persists the accepted exam.
async fn handle_create_exam(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<ExamFormRequest>,
) -> Result<Json<ExamInfo>, HttpError> {
    let now: DateTime<Tz> = clock::now_in(app_state.zone);

    let mut persistence = app_state.persistence.lock().await;
    let info: ExamInfo = create_exam(&mut persistence, &request, now, app_state.zone)?;
    drop(persistence);

    Ok(Json(info))
}

/// GET /exams - lists every stored exam.
async fn handle_list_exams(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListExamsResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: ListExamsResponse = list_exams(&persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// GET /exams/{exam_id} - retrieves one stored exam.
async fn handle_get_exam(
    AxumState(app_state): AxumState<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<ExamInfo>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let info: ExamInfo = get_exam(&persistence, exam_id)?;
    drop(persistence);

    Ok(Json(info))
}

/// PUT /exams/{exam_id} - validates a submission and overwrites an exam.
async fn handle_update_exam(
    AxumState(app_state): AxumState<AppState>,
    Path(exam_id): Path<i64>,
    Json(request): Json<ExamFormRequest>,
) -> Result<Json<ExamInfo>, HttpError> {
    let now: DateTime<Tz> = clock::now_in(app_state.zone);

    let mut persistence = app_state.persistence.lock().await;
    let info: ExamInfo = update_exam(&mut persistence, exam_id, &request, now, app_state.zone)?;
    drop(persistence);

    Ok(Json(info))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(handle_register_user))
        .route("/users", get(handle_list_users))
        .route("/exams", post(handle_create_exam))
        .route("/exams", get(handle_list_exams))
        .route("/exams/{exam_id}", get(handle_get_exam))
        .route("/exams/{exam_id}", put(handle_update_exam))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Proctor Server");

    let zone: Tz = clock::parse_timezone(&args.timezone)?;
    info!("Interpreting exam submissions in timezone: {}", zone);

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        zone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

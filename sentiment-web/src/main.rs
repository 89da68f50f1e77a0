//! Axum server with WebSocket streaming for the sentiment playground

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use sentiment_core::{
    achievements::{
        triggers_for_analysis, Achievement, AchievementBook, JsonFileStore, MemoryStore, Trigger,
    },
    lessons::{narration_summary, Exercise, ExerciseOutcome, QuizAnswers, QuizOutcome},
    samples::demo_texts,
    tokenizer::is_blank,
    AnalysisEvent, Comparison, Label, ScoreResult, ScoringOptions, ScoringOptionsPatch,
    ScoringStrategy, SentimentPipeline,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Shared application state
struct AppState {
    achievements: Mutex<AchievementBook>,
    event_delay: Duration,
}

impl AppState {
    fn new(achievements: AchievementBook, event_delay: Duration) -> Self {
        Self {
            achievements: Mutex::new(achievements),
            event_delay,
        }
    }
}

/// Body of `/analyze` and WebSocket messages
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    /// Anything that is not a JSON string counts as empty text
    #[serde(default)]
    text: Value,
    #[serde(default)]
    strategy: Option<ScoringStrategy>,
    #[serde(default)]
    options: ScoringOptionsPatch,
}

impl AnalyzeRequest {
    fn text(&self) -> &str {
        self.text.as_str().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    #[serde(default)]
    text: Value,
    #[serde(default)]
    options: ScoringOptionsPatch,
}

#[derive(Debug, Deserialize)]
struct ExerciseRequest {
    #[serde(default)]
    word: Value,
    /// Current slider state; missing fields use the defaults
    #[serde(default)]
    options: ScoringOptionsPatch,
}

/// The result currently on screen
#[derive(Debug, Deserialize)]
struct NarrationRequest {
    label: Label,
    score: i32,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    strategy: ScoringStrategy,
    #[serde(flatten)]
    result: ScoreResult,
    unlocked: Vec<Achievement>,
}

#[derive(Serialize)]
struct CompareResponse {
    #[serde(flatten)]
    comparison: Comparison,
    agrees: bool,
    unlocked: Vec<Achievement>,
}

#[derive(Serialize)]
struct ExerciseResponse {
    #[serde(flatten)]
    outcome: ExerciseOutcome,
    achievement: Option<Achievement>,
}

#[derive(Serialize)]
struct QuizResponse {
    #[serde(flatten)]
    outcome: QuizOutcome,
    achievement: Option<Achievement>,
}

struct DemoChip {
    rule: &'static str,
    text: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    chips: Vec<DemoChip>,
    defaults: ScoringOptions,
    achievements: Vec<Achievement>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let book = if config.ephemeral {
        info!("Badges kept in memory only");
        AchievementBook::load(MemoryStore::new())
    } else {
        let store = JsonFileStore::new(&config.badges_file);
        info!(path = %store.path().display(), "Badges persisted to file");
        AchievementBook::load(store)
    };
    let state = Arc::new(AppState::new(book, config.event_delay()));

    let app = app(state, config.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("🚀 Sentiment playground listening on http://{}", config.addr);
    axum::serve(listener, app).await
}

fn app(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/compare", post(compare_handler))
        .route("/narration", post(narration_handler))
        .route("/tuning", post(tuning_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/achievements", get(achievements_handler))
        .route("/exercises/:id", post(exercise_handler))
        .route("/quiz", post(quiz_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

/// Playground page
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let template = IndexTemplate {
        chips: demo_texts()
            .into_iter()
            .map(|(rule, text)| DemoChip { rule, text })
            .collect(),
        defaults: ScoringOptions::default(),
        achievements: state.achievements.lock().await.earned().to_vec(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render index page: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

/// Scores one text with the selected strategy
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let strategy = req.strategy.unwrap_or_default();
    let options = req.options.resolve();
    let result = strategy.score(req.text(), &options);
    let unlocked = award_analysis(&state, req.text(), &options).await;

    Json(AnalyzeResponse {
        strategy,
        result,
        unlocked,
    })
}

/// Both strategies side by side, same options snapshot
async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> impl IntoResponse {
    let text = req.text.as_str().unwrap_or_default();
    let options = req.options.resolve();
    let comparison = Comparison::run(text, &options);
    let agrees = comparison.agrees();
    let unlocked = award_analysis(&state, text, &options).await;

    Json(CompareResponse {
        comparison,
        agrees,
        unlocked,
    })
}

/// Sentence for the browser's speech synthesis
async fn narration_handler(Json(req): Json<NarrationRequest>) -> impl IntoResponse {
    Json(serde_json::json!({ "message": narration_summary(req.label, req.score) }))
}

/// A slider or the negation checkbox was moved
async fn tuning_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let achievement = state.achievements.lock().await.award(Trigger::TuningTinkerer);
    Json(serde_json::json!({ "achievement": achievement }))
}

async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<Value> = demo_texts()
        .iter()
        .map(|(rule, text)| {
            serde_json::json!({
                "rule": rule,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

async fn achievements_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.achievements.lock().await.earned().to_vec())
}

async fn exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u8>,
    Json(req): Json<ExerciseRequest>,
) -> Response {
    let Some(exercise) = Exercise::from_number(id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("Unknown exercise {id}")})),
        )
            .into_response();
    };

    let options = req.options.resolve();
    let outcome = exercise.check(req.word.as_str().unwrap_or_default(), &options);
    let achievement = match outcome.unlocked {
        Some(trigger) => state.achievements.lock().await.award(trigger),
        None => None,
    };

    Json(ExerciseResponse {
        outcome,
        achievement,
    })
    .into_response()
}

async fn quiz_handler(
    State(state): State<Arc<AppState>>,
    Json(answers): Json<QuizAnswers>,
) -> impl IntoResponse {
    let outcome = answers.grade();
    let achievement = match outcome.unlocked {
        Some(trigger) => state.achievements.lock().await.award(trigger),
        None => None,
    };

    Json(QuizResponse {
        outcome,
        achievement,
    })
}

/// Badges earned by a playground analysis; empty input earns nothing
async fn award_analysis(state: &AppState, text: &str, options: &ScoringOptions) -> Vec<Achievement> {
    if is_blank(text) {
        return vec![];
    }
    let triggers = triggers_for_analysis(text, options);
    state.achievements.lock().await.award_all(&triggers)
}

/// HTTP → WebSocket upgrade
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Receives texts, replays the analysis as events with a short pause between them
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket connected");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(raw) => {
                // JSON {text, strategy, options}; anything else is plain text
                let (text, strategy, options) = match serde_json::from_str::<AnalyzeRequest>(&raw) {
                    Ok(req) => (
                        req.text().to_string(),
                        req.strategy.unwrap_or_default(),
                        req.options.resolve(),
                    ),
                    Err(_) => (raw.to_string(), ScoringStrategy::default(), ScoringOptions::default()),
                };

                info!("Streaming analysis [{:?}]: {} chars", strategy, text.len());

                let pipeline = SentimentPipeline::new(strategy);
                let text_for_task = text.clone();
                let handle = tokio::task::spawn_blocking(move || {
                    let (tx, rx) = std::sync::mpsc::channel::<AnalysisEvent>();
                    pipeline.analyze_streaming(&text_for_task, &options, tx);
                    rx.try_iter().collect::<Vec<_>>()
                });

                let events = match handle.await {
                    Ok(events) => events,
                    Err(e) => {
                        warn!("Analysis task failed: {e}");
                        continue;
                    }
                };

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // client went away
                        }
                        if !state.event_delay.is_zero() {
                            tokio::time::sleep(state.event_delay).await;
                        }
                    }
                }

                let unlocked = award_analysis(&state, &text, &options).await;
                if !unlocked.is_empty() {
                    let json = serde_json::json!({
                        "type": "AchievementsUnlocked",
                        "data": { "achievements": unlocked }
                    });
                    if socket.send(Message::Text(json.to_string().into())).await.is_err() {
                        return;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket disconnected");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

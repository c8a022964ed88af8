use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use places_api::database;
use places_api::handlers::{places, users};
use places_api::middleware::jwt_auth_middleware;
use places_api::services::file_storage::FileStorage;
use places_api::services::geocoding::GoogleGeocoder;
use places_api::state::AppState;
use places_api::store::PgStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = places_api::config::config();
    tracing::info!("starting places API in {:?} mode", config.environment);

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = database::init_pool(&database_url)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize database: {}", e));

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        Arc::new(GoogleGeocoder::from_config()),
        Arc::new(FileStorage::from_config()),
    );

    let app = app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(place_public_routes())
        .merge(place_protected_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/api/users", get(users::users_get))
        .route("/api/users/signup", post(users::signup_post))
        .route("/api/users/login", post(users::login_post))
}

fn place_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/places", get(places::places_get))
        .route("/api/places/place/:pid", get(places::place_get))
        .route("/api/places/user/:uid", get(places::places_by_user_get))
}

fn place_protected_routes() -> Router<AppState> {
    use axum::routing::{delete, patch, post};

    Router::new()
        .route("/api/places", post(places::place_post))
        .route(
            "/api/places/:pid",
            patch(places::place_patch).delete(places::place_delete),
        )
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "places-api",
        "endpoints": {
            "users": ["GET /api/users", "POST /api/users/signup", "POST /api/users/login"],
            "places": [
                "GET /api/places",
                "GET /api/places/place/:pid",
                "GET /api/places/user/:uid",
                "POST /api/places",
                "PATCH /api/places/:pid",
                "DELETE /api/places/:pid"
            ]
        }
    }))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

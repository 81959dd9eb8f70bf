//! Stub upstream APIs shared by the integration tests
//!
//! One axum server imitates Gemini, TMDB, Open Library and Last.fm so the real
//! reqwest clients can be exercised end to end.
#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use moodshelf_api::{config::Config, models::Category, services::reply_parser::ReplyFormat};
use serde_json::{json, Value};
use std::{collections::HashMap, sync::Arc};

pub const TMDB_TOKEN: &str = "tmdb-test-token";
pub const LASTFM_KEY: &str = "lastfm-test-key";
pub const GEMINI_KEY: &str = "gemini-test-key";

/// Titles the stub catalogs treat specially
pub const FAILING_MOVIE: &str = "Fail Movie";
pub const UNKNOWN_MOVIE: &str = "Nothing Movie";
pub const UNKNOWN_SONG: &str = "Lost Track";

pub const MELANCHOLIC_MOVIES: [&str; 5] = [
    "Eternal Sunshine of the Spotless Mind",
    "Lost in Translation",
    "Blue Valentine",
    "Manchester by the Sea",
    "Schindler's List",
];

pub const MELANCHOLIC_BOOKS: [&str; 5] = [
    "Norwegian Wood",
    "The Bell Jar",
    "Never Let Me Go",
    "A Little Life",
    "The Remains of the Day",
];

pub const MELANCHOLIC_SONGS: [(&str, &str); 5] = [
    ("Hurt", "Johnny Cash"),
    ("Someone Like You", "Adele"),
    ("Mad World", "Gary Jules"),
    ("Everybody Hurts", "R.E.M."),
    ("Skinny Love", "Bon Iver"),
];

/// Formats a reply the way the model usually writes it: fenced, one field per line
pub fn fenced_reply(movies: &[&str], books: &[&str], songs: &[(&str, &str)]) -> String {
    let records = |items: Vec<String>| -> String {
        items
            .iter()
            .enumerate()
            .map(|(i, fields)| {
                let close = if i + 1 == items.len() { "}" } else { "}," };
                format!("    {{\n{}\n    {}", fields, close)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let movies = records(
        movies
            .iter()
            .map(|t| format!("      \"title\": \"{t}\",\n      \"year\": \"unknown\""))
            .collect(),
    );
    let books = records(
        books
            .iter()
            .map(|t| format!("      \"title\": \"{t}\""))
            .collect(),
    );
    let songs = records(
        songs
            .iter()
            .map(|(t, a)| format!("      \"title\": \"{t}\",\n      \"artist\": \"{a}\""))
            .collect(),
    );

    format!(
        "```json\n{{\n  \"movies\": [\n{movies}\n  ],\n  \"books\": [\n{books}\n  ],\n  \"songs\": [\n{songs}\n  ]\n}}\n```"
    )
}

pub fn melancholic_reply() -> String {
    fenced_reply(&MELANCHOLIC_MOVIES, &MELANCHOLIC_BOOKS, &MELANCHOLIC_SONGS)
}

#[derive(Clone)]
struct UpstreamState {
    /// `None` makes the model endpoint answer 500
    reply: Option<Arc<String>>,
}

async fn gemini(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok());
    if key != Some(GEMINI_KEY) {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }
    if body["contents"][0]["parts"][0]["text"].as_str().is_none() {
        return (StatusCode::BAD_REQUEST, "missing prompt").into_response();
    }

    match state.reply {
        Some(reply) => Json(json!({
            "candidates": [
                {"content": {"parts": [{"text": reply.as_str()}], "role": "model"}}
            ]
        }))
        .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": 500, "message": "internal"}})),
        )
            .into_response(),
    }
}

async fn tmdb_search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    let expected = format!("Bearer {TMDB_TOKEN}");
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }

    let query = params.get("query").cloned().unwrap_or_default();
    match query.as_str() {
        FAILING_MOVIE => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        UNKNOWN_MOVIE => Json(json!({"page": 1, "results": []})).into_response(),
        _ => Json(json!({
            "page": 1,
            "results": [{
                "id": query.len(),
                "title": query,
                "poster_path": format!("/{}.jpg", query.len()),
                "release_date": "2004-03-19"
            }]
        }))
        .into_response(),
    }
}

async fn open_library_search(Query(params): Query<HashMap<String, String>>) -> Response {
    let title = params.get("title").cloned().unwrap_or_default();
    if params.get("limit").map(String::as_str) != Some("1") {
        return (StatusCode::BAD_REQUEST, "limit must be 1").into_response();
    }

    Json(json!({
        "numFound": 1,
        "docs": [{
            "title": title,
            "author_name": [format!("Author of {title}")],
            "cover_i": 42
        }]
    }))
    .into_response()
}

async fn lastfm(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("api_key").map(String::as_str) != Some(LASTFM_KEY)
        || params.get("method").map(String::as_str) != Some("track.getInfo")
    {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }

    let track = params.get("track").cloned().unwrap_or_default();
    let artist = params.get("artist").cloned().unwrap_or_default();
    if track == UNKNOWN_SONG {
        return Json(json!({"error": 6, "message": "Track not found"})).into_response();
    }

    let images: Vec<Value> = ["small", "medium", "large", "extralarge"]
        .iter()
        .map(|size| json!({"#text": format!("https://img.test/{size}/{}.png", track.len()), "size": size}))
        .collect();

    Json(json!({
        "track": {
            "name": track,
            "artist": {"name": artist},
            "album": {"title": "Album", "image": images}
        }
    }))
    .into_response()
}

/// Starts the stub upstream and returns its base URL
pub async fn spawn_upstream(reply: Option<String>) -> String {
    let state = UpstreamState {
        reply: reply.map(Arc::new),
    };

    let app = Router::new()
        .route("/v1beta/models/:call", post(gemini))
        .route("/3/search/movie", get(tmdb_search))
        .route("/search.json", get(open_library_search))
        .route("/2.0/", get(lastfm))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

/// Configuration pointing every client at the stub upstream
pub fn test_config(base_url: &str) -> Config {
    Config {
        gemini_api_key: GEMINI_KEY.to_string(),
        gemini_api_url: base_url.to_string(),
        gemini_model: "gemini-pro".to_string(),
        tmdb_api_key: TMDB_TOKEN.to_string(),
        tmdb_api_url: base_url.to_string(),
        open_library_api_url: base_url.to_string(),
        open_library_covers_url: base_url.to_string(),
        lastfm_api_key: LASTFM_KEY.to_string(),
        lastfm_api_url: base_url.to_string(),
        reply_format: ReplyFormat::Lines,
        lenient_categories: vec![Category::Books],
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

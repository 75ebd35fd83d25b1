//! Seed data for the fake backends and token helpers.

use super::constants::*;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Signs a token for `sub` expiring at `exp` (unix seconds).
pub fn mint_token(sub: &str, exp: i64) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .expect("Failed to sign test token")
}

pub fn fresh_token(sub: &str) -> String {
    mint_token(sub, Utc::now().timestamp() + TOKEN_TTL_SECS)
}

pub fn expired_token(sub: &str) -> String {
    mint_token(sub, Utc::now().timestamp() - 3600)
}

/// Naive timestamp the way the Python backends serialize them.
pub fn naive_now() -> String {
    Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

// ============================================================================
// Filmkassen
// ============================================================================

pub fn film_directors() -> Vec<Value> {
    vec![
        json!({
            "id": DIRECTOR_VINTERBERG_ID,
            "name": DIRECTOR_VINTERBERG_NAME,
            "dfi_id": "5521",
            "bio": "Medstifter af Dogme 95.",
            "cached_at": "2024-01-01T00:00:00"
        }),
        json!({
            "id": 11,
            "name": "Gabriel Axel",
            "dfi_id": null,
            "bio": null,
            "cached_at": "2024-01-01T00:00:00"
        }),
    ]
}

/// Full movie records; search results use the summary fields only.
pub fn film_movies() -> Vec<Value> {
    vec![
        json!({
            "id": MOVIE_JAGTEN_ID,
            "dfi_id": 77001,
            "title": MOVIE_JAGTEN_TITLE,
            "year": 2012,
            "poster_url": null,
            "director": DIRECTOR_VINTERBERG_NAME,
            "director_id": DIRECTOR_VINTERBERG_ID,
            "cast": ["Mads Mikkelsen", "Thomas Bo Larsen"],
            "clips": [],
            "videotek_url": null,
            "description": "En pædagog bliver uskyldigt anklaget.",
            "cached_at": "2024-01-02T10:00:00.000000"
        }),
        json!({
            "id": MOVIE_FESTEN_ID,
            "dfi_id": 77002,
            "title": "Festen",
            "year": 1998,
            "poster_url": null,
            "director": DIRECTOR_VINTERBERG_NAME,
            "director_id": DIRECTOR_VINTERBERG_ID,
            "cast": ["Ulrich Thomsen"],
            "clips": null,
            "videotek_url": null,
            "description": null,
            "cached_at": "2024-01-02T10:00:00"
        }),
        json!({
            "id": MOVIE_BABETTE_ID,
            "dfi_id": 77003,
            "title": "Babettes gæstebud",
            "year": 1987,
            "poster_url": null,
            "director": "Gabriel Axel",
            "director_id": 11,
            "cast": null,
            "clips": null,
            "videotek_url": null,
            "description": null,
            "cached_at": null
        }),
    ]
}

pub fn movie_summary(movie: &Value) -> Value {
    json!({
        "id": movie["id"],
        "dfi_id": movie["dfi_id"],
        "title": movie["title"],
        "year": movie["year"],
        "poster_url": movie["poster_url"],
        "director": movie["director"],
    })
}

// ============================================================================
// MitSMK
// ============================================================================

fn artwork(object_number: &str, title: &str, artist: &str, year: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "object_number": object_number,
        "title": title,
        "year": year,
        "artist_name": artist,
        "image_thumbnail": format!("https://iip.smk.dk/thumb/{}.jpg", object_number),
        "image_iiif_id": null,
        "public_domain": true,
        "object_names": ["Maleri"],
        "has_image": true,
        "cached_at": "2024-03-01T09:00:00.000001"
    })
}

pub fn smk_artworks() -> Vec<Value> {
    let mut artworks = vec![
        artwork(
            ARTWORK_HAMMERSHOI,
            "Interiør med ung kvinde set fra ryggen",
            "Vilhelm Hammershøi",
            "1903-1904",
        ),
        artwork(
            ARTWORK_ECKERSBERG,
            "Udsigt gennem tre nordvestlige buer i Colosseums tredje stokværk",
            "C.W. Eckersberg",
            "1815-1816",
        ),
        artwork(ARTWORK_WITH_SLASH, "Komposition", "Asger Jorn", "1956"),
    ];
    for i in 1..=STUDY_COUNT {
        artworks.push(artwork(
            &format!("KKSgb{}", 2000 + i),
            &format!("Studie af en hånd {}", i),
            "Christen Købke",
            "ca. 1835",
        ));
    }
    artworks
}

use std::sync::Arc;
use tracing::debug;

use super::api::MitSmkApi;
use super::messages::*;
use super::models::{Artwork, ArtworkSearchResponse};
use crate::api::ApiError;
use crate::store::{detail_or, HasStatus, Status, Store};

/// Page size of artwork searches.
pub const PAGE_SIZE: u64 = 20;

#[derive(Debug, Clone)]
pub struct ArtworksState {
    pub search_results: Vec<Artwork>,
    pub current_artwork: Option<Artwork>,
    pub search_query: String,
    pub total_results: u64,
    pub current_offset: u64,
    pub limit: u64,
    pub status: Status,
}

impl Default for ArtworksState {
    fn default() -> Self {
        Self {
            search_results: Vec::new(),
            current_artwork: None,
            search_query: String::new(),
            total_results: 0,
            current_offset: 0,
            limit: PAGE_SIZE,
            status: Status::default(),
        }
    }
}

impl ArtworksState {
    pub fn has_more(&self) -> bool {
        (self.search_results.len() as u64) < self.total_results
    }
}

impl HasStatus for ArtworksState {
    fn status(&self) -> &Status {
        &self.status
    }
    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }
}

pub struct ArtworksStore {
    api: Arc<MitSmkApi>,
    state: Store<ArtworksState>,
}

impl ArtworksStore {
    pub fn new(api: Arc<MitSmkApi>) -> Self {
        Self {
            api,
            state: Store::default(),
        }
    }

    pub fn state(&self) -> &Store<ArtworksState> {
        &self.state
    }

    /// Searches one page. Offset 0 starts a new result list, any other offset
    /// appends to it. A blank query does nothing and yields `Ok(None)`.
    pub async fn search_artworks(
        &self,
        query: &str,
        offset: u64,
    ) -> Result<Option<ArtworkSearchResponse>, ApiError> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let limit = self.state.read(|s| s.limit);
        self.state.update(|s| {
            s.search_query = query.to_string();
            s.current_offset = offset;
        });

        debug!("Searching artworks for '{}' at offset {}", query, offset);
        self.state
            .track(
                self.api.search_artworks(query, offset, limit),
                detail_or(SEARCH_FAILED),
                |s, page| {
                    if offset == 0 {
                        s.search_results = page.artworks.clone();
                    } else {
                        s.search_results.extend(page.artworks.iter().cloned());
                    }
                    s.total_results = page.total;
                },
            )
            .await
            .map(Some)
    }

    /// A 404 empties `current_artwork`, so a missing artwork never shows the
    /// previous one.
    pub async fn get_artwork(&self, object_number: &str) -> Result<Artwork, ApiError> {
        let result = self
            .state
            .track(
                self.api.get_artwork(object_number),
                detail_or(ARTWORK_FAILED),
                |s, artwork| s.current_artwork = Some(artwork.clone()),
            )
            .await;
        if matches!(&result, Err(err) if err.is_not_found()) {
            self.clear_current_artwork();
        }
        result
    }

    /// Fetches the next page of the current query, unless there is no query
    /// or a request is already running.
    pub async fn load_more(&self) -> Result<Option<ArtworkSearchResponse>, ApiError> {
        let (query, next_offset, loading) = self.state.read(|s| {
            (
                s.search_query.clone(),
                s.current_offset + s.limit,
                s.status.loading,
            )
        });
        if query.is_empty() || loading {
            return Ok(None);
        }
        self.search_artworks(&query, next_offset).await
    }

    pub fn clear_search(&self) {
        self.state.update(|s| {
            s.search_results.clear();
            s.search_query.clear();
            s.total_results = 0;
            s.current_offset = 0;
        });
    }

    pub fn clear_current_artwork(&self) {
        self.state.update(|s| s.current_artwork = None);
    }

    pub fn clear_error(&self) {
        self.state.clear_error();
    }
}

use std::sync::Arc;
use tracing::{debug, error};

use super::api::FilmkassenApi;
use super::messages::*;
use super::models::{Collection, CollectionDetail, CollectionMovie, CollectionUpdate};
use crate::api::ApiError;
use crate::store::{detail_or, HasStatus, Status, Store};

#[derive(Debug, Clone, Default)]
pub struct CollectionsState {
    pub collections: Vec<Collection>,
    pub current_collection: Option<CollectionDetail>,
    pub status: Status,
}

impl CollectionsState {
    /// The open collection, if it is the one with `collection_id`.
    fn open_collection_mut(&mut self, collection_id: i64) -> Option<&mut CollectionDetail> {
        self.current_collection
            .as_mut()
            .filter(|c| c.id() == collection_id)
    }
}

impl HasStatus for CollectionsState {
    fn status(&self) -> &Status {
        &self.status
    }
    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }
}

pub struct CollectionsStore {
    api: Arc<FilmkassenApi>,
    state: Store<CollectionsState>,
}

impl CollectionsStore {
    pub fn new(api: Arc<FilmkassenApi>) -> Self {
        Self {
            api,
            state: Store::default(),
        }
    }

    pub fn state(&self) -> &Store<CollectionsState> {
        &self.state
    }

    pub async fn fetch_collections(&self) -> Result<Vec<Collection>, ApiError> {
        debug!("Fetching collections...");
        let describe = |err: &ApiError| {
            if err.is_unauthorized() {
                error!("Authentication failed, user may need to log in again");
                LOGIN_REQUIRED_FOR_COLLECTIONS.to_string()
            } else {
                detail_or(FETCH_COLLECTIONS_FAILED)(err)
            }
        };
        self.state
            .track(self.api.list_collections(), describe, |s, collections| {
                s.collections = collections.clone();
            })
            .await
    }

    pub async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Collection, ApiError> {
        self.state
            .track(
                self.api.create_collection(name, description),
                detail_or(CREATE_COLLECTION_FAILED),
                |s, collection| s.collections.push(collection.clone()),
            )
            .await
    }

    pub async fn get_collection_details(
        &self,
        collection_id: i64,
    ) -> Result<CollectionDetail, ApiError> {
        self.state
            .track(
                self.api.get_collection(collection_id),
                detail_or(COLLECTION_DETAILS_FAILED),
                |s, detail| s.current_collection = Some(detail.clone()),
            )
            .await
    }

    pub async fn update_collection(
        &self,
        collection_id: i64,
        update: &CollectionUpdate<'_>,
    ) -> Result<Collection, ApiError> {
        self.state
            .track(
                self.api.update_collection(collection_id, update),
                detail_or(UPDATE_COLLECTION_FAILED),
                |s, updated| {
                    if let Some(entry) = s.collections.iter_mut().find(|c| c.id == collection_id) {
                        *entry = updated.clone();
                    }
                },
            )
            .await
    }

    pub async fn delete_collection(&self, collection_id: i64) -> Result<(), ApiError> {
        self.state
            .track(
                self.api.delete_collection(collection_id),
                detail_or(DELETE_COLLECTION_FAILED),
                |s, _| {
                    s.collections.retain(|c| c.id != collection_id);
                    if s.open_collection_mut(collection_id).is_some() {
                        s.current_collection = None;
                    }
                },
            )
            .await
    }

    pub async fn add_movie_to_collection(
        &self,
        collection_id: i64,
        movie_id: i64,
        note: Option<&str>,
    ) -> Result<CollectionMovie, ApiError> {
        self.state
            .track(
                self.api.add_movie(collection_id, movie_id, note),
                detail_or(ADD_MOVIE_FAILED),
                |s, entry| {
                    if let Some(open) = s.open_collection_mut(collection_id) {
                        open.movies.push(entry.clone());
                    }
                },
            )
            .await
    }

    pub async fn remove_movie_from_collection(
        &self,
        collection_id: i64,
        movie_id: i64,
    ) -> Result<(), ApiError> {
        self.state
            .track(
                self.api.remove_movie(collection_id, movie_id),
                detail_or(REMOVE_MOVIE_FAILED),
                |s, _| {
                    if let Some(open) = s.open_collection_mut(collection_id) {
                        open.movies.retain(|cm| cm.movie.id != movie_id);
                    }
                },
            )
            .await
    }

    pub async fn update_movie_note(
        &self,
        collection_id: i64,
        movie_id: i64,
        note: Option<&str>,
    ) -> Result<CollectionMovie, ApiError> {
        self.state
            .track(
                self.api.update_movie_note(collection_id, movie_id, note),
                detail_or(UPDATE_NOTE_FAILED),
                |s, entry| {
                    if let Some(open) = s.open_collection_mut(collection_id) {
                        let slot = open.movies.iter_mut().find(|cm| cm.movie.id == movie_id);
                        if let Some(slot) = slot {
                            *slot = entry.clone();
                        }
                    }
                },
            )
            .await
    }

    pub fn clear_current_collection(&self) {
        self.state.update(|s| s.current_collection = None);
    }

    pub fn clear_error(&self) {
        self.state.clear_error();
    }
}

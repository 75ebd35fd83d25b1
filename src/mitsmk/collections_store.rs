use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::api::MitSmkApi;
use super::messages::*;
use super::models::{Collection, CollectionDetails, CollectionItem};
use crate::api::ApiError;
use crate::store::{detail_or, HasStatus, Status, Store};

#[derive(Debug, Clone, Default)]
pub struct CollectionsState {
    pub collections: Vec<Collection>,
    pub current_collection: Option<CollectionDetails>,
    pub status: Status,
}

impl CollectionsState {
    fn open_collection_mut(&mut self, collection_id: Uuid) -> Option<&mut CollectionDetails> {
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
    api: Arc<MitSmkApi>,
    state: Store<CollectionsState>,
}

impl CollectionsStore {
    pub fn new(api: Arc<MitSmkApi>) -> Self {
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
        self.state
            .track(
                self.api.list_collections(),
                detail_or(FETCH_COLLECTIONS_FAILED),
                |s, collections| s.collections = collections.clone(),
            )
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

    /// Replaces the list entry. The open detail keeps its header until it is
    /// fetched again.
    pub async fn update_collection(
        &self,
        collection_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Collection, ApiError> {
        self.state
            .track(
                self.api.update_collection(collection_id, name, description),
                detail_or(UPDATE_COLLECTION_FAILED),
                |s, updated| {
                    if let Some(entry) = s.collections.iter_mut().find(|c| c.id == collection_id) {
                        *entry = updated.clone();
                    }
                },
            )
            .await
    }

    pub async fn delete_collection(&self, collection_id: Uuid) -> Result<(), ApiError> {
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

    pub async fn fetch_collection_details(
        &self,
        collection_id: Uuid,
    ) -> Result<CollectionDetails, ApiError> {
        self.state
            .track(
                self.api.get_collection(collection_id),
                detail_or(COLLECTION_DETAILS_FAILED),
                |s, details| s.current_collection = Some(details.clone()),
            )
            .await
    }

    pub async fn add_artwork_to_collection(
        &self,
        collection_id: Uuid,
        artwork_id: Uuid,
        note: Option<&str>,
    ) -> Result<CollectionItem, ApiError> {
        self.state
            .track(
                self.api.add_artwork(collection_id, artwork_id, note),
                detail_or(ADD_ARTWORK_FAILED),
                |s, item| {
                    if let Some(open) = s.open_collection_mut(collection_id) {
                        open.artworks.push(item.clone());
                    }
                },
            )
            .await
    }

    pub async fn remove_artwork_from_collection(
        &self,
        collection_id: Uuid,
        artwork_id: Uuid,
    ) -> Result<(), ApiError> {
        self.state
            .track(
                self.api.remove_artwork(collection_id, artwork_id),
                detail_or(REMOVE_ARTWORK_FAILED),
                |s, _| {
                    if let Some(open) = s.open_collection_mut(collection_id) {
                        open.artworks.retain(|item| item.artwork.id != artwork_id);
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

//! MitSMK: artwork search and personal collections on top of the SMK open
//! data, served through the MitSMK backend.

pub mod api;
mod artworks_store;
mod auth_store;
mod collections_store;
pub mod messages;
pub mod models;
pub mod routes;

use std::sync::Arc;

pub use api::MitSmkApi;
pub use artworks_store::{ArtworksState, ArtworksStore, PAGE_SIZE};
pub use auth_store::{AuthState, AuthStore};
pub use collections_store::{CollectionsState, CollectionsStore};
pub use routes::{SmkRoute, SmkView};

use crate::api::ApiClient;
use crate::routing::Router;

pub struct MitSmk {
    pub api: Arc<MitSmkApi>,
    pub auth: AuthStore,
    pub artworks: ArtworksStore,
    pub collections: CollectionsStore,
    pub router: Router<SmkView>,
}

impl MitSmk {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let api = Arc::new(MitSmkApi::new(client));
        Self {
            auth: AuthStore::new(api.clone()),
            artworks: ArtworksStore::new(api.clone()),
            collections: CollectionsStore::new(api.clone()),
            router: routes::router(),
            api,
        }
    }

    pub fn resolve(&self, path: &str) -> Option<SmkRoute> {
        SmkRoute::resolve(&self.router, path)
    }
}

//! Filmkassen: Danish film browser with personal "filmkasser".

pub mod api;
mod collections_store;
pub mod messages;
pub mod models;
mod movies_store;
pub mod routes;
mod user_store;

use std::sync::Arc;

pub use api::FilmkassenApi;
pub use collections_store::{CollectionsState, CollectionsStore};
pub use movies_store::{MoviesState, MoviesStore};
pub use routes::{FilmRoute, FilmView};
pub use user_store::{UserState, UserStore};

use crate::api::ApiClient;
use crate::routing::Router;

/// Everything a Filmkassen front-end needs, passed around explicitly.
pub struct Filmkassen {
    pub api: Arc<FilmkassenApi>,
    pub user: UserStore,
    pub movies: MoviesStore,
    pub collections: CollectionsStore,
    pub router: Router<FilmView>,
}

impl Filmkassen {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let api = Arc::new(FilmkassenApi::new(client));
        Self {
            user: UserStore::new(api.clone()),
            movies: MoviesStore::new(api.clone()),
            collections: CollectionsStore::new(api.clone()),
            router: routes::router(),
            api,
        }
    }

    pub fn resolve(&self, path: &str) -> Option<FilmRoute> {
        FilmRoute::resolve(&self.router, path)
    }
}

//! MitSMK navigation targets.

use uuid::Uuid;

use crate::routing::Router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmkView {
    Home,
    ArtworkDetail,
    Login,
    Register,
    Collections,
    CollectionDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmkRoute {
    Home,
    ArtworkDetail { object_number: String },
    Login,
    Register,
    Collections,
    CollectionDetail { id: Uuid },
}

pub fn router() -> Router<SmkView> {
    Router::new()
        .route("home", "/", SmkView::Home)
        .route("artwork-detail", "/artwork/:objectNumber", SmkView::ArtworkDetail)
        .route("login", "/login", SmkView::Login)
        .route("register", "/register", SmkView::Register)
        .protected_route("collections", "/collections", SmkView::Collections)
        .protected_route(
            "collection-detail",
            "/collections/:id",
            SmkView::CollectionDetail,
        )
}

impl SmkRoute {
    pub fn resolve(router: &Router<SmkView>, path: &str) -> Option<Self> {
        let target = router.resolve(path)?;
        let route = match target.route.view {
            SmkView::Home => SmkRoute::Home,
            SmkView::ArtworkDetail => SmkRoute::ArtworkDetail {
                object_number: target.params.get("objectNumber")?.to_string(),
            },
            SmkView::Login => SmkRoute::Login,
            SmkView::Register => SmkRoute::Register,
            SmkView::Collections => SmkRoute::Collections,
            SmkView::CollectionDetail => SmkRoute::CollectionDetail {
                id: target.params.parse("id")?,
            },
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            SmkRoute::Home => "/".to_string(),
            SmkRoute::ArtworkDetail { object_number } => {
                format!("/artwork/{}", urlencoding::encode(object_number))
            }
            SmkRoute::Login => "/login".to_string(),
            SmkRoute::Register => "/register".to_string(),
            SmkRoute::Collections => "/collections".to_string(),
            SmkRoute::CollectionDetail { id } => format!("/collections/{}", id),
        }
    }
}

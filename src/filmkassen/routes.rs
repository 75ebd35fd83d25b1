//! Filmkassen navigation targets.

use crate::routing::Router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmView {
    Home,
    MovieDetail,
    Director,
    Login,
    Register,
    Collections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmRoute {
    Home,
    MovieDetail { id: i64 },
    Director { id: i64 },
    Login,
    Register,
    Collections,
}

pub fn router() -> Router<FilmView> {
    Router::new()
        .route("home", "/", FilmView::Home)
        .route("movie-detail", "/movie/:id", FilmView::MovieDetail)
        .route("director", "/director/:id", FilmView::Director)
        .route("login", "/login", FilmView::Login)
        .route("register", "/register", FilmView::Register)
        .route("collections", "/collections", FilmView::Collections)
}

impl FilmRoute {
    /// Resolves a path; `None` for unknown paths and malformed ids.
    pub fn resolve(router: &Router<FilmView>, path: &str) -> Option<Self> {
        let target = router.resolve(path)?;
        let route = match target.route.view {
            FilmView::Home => FilmRoute::Home,
            FilmView::MovieDetail => FilmRoute::MovieDetail {
                id: target.params.parse("id")?,
            },
            FilmView::Director => FilmRoute::Director {
                id: target.params.parse("id")?,
            },
            FilmView::Login => FilmRoute::Login,
            FilmView::Register => FilmRoute::Register,
            FilmView::Collections => FilmRoute::Collections,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            FilmRoute::Home => "/".to_string(),
            FilmRoute::MovieDetail { id } => format!("/movie/{}", id),
            FilmRoute::Director { id } => format!("/director/{}", id),
            FilmRoute::Login => "/login".to_string(),
            FilmRoute::Register => "/register".to_string(),
            FilmRoute::Collections => "/collections".to_string(),
        }
    }
}

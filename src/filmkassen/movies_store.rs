use std::sync::Arc;
use tracing::debug;

use super::api::FilmkassenApi;
use super::messages::*;
use super::models::{Director, DirectorMovies, Movie, MovieSearchResponse, MovieSummary};
use crate::api::ApiError;
use crate::store::{detail_or, HasStatus, Status, Store};

#[derive(Debug, Clone, Default)]
pub struct MoviesState {
    pub search_results: Vec<MovieSummary>,
    pub current_movie: Option<Movie>,
    pub current_director: Option<Director>,
    pub director_movies: Vec<MovieSummary>,
    pub status: Status,
}

impl HasStatus for MoviesState {
    fn status(&self) -> &Status {
        &self.status
    }
    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }
}

pub struct MoviesStore {
    api: Arc<FilmkassenApi>,
    state: Store<MoviesState>,
}

impl MoviesStore {
    pub fn new(api: Arc<FilmkassenApi>) -> Self {
        Self {
            api,
            state: Store::default(),
        }
    }

    pub fn state(&self) -> &Store<MoviesState> {
        &self.state
    }

    pub async fn search_movies(
        &self,
        title: &str,
        director: Option<&str>,
    ) -> Result<MovieSearchResponse, ApiError> {
        self.state
            .track(
                self.api.search_movies(title, director),
                detail_or(SEARCH_FAILED),
                |s, response| s.search_results = response.movies.clone(),
            )
            .await
    }

    /// A 404 empties `current_movie`, so a missing film never shows the
    /// previous one.
    pub async fn get_movie_details(&self, movie_id: i64) -> Result<Movie, ApiError> {
        debug!("Fetching movie details for id {}", movie_id);
        let result = self
            .state
            .track(
                self.api.get_movie(movie_id),
                detail_or(MOVIE_DETAILS_FAILED),
                |s, movie| s.current_movie = Some(movie.clone()),
            )
            .await;
        if matches!(&result, Err(err) if err.is_not_found()) {
            self.clear_current_movie();
        }
        result
    }

    /// Director hits are returned to the caller, not cached.
    pub async fn search_directors(&self, name: &str) -> Result<Vec<Director>, ApiError> {
        self.state
            .track(
                self.api.search_directors(name),
                detail_or(DIRECTOR_SEARCH_FAILED),
                |_, _| {},
            )
            .await
            .map(|response| response.directors)
    }

    pub async fn get_director_movies(&self, director_id: i64) -> Result<DirectorMovies, ApiError> {
        let result = self
            .state
            .track(
                self.api.get_director_movies(director_id),
                detail_or(DIRECTOR_MOVIES_FAILED),
                |s, response| {
                    s.current_director = Some(response.director.clone());
                    s.director_movies = response.movies.clone();
                },
            )
            .await;
        if matches!(&result, Err(err) if err.is_not_found()) {
            self.clear_current_director();
        }
        result
    }

    pub fn clear_search_results(&self) {
        self.state.update(|s| s.search_results.clear());
    }

    pub fn clear_current_movie(&self) {
        self.state.update(|s| s.current_movie = None);
    }

    pub fn clear_current_director(&self) {
        self.state.update(|s| {
            s.current_director = None;
            s.director_movies.clear();
        });
    }

    pub fn clear_error(&self) {
        self.state.clear_error();
    }
}

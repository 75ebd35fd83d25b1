//! User-facing (Danish) failure messages.

pub const LOGIN_FAILED: &str = "Login fejlede";
pub const REGISTER_FAILED: &str = "Registrering fejlede";
pub const LOGOUT_FAILED: &str = "Log ud fejlede";

pub const SEARCH_FAILED: &str = "Søgning fejlede";
pub const MOVIE_DETAILS_FAILED: &str = "Hentning af filmdetaljer fejlede";
pub const DIRECTOR_SEARCH_FAILED: &str = "Søgning efter instruktør fejlede";
pub const DIRECTOR_MOVIES_FAILED: &str = "Hentning af instruktørs film fejlede";

pub const LOGIN_REQUIRED_FOR_COLLECTIONS: &str = "Du skal logge ind for at se dine filmkasser";
pub const FETCH_COLLECTIONS_FAILED: &str = "Hentning af filmkasser fejlede";
pub const CREATE_COLLECTION_FAILED: &str = "Oprettelse af filmkasse fejlede";
pub const COLLECTION_DETAILS_FAILED: &str = "Hentning af filmkasse detaljer fejlede";
pub const UPDATE_COLLECTION_FAILED: &str = "Opdatering af filmkasse fejlede";
pub const DELETE_COLLECTION_FAILED: &str = "Sletning af filmkasse fejlede";
pub const ADD_MOVIE_FAILED: &str = "Tilføjelse af film til filmkasse fejlede";
pub const REMOVE_MOVIE_FAILED: &str = "Fjernelse af film fra filmkasse fejlede";
pub const UPDATE_NOTE_FAILED: &str = "Opdatering af filmnote fejlede";

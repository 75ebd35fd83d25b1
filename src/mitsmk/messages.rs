//! User-facing (Danish) failure messages.

pub const LOGIN_FAILED: &str = "Login mislykkedes";
pub const REGISTER_FAILED: &str = "Oprettelse af bruger mislykkedes";

pub const SEARCH_FAILED: &str = "Søgning efter kunstværker fejlede";
pub const ARTWORK_FAILED: &str = "Hentning af kunstværk fejlede";

pub const FETCH_COLLECTIONS_FAILED: &str = "Hentning af samlinger fejlede";
pub const CREATE_COLLECTION_FAILED: &str = "Oprettelse af samling fejlede";
pub const UPDATE_COLLECTION_FAILED: &str = "Opdatering af samling fejlede";
pub const DELETE_COLLECTION_FAILED: &str = "Sletning af samling fejlede";
pub const COLLECTION_DETAILS_FAILED: &str = "Hentning af samling fejlede";
pub const ADD_ARTWORK_FAILED: &str = "Tilføjelse af kunstværk til samling fejlede";
pub const REMOVE_ARTWORK_FAILED: &str = "Fjernelse af kunstværk fra samling fejlede";

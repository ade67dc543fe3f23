//! Scout core: filter state, search URLs and the pure chat routing state machine.
mod catalog;
mod effect;
mod filters;
mod keyboard;
mod msg;
mod search_url;
mod sessions;
mod text;
mod update;

pub use catalog::{areas, experience, Catalog};
pub use effect::Effect;
pub use filters::{FilterField, FilterState, DEFAULT_AREA, DEFAULT_EXPERIENCE};
pub use keyboard::{area_menu, experience_menu, load_more_button, Button, Callback};
pub use msg::Msg;
pub use search_url::{
    build_search_url, UrlError, DEFAULT_SEARCH_URL, PARAM_AREA, PARAM_EXPERIENCE, PARAM_PAGE,
    PARAM_QUERY, VACANCIES_PER_PAGE,
};
pub use sessions::{ChatId, Session, SessionStore};
pub use text::{
    AREA_PROMPT, EXPERIENCE_PROMPT, GENERIC_FAILURE, HELP_TEXT, INVALID_QUERY, NO_MORE_VACANCIES,
    SEARCH_FIRST, SELECTION_SAVED, SESSION_CLEARED, WELCOME_TEXT,
};
pub use update::{update, AppState, DEFAULT_SESSION_TTL};

//! User-facing reply texts.

pub const WELCOME_TEXT: &str = "Welcome.
The bot can return a pdf with job vacancies at the search query.
For help with bot commands, send /help";

pub const HELP_TEXT: &str = "Available commands:
/select_exp - set the work experience
/select_area - set the city to search
/stop - forget your filters";

pub const EXPERIENCE_PROMPT: &str = "Select the work experience";
pub const AREA_PROMPT: &str = "Select the city to search";
pub const SELECTION_SAVED: &str = "Success";
pub const SESSION_CLEARED: &str = "Your filters were reset";
pub const INVALID_QUERY: &str = "Invalid search query";

/// Reply when the requested page is past the last page of results.
pub const NO_MORE_VACANCIES: &str = "There are no more vacancies";
/// Reply for every fetch, extraction and render failure.
pub const GENERIC_FAILURE: &str = "Error";
pub const SEARCH_FIRST: &str = "Send a search query first";

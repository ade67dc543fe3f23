use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::FilterState;

pub const DEFAULT_SEARCH_URL: &str = "https://hh.ru/search/vacancy";
pub const PARAM_QUERY: &str = "text";
pub const PARAM_EXPERIENCE: &str = "experience";
pub const PARAM_AREA: &str = "area";
pub const PARAM_PAGE: &str = "page";
/// Results the site shows per page; used for display numbering only.
pub const VACANCIES_PER_PAGE: u32 = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid search base url {base}: {message}")]
    InvalidBase { base: String, message: String },
    #[error("filter field `{0}` is empty")]
    MissingField(&'static str),
}

/// Builds the results-page URL for `filters`.
///
/// Parameters always appear as `text`, `experience`, `area`, `page`; every value is
/// form-encoded so spaces become `+`.
pub fn build_search_url(base: &str, filters: &FilterState) -> Result<String, UrlError> {
    Url::parse(base).map_err(|err| UrlError::InvalidBase {
        base: base.to_string(),
        message: err.to_string(),
    })?;
    if filters.experience.is_empty() {
        return Err(UrlError::MissingField(PARAM_EXPERIENCE));
    }
    if filters.area.is_empty() {
        return Err(UrlError::MissingField(PARAM_AREA));
    }

    Ok(format!(
        "{base}?{PARAM_QUERY}={}&{PARAM_EXPERIENCE}={}&{PARAM_AREA}={}&{PARAM_PAGE}={}",
        encode(&filters.query),
        encode(&filters.experience),
        encode(&filters.area),
        filters.page,
    ))
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

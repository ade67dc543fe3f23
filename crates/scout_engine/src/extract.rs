use scout_logging::scout_warn;
use scraper::{ElementRef, Html, Selector};

use crate::{ExtractionResult, VacancyRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("vacancy block {index} has no {element}")]
    MissingElement { index: usize, element: &'static str },
}

/// Site-specific queries over one parsed results page.
///
/// Everything that depends on the site's markup lives behind this trait, so a
/// layout change only touches the implementation.
pub trait Extractor: Send + Sync {
    /// Total number of vacancies found; 0 when the heading is missing or unreadable.
    fn total_count(&self, doc: &Html) -> u64;

    /// Highest zero-based page index; `prior` when the page has no pagination.
    fn max_page(&self, doc: &Html, prior: u32) -> u32;

    /// Vacancies on this page in page order.
    fn vacancies(&self, doc: &Html) -> Result<Vec<VacancyRecord>, ExtractError>;

    fn extract(&self, markup: &str, prior_max_page: u32) -> Result<ExtractionResult, ExtractError> {
        let doc = Html::parse_document(markup);
        Ok(ExtractionResult {
            total_count: self.total_count(&doc),
            max_page: self.max_page(&doc, prior_max_page),
            vacancies: self.vacancies(&doc)?,
        })
    }
}

/// Extractor for the hh.ru search results layout.
#[derive(Debug)]
pub struct HhExtractor {
    count_heading: Selector,
    pager: Selector,
    last_page_link: Selector,
    last_page_button: Selector,
    item: Selector,
    item_heading: Selector,
    heading_span: Selector,
    link: Selector,
    salary: Selector,
    snippet: Selector,
}

impl HhExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            count_heading: selector(r#"h1[data-qa="bloko-header-1"]"#)?,
            pager: selector(r#"div[data-qa="pager-block"]"#)?,
            last_page_link: selector(
                ".pager-item-not-in-short-range > .pager-item-not-in-short-range > a",
            )?,
            last_page_button: selector(".bloko-button-group > span:last-child")?,
            item: selector(".vacancy-serp-item")?,
            item_heading: selector(".resume-search-item__name")?,
            heading_span: selector("span")?,
            link: selector("a")?,
            salary: selector(".vacancy-serp-item__sidebar")?,
            snippet: selector(
                r#"div[data-qa="vacancy-serp__vacancy_snippet_requirement"]"#,
            )?,
        })
    }

    fn vacancy(&self, index: usize, item: ElementRef<'_>) -> Result<VacancyRecord, ExtractError> {
        let missing = |element| ExtractError::MissingElement { index, element };

        let heading = item
            .select(&self.item_heading)
            .next()
            .ok_or(missing("heading"))?;
        let url = heading
            .select(&self.heading_span)
            .next()
            .and_then(|span| span.select(&self.link).next())
            .and_then(|link| link.value().attr("href"))
            .ok_or(missing("link"))?;
        let salary = item
            .select(&self.salary)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let description = item
            .select(&self.snippet)
            .next()
            .map(element_text)
            .ok_or(missing("snippet"))?;

        Ok(VacancyRecord {
            title: element_text(heading),
            url: url.to_string(),
            salary,
            description,
        })
    }
}

impl Extractor for HhExtractor {
    fn total_count(&self, doc: &Html) -> u64 {
        let Some(heading) = doc.select(&self.count_heading).next() else {
            return 0;
        };
        let digits: String = heading
            .text()
            .flat_map(str::chars)
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(0)
    }

    fn max_page(&self, doc: &Html, prior: u32) -> u32 {
        let Some(pager) = doc.select(&self.pager).next() else {
            return prior;
        };
        let label = pager
            .select(&self.last_page_link)
            .next()
            .or_else(|| pager.select(&self.last_page_button).next())
            .map(element_text);
        let Some(label) = label else {
            return prior;
        };
        match label.parse::<u32>() {
            // Labels count from 1, page indexes from 0.
            Ok(last) => last.saturating_sub(1),
            Err(_) => {
                scout_warn!("unreadable last page label {:?}", label);
                prior
            }
        }
    }

    fn vacancies(&self, doc: &Html) -> Result<Vec<VacancyRecord>, ExtractError> {
        doc.select(&self.item)
            .enumerate()
            .map(|(index, item)| self.vacancy(index, item))
            .collect()
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|err| ExtractError::Selector {
        selector: css.to_string(),
        message: err.to_string(),
    })
}

/// Element text with runs of whitespace (including non-breaking spaces) collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

use std::sync::Arc;

use scout_core::{
    areas, build_search_url, experience, FilterState, UrlError, GENERIC_FAILURE,
    NO_MORE_VACANCIES, VACANCIES_PER_PAGE,
};
use scout_logging::{scout_debug, scout_error, scout_info};

use crate::{
    decode_markup, document_filename, Document, ExtractError, ExtractionResult, Extractor,
    FetchError, Fetcher, RenderContext, RenderError, Renderer, RequestResult,
};

/// Max page assumed when a results page has no pagination.
const SINGLE_PAGE: u32 = 0;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("search url: {0}")]
    Url(#[from] UrlError),
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error("extract: {0}")]
    Extract(#[from] ExtractError),
    #[error("page {page} is past the last page {max_page}")]
    NoMoreVacancies { page: u32, max_page: u32 },
    #[error("render: {0}")]
    Render(#[from] RenderError),
}

/// Fetch, extract, bounds-check and render one page of search results.
pub struct SearchPipeline {
    search_url: String,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    renderer: Arc<Renderer>,
}

impl SearchPipeline {
    pub fn new(
        search_url: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        renderer: Arc<Renderer>,
    ) -> Self {
        Self {
            search_url: search_url.into(),
            fetcher,
            extractor,
            renderer,
        }
    }

    /// Runs the whole request; every error collapses into a short user message.
    pub async fn run(&self, filters: &FilterState) -> RequestResult {
        match self.try_run(filters).await {
            Ok(document) => {
                scout_info!(
                    "rendered {} ({} bytes) for query {:?}",
                    document.filename,
                    document.bytes.len(),
                    filters.query
                );
                RequestResult::Success(document)
            }
            Err(PipelineError::NoMoreVacancies { page, max_page }) => {
                scout_info!("page {} requested, last page is {}", page, max_page);
                RequestResult::Failure(NO_MORE_VACANCIES.to_string())
            }
            Err(err) => {
                scout_error!(
                    "search {:?} page {} failed: {}",
                    filters.query,
                    filters.page,
                    err
                );
                RequestResult::Failure(GENERIC_FAILURE.to_string())
            }
        }
    }

    pub async fn try_run(&self, filters: &FilterState) -> Result<Document, PipelineError> {
        let url = build_search_url(&self.search_url, filters)?;
        let fetched = self.fetcher.fetch(&url).await?;
        let markup = decode_markup(&fetched.bytes, fetched.content_type.as_deref());
        scout_debug!(
            "fetched {} ({} bytes, {})",
            fetched.final_url,
            fetched.bytes.len(),
            markup.encoding
        );
        let extraction = self.extractor.extract(&markup.text, SINGLE_PAGE)?;

        if filters.page > extraction.max_page {
            return Err(PipelineError::NoMoreVacancies {
                page: filters.page,
                max_page: extraction.max_page,
            });
        }

        let ctx = render_context(filters, extraction);
        let renderer = Arc::clone(&self.renderer);
        let bytes = tokio::task::spawn_blocking(move || renderer.render(&ctx))
            .await
            .map_err(|err| RenderError::Interrupted(err.to_string()))??;

        Ok(Document {
            filename: document_filename(filters.page, self.renderer.format()),
            bytes,
        })
    }
}

fn render_context(filters: &FilterState, extraction: ExtractionResult) -> RenderContext {
    RenderContext {
        query: filters.query.clone(),
        num_vacancies: extraction.total_count,
        exp: experience()
            .label_for(&filters.experience)
            .map(str::to_string),
        area: areas().label_for(&filters.area).map(str::to_string),
        vacancies: extraction.vacancies,
        offset_indexes: filters.page.saturating_mul(VACANCIES_PER_PAGE),
    }
}

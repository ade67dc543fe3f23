//! Scout engine: fetching, scraping and rendering of search result pages.
mod decode;
mod extract;
mod fetch;
mod pipeline;
mod render;
mod template;
mod types;
mod user_agent;

pub use decode::{decode_markup, Markup};
pub use extract::{ExtractError, Extractor, HhExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use pipeline::{PipelineError, SearchPipeline};
pub use render::{
    document_filename, BrowserLauncher, ChromePdfConverter, DocumentConverter, DocumentFormat,
    HeadlessChrome, HtmlPassthrough, PdfPrinter, RenderError, Renderer,
};
pub use template::{RenderContext, TemplateEngine, TemplateSource, TEMPLATE_NAME};
pub use types::{
    Document, ExtractionResult, FailureKind, FetchError, FetchOutput, RequestResult, VacancyRecord,
};
pub use user_agent::UserAgentPool;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use scout_logging::{scout_debug, scout_info, scout_warn};
use serde::Deserialize;

use crate::template::{RenderContext, TemplateEngine, TemplateSource};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template not found: {0:?}")]
    TemplateNotFound(PathBuf),
    #[error("unknown template placeholder `{0}`")]
    UnknownPlaceholder(String),
    #[error("template pattern: {0}")]
    Pattern(String),
    #[error("document conversion failed: {0}")]
    Conversion(String),
    #[error("render task did not finish: {0}")]
    Interrupted(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Html,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Html => "html",
        }
    }
}

/// `vacancies{page}.{ext}`, so each page of one search gets its own name.
pub fn document_filename(page: u32, format: DocumentFormat) -> String {
    format!("vacancies{page}.{}", format.extension())
}

/// Second render stage: filled HTML to the output document.
pub trait DocumentConverter: Send + Sync {
    fn format(&self) -> DocumentFormat;
    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Delivers the filled template as an HTML document.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlPassthrough;

impl DocumentConverter for HtmlPassthrough {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Html
    }

    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        Ok(html.as_bytes().to_vec())
    }
}

/// Chrome's own default closes the browser after 30 s without events.
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// A running browser that can print one local page to PDF.
pub trait PdfPrinter: Send {
    /// Cheap liveness check run before every conversion.
    fn is_alive(&self) -> bool;
    fn print(&self, url: &str) -> Result<Vec<u8>, RenderError>;
}

/// Starts browsers for `ChromePdfConverter`.
pub trait BrowserLauncher: Send + Sync {
    fn launch(&self) -> Result<Box<dyn PdfPrinter>, RenderError>;
}

/// Launches a local headless Chrome.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessChrome;

impl BrowserLauncher for HeadlessChrome {
    fn launch(&self) -> Result<Box<dyn PdfPrinter>, RenderError> {
        scout_debug!("launching headless chrome");
        let options = LaunchOptions::default_builder()
            .idle_browser_timeout(IDLE_BROWSER_TIMEOUT)
            .build()
            .map_err(conversion)?;
        let browser = Browser::new(options).map_err(conversion)?;
        Ok(Box::new(browser))
    }
}

impl PdfPrinter for Browser {
    fn is_alive(&self) -> bool {
        self.get_version().is_ok()
    }

    fn print(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        let tab = self.new_tab().map_err(conversion)?;
        tab.navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(conversion)?;
        let pdf = tab
            .print_to_pdf(Some(PrintToPdfOptions {
                print_background: Some(true),
                ..Default::default()
            }))
            .map_err(conversion)?;
        if let Err(err) = tab.close(true) {
            scout_debug!("closing tab failed: {}", err);
        }
        Ok(pdf)
    }
}

/// Prints the page to PDF with a headless browser.
///
/// The browser is started on first use and kept. A browser that no longer
/// answers is replaced before printing, and a failed print is retried once on
/// a fresh browser.
pub struct ChromePdfConverter {
    launcher: Box<dyn BrowserLauncher>,
    browser: Mutex<Option<Box<dyn PdfPrinter>>>,
}

impl Default for ChromePdfConverter {
    fn default() -> Self {
        Self::with_launcher(HeadlessChrome)
    }
}

impl ChromePdfConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_launcher(launcher: impl BrowserLauncher + 'static) -> Self {
        Self {
            launcher: Box::new(launcher),
            browser: Mutex::new(None),
        }
    }

    fn print_with(
        &self,
        slot: &mut Option<Box<dyn PdfPrinter>>,
        url: &str,
    ) -> Result<Vec<u8>, RenderError> {
        if slot.as_ref().is_some_and(|browser| !browser.is_alive()) {
            scout_info!("cached browser stopped responding, relaunching");
            *slot = None;
        }
        let browser = match slot.take() {
            Some(browser) => browser,
            None => self.launcher.launch()?,
        };
        let result = browser.print(url);
        if result.is_ok() {
            *slot = Some(browser);
        }
        result
    }
}

impl DocumentConverter for ChromePdfConverter {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn convert(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut page = tempfile::Builder::new()
            .prefix("vacancies")
            .suffix(".html")
            .tempfile()?;
        page.write_all(html.as_bytes())?;
        page.flush()?;
        let url = format!("file://{}", page.path().display());

        let mut guard = self
            .browser
            .lock()
            .map_err(|_| RenderError::Conversion("browser lock poisoned".into()))?;
        match self.print_with(&mut guard, &url) {
            Ok(pdf) => Ok(pdf),
            Err(err) => {
                scout_warn!("pdf conversion failed, retrying on a new browser: {}", err);
                self.print_with(&mut guard, &url)
            }
        }
    }
}

fn conversion(err: impl std::fmt::Display) -> RenderError {
    RenderError::Conversion(err.to_string())
}

/// Template fill followed by document conversion. Either stage failing yields no document.
pub struct Renderer {
    engine: TemplateEngine,
    source: TemplateSource,
    converter: Arc<dyn DocumentConverter>,
}

impl Renderer {
    pub fn new(
        source: TemplateSource,
        converter: Arc<dyn DocumentConverter>,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            source,
            converter,
        })
    }

    pub fn format(&self) -> DocumentFormat {
        self.converter.format()
    }

    pub fn render_html(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let template = self.engine.load(&self.source)?;
        self.engine.fill(&template, ctx)
    }

    pub fn render(&self, ctx: &RenderContext) -> Result<Vec<u8>, RenderError> {
        let html = self.render_html(ctx)?;
        self.converter.convert(&html)
    }
}

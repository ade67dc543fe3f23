//! Fakes shared by the bot integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scout_bot::{Bot, ChatTransport, EffectRunner, TelegramError};
use scout_core::{AppState, Button, ChatId};
use scout_engine::{
    Document, FetchError, FetchOutput, Fetcher, HhExtractor, HtmlPassthrough, Renderer,
    SearchPipeline, TemplateSource, TEMPLATE_NAME,
};

pub const COMPACT_TEMPLATE: &str =
    "{{query}}|{{num_vacancies}}|{{exp}}|{{area}}|{{#vacancies}}[{{index}}]{{/vacancies}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ChatId, String),
    Menu(ChatId, String, Vec<Button>),
    Document(ChatId, Document, Vec<Button>),
    Ack(String),
}

#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<Sent>>,
}

impl RecordingTransport {
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Text(chat_id, text.to_string()));
        Ok(())
    }

    async fn send_menu(
        &self,
        chat_id: ChatId,
        prompt: &str,
        buttons: &[Button],
    ) -> Result<(), TelegramError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Menu(chat_id, prompt.to_string(), buttons.to_vec()));
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        document: &Document,
        buttons: &[Button],
    ) -> Result<(), TelegramError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Document(chat_id, document.clone(), buttons.to_vec()));
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), TelegramError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Ack(callback_id.to_string()));
        Ok(())
    }
}

/// Serves the same results page for every URL and remembers what was asked for.
pub struct PageFetcher {
    page: String,
    pub urls: Mutex<Vec<String>>,
}

impl PageFetcher {
    pub fn new(page: String) -> Arc<Self> {
        Arc::new(Self {
            page,
            urls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Fetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(FetchOutput {
            bytes: self.page.clone().into_bytes(),
            content_type: Some("text/html; charset=utf-8".into()),
            final_url: url.to_string(),
        })
    }
}

/// Two result pages of `per_page` vacancies each.
pub fn two_page_results(per_page: usize) -> String {
    let mut html = String::from("<html><body>");
    html.push_str("<h1 data-qa=\"bloko-header-1\">Найдено 40 вакансий</h1>");
    for i in 0..per_page {
        html.push_str(&format!(
            "<div class=\"vacancy-serp-item\">\
             <div class=\"resume-search-item__name\"><span><a href=\"https://hh.ru/vacancy/{i}\">Job {i}</a></span></div>\
             <div data-qa=\"vacancy-serp__vacancy_snippet_requirement\">Skills {i}</div></div>"
        ));
    }
    html.push_str(
        "<div data-qa=\"pager-block\"><span class=\"bloko-button-group\">\
         <span><a>1</a></span><span><a>2</a></span></span></div></body></html>",
    );
    html
}

pub fn html_pipeline(fetcher: Arc<dyn Fetcher>, templates: &tempfile::TempDir) -> SearchPipeline {
    let template = templates.path().join(TEMPLATE_NAME);
    std::fs::write(template, COMPACT_TEMPLATE).unwrap();
    let renderer = Renderer::new(
        TemplateSource::Directory(templates.path().to_path_buf()),
        Arc::new(HtmlPassthrough),
    )
    .unwrap();
    SearchPipeline::new(
        "https://hh.ru/search/vacancy",
        fetcher,
        Arc::new(HhExtractor::new().unwrap()),
        Arc::new(renderer),
    )
}

pub fn bot_with(pipeline: SearchPipeline, transport: Arc<dyn ChatTransport>) -> Bot {
    Bot::new(
        AppState::default(),
        EffectRunner::new(Arc::new(pipeline), transport),
    )
}

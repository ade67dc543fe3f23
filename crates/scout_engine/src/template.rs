use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::{RenderError, VacancyRecord};

/// File name looked up in a templates directory.
pub const TEMPLATE_NAME: &str = "vacancies.html";
const BUILTIN_TEMPLATE: &str = include_str!("../templates/vacancies.html");

/// Where the page template comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum TemplateSource {
    #[default]
    Builtin,
    /// `vacancies.html` inside this directory, read on every render.
    Directory(PathBuf),
}

/// Values available to the template for one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub query: String,
    pub num_vacancies: u64,
    /// Human readable experience label; `None` when the stored code is not in the menu.
    pub exp: Option<String>,
    pub area: Option<String>,
    pub vacancies: Vec<VacancyRecord>,
    /// Page index times page size; display numbering starts after it.
    pub offset_indexes: u32,
}

/// Placeholder templates: `{{ name }}` values and one `{{#vacancies}}...{{/vacancies}}` block.
///
/// Values are HTML-escaped. An unknown name is an error rather than an empty string.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    block: Regex,
    field: Regex,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            block: pattern(r"(?s)\{\{#vacancies\}\}(.*?)\{\{/vacancies\}\}")?,
            field: pattern(r"\{\{\s*([^{}\s]+)\s*\}\}")?,
        })
    }

    pub fn load(&self, source: &TemplateSource) -> Result<Cow<'static, str>, RenderError> {
        match source {
            TemplateSource::Builtin => Ok(Cow::Borrowed(BUILTIN_TEMPLATE)),
            TemplateSource::Directory(dir) => {
                let path = dir.join(TEMPLATE_NAME);
                fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|err| match err.kind() {
                        io::ErrorKind::NotFound => RenderError::TemplateNotFound(path),
                        _ => RenderError::Io(err),
                    })
            }
        }
    }

    pub fn fill(&self, template: &str, ctx: &RenderContext) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.len() * 2);
        let mut last = 0;
        let page = |name: &str| page_value(ctx, name);
        for caps in self.block.captures_iter(template) {
            let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&self.substitute(&template[last..whole.start()], page)?);
            for (position, vacancy) in ctx.vacancies.iter().enumerate() {
                let index = ctx.offset_indexes as usize + position + 1;
                out.push_str(&self.substitute(body.as_str(), |name| {
                    vacancy_value(vacancy, index, name).or_else(|| page(name))
                })?);
            }
            last = whole.end();
        }
        out.push_str(&self.substitute(&template[last..], page)?);
        Ok(out)
    }

    fn substitute(
        &self,
        text: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, RenderError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.field.captures_iter(text) {
            let (whole, name) = split_field(&caps);
            let value = lookup(name)
                .ok_or_else(|| RenderError::UnknownPlaceholder(name.to_string()))?;
            out.push_str(&text[last..whole.0]);
            out.push_str(&escape_html(&value));
            last = whole.1;
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}

fn split_field<'t>(caps: &Captures<'t>) -> ((usize, usize), &'t str) {
    let whole = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
    let name = caps.get(1).map_or("", |m| m.as_str());
    (whole, name)
}

fn page_value(ctx: &RenderContext, name: &str) -> Option<String> {
    let shown = ctx.vacancies.len() as u64;
    let offset = u64::from(ctx.offset_indexes);
    Some(match name {
        "query" => ctx.query.clone(),
        "num_vacancies" => ctx.num_vacancies.to_string(),
        "exp" => ctx.exp.clone().unwrap_or_default(),
        "area" => ctx.area.clone().unwrap_or_default(),
        "offset_indexes" => offset.to_string(),
        "first_index" => (offset + shown.min(1)).to_string(),
        "last_index" => (offset + shown).to_string(),
        _ => return None,
    })
}

fn vacancy_value(vacancy: &VacancyRecord, index: usize, name: &str) -> Option<String> {
    Some(match name {
        "index" => index.to_string(),
        "title" => vacancy.title.clone(),
        "url" => vacancy.url.clone(),
        "salary" => vacancy.salary.clone(),
        "description" => vacancy.description.clone(),
        _ => return None,
    })
}

fn pattern(re: &str) -> Result<Regex, RenderError> {
    Regex::new(re)
        .map_err(|err| RenderError::Pattern(err.to_string()))
}

pub(crate) fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

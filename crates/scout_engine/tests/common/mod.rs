//! Results page markup in the hh.ru layout.
#![allow(dead_code)]

pub enum Pager {
    None,
    /// Truncated pager with a jump-to-last link carrying this label.
    LastLink(u32),
    /// Every page has a button; the last one carries this label.
    Buttons(u32),
}

pub fn results_page(total_heading: &str, pager: Pager, vacancies: usize) -> String {
    let mut html = String::from("<html><head><meta charset=\"utf-8\"></head><body>\n");
    html.push_str(&format!(
        "<h1 data-qa=\"bloko-header-1\">{total_heading}</h1>\n"
    ));
    for i in 0..vacancies {
        html.push_str(&vacancy_block(i, true));
    }
    html.push_str(&pager_markup(pager));
    html.push_str("</body></html>\n");
    html
}

pub fn vacancy_block(i: usize, with_snippet: bool) -> String {
    let salary = if i % 2 == 0 {
        "<div class=\"vacancy-serp-item__sidebar\">100\u{a0}000 – 150\u{a0}000 руб.</div>"
    } else {
        ""
    };
    let snippet = if with_snippet {
        format!(
            "<div data-qa=\"vacancy-serp__vacancy_snippet_requirement\">Experience with <b>Rust</b> {i}</div>"
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"vacancy-serp-item\">\
         <div class=\"resume-search-item__name\"><span><a href=\"https://hh.ru/vacancy/{i}\">Backend developer {i}</a></span></div>\
         {salary}{snippet}</div>\n"
    )
}

fn pager_markup(pager: Pager) -> String {
    match pager {
        Pager::None => String::new(),
        Pager::LastLink(label) => format!(
            "<div data-qa=\"pager-block\">\
             <span class=\"bloko-button-group\"><span><a>1</a></span><span><a>2</a></span><span><a>3</a></span></span>\
             <span class=\"pager-item-not-in-short-range\"><span class=\"pager-item-not-in-short-range\"><a>{label}</a></span></span>\
             <a class=\"next\">next</a></div>\n"
        ),
        Pager::Buttons(last) => {
            let buttons: String = (1..=last)
                .map(|n| format!("<span><a>{n}</a></span>"))
                .collect();
            format!(
                "<div data-qa=\"pager-block\"><span class=\"bloko-button-group\">{buttons}</span></div>\n"
            )
        }
    }
}

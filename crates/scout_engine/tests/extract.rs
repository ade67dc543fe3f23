mod common;

use common::{results_page, vacancy_block, Pager};
use pretty_assertions::assert_eq;
use scout_engine::{ExtractError, Extractor, HhExtractor, VacancyRecord};
use scraper::Html;

fn extractor() -> HhExtractor {
    HhExtractor::new().expect("selectors parse")
}

fn doc(markup: &str) -> Html {
    Html::parse_document(markup)
}

#[test]
fn total_count_keeps_digits_only() {
    let page = results_page("Найдено 1\u{a0}234 вакансии «backend»", Pager::None, 0);
    assert_eq!(extractor().total_count(&doc(&page)), 1234);
}

#[test]
fn total_count_is_lenient() {
    let no_digits = results_page("Ничего не найдено", Pager::None, 0);
    assert_eq!(extractor().total_count(&doc(&no_digits)), 0);

    let no_heading = "<html><body><p>captcha</p></body></html>";
    assert_eq!(extractor().total_count(&doc(no_heading)), 0);
}

#[test]
fn last_page_link_label_is_one_based() {
    let page = results_page("120", Pager::LastLink(5), 0);
    assert_eq!(extractor().max_page(&doc(&page), 0), 4);
}

#[test]
fn button_group_is_used_without_last_page_link() {
    let page = results_page("45", Pager::Buttons(3), 0);
    assert_eq!(extractor().max_page(&doc(&page), 0), 2);
}

#[test]
fn missing_pager_keeps_prior_max_page() {
    let page = results_page("12", Pager::None, 12);
    assert_eq!(extractor().max_page(&doc(&page), 0), 0);
    assert_eq!(extractor().max_page(&doc(&page), 7), 7);
}

#[test]
fn unreadable_label_keeps_prior_max_page() {
    let page = concat!(
        "<div data-qa=\"pager-block\">",
        "<span class=\"bloko-button-group\"><span>…</span></span></div>",
    );
    assert_eq!(extractor().max_page(&doc(page), 3), 3);
}

#[test]
fn vacancies_are_extracted_in_page_order() {
    let page = results_page("120", Pager::LastLink(6), 3);
    let vacancies = extractor().vacancies(&doc(&page)).unwrap();

    assert_eq!(vacancies.len(), 3);
    assert_eq!(
        vacancies[0],
        VacancyRecord {
            title: "Backend developer 0".to_string(),
            url: "https://hh.ru/vacancy/0".to_string(),
            salary: "100 000 – 150 000 руб.".to_string(),
            description: "Experience with Rust 0".to_string(),
        }
    );
    assert_eq!(vacancies[1].salary, "");
    assert_eq!(vacancies[2].url, "https://hh.ru/vacancy/2");
}

#[test]
fn vacancy_without_snippet_fails_extraction() {
    let page = format!(
        "<html><body>{}{}</body></html>",
        vacancy_block(0, true),
        vacancy_block(1, false)
    );
    let err = extractor().vacancies(&doc(&page)).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingElement {
            index: 1,
            element: "snippet"
        }
    );
}

#[test]
fn extract_combines_all_queries() {
    let page = results_page("Найдено 120 вакансий", Pager::LastLink(6), 20);
    let result = extractor().extract(&page, 0).unwrap();
    assert_eq!(result.total_count, 120);
    assert_eq!(result.max_page, 5);
    assert_eq!(result.vacancies.len(), 20);
}

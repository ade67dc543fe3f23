use std::sync::Once;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use scout_core::{
    update, AppState, Callback, Effect, FilterState, Msg, AREA_PROMPT, HELP_TEXT, INVALID_QUERY,
    SEARCH_FIRST, SELECTION_SAVED, SESSION_CLEARED, WELCOME_TEXT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn text(state: AppState, chat_id: i64, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::TextReceived {
            chat_id,
            text: text.to_string(),
            at: Instant::now(),
        },
    )
}

fn press(state: AppState, chat_id: i64, data: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ButtonPressed {
            chat_id,
            data: data.to_string(),
            at: Instant::now(),
        },
    )
}

fn reply(chat_id: i64, text: &str) -> Effect {
    Effect::Reply {
        chat_id,
        text: text.to_string(),
    }
}

#[test]
fn start_and_help_reply_with_fixed_texts() {
    init_logging();
    let (state, effects) = text(AppState::new(), 1, "/start");
    assert_eq!(effects, vec![reply(1, WELCOME_TEXT)]);

    let (state, effects) = text(state, 1, "/help@scout_bot");
    assert_eq!(effects, vec![reply(1, HELP_TEXT)]);
    assert!(state.sessions().is_empty());
}

#[test]
fn area_menu_lists_every_city() {
    init_logging();
    let (_state, effects) = text(AppState::new(), 3, "/select_area");
    let [Effect::ShowMenu {
        chat_id,
        prompt,
        buttons,
    }] = effects.as_slice()
    else {
        panic!("expected one menu, got {effects:?}");
    };
    assert_eq!(*chat_id, 3);
    assert_eq!(prompt, AREA_PROMPT);
    let labels: Vec<_> = buttons.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(labels, vec!["Moscow", "StPetersburg", "Krasnodar"]);
    assert_eq!(buttons[0].callback_data, "area_1");
}

#[test]
fn search_text_runs_search_from_page_zero() {
    init_logging();
    let (state, _) = press(AppState::new(), 7, "exp_noExperience");
    let (state, _) = press(state, 7, "area_1");
    let (_state, effects) = text(state, 7, "  rust developer ");

    assert_eq!(
        effects,
        vec![Effect::RunSearch {
            chat_id: 7,
            filters: FilterState {
                query: "rust developer".to_string(),
                experience: "noExperience".to_string(),
                area: "1".to_string(),
                page: 0,
            },
        }]
    );
}

#[test]
fn load_more_advances_page_and_new_query_resets_it() {
    init_logging();
    let (state, _) = text(AppState::new(), 1, "backend");
    let (state, _) = press(state, 1, "load_more");
    let (state, effects) = press(state, 1, "load_more");
    let Effect::RunSearch { filters, .. } = &effects[0] else {
        panic!("expected search, got {effects:?}");
    };
    assert_eq!(filters.page, 2);

    let (_state, effects) = text(state, 1, "frontend");
    let Effect::RunSearch { filters, .. } = &effects[0] else {
        panic!("expected search, got {effects:?}");
    };
    assert_eq!(filters.page, 0);
    assert_eq!(filters.query, "frontend");
}

#[test]
fn load_more_without_a_search_asks_for_query() {
    init_logging();
    let (state, effects) = press(AppState::new(), 4, Callback::LoadMore.encode().as_str());
    assert_eq!(effects, vec![reply(4, SEARCH_FIRST)]);
    assert!(state.sessions().get(4).is_none());
}

#[test]
fn unknown_command_is_rejected_without_touching_filters() {
    init_logging();
    let (state, _) = text(AppState::new(), 2, "backend");
    let (state, effects) = text(state, 2, "/backend");
    assert_eq!(effects, vec![reply(2, INVALID_QUERY)]);
    assert_eq!(state.sessions().get(2).unwrap().filters.query, "backend");
}

#[test]
fn selections_are_isolated_per_chat() {
    init_logging();
    let (state, effects) = press(AppState::new(), 10, "area_2");
    assert_eq!(effects, vec![reply(10, SELECTION_SAVED)]);
    let (_state, effects) = text(state, 11, "qa");

    let Effect::RunSearch { filters, .. } = &effects[0] else {
        panic!("expected search, got {effects:?}");
    };
    assert_eq!(filters.area, "53");
}

#[test]
fn stop_forgets_filters() {
    init_logging();
    let (state, _) = press(AppState::new(), 5, "area_2");
    let (state, effects) = text(state, 5, "/stop");
    assert_eq!(effects, vec![reply(5, SESSION_CLEARED)]);
    assert!(state.sessions().get(5).is_none());
}

#[test]
fn tick_evicts_idle_sessions() {
    init_logging();
    let start = Instant::now();
    let state = AppState::with_session_ttl(Duration::from_secs(10));
    let (state, _) = update(
        state,
        Msg::ButtonPressed {
            chat_id: 1,
            data: "area_1".into(),
            at: start,
        },
    );
    let (state, _) = update(
        state,
        Msg::ButtonPressed {
            chat_id: 2,
            data: "area_2".into(),
            at: start + Duration::from_secs(8),
        },
    );

    let (state, effects) = update(
        state,
        Msg::Tick {
            now: start + Duration::from_secs(15),
        },
    );
    assert!(effects.is_empty());
    assert!(state.sessions().get(1).is_none());
    assert!(state.sessions().get(2).is_some());
}

#[test]
fn unknown_button_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = press(state.clone(), 1, "something_else");
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

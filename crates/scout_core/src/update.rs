use std::time::{Duration, Instant};

use crate::text::{
    AREA_PROMPT, EXPERIENCE_PROMPT, HELP_TEXT, INVALID_QUERY, SEARCH_FIRST, SELECTION_SAVED,
    SESSION_CLEARED, WELCOME_TEXT,
};
use crate::{area_menu, experience_menu, Callback, ChatId, Effect, FilterField, Msg, SessionStore};

/// Sessions untouched for this long are dropped on the next tick.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    sessions: SessionStore,
    session_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_session_ttl(DEFAULT_SESSION_TTL)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_ttl(session_ttl: Duration) -> Self {
        Self {
            sessions: SessionStore::new(),
            session_ttl,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

enum Command {
    Start,
    Help,
    SelectExperience,
    SelectArea,
    Stop,
    Unknown,
}

/// Pure update function: applies a chat message to state and returns the effects to run.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextReceived { chat_id, text, at } => match parse_command(&text) {
            Some(command) => handle_command(&mut state, chat_id, command),
            None => search_requested(&mut state, chat_id, text.trim(), at),
        },
        Msg::ButtonPressed { chat_id, data, at } => match Callback::parse(&data) {
            Some(Callback::Experience(code)) => {
                set_filter(&mut state, chat_id, FilterField::Experience(code), at)
            }
            Some(Callback::Area(code)) => {
                set_filter(&mut state, chat_id, FilterField::Area(code), at)
            }
            Some(Callback::LoadMore) => load_more(&mut state, chat_id, at),
            None => Vec::new(),
        },
        Msg::SessionEnded { chat_id } => {
            state.sessions.evict(chat_id);
            Vec::new()
        }
        Msg::Tick { now } => {
            let ttl = state.session_ttl;
            state.sessions.evict_idle(now, ttl);
            Vec::new()
        }
    };

    (state, effects)
}

fn parse_command(text: &str) -> Option<Command> {
    let word = text.split_whitespace().next()?;
    let name = word.strip_prefix('/')?;
    // Group chats address commands as `/help@bot_name`.
    let name = name.split('@').next().unwrap_or(name);
    Some(match name {
        "start" => Command::Start,
        "help" => Command::Help,
        "select_exp" => Command::SelectExperience,
        "select_area" => Command::SelectArea,
        "stop" => Command::Stop,
        _ => Command::Unknown,
    })
}

fn handle_command(state: &mut AppState, chat_id: ChatId, command: Command) -> Vec<Effect> {
    match command {
        Command::Start => vec![reply(chat_id, WELCOME_TEXT)],
        Command::Help => vec![reply(chat_id, HELP_TEXT)],
        Command::SelectExperience => vec![Effect::ShowMenu {
            chat_id,
            prompt: EXPERIENCE_PROMPT.to_string(),
            buttons: experience_menu(),
        }],
        Command::SelectArea => vec![Effect::ShowMenu {
            chat_id,
            prompt: AREA_PROMPT.to_string(),
            buttons: area_menu(),
        }],
        Command::Stop => {
            state.sessions.evict(chat_id);
            vec![reply(chat_id, SESSION_CLEARED)]
        }
        Command::Unknown => vec![reply(chat_id, INVALID_QUERY)],
    }
}

fn search_requested(
    state: &mut AppState,
    chat_id: ChatId,
    text: &str,
    at: Instant,
) -> Vec<Effect> {
    if text.is_empty() {
        return vec![reply(chat_id, INVALID_QUERY)];
    }
    let filters = state.sessions.filters_mut(chat_id, at);
    filters.set(FilterField::Query(text.to_string()));
    vec![Effect::RunSearch {
        chat_id,
        filters: filters.snapshot(),
    }]
}

fn load_more(state: &mut AppState, chat_id: ChatId, at: Instant) -> Vec<Effect> {
    let has_query = state
        .sessions
        .get(chat_id)
        .is_some_and(|session| !session.filters.query.is_empty());
    if !has_query {
        return vec![reply(chat_id, SEARCH_FIRST)];
    }
    let filters = state.sessions.filters_mut(chat_id, at);
    filters.advance_page();
    vec![Effect::RunSearch {
        chat_id,
        filters: filters.snapshot(),
    }]
}

fn set_filter(
    state: &mut AppState,
    chat_id: ChatId,
    field: FilterField,
    at: Instant,
) -> Vec<Effect> {
    state.sessions.filters_mut(chat_id, at).set(field);
    vec![reply(chat_id, SELECTION_SAVED)]
}

fn reply(chat_id: ChatId, text: &str) -> Effect {
    Effect::Reply {
        chat_id,
        text: text.to_string(),
    }
}

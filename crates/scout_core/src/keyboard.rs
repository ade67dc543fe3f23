use crate::{areas, experience, Catalog};

const EXPERIENCE_PREFIX: &str = "exp_";
const AREA_PREFIX: &str = "area_";
const LOAD_MORE: &str = "load_more";

/// One inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub callback_data: String,
}

/// Decoded callback data of a pressed button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Experience(String),
    Area(String),
    LoadMore,
}

impl Callback {
    pub fn parse(data: &str) -> Option<Self> {
        if data == LOAD_MORE {
            return Some(Callback::LoadMore);
        }
        if let Some(code) = data.strip_prefix(EXPERIENCE_PREFIX) {
            return Some(Callback::Experience(code.to_string()));
        }
        data.strip_prefix(AREA_PREFIX)
            .map(|code| Callback::Area(code.to_string()))
    }

    pub fn encode(&self) -> String {
        match self {
            Callback::Experience(code) => format!("{EXPERIENCE_PREFIX}{code}"),
            Callback::Area(code) => format!("{AREA_PREFIX}{code}"),
            Callback::LoadMore => LOAD_MORE.to_string(),
        }
    }
}

pub fn experience_menu() -> Vec<Button> {
    menu(experience(), |code| Callback::Experience(code.to_string()))
}

pub fn area_menu() -> Vec<Button> {
    menu(areas(), |code| Callback::Area(code.to_string()))
}

/// Attached to every delivered document.
pub fn load_more_button() -> Button {
    Button {
        text: "Load More".to_string(),
        callback_data: Callback::LoadMore.encode(),
    }
}

fn menu(catalog: &Catalog, callback: impl Fn(&str) -> Callback) -> Vec<Button> {
    catalog
        .entries()
        .map(|(label, code)| Button {
            text: label.to_string(),
            callback_data: callback(code).encode(),
        })
        .collect()
}

/// Experience code selected before the user picks one ("1-3").
pub const DEFAULT_EXPERIENCE: &str = "between1And3";
/// Area code selected before the user picks one ("Krasnodar").
pub const DEFAULT_AREA: &str = "53";

/// Search criteria for one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub experience: String,
    pub area: String,
    pub page: u32,
}

/// A single filter assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    Query(String),
    Experience(String),
    Area(String),
    Page(u32),
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            experience: DEFAULT_EXPERIENCE.to_string(),
            area: DEFAULT_AREA.to_string(),
            page: 0,
        }
    }
}

impl FilterState {
    /// Overwrites one field. A new query always starts again at page 0.
    pub fn set(&mut self, field: FilterField) {
        match field {
            FilterField::Query(query) => {
                self.query = query;
                self.page = 0;
            }
            FilterField::Experience(code) => self.experience = code,
            FilterField::Area(code) => self.area = code,
            FilterField::Page(page) => self.page = page,
        }
    }

    pub fn advance_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Owned copy handed to one search request.
    pub fn snapshot(&self) -> FilterState {
        self.clone()
    }
}

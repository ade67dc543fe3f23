use std::collections::HashMap;
use std::sync::LazyLock;

/// Fixed table of menu labels and the codes the search site expects.
///
/// Entries keep their menu order; lookups in either direction go through maps
/// built once when the catalog is created.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<(&'static str, &'static str)>,
    by_label: HashMap<&'static str, &'static str>,
    by_code: HashMap<&'static str, &'static str>,
}

impl Catalog {
    fn new(entries: &[(&'static str, &'static str)]) -> Self {
        let by_label = entries.iter().copied().collect();
        let by_code = entries.iter().map(|&(label, code)| (code, label)).collect();
        Self {
            entries: entries.to_vec(),
            by_label,
            by_code,
        }
    }

    /// `(label, code)` pairs in menu order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn code_for(&self, label: &str) -> Option<&'static str> {
        self.by_label.get(label).copied()
    }

    pub fn label_for(&self, code: &str) -> Option<&'static str> {
        self.by_code.get(code).copied()
    }
}

static EXPERIENCE: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(&[
        ("No", "noExperience"),
        ("1-3", "between1And3"),
        ("3-6", "between3And6"),
        ("More 6", "moreThan6"),
    ])
});

static AREAS: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(&[
        ("Moscow", "1"),
        ("StPetersburg", "2"),
        ("Krasnodar", "53"),
    ])
});

/// Work experience brackets offered by `/select_exp`.
pub fn experience() -> &'static Catalog {
    &EXPERIENCE
}

/// Cities offered by `/select_area`.
pub fn areas() -> &'static Catalog {
    &AREAS
}

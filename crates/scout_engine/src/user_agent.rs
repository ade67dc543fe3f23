use rand::seq::SliceRandom;

const DEFAULT_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

/// Fixed set of browser user agents; each request picks one at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self {
            agents: DEFAULT_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UserAgentPool {
    /// Uses `agents`, or the built-in pool when the list is empty.
    pub fn new(agents: Vec<String>) -> Self {
        if agents.is_empty() {
            Self::default()
        } else {
            Self { agents }
        }
    }

    pub fn pick(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_AGENTS[0])
    }

    pub fn contains(&self, agent: &str) -> bool {
        self.agents.iter().any(|a| a == agent)
    }
}

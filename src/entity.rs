#[derive(Debug, PartialEq, Clone, Default)]
pub struct Episode {
    pub show: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub mime_type: String,
    pub length: String,
    pub pub_date: String,
    pub duration: String,
    pub guid: String,
    // unix seconds, None when pub_date could not be parsed
    pub timestamp: Option<i64>,
}

impl Episode {
    /// Title as it appears in the curated feed, prefixed with the show name.
    pub fn full_title(&self) -> String {
        format!("[{}] {}", self.show, self.title)
    }
}

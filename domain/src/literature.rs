//! Literature records returned by search and citation sources.
//!
//! The pipeline never requires these. Generation may quote search summaries
//! in its prompt when a source is configured.

use serde::{Deserialize, Serialize};

/// One literature search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<u32>,
    /// Database the hit came from, e.g. "pubmed" or "arxiv"
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchResult {
    /// One-line form used in generation prompts: `Title (Year): summary`.
    pub fn prompt_line(&self) -> String {
        let year = self
            .year
            .map_or_else(|| "n.d.".to_string(), |y| y.to_string());
        if self.summary.is_empty() {
            format!("{} ({year})", self.title)
        } else {
            format!("{} ({year}): {}", self.title, self.summary)
        }
    }
}

/// Citation style for [`Citation::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    #[default]
    Apa,
    Mla,
    /// Authors, year, title and journal only
    Plain,
}

impl std::str::FromStr for CitationStyle {
    type Err = std::convert::Infallible;

    /// Unknown styles fall back to [`CitationStyle::Plain`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "apa" => CitationStyle::Apa,
            "mla" => CitationStyle::Mla,
            _ => CitationStyle::Plain,
        })
    }
}

/// Bibliographic record for one publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    pub authors: Vec<String>,
    pub year: Option<u32>,
    pub title: String,
    pub journal: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    pub doi: String,
}

impl Citation {
    /// Render the citation in `style`. A missing year prints as `n.d.`.
    ///
    /// | Style | Shape |
    /// |-------|-------|
    /// | APA   | `A, B (2021). Title. Journal, 4(2), 1-9. https://doi.org/…` |
    /// | MLA   | `A, B. "Title." Journal, vol. 4, no. 2, 2021, pp. 1-9.` |
    /// | Plain | `A, B (2021). Title. Journal.` |
    pub fn format(&self, style: CitationStyle) -> String {
        let authors = self.authors.join(", ");
        let year = self
            .year
            .map_or_else(|| "n.d.".to_string(), |y| y.to_string());
        match style {
            CitationStyle::Apa => format!(
                "{authors} ({year}). {}. {}, {}({}), {}. https://doi.org/{}",
                self.title, self.journal, self.volume, self.issue, self.pages, self.doi
            ),
            CitationStyle::Mla => format!(
                "{authors}. \"{}.\" {}, vol. {}, no. {}, {year}, pp. {}.",
                self.title, self.journal, self.volume, self.issue, self.pages
            ),
            CitationStyle::Plain => {
                format!("{authors} ({year}). {}. {}.", self.title, self.journal)
            }
        }
    }
}

/// A citation together with its rendering in the requested style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedCitation {
    pub citation: Citation,
    pub style: CitationStyle,
    pub formatted: String,
}

impl FormattedCitation {
    pub fn new(citation: Citation, style: CitationStyle) -> Self {
        let formatted = citation.format(style);
        Self {
            citation,
            style,
            formatted,
        }
    }
}

//! Display normalization for ranked results.
//!
//! Turns the loosely-typed [`RankedResult`] into a [`ResultCard`] with every
//! field resolved: placeholders for missing text, a classified source badge,
//! an integer score percentage and at most four keywords.

use crate::controller::SearchState;
use crate::types::{FeedbackLabel, RankedResult};
use std::fmt;

/// Shown when a result has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
/// Shown when a result has no title.
pub const UNTITLED: &str = "Untitled document";
/// Shown when a result has none of the summary-like fields.
pub const NO_SUMMARY: &str = "No summary available.";
/// Keywords beyond this count are not shown.
pub const MAX_KEYWORDS: usize = 4;

/// Display category of a result's source tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceBadge {
    Github,
    Wikipedia,
    Youtube,
    /// Anything unrecognized, including a missing tag.
    Web,
}

impl SourceBadge {
    /// Classify a free-form source tag by case-insensitive substring match.
    ///
    /// `github` is checked first, then `wikipedia`, then `youtube`.
    pub fn classify(source: Option<&str>) -> Self {
        let Some(source) = source else {
            return Self::Web;
        };
        let s = source.to_lowercase();
        if s.contains("github") {
            Self::Github
        } else if s.contains("wikipedia") {
            Self::Wikipedia
        } else if s.contains("youtube") {
            Self::Youtube
        } else {
            Self::Web
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Wikipedia => "wikipedia",
            Self::Youtube => "youtube",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for SourceBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A result ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    /// Zero-based position in the result list.
    pub position: usize,
    pub badge: SourceBadge,
    /// Raw source tag as sent by the backend, empty if missing.
    pub source: String,
    pub author: String,
    pub date: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub summary: String,
    pub keywords: Vec<String>,
    /// Rendered score, e.g. `73%`.
    pub score: String,
    /// Vote currently active on this position.
    pub vote: Option<FeedbackLabel>,
}

impl ResultCard {
    /// Build the card for `result` at `position`, with its active vote.
    pub fn new(position: usize, result: &RankedResult, vote: Option<FeedbackLabel>) -> Self {
        Self {
            position,
            badge: SourceBadge::classify(result.source.as_deref()),
            source: result.source.clone().unwrap_or_default(),
            author: non_empty(result.author.as_deref())
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_owned(),
            date: non_empty(result.date.as_deref()).map(str::to_owned),
            title: non_empty(result.title.as_deref())
                .unwrap_or(UNTITLED)
                .to_owned(),
            url: non_empty(result.url.as_deref()).map(str::to_owned),
            summary: summary_text(result).unwrap_or(NO_SUMMARY).to_owned(),
            keywords: result.keywords.iter().take(MAX_KEYWORDS).cloned().collect(),
            score: format_score(result.final_score),
            vote,
        }
    }
}

/// Cards for every result in `state`, in rank order.
pub fn cards(state: &SearchState) -> Vec<ResultCard> {
    state
        .results
        .iter()
        .enumerate()
        .map(|(position, result)| ResultCard::new(position, result, state.votes.get(position)))
        .collect()
}

/// First non-empty of `summary`, `description`, `snippet`, `text`.
pub fn summary_text(result: &RankedResult) -> Option<&str> {
    [
        &result.summary,
        &result.description,
        &result.snippet,
        &result.text,
    ]
    .into_iter()
    .find_map(|field| non_empty(field.as_deref()))
}

/// Score as a whole percentage. Missing or non-finite scores render as `0%`.
pub fn score_percent(score: Option<f64>) -> i64 {
    match score {
        Some(s) if s.is_finite() => (s * 100.0).round() as i64,
        _ => 0,
    }
}

/// [`score_percent`] with a trailing `%`.
pub fn format_score(score: Option<f64>) -> String {
    format!("{}%", score_percent(score))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_sources() {
        assert_eq!(SourceBadge::classify(Some("GitHub")), SourceBadge::Github);
        assert_eq!(
            SourceBadge::classify(Some("fr.wikipedia.org")),
            SourceBadge::Wikipedia
        );
        assert_eq!(SourceBadge::classify(Some("youtube")), SourceBadge::Youtube);
        assert_eq!(SourceBadge::classify(Some("medium")), SourceBadge::Web);
        assert_eq!(SourceBadge::classify(None), SourceBadge::Web);
    }

    #[test]
    fn classify_checks_github_before_others() {
        assert_eq!(
            SourceBadge::classify(Some("youtube mirror on github")),
            SourceBadge::Github
        );
        assert_eq!(
            SourceBadge::classify(Some("wikipedia youtube")),
            SourceBadge::Wikipedia
        );
    }

    #[test]
    fn missing_score_is_zero_percent() {
        assert_eq!(format_score(None), "0%");
    }

    #[test]
    fn score_rounds_to_whole_percent() {
        assert_eq!(format_score(Some(0.73)), "73%");
        assert_eq!(format_score(Some(1.0)), "100%");
        assert_eq!(format_score(Some(0.005)), "1%");
        assert_eq!(format_score(Some(f64::NAN)), "0%");
    }

    #[test]
    fn summary_precedence() {
        let mut result = RankedResult {
            summary: Some("S".into()),
            description: Some("D".into()),
            snippet: Some("N".into()),
            text: Some("T".into()),
            ..Default::default()
        };
        assert_eq!(summary_text(&result), Some("S"));
        result.summary = None;
        assert_eq!(summary_text(&result), Some("D"));
        result.description = Some(String::new());
        assert_eq!(summary_text(&result), Some("N"));
        result.snippet = None;
        assert_eq!(summary_text(&result), Some("T"));
        result.text = None;
        assert_eq!(summary_text(&result), None);
    }

    #[test]
    fn card_uses_placeholders() {
        let card = ResultCard::new(0, &RankedResult::default(), None);
        assert_eq!(card.author, UNKNOWN_AUTHOR);
        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.summary, NO_SUMMARY);
        assert_eq!(card.score, "0%");
        assert_eq!(card.badge, SourceBadge::Web);
        assert!(card.source.is_empty());
        assert!(card.date.is_none());
        assert!(card.url.is_none());
    }

    #[test]
    fn card_keeps_first_four_keywords() {
        let result = RankedResult {
            keywords: ["a", "b", "c", "d", "e", "f"].map(String::from).to_vec(),
            ..Default::default()
        };
        let card = ResultCard::new(0, &result, None);
        assert_eq!(card.keywords, ["a", "b", "c", "d"]);
    }

    #[test]
    fn card_carries_vote_and_fields() {
        let result = RankedResult {
            source: Some("Wikipedia".into()),
            title: Some("Rust (langage)".into()),
            author: Some("Wikipédia".into()),
            url: Some("https://fr.wikipedia.org/wiki/Rust".into()),
            date: Some("2024-05-01".into()),
            final_score: Some(0.42),
            ..Default::default()
        };
        let card = ResultCard::new(3, &result, Some(FeedbackLabel::Dislike));
        assert_eq!(card.position, 3);
        assert_eq!(card.badge, SourceBadge::Wikipedia);
        assert_eq!(card.source, "Wikipedia");
        assert_eq!(card.title, "Rust (langage)");
        assert_eq!(card.date.as_deref(), Some("2024-05-01"));
        assert_eq!(card.score, "42%");
        assert_eq!(card.vote, Some(FeedbackLabel::Dislike));
    }

    #[test]
    fn cards_follow_state_order_and_votes() {
        let mut state = SearchState::default();
        state.results = vec![
            RankedResult {
                title: Some("one".into()),
                ..Default::default()
            },
            RankedResult {
                title: Some("two".into()),
                ..Default::default()
            },
        ];
        state.votes.toggle(1, FeedbackLabel::Like);

        let cards = cards(&state);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "one");
        assert_eq!(cards[0].vote, None);
        assert_eq!(cards[1].vote, Some(FeedbackLabel::Like));
    }
}

//! Wire types for the ranking backend: search request, ranked results and
//! feedback payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A corpus the ranking backend may retrieve documents from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalSource {
    /// Wikipedia articles.
    Wikipedia,
    /// GitHub repositories and READMEs.
    Github,
    /// YouTube videos (transcripts and descriptions).
    Youtube,
}

impl RetrievalSource {
    /// Returns all retrieval sources, in the order they are sent.
    pub fn all() -> &'static [RetrievalSource] {
        &[Self::Wikipedia, Self::Github, Self::Youtube]
    }
}

/// A document language the backend should retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French.
    Fr,
    /// English.
    En,
}

/// Fixed retrieval parameters sent verbatim with every question.
///
/// Field names match the backend's JSON contract, French spellings included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Maximum number of documents fetched per source site.
    pub max_par_site: u32,
    /// Enabled sources. The backend treats this as a set.
    pub sources: Vec<RetrievalSource>,
    /// Enabled document languages.
    pub langues: Vec<Language>,
    /// Candidates retrieved from the vector index before reranking.
    pub top_k_faiss: u32,
    /// Results kept after reranking.
    pub top_k_final: u32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            max_par_site: 15,
            sources: RetrievalSource::all().to_vec(),
            langues: vec![Language::Fr, Language::En],
            top_k_faiss: 50,
            top_k_final: 10,
        }
    }
}

/// Body of a search workflow request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The user's natural-language question.
    pub question: String,
    /// Retrieval parameters, flattened into the top-level object.
    #[serde(flatten)]
    pub params: QueryParams,
}

impl SearchRequest {
    /// Build a request for `question` with the fixed retrieval parameters.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            params: QueryParams::default(),
        }
    }
}

/// Success body of a search workflow request.
///
/// A missing or null `resultats` field means no results, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    resultats: Option<Vec<RankedResult>>,
}

impl SearchResponse {
    /// Consume the response, yielding results in backend rank order.
    pub fn into_results(self) -> Vec<RankedResult> {
        self.resultats.unwrap_or_default()
    }
}

/// One ranked item returned by the backend.
///
/// Every field is optional. The backend emits French field names; both
/// spellings are accepted on input and the English one is written on output.
/// A value of the wrong JSON type is dropped rather than failing the whole
/// result list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRankedResult")]
pub struct RankedResult {
    /// Opaque token tying the result to the backend's scoring run. Echoed
    /// back verbatim in feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_id: Option<serde_json::Value>,
    /// Free-form source tag such as `wikipedia` or `github:rust-lang/rust`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Reranker score, nominally in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

/// Result as it appears on the wire, each spelling in its own slot.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawRankedResult {
    inference_id: serde_json::Value,
    id_inference: serde_json::Value,
    source: serde_json::Value,
    title: serde_json::Value,
    titre: serde_json::Value,
    url: serde_json::Value,
    author: serde_json::Value,
    auteur: serde_json::Value,
    date: serde_json::Value,
    summary: serde_json::Value,
    resume: serde_json::Value,
    description: serde_json::Value,
    snippet: serde_json::Value,
    text: serde_json::Value,
    keywords: serde_json::Value,
    mots_cles: serde_json::Value,
    final_score: serde_json::Value,
    score_final: serde_json::Value,
}

impl From<RawRankedResult> for RankedResult {
    fn from(raw: RawRankedResult) -> Self {
        let keywords = keyword_list(&raw.keywords);
        Self {
            inference_id: opaque(raw.inference_id).or_else(|| opaque(raw.id_inference)),
            source: text_value(&raw.source),
            title: text_value(&raw.title).or_else(|| text_value(&raw.titre)),
            url: text_value(&raw.url),
            author: text_value(&raw.author).or_else(|| text_value(&raw.auteur)),
            date: text_value(&raw.date),
            summary: text_value(&raw.summary).or_else(|| text_value(&raw.resume)),
            description: text_value(&raw.description),
            snippet: text_value(&raw.snippet),
            text: text_value(&raw.text),
            keywords: if keywords.is_empty() {
                keyword_list(&raw.mots_cles)
            } else {
                keywords
            },
            final_score: score_value(&raw.final_score)
                .or_else(|| score_value(&raw.score_final)),
        }
    }
}

fn opaque(value: serde_json::Value) -> Option<serde_json::Value> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

/// Strings pass through and numbers are rendered; anything else is absent.
fn text_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn keyword_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(text_value).collect())
        .unwrap_or_default()
}

/// Numeric scores, or strings holding one.
fn score_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A feedback vote on a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLabel {
    /// The result was relevant.
    Like,
    /// The result was not relevant.
    Dislike,
}

impl FeedbackLabel {
    /// Returns the wire name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for FeedbackLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a feedback ingestion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Omitted from the JSON when the result carried no identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_id: Option<serde_json::Value>,
    pub feedback_type: FeedbackLabel,
}

impl FeedbackRequest {
    /// Build the feedback payload for `label` on `result`.
    pub fn for_result(result: &RankedResult, label: FeedbackLabel) -> Self {
        Self {
            inference_id: result.inference_id.clone(),
            feedback_type: label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_request_serializes_fixed_parameters() {
        let request = SearchRequest::new("how do lifetimes work");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "question": "how do lifetimes work",
                "max_par_site": 15,
                "sources": ["wikipedia", "github", "youtube"],
                "langues": ["fr", "en"],
                "top_k_faiss": 50,
                "top_k_final": 10
            })
        );
    }

    #[test]
    fn response_without_resultats_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn response_with_null_resultats_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"resultats": null}"#).unwrap();
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn response_preserves_rank_order() {
        let response: SearchResponse = serde_json::from_value(json!({
            "resultats": [{"title": "first"}, {"title": "second"}, {"title": "third"}]
        }))
        .unwrap();
        let titles: Vec<_> = response
            .into_results()
            .into_iter()
            .map(|r| r.title.unwrap_or_default())
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[test]
    fn french_field_names_decode_like_english_ones() {
        let french: RankedResult = serde_json::from_value(json!({
            "id_inference": "inf-42",
            "titre": "Ownership",
            "auteur": "Ferris",
            "resume": "Borrowing rules",
            "mots_cles": ["rust", "memory"],
            "score_final": 0.91
        }))
        .unwrap();
        let english: RankedResult = serde_json::from_value(json!({
            "inference_id": "inf-42",
            "title": "Ownership",
            "author": "Ferris",
            "summary": "Borrowing rules",
            "keywords": ["rust", "memory"],
            "final_score": 0.91
        }))
        .unwrap();
        assert_eq!(french, english);
    }

    #[test]
    fn empty_object_decodes_to_default_result() {
        let result: RankedResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, RankedResult::default());
    }

    #[test]
    fn null_keywords_decode_as_empty() {
        let result: RankedResult = serde_json::from_str(r#"{"keywords": null}"#).unwrap();
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn both_spellings_present_decode_without_conflict() {
        let response: SearchResponse = serde_json::from_value(json!({
            "resultats": [{
                "inference_id": "i1",
                "id_inference": "i1",
                "title": "",
                "titre": "T",
                "keywords": [],
                "mots_cles": ["rust"],
                "final_score": 0.5,
                "score_final": 0.9
            }]
        }))
        .unwrap();
        let results = response.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].inference_id, Some(json!("i1")));
        assert_eq!(results[0].title.as_deref(), Some("T"));
        assert_eq!(results[0].keywords, ["rust"]);
        assert_eq!(results[0].final_score, Some(0.5));
    }

    #[test]
    fn odd_field_types_do_not_drop_neighbouring_results() {
        let response: SearchResponse = serde_json::from_value(json!({
            "resultats": [
                {"titre": "ok"},
                {
                    "titre": "T",
                    "date": 2021,
                    "auteur": {"name": "Ferris"},
                    "mots_cles": ["rust", 7, null, ["nested"]],
                    "score_final": "0.42",
                    "url": false
                }
            ]
        }))
        .unwrap();
        let results = response.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title.as_deref(), Some("ok"));

        let odd = &results[1];
        assert_eq!(odd.title.as_deref(), Some("T"));
        assert_eq!(odd.date.as_deref(), Some("2021"));
        assert_eq!(odd.author, None);
        assert_eq!(odd.keywords, ["rust", "7"]);
        assert_eq!(odd.final_score, Some(0.42));
        assert_eq!(odd.url, None);
    }

    #[test]
    fn non_array_keywords_decode_as_empty() {
        let result: RankedResult = serde_json::from_str(r#"{"mots_cles": "rust"}"#).unwrap();
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn numeric_inference_id_is_kept_opaque() {
        let result: RankedResult = serde_json::from_str(r#"{"id_inference": 1234}"#).unwrap();
        let feedback = FeedbackRequest::for_result(&result, FeedbackLabel::Like);
        assert_eq!(
            serde_json::to_value(&feedback).unwrap(),
            json!({"inference_id": 1234, "feedback_type": "like"})
        );
    }

    #[test]
    fn feedback_without_inference_id_omits_the_field() {
        let feedback = FeedbackRequest::for_result(&RankedResult::default(), FeedbackLabel::Dislike);
        assert_eq!(
            serde_json::to_value(&feedback).unwrap(),
            json!({"feedback_type": "dislike"})
        );
    }

    #[test]
    fn feedback_label_display() {
        assert_eq!(FeedbackLabel::Like.to_string(), "like");
        assert_eq!(FeedbackLabel::Dislike.to_string(), "dislike");
    }
}

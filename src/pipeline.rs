//! Request orchestration: resolve tokens, analyze each one, select a lemma.
//!
//! Tokens are processed strictly in input order and independently of each
//! other. A single analyzer failure fails the whole request; no partial
//! lemma list is ever returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, trace};

use crate::morphology::{AnalysisError, MorphAnalyzer};
use crate::selector::LemmaPolicy;
use crate::tokenizer::tokenize;

/// Sentence analyzed once before serving traffic.
pub const WARMUP_TEXT: &str = "Kitabı okudum";

/// Body of `POST /lemmatize`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LemmaRequest {
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub return_details: bool,
}

impl LemmaRequest {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Some(tokens.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_details(mut self) -> Self {
        self.return_details = true;
        self
    }

    /// Explicit tokens win; an empty token list counts as absent and falls
    /// through to `text`. Neither present yields no tokens.
    pub fn resolve_tokens(&self) -> Vec<String> {
        match (&self.tokens, &self.text) {
            (Some(tokens), _) if !tokens.is_empty() => tokens.clone(),
            (_, Some(text)) => tokenize(text),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaDetail {
    pub token: String,
    pub lemma: String,
    pub analyses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaResponse {
    pub lemmas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<LemmaDetail>>,
}

#[derive(Debug, Error)]
pub enum LemmatizeError {
    #[error("analysis of token #{index} '{token}' failed: {source}")]
    Analysis {
        index: usize,
        token: String,
        #[source]
        source: AnalysisError,
    },
}

/// Shared, read-only lemmatization engine.
pub struct Lemmatizer {
    analyzer: Arc<dyn MorphAnalyzer>,
    policy: Arc<dyn LemmaPolicy>,
}

impl Lemmatizer {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>, policy: Arc<dyn LemmaPolicy>) -> Self {
        Self { analyzer, policy }
    }

    pub fn analyzer(&self) -> &Arc<dyn MorphAnalyzer> {
        &self.analyzer
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn lemmatize(&self, request: &LemmaRequest) -> Result<LemmaResponse, LemmatizeError> {
        let tokens = request.resolve_tokens();
        debug!(
            "Lemmatizing {} tokens (policy={}, details={})",
            tokens.len(),
            self.policy.name(),
            request.return_details
        );
        self.lemmatize_tokens(&tokens, request.return_details)
    }

    pub fn lemmatize_tokens(
        &self,
        tokens: &[String],
        with_details: bool,
    ) -> Result<LemmaResponse, LemmatizeError> {
        let mut lemmas = Vec::with_capacity(tokens.len());
        let mut details = with_details.then(|| Vec::with_capacity(tokens.len()));

        for (index, token) in tokens.iter().enumerate() {
            let analyses = self.analyzer.analyze(token).map_err(|source| {
                error!("Analyzer failed on token #{index} '{token}': {source}");
                LemmatizeError::Analysis {
                    index,
                    token: token.clone(),
                    source,
                }
            })?;

            let selection = self.policy.select(token, &analyses);
            if selection.used_fallback {
                trace!("No analysis for '{token}', keeping surface form");
            }

            if let Some(details) = details.as_mut() {
                details.push(LemmaDetail {
                    token: token.clone(),
                    lemma: selection.lemma.clone(),
                    analyses: analyses.iter().map(ToString::to_string).collect(),
                });
            }
            lemmas.push(selection.lemma);
        }

        Ok(LemmaResponse { lemmas, details })
    }

    /// Run one representative sentence through the analyzer so start-up
    /// surfaces a broken provider before the listener binds.
    pub fn warm_up(&self) -> Result<usize, LemmatizeError> {
        let response = self.lemmatize(&LemmaRequest::from_text(WARMUP_TEXT))?;
        Ok(response.lemmas.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{AnalysisCandidate, AnalysisSet, Pos};
    use crate::selector::{FirstCandidate, PosPreferring};
    use std::collections::HashMap;

    /// Table-driven analyzer; tokens listed in `fail_on` raise an error.
    #[derive(Default)]
    struct TableAnalyzer {
        table: HashMap<String, AnalysisSet>,
        fail_on: Vec<String>,
    }

    impl TableAnalyzer {
        fn with(mut self, token: &str, readings: &[(&str, Pos)]) -> Self {
            let set = readings
                .iter()
                .map(|(lemma, pos)| AnalysisCandidate::new(*lemma, pos.clone()))
                .collect();
            self.table.insert(token.to_string(), set);
            self
        }

        fn failing(mut self, token: &str) -> Self {
            self.fail_on.push(token.to_string());
            self
        }
    }

    impl MorphAnalyzer for TableAnalyzer {
        fn analyze(&self, token: &str) -> Result<AnalysisSet, AnalysisError> {
            if self.fail_on.iter().any(|t| t == token) {
                return Err(AnalysisError::Internal(format!("cannot analyze {token}")));
            }
            Ok(self.table.get(token).cloned().unwrap_or_default())
        }

        fn entry_count(&self) -> usize {
            self.table.len()
        }
    }

    fn lemmatizer(analyzer: TableAnalyzer) -> Lemmatizer {
        Lemmatizer::new(Arc::new(analyzer), Arc::new(PosPreferring))
    }

    fn sample() -> TableAnalyzer {
        TableAnalyzer::default()
            .with("Kitabı", &[("kitap", Pos::Noun)])
            .with("okudum", &[("okumak", Pos::Verb)])
            .with("yüz", &[("yüzmek", Pos::Verb), ("yüz", Pos::Noun)])
    }

    #[test]
    fn test_text_is_tokenized() {
        let response = lemmatizer(sample())
            .lemmatize(&LemmaRequest::from_text("  Kitabı \n okudum "))
            .unwrap();
        assert_eq!(response.lemmas, vec!["kitap", "okumak"]);
        assert!(response.details.is_none());
    }

    #[test]
    fn test_tokens_take_precedence_over_text() {
        let request = LemmaRequest {
            tokens: Some(vec!["yüz".to_string()]),
            text: Some("Kitabı okudum".to_string()),
            return_details: false,
        };
        let response = lemmatizer(sample()).lemmatize(&request).unwrap();
        assert_eq!(response.lemmas, vec!["yüz"]);
    }

    #[test]
    fn test_empty_token_list_falls_through_to_text() {
        let request = LemmaRequest {
            tokens: Some(Vec::new()),
            text: Some("okudum".to_string()),
            return_details: false,
        };
        assert_eq!(request.resolve_tokens(), vec!["okudum"]);
    }

    #[test]
    fn test_no_input_is_empty_not_error() {
        let response = lemmatizer(sample())
            .lemmatize(&LemmaRequest::default().with_details())
            .unwrap();
        assert!(response.lemmas.is_empty());
        assert_eq!(response.details, Some(Vec::new()));
    }

    #[test]
    fn test_order_and_length_preserved_with_duplicates() {
        let tokens = ["okudum", "bilinmeyen", "okudum", "Kitabı"];
        let response = lemmatizer(sample())
            .lemmatize(&LemmaRequest::from_tokens(tokens))
            .unwrap();
        assert_eq!(
            response.lemmas,
            vec!["okumak", "bilinmeyen", "okumak", "kitap"]
        );
    }

    #[test]
    fn test_unparsed_token_is_returned_verbatim() {
        let response = lemmatizer(sample())
            .lemmatize(&LemmaRequest::from_tokens(["ŞÖYLE-BÖYLE!"]))
            .unwrap();
        assert_eq!(response.lemmas, vec!["ŞÖYLE-BÖYLE!"]);
    }

    #[test]
    fn test_details_align_with_lemmas() {
        let response = lemmatizer(sample())
            .lemmatize(&LemmaRequest::from_tokens(["yüz", "xyz"]).with_details())
            .unwrap();
        let details = response.details.unwrap();
        assert_eq!(details.len(), response.lemmas.len());
        assert_eq!(details[0].token, "yüz");
        assert_eq!(details[0].lemma, "yüz");
        assert_eq!(
            details[0].analyses,
            vec!["[yüzmek:Verb] yüzmek", "[yüz:Noun] yüz"]
        );
        assert_eq!(details[1].lemma, "xyz");
        assert!(details[1].analyses.is_empty());
    }

    #[test]
    fn test_policy_is_swappable() {
        let lemmatizer = Lemmatizer::new(Arc::new(sample()), Arc::new(FirstCandidate));
        let response = lemmatizer
            .lemmatize(&LemmaRequest::from_tokens(["yüz"]))
            .unwrap();
        assert_eq!(response.lemmas, vec!["yüzmek"]);
        assert_eq!(lemmatizer.policy_name(), "first-candidate");
    }

    #[test]
    fn test_analyzer_failure_aborts_request() {
        let analyzer = sample().failing("patla");
        let result = lemmatizer(analyzer)
            .lemmatize(&LemmaRequest::from_tokens(["okudum", "patla", "Kitabı"]));
        match result {
            Err(LemmatizeError::Analysis { index, token, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "patla");
            }
            Ok(response) => panic!("expected failure, got {:?}", response),
        }
    }

    #[test]
    fn test_warm_up_counts_tokens() {
        assert_eq!(lemmatizer(sample()).warm_up().unwrap(), 2);
    }

    #[test]
    fn test_request_deserialization_defaults() {
        let request: LemmaRequest = serde_json::from_str("{}").unwrap();
        assert!(request.tokens.is_none());
        assert!(request.text.is_none());
        assert!(!request.return_details);

        let request: LemmaRequest =
            serde_json::from_str(r#"{"tokens": null, "text": "a b", "return_details": true}"#)
                .unwrap();
        assert_eq!(request.resolve_tokens(), vec!["a", "b"]);
        assert!(request.return_details);
    }

    #[test]
    fn test_response_omits_details_when_not_requested() {
        let response = LemmaResponse {
            lemmas: vec!["kitap".to_string()],
            details: None,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"lemmas": ["kitap"]})
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn expected_lemma(token: &str) -> &str {
            match token {
                "Kitabı" => "kitap",
                "okudum" => "okumak",
                "yüz" => "yüz",
                other => other,
            }
        }

        fn arb_token() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("Kitabı".to_string()),
                Just("okudum".to_string()),
                Just("yüz".to_string()),
                "[a-zçğıöşü]{1,10}",
            ]
        }

        proptest! {
            #[test]
            fn lemmas_align_with_tokens(
                tokens in prop::collection::vec(arb_token(), 0..16),
                with_details in any::<bool>(),
            ) {
                let response = lemmatizer(sample())
                    .lemmatize_tokens(&tokens, with_details)
                    .unwrap();
                prop_assert_eq!(response.lemmas.len(), tokens.len());
                for (token, lemma) in tokens.iter().zip(&response.lemmas) {
                    prop_assert_eq!(lemma.as_str(), expected_lemma(token));
                }

                match response.details {
                    Some(details) => {
                        prop_assert!(with_details);
                        prop_assert_eq!(details.len(), tokens.len());
                        for (i, detail) in details.iter().enumerate() {
                            prop_assert_eq!(&detail.token, &tokens[i]);
                            prop_assert_eq!(&detail.lemma, &response.lemmas[i]);
                        }
                    }
                    None => prop_assert!(!with_details),
                }
            }

            #[test]
            fn first_failing_token_aborts_request(
                tokens in prop::collection::vec(
                    prop_oneof![3 => arb_token(), 1 => Just("BOZUK".to_string())],
                    1..16,
                ),
            ) {
                let result = lemmatizer(sample().failing("BOZUK")).lemmatize_tokens(&tokens, true);
                match tokens.iter().position(|t| t == "BOZUK") {
                    Some(first) => match result {
                        Err(LemmatizeError::Analysis { index, token, .. }) => {
                            prop_assert_eq!(index, first);
                            prop_assert_eq!(token.as_str(), "BOZUK");
                        }
                        Ok(_) => prop_assert!(false, "request with a failing token succeeded"),
                    },
                    None => prop_assert!(result.is_ok()),
                }
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question carries exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("expected {OPTION_COUNT} options, got {0}")]
    WrongOptionCount(usize),

    #[error("option {0} cannot be empty")]
    EmptyOption(usize),

    #[error("correct answer index {0} is out of range")]
    AnswerIndexOutOfRange(usize),

    #[error("explanation cannot be empty")]
    EmptyExplanation,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question shape as the content provider returns it.
///
/// Deserialized straight from the provider's JSON reply; nothing downstream
/// touches a draft until `validate` has turned it into a `Question`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub code_snippet: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer_index: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub topic: String,
}

impl QuestionDraft {
    /// Validate the draft and assign it an identifier.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or explanation is blank, the
    /// option count is not exactly [`OPTION_COUNT`], any option is blank, or
    /// the correct-answer index falls outside the options.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let text = self.text.trim().to_owned();
        if text.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.options.len() != OPTION_COUNT {
            return Err(QuestionError::WrongOptionCount(self.options.len()));
        }
        let mut options = Vec::with_capacity(OPTION_COUNT);
        for (idx, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption(idx));
            }
            options.push(option);
        }

        if self.correct_answer_index >= OPTION_COUNT {
            return Err(QuestionError::AnswerIndexOutOfRange(
                self.correct_answer_index,
            ));
        }

        let explanation = self.explanation.trim().to_owned();
        if explanation.is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }

        let code_snippet = self
            .code_snippet
            .map(|snippet| snippet.trim_end().to_owned())
            .filter(|snippet| !snippet.trim().is_empty());

        Ok(Question {
            id,
            text,
            code_snippet,
            options,
            correct_answer_index: self.correct_answer_index,
            explanation,
            topic: self.topic.trim().to_owned(),
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Immutable once built. The explanation is written to be shown whether the
/// answer was right or wrong, so presentation only varies accent, not content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    text: String,
    code_snippet: Option<String>,
    options: Vec<String>,
    correct_answer_index: usize,
    explanation: String,
    topic: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn code_snippet(&self) -> Option<&str> {
        self.code_snippet.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Whether the given option index is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer_index
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            text: "What does 'typeof null' return?".into(),
            code_snippet: None,
            options: vec![
                "'null'".into(),
                "'object'".into(),
                "'undefined'".into(),
                "'number'".into(),
            ],
            correct_answer_index: 1,
            explanation: "typeof null returns 'object' due to a historical quirk.".into(),
            topic: "JavaScript".into(),
        }
    }

    #[test]
    fn valid_draft_becomes_question() {
        let question = draft().validate(QuestionId::from_raw("q1")).unwrap();
        assert_eq!(question.id().as_str(), "q1");
        assert_eq!(question.options().len(), OPTION_COUNT);
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn rejects_empty_prompt() {
        let mut d = draft();
        d.text = "   ".into();
        let err = d.validate(QuestionId::new()).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_wrong_option_count() {
        let mut d = draft();
        d.options.pop();
        let err = d.validate(QuestionId::new()).unwrap_err();
        assert_eq!(err, QuestionError::WrongOptionCount(3));
    }

    #[test]
    fn rejects_blank_option() {
        let mut d = draft();
        d.options[2] = "  ".into();
        let err = d.validate(QuestionId::new()).unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption(2));
    }

    #[test]
    fn rejects_out_of_range_answer_index() {
        let mut d = draft();
        d.correct_answer_index = 4;
        let err = d.validate(QuestionId::new()).unwrap_err();
        assert_eq!(err, QuestionError::AnswerIndexOutOfRange(4));
    }

    #[test]
    fn rejects_empty_explanation() {
        let mut d = draft();
        d.explanation = String::new();
        let err = d.validate(QuestionId::new()).unwrap_err();
        assert_eq!(err, QuestionError::EmptyExplanation);
    }

    #[test]
    fn blank_snippet_is_dropped() {
        let mut d = draft();
        d.code_snippet = Some("   \n".into());
        let question = d.validate(QuestionId::new()).unwrap();
        assert_eq!(question.code_snippet(), None);
    }

    #[test]
    fn draft_deserializes_from_provider_json() {
        let json = r#"{
            "text": "Which hook injects styles before DOM mutation?",
            "codeSnippet": "useInsertionEffect(() => { /* ??? */ });",
            "options": ["useEffect", "useLayoutEffect", "useInsertionEffect", "useMemo"],
            "correctAnswerIndex": 2,
            "explanation": "useInsertionEffect runs before layout effects so style injection lands first.",
            "topic": "React"
        }"#;
        let d: QuestionDraft = serde_json::from_str(json).unwrap();
        let question = d.validate(QuestionId::new()).unwrap();
        assert_eq!(question.correct_answer_index(), 2);
        assert_eq!(question.topic(), "React");
    }
}

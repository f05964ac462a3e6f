use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use burrow_core::model::{
    Difficulty, Module, ModuleDraft, ModuleId, Question, QuestionDraft, QuestionId,
};

use crate::error::GenerationError;

use super::{COURSE_MODULE_COUNT, QUIZ_QUESTION_COUNT};

const QUIZ_SYSTEM_PROMPT: &str = "\
You are an expert web-development tutor who writes precise multiple-choice quizzes.\n\
Reply with a JSON array only, no prose. Each item has the fields: text, codeSnippet \
(optional), options (exactly 4 strings), correctAnswerIndex (0-3), explanation, topic.\n\
If you include a codeSnippet it must NEVER contain the answer; replace the sensitive \
part with \"???\" or show related code instead.\n\
The explanation is shown whether the learner was right or wrong. Never open with \
\"Congratulations\", \"Correct\" or similar; state factually why the correct answer \
is correct.";

const COURSE_SYSTEM_PROMPT: &str = "\
You are an expert instructor who writes short, dense programming courses.\n\
Reply with a JSON array only, no prose. Each item is a module with the fields: \
title, content (an object with text in light markdown and an optional codeSnippet), \
and quiz (one validation question with text, options of exactly 4 strings, \
correctAnswerIndex 0-3, explanation, topic).\n\
Keep each module around 200 words. The explanation rules from quiz generation apply: \
valence-neutral, never congratulatory.";

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("BURROW_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("BURROW_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("BURROW_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Content provider backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct AiContentService {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl AiContentService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn chat(&self, system: &str, prompt: String) -> Result<String, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.4,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)?;

        let content = strip_code_fence(content.trim());
        if content.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl super::ContentProvider for AiContentService {
    async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, GenerationError> {
        let prompt = format!(
            "Generate {QUIZ_QUESTION_COUNT} {difficulty}-level quiz questions on: {topic}."
        );
        let raw = self.chat(QUIZ_SYSTEM_PROMPT, prompt).await?;

        let drafts: Vec<QuestionDraft> = serde_json::from_str(&raw)?;
        if drafts.len() != QUIZ_QUESTION_COUNT {
            return Err(GenerationError::WrongItemCount {
                expected: QUIZ_QUESTION_COUNT,
                actual: drafts.len(),
            });
        }

        drafts
            .into_iter()
            .map(|draft| Ok(draft.validate(QuestionId::new())?))
            .collect()
    }

    async fn generate_course(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Module>, GenerationError> {
        let prompt = format!(
            "Create a {COURSE_MODULE_COUNT}-module {difficulty}-level course on: {topic}."
        );
        let raw = self.chat(COURSE_SYSTEM_PROMPT, prompt).await?;

        let drafts: Vec<ModuleDraft> = serde_json::from_str(&raw)?;
        if drafts.len() != COURSE_MODULE_COUNT {
            return Err(GenerationError::WrongItemCount {
                expected: COURSE_MODULE_COUNT,
                actual: drafts.len(),
            });
        }

        drafts
            .into_iter()
            .map(|draft| Ok(draft.validate(ModuleId::new())?))
            .collect()
    }
}

/// Models often wrap JSON replies in a markdown fence; peel it off.
fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_service_reports_disabled() {
        let service = AiContentService::new(None);
        assert!(!service.enabled());
    }

    #[test]
    fn strip_code_fence_handles_plain_and_fenced() {
        assert_eq!(strip_code_fence("[1]"), "[1]");
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
    }

    #[test]
    fn quiz_reply_parses_into_drafts() {
        let raw = r#"[{
            "text": "What does 'typeof null' return?",
            "options": ["'null'", "'object'", "'undefined'", "'number'"],
            "correctAnswerIndex": 1,
            "explanation": "A historical quirk makes typeof null report 'object'.",
            "topic": "JavaScript"
        }]"#;
        let drafts: Vec<QuestionDraft> = serde_json::from_str(raw).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].correct_answer_index, 1);
    }
}

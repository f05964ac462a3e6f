use burrow_core::model::{
    LessonDraft, Module, ModuleDraft, ModuleId, Question, QuestionDraft, QuestionId,
};

/// Built-in question served when quiz generation fails, so a session can
/// always proceed.
#[must_use]
pub fn fallback_question() -> Question {
    QuestionDraft {
        text: "The generator is napping! Meanwhile: what does 'typeof null' return?".into(),
        code_snippet: None,
        options: vec![
            "'null'".into(),
            "'object'".into(),
            "'undefined'".into(),
            "'number'".into(),
        ],
        correct_answer_index: 1,
        explanation: "In JavaScript, typeof null returns 'object' because of a bug in the \
                      language's first implementation that was never fixed."
            .into(),
        topic: "JavaScript".into(),
    }
    .validate(QuestionId::new())
    .expect("fallback question is statically valid")
}

/// Built-in module served when course generation fails. Same recovery policy
/// as the quiz path: one piece of fallback content instead of an empty run.
#[must_use]
pub fn fallback_module() -> Module {
    ModuleDraft {
        title: "Truthy and falsy values".into(),
        content: LessonDraft {
            text: "# Truthy and falsy\n\
                   JavaScript coerces values to booleans in conditions.\n\
                   Only a handful of values are falsy:\n\
                   - false\n\
                   - 0 and -0\n\
                   - '' (empty string)\n\
                   - null, undefined and NaN\n\
                   Everything else, including '0' and [], is truthy.\n\
                   ```js\n\
                   if ([]) {\n\
                     // this branch runs\n\
                   }\n\
                   ```"
                .into(),
            code_snippet: None,
        },
        quiz: Some(QuestionDraft {
            text: "Which of these values is truthy?".into(),
            code_snippet: None,
            options: vec!["0".into(), "''".into(), "[]".into(), "NaN".into()],
            correct_answer_index: 2,
            explanation: "An empty array is an object, and every object is truthy; 0, the \
                          empty string and NaN are all falsy."
                .into(),
            topic: "JavaScript".into(),
        }),
    }
    .validate(ModuleId::new())
    .expect("fallback module is statically valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_question_matches_recovery_contract() {
        let question = fallback_question();
        assert_eq!(question.topic(), "JavaScript");
        assert_eq!(question.correct_answer_index(), 1);
        assert_eq!(question.options().len(), 4);
    }

    #[test]
    fn fallback_module_carries_a_gating_question() {
        let module = fallback_module();
        assert!(module.quiz().is_some());
        assert!(!burrow_core::markup::parse(module.content().text()).is_empty());
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct answer, 0 through 3.
    pub correct: u8,
    pub explanation: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.options.len() == OPTIONS_PER_QUESTION && usize::from(self.correct) < OPTIONS_PER_QUESTION
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizData {
    pub topics: Vec<String>,
    #[serde(rename = "questionsData")]
    pub questions_data: Vec<QuizQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_data_field_name() {
        let quiz = QuizData {
            topics: vec!["Biology".into()],
            questions_data: vec![],
        };
        let json = serde_json::to_string(&quiz).unwrap();
        assert!(json.contains(r#""questionsData":[]"#));
    }

    #[test]
    fn test_playable_requires_four_options() {
        let question = QuizQuestion {
            question: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct: 0,
            explanation: String::new(),
        };
        assert!(!question.is_playable());
    }
}

use crate::generate::GenerateError;
use crate::json_repair::extract_json_value;
use crate::llm::{call_llm, CallConfig};
use crate::llm_config::LlmConfig;
use preppal_model::quiz::{QuizData, QuizQuestion, OPTIONS_PER_QUESTION};
use serde_json::Value;
use tracing::instrument;

/// Input beyond this is truncated before prompting; quizzes are generated
/// over the whole document in a single call.
const MAX_INPUT_LEN: usize = 80_000;

const DEFAULT_TOPICS: &[&str] = &["General Topics"];
const DEFAULT_OPTIONS: &[&str] = &["Option A", "Option B", "Option C", "Option D"];
const DEFAULT_EXPLANATION: &str = "No explanation provided.";

fn prompt_for(text: &str) -> String {
    format!(
        "Create a comprehensive quiz from the following document content.\n\n\
Requirements:\n\
- Generate 12-15 multiple choice questions.\n\
- Include questions of varying difficulty (easy, medium, hard).\n\
- Focus on key concepts and important details.\n\
- Each question should have 4 options.\n\
- Identify key topics covered in the document.\n\n\
Return the response in this EXACT JSON format (this is critical for proper integration):\n\
{{\n\
  \"topics\": [\"Topic 1\", \"Topic 2\", \"Topic 3\"],\n\
  \"questionsData\": [\n\
    {{\n\
      \"question\": \"Question text here?\",\n\
      \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],\n\
      \"correct\": 0,\n\
      \"explanation\": \"Explanation of why this answer is correct\"\n\
    }}\n\
  ]\n\
}}\n\n\
IMPORTANT:\n\
- \"correct\" should be the index (0, 1, 2, or 3) of the correct answer.\n\
- \"topics\" should be an array of main topics/subjects covered.\n\
- \"questionsData\" should contain all questions.\n\n\
Document content:\n{text}"
    )
}

fn truncate_input(text: &str) -> String {
    if text.len() <= MAX_INPUT_LEN {
        return text.to_owned();
    }
    let mut end = MAX_INPUT_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[content truncated]", &text[..end])
}

/// One call over the (truncated) document, recovered through JSON repair
/// and normalized field by field.
#[instrument(skip_all, fields(text_len = text.len()))]
pub async fn generate(llm_config: &LlmConfig, call_config: &CallConfig, text: &str) -> Result<QuizData, GenerateError> {
    let input = truncate_input(text);

    let reply = call_llm(
        llm_config.get_openai_config(),
        call_config,
        llm_config.get_quiz_model(),
        &prompt_for(&input),
    )
    .await?;

    let value = extract_json_value(&reply.content).ok_or_else(|| {
        tracing::error!(output = reply.content, "no JSON found in quiz reply");
        GenerateError::MalformedQuiz
    })?;

    let quiz = validate_quiz(value)?;
    tracing::debug!(
        questions = quiz.questions_data.len(),
        topics = ?quiz.topics,
        "generated quiz"
    );
    Ok(quiz)
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let entries = value?.as_array()?;
    entries
        .iter()
        .map(|entry| entry.as_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>()
}

/// Applies the defaulting rules: topics fall back to a generic list,
/// question fields fall back one by one, but a reply without a usable
/// `questionsData` array, or with zero questions, is rejected outright.
pub fn validate_quiz(value: Value) -> Result<QuizData, GenerateError> {
    let topics = string_array(value.get("topics"))
        .filter(|topics| !topics.is_empty())
        .unwrap_or_else(|| DEFAULT_TOPICS.iter().map(|&s| s.to_owned()).collect());

    let raw_questions = value
        .get("questionsData")
        .and_then(Value::as_array)
        .ok_or(GenerateError::MalformedQuiz)?;

    if raw_questions.is_empty() {
        return Err(GenerateError::EmptyQuiz);
    }

    let questions_data = raw_questions
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_question(raw, index))
        .collect();

    Ok(QuizData { topics, questions_data })
}

fn validate_question(raw: &Value, index: usize) -> QuizQuestion {
    let question = raw
        .get("question")
        .and_then(Value::as_str)
        .map_or_else(|| format!("Question {}", index + 1), str::to_owned);

    let options = string_array(raw.get("options"))
        .filter(|options| options.len() == OPTIONS_PER_QUESTION)
        .unwrap_or_else(|| DEFAULT_OPTIONS.iter().map(|&s| s.to_owned()).collect());

    let correct = raw
        .get("correct")
        .and_then(Value::as_u64)
        .filter(|&correct| correct < OPTIONS_PER_QUESTION as u64)
        .map_or(0, |correct| correct as u8);

    let explanation = raw
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_EXPLANATION)
        .to_owned();

    QuizQuestion {
        question,
        options,
        correct,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_quiz_passes() {
        let value = json!({
            "topics": ["Photosynthesis"],
            "questionsData": [{
                "question": "What do plants absorb?",
                "options": ["CO2", "O2", "N2", "He"],
                "correct": 0,
                "explanation": "Plants take in carbon dioxide."
            }]
        });
        let quiz = validate_quiz(value).unwrap();
        assert_eq!(quiz.topics, vec!["Photosynthesis"]);
        assert_eq!(quiz.questions_data.len(), 1);
        assert!(quiz.questions_data[0].is_playable());
    }

    #[test]
    fn test_missing_topics_get_a_default() {
        let value = json!({
            "questionsData": [{"question": "?", "options": ["a", "b", "c", "d"], "correct": 1, "explanation": "e"}]
        });
        let quiz = validate_quiz(value).unwrap();
        assert_eq!(quiz.topics, vec!["General Topics"]);
    }

    #[test]
    fn test_question_fields_are_defaulted_individually() {
        let value = json!({
            "topics": ["T"],
            "questionsData": [{"options": ["only", "three", "given"], "correct": 9}]
        });
        let quiz = validate_quiz(value).unwrap();
        let question = &quiz.questions_data[0];
        assert_eq!(question.question, "Question 1");
        assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
        assert_eq!(question.correct, 0);
        assert_eq!(question.explanation, "No explanation provided.");
        assert!(question.is_playable());
    }

    #[test]
    fn test_missing_questions_data_is_malformed() {
        assert!(matches!(
            validate_quiz(json!({"topics": ["T"]})),
            Err(GenerateError::MalformedQuiz)
        ));
        assert!(matches!(
            validate_quiz(json!({"questionsData": "not an array"})),
            Err(GenerateError::MalformedQuiz)
        ));
    }

    #[test]
    fn test_zero_questions_is_rejected() {
        assert!(matches!(
            validate_quiz(json!({"questionsData": []})),
            Err(GenerateError::EmptyQuiz)
        ));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(MAX_INPUT_LEN);
        let truncated = truncate_input(&text);
        assert!(truncated.ends_with("...[content truncated]"));
    }
}

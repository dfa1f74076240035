//! Answer evaluation for choice questions and EMQ cases.

use serde::Serialize;

use crate::error::EvaluationError;
use crate::letter::OptionLetter;
use crate::model::{ChoiceQuestion, MatchingCase, MatchingQuestion};

/// Outcome of checking one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub is_correct: bool,
    /// Text to reveal after submission.
    pub explanation: String,
}

/// Evaluate an SBA/MCQ answer given the zero-based index of the chosen option.
///
/// A correct answer reveals `explanation_correct`. An incorrect one reveals
/// the correct letter followed by `explanation_incorrect`.
///
/// # Errors
///
/// Returns `EvaluationError::OptionOutOfRange` if `selected` does not index
/// into `question.options`. Only indices drawn from the options list should
/// ever be offered, so this is a caller bug. Returns
/// `EvaluationError::NoOptionLetter` for an option past `Z`, which no answer
/// key can name.
pub fn evaluate(question: &ChoiceQuestion, selected: usize) -> Result<Evaluation, EvaluationError> {
    if selected >= question.options.len() {
        return Err(EvaluationError::OptionOutOfRange {
            question_id: question.id.clone(),
            index: selected,
            len: question.options.len(),
        });
    }
    let letter = OptionLetter::from_index(selected).map_err(|_| EvaluationError::NoOptionLetter {
        question_id: question.id.clone(),
        index: selected,
    })?;

    let is_correct = letter.to_string() == question.correct_answer;
    let explanation = if is_correct {
        question.explanation_correct.clone()
    } else {
        incorrect_explanation(question)
    };

    tracing::debug!(question = %question.id, %letter, is_correct, "evaluated answer");
    Ok(Evaluation {
        is_correct,
        explanation,
    })
}

fn incorrect_explanation(question: &ChoiceQuestion) -> String {
    let mut text = format!("Correct answer: {}", question.correct_answer);
    if !question.explanation_incorrect.is_empty() {
        text.push('\n');
        text.push_str(&question.explanation_incorrect);
    }
    text
}

/// Text of the option an EMQ case expects.
///
/// # Errors
///
/// Returns `EvaluationError::InvalidCaseAnswer` if the case's answer is not a
/// single letter naming one of the shared options.
pub fn expected_option<'a>(
    question: &'a MatchingQuestion,
    case: &MatchingCase,
) -> Result<&'a str, EvaluationError> {
    OptionLetter::parse(&case.answer)
        .ok()
        .and_then(|letter| letter.index_within(question.options.len()))
        .map(|idx| question.options[idx].as_str())
        .ok_or_else(|| EvaluationError::InvalidCaseAnswer {
            question_id: question.id.clone(),
            case_index: question.cases.iter().position(|c| std::ptr::eq(c, case)),
            answer: case.answer.clone(),
        })
}

/// Evaluate one EMQ case given the text of the chosen option.
///
/// Options are compared by text, so two options with identical text are
/// indistinguishable. The case's explanation is returned whether or not the
/// answer is correct.
///
/// # Errors
///
/// Returns `EvaluationError::InvalidCaseAnswer` if the case's answer letter
/// does not resolve to an option.
pub fn evaluate_case(
    question: &MatchingQuestion,
    case: &MatchingCase,
    selected_text: &str,
) -> Result<Evaluation, EvaluationError> {
    let expected = expected_option(question, case)?;
    let is_correct = selected_text == expected;

    tracing::debug!(question = %question.id, answer = %case.answer, is_correct, "evaluated case");
    Ok(Evaluation {
        is_correct,
        explanation: case.explanation.clone(),
    })
}

//! The `medprep check` command.

use anyhow::{Context, Result};

use medprep_core::evaluator::{evaluate, evaluate_case, Evaluation};
use medprep_core::letter::OptionLetter;
use medprep_core::model::QuestionRef;
use medprep_core::query::find_question;

use crate::Source;

pub fn execute(id: String, answer: OptionLetter, case: Option<usize>, source: Source) -> Result<()> {
    let (_, bank) = super::open_bank(&source)?;
    let question =
        find_question(&bank, &id).with_context(|| format!("no question with id '{id}'"))?;

    let result = check_answer(question, answer, case)?;
    super::quiz::write_evaluation(&mut std::io::stdout().lock(), &result)?;
    Ok(())
}

/// Validate the letter against the question and evaluate it.
fn check_answer(question: QuestionRef<'_>, answer: OptionLetter, case: Option<usize>) -> Result<Evaluation> {
    let options = question.options();
    let index = answer.index_within(options.len()).with_context(|| {
        format!(
            "answer {answer} is not one of the {} options of '{}'",
            options.len(),
            question.id()
        )
    })?;

    match question {
        QuestionRef::Sba(q) | QuestionRef::Mcq(q) => {
            anyhow::ensure!(case.is_none(), "--case only applies to EMQ questions");
            Ok(evaluate(q, index)?)
        }
        QuestionRef::Emq(q) => {
            let number = case.context("EMQ questions need --case <N>")?;
            let selected = number
                .checked_sub(1)
                .and_then(|idx| q.cases.get(idx))
                .with_context(|| {
                    format!("'{}' has {} case(s); got case {number}", q.id, q.cases.len())
                })?;
            Ok(evaluate_case(q, selected, &options[index])?)
        }
    }
}

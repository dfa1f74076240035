//! The `medprep quiz` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use medprep_core::evaluator::{evaluate, evaluate_case, Evaluation};
use medprep_core::letter::{OptionLetter, MAX_OPTIONS};
use medprep_core::model::{ChoiceQuestion, MatchingQuestion, QuestionBank, QuestionRef};
use medprep_core::query::{filter_questions, KindFilter, SystemFilter};
use medprep_core::session::{AnswerSlot, Page, SessionId, SessionState, SessionStore};

use crate::Source;

pub fn execute(kind: Option<KindFilter>, system: Option<SystemFilter>, source: Source) -> Result<()> {
    let (config, bank) = super::open_bank(&source)?;
    let kind = kind.unwrap_or(config.default_kind);
    let system = system.unwrap_or(config.default_system);

    let stdin = io::stdin();
    let mut sessions = SessionStore::new();
    run_quiz(
        &bank,
        kind,
        system,
        &mut sessions,
        stdin.lock(),
        io::stdout().lock(),
    )?;
    Ok(())
}

/// Print the verdict and explanation for one submitted answer.
pub fn write_evaluation<W: Write>(out: &mut W, result: &Evaluation) -> io::Result<()> {
    if result.is_correct {
        writeln!(out, "✓ Correct!")?;
    } else {
        writeln!(out, "✗ Incorrect")?;
    }
    if !result.explanation.is_empty() {
        writeln!(out, "{}", result.explanation)?;
    }
    Ok(())
}

/// Answer counts for one quiz run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizTally {
    pub answered: usize,
    pub correct: usize,
}

impl QuizTally {
    fn record(&mut self, result: &Evaluation) {
        self.answered += 1;
        if result.is_correct {
            self.correct += 1;
        }
    }
}

enum Reply {
    Letter(OptionLetter),
    Skip,
    Quit,
}

/// Drive one interactive session over the filtered questions.
///
/// Blank input skips a prompt, `q` or end of input ends the quiz. The
/// session is discarded when the quiz finishes.
pub fn run_quiz<R: BufRead, W: Write>(
    bank: &QuestionBank,
    kind: KindFilter,
    system: SystemFilter,
    sessions: &mut SessionStore,
    mut input: R,
    mut out: W,
) -> Result<QuizTally> {
    let id = SessionId::new();
    let state = sessions.get_or_create(id);
    state.set_page(Page::Questions);
    state.set_filter(kind, system);

    let questions = filter_questions(bank, state.kind_filter(), state.system_filter());
    let mut tally = QuizTally::default();

    if questions.is_empty() {
        writeln!(out, "No questions found for the selected filters.")?;
    } else {
        writeln!(out, "Found {} question(s)", questions.len())?;

        'questions: for item in &questions {
            let q = item.question;
            writeln!(out, "\n### Question {} ({}) - {}", item.number, q.kind(), q.system_label())?;
            if !q.stem().is_empty() {
                writeln!(out, "{}", q.stem())?;
            }
            for (idx, option) in q.options().iter().take(MAX_OPTIONS).enumerate() {
                let letter = OptionLetter::from_index(idx)?;
                writeln!(out, "{letter}: {option}")?;
            }
            if q.options().len() > MAX_OPTIONS {
                writeln!(
                    out,
                    "({} more option(s) past Z cannot be chosen)",
                    q.options().len() - MAX_OPTIONS
                )?;
            }

            let finished = match q {
                QuestionRef::Sba(choice) | QuestionRef::Mcq(choice) => {
                    ask_choice(choice, state, &mut tally, &mut input, &mut out)?
                }
                QuestionRef::Emq(emq) => ask_cases(emq, state, &mut tally, &mut input, &mut out)?,
            };
            if finished {
                break 'questions;
            }
        }

        writeln!(
            out,
            "\nSession complete: {}/{} correct.",
            tally.correct, tally.answered
        )?;
    }

    sessions.end(id);
    Ok(tally)
}

/// Returns `true` if the user asked to quit.
fn ask_choice<R: BufRead, W: Write>(
    question: &ChoiceQuestion,
    state: &mut SessionState,
    tally: &mut QuizTally,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let letter = match prompt_letter("Your answer", question.options.len(), input, out)? {
        Reply::Letter(letter) => letter,
        Reply::Skip => return Ok(false),
        Reply::Quit => return Ok(true),
    };

    let slot = AnswerSlot::Choice(question.id.clone());
    state.select_answer(slot.clone(), letter.index().into());
    let result = evaluate(question, letter.index())?;
    state.reveal(slot);
    tally.record(&result);
    write_evaluation(out, &result)?;
    Ok(false)
}

/// Returns `true` if the user asked to quit.
fn ask_cases<R: BufRead, W: Write>(
    question: &MatchingQuestion,
    state: &mut SessionState,
    tally: &mut QuizTally,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    writeln!(out, "Cases:")?;
    for (idx, case) in question.cases.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, case.case)?;
        let prompt = format!("Answer for case {}", idx + 1);
        let letter = match prompt_letter(&prompt, question.options.len(), input, out)? {
            Reply::Letter(letter) => letter,
            Reply::Skip => continue,
            Reply::Quit => return Ok(true),
        };

        let text = question.options[letter.index()].clone();
        let slot = AnswerSlot::Case(question.id.clone(), idx);
        state.select_answer(slot.clone(), text.clone().into());

        match evaluate_case(question, case, &text) {
            Ok(result) => {
                state.reveal(slot);
                tally.record(&result);
                write_evaluation(out, &result)?;
            }
            Err(e) => {
                tracing::warn!("{e}");
                writeln!(out, "This case has no valid answer key.")?;
            }
        }
    }
    Ok(false)
}

/// Prompt until the user gives a letter within `option_count`, skips, or quits.
fn prompt_letter<R: BufRead, W: Write>(
    label: &str,
    option_count: usize,
    input: &mut R,
    out: &mut W,
) -> Result<Reply> {
    if option_count == 0 {
        writeln!(out, "(no options to choose from)")?;
        return Ok(Reply::Skip);
    }
    let last = OptionLetter::from_index(option_count.min(MAX_OPTIONS) - 1)?;

    loop {
        write!(out, "{label} (A-{last}, blank to skip, q to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Reply::Quit);
        }
        let reply = line.trim();
        if reply.is_empty() {
            return Ok(Reply::Skip);
        }
        if reply.eq_ignore_ascii_case("q") {
            return Ok(Reply::Quit);
        }

        match reply.parse::<OptionLetter>() {
            Ok(letter) if letter.index() < option_count => return Ok(Reply::Letter(letter)),
            _ => writeln!(out, "Please enter a letter between A and {last}.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medprep_core::model::System;
    use medprep_core::parser::parse_bank_str;

    const BANK: &str = r#"{
        "sba": [{"id": "s1", "system": "Renal", "question": "Stem one", "options": ["X", "Y"],
                 "correct_answer": "B", "explanation_correct": "yes", "explanation_incorrect": "no"}],
        "mcq": [{"id": "m1", "system": "CNS", "question": "Stem two", "options": ["X", "Y", "Z"],
                 "correct_answer": "A", "explanation_correct": "yes", "explanation_incorrect": "no"}],
        "emq": [{"id": "e1", "system": "Renal", "options": ["X", "Y", "Z"],
                 "cases": [{"case": "first", "answer": "C", "explanation": "c-one"},
                           {"case": "second", "answer": "A", "explanation": "c-two"}]}]
    }"#;

    fn run(input: &str, kind: KindFilter, system: SystemFilter) -> (QuizTally, String) {
        let bank = parse_bank_str(BANK).unwrap();
        let mut sessions = SessionStore::new();
        let mut out = Vec::new();
        let tally = run_quiz(&bank, kind, system, &mut sessions, input.as_bytes(), &mut out).unwrap();
        assert!(sessions.is_empty());
        (tally, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answers_every_question_in_order() {
        let (tally, out) = run("b\nc\nC\nB\n", KindFilter::All, SystemFilter::All);
        assert_eq!(tally, QuizTally { answered: 4, correct: 2 });

        let first = out.find("Question 1 (SBA) - Renal").unwrap();
        let second = out.find("Question 2 (MCQ) - CNS").unwrap();
        let third = out.find("Question 3 (EMQ) - Renal").unwrap();
        assert!(first < second && second < third);
        assert!(out.contains("c-one"));
        assert!(out.contains("c-two"));
        assert!(out.contains("Correct answer: A"));
        assert!(out.contains("Session complete: 2/4 correct."));
    }

    #[test]
    fn invalid_letters_reprompt() {
        let (tally, out) = run("z\n7\nb\n", KindFilter::Sba, SystemFilter::All);
        assert_eq!(tally, QuizTally { answered: 1, correct: 1 });
        assert_eq!(out.matches("Please enter a letter between A and B.").count(), 2);
    }

    #[test]
    fn skip_and_quit() {
        let (tally, out) = run("\nq\n", KindFilter::All, SystemFilter::All);
        assert_eq!(tally, QuizTally::default());
        assert!(!out.contains("Question 3"));
    }

    #[test]
    fn end_of_input_finishes_quiz() {
        let (tally, out) = run("B\n", KindFilter::All, SystemFilter::Only(System::Renal));
        assert_eq!(tally.answered, 1);
        assert!(out.contains("Found 2 question(s)"));
        assert!(out.contains("Session complete: 1/1 correct."));
    }

    #[test]
    fn options_past_z_are_announced_not_offered() {
        let options: Vec<String> = (0..28).map(|i| format!("\"opt {i}\"")).collect();
        let json = format!(
            r#"{{"sba": [{{"id": "big", "system": "Gastro", "options": [{}], "correct_answer": "Z"}}]}}"#,
            options.join(", ")
        );
        let bank = parse_bank_str(&json).unwrap();
        let mut sessions = SessionStore::new();
        let mut out = Vec::new();
        let tally = run_quiz(
            &bank,
            KindFilter::All,
            SystemFilter::All,
            &mut sessions,
            "z\n".as_bytes(),
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(tally, QuizTally { answered: 1, correct: 1 });
        assert!(out.contains("Question 1 (SBA) - Gastro"));
        assert!(out.contains("Z: opt 25"));
        assert!(!out.contains("opt 26"));
        assert!(out.contains("(2 more option(s) past Z cannot be chosen)"));
        assert!(out.contains("(A-Z, blank to skip"));
    }

    #[test]
    fn empty_filter_result() {
        let (tally, out) = run("", KindFilter::Emq, SystemFilter::Only(System::Cns));
        assert_eq!(tally, QuizTally::default());
        assert!(out.contains("No questions found for the selected filters."));
    }

    #[test]
    fn write_evaluation_formats() {
        let mut out = Vec::new();
        let result = Evaluation {
            is_correct: false,
            explanation: "Correct answer: B".into(),
        };
        write_evaluation(&mut out, &result).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "✗ Incorrect\nCorrect answer: B\n");
    }
}

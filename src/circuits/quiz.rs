//! Sampling a quiz and grading what comes back.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use serde::Deserialize;
use validator::Validate;

use crate::forms::FieldErrors;

use super::models::{GradedAnswer, QuizQuestion};

pub const QUIZ_LENGTH: usize = 6;

/// Up to [`QUIZ_LENGTH`] distinct ids, in random order.
pub fn sample_ids(all: &[i64]) -> Vec<i64> {
    all.choose_multiple(&mut rand::rng(), QUIZ_LENGTH).copied().collect()
}

/// Grades one answer per question. A pick that isn't one of that question's
/// choices counts as unanswered.
pub fn grade(questions: &[QuizQuestion], picks: &HashMap<i64, i64>) -> Vec<GradedAnswer> {
    questions
        .iter()
        .map(|quiz_question| {
            let picked = picks.get(&quiz_question.question.id).and_then(|choice_id| {
                quiz_question.choices.iter().find(|choice| choice.id == *choice_id)
            });
            GradedAnswer {
                question_id: quiz_question.question.id,
                choice_id: picked.map(|choice| choice.id),
                is_correct: picked.is_some_and(|choice| choice.is_correct),
            }
        })
        .collect()
}

pub fn score(answers: &[GradedAnswer]) -> i64 {
    answers.iter().filter(|answer| answer.is_correct).count() as i64
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct PlayerForm {
    #[validate(
        custom(function = "crate::forms::required"),
        length(max = 50, message = "Keep this under 50 characters.")
    )]
    pub player: String,
}

/// A submitted quiz. The radio groups are named `question_{id}` after
/// whichever questions were sampled, so the form arrives as raw pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub player: String,
    /// Milliseconds since the epoch, `None` if missing or unreadable.
    pub start_time: Option<i64>,
    /// `None` if any id was unreadable.
    pub question_ids: Option<Vec<i64>>,
    pub picks: HashMap<i64, i64>,
}

impl QuizSubmission {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> QuizSubmission {
        let mut submission = QuizSubmission {
            question_ids: Some(Vec::new()),
            ..QuizSubmission::default()
        };
        for (key, value) in pairs {
            match key.as_str() {
                "player" => submission.player = value.trim().to_owned(),
                "start_time" => submission.start_time = value.trim().parse().ok(),
                "question_ids" => {
                    let id = value.trim().parse::<i64>().ok();
                    submission.question_ids = submission.question_ids.take().zip(id).map(|(mut ids, id)| {
                        ids.push(id);
                        ids
                    });
                }
                _ => {
                    let question = key.strip_prefix("question_").and_then(|id| id.parse::<i64>().ok());
                    if let (Some(question), Ok(choice)) = (question, value.trim().parse::<i64>()) {
                        submission.picks.insert(question, choice);
                    }
                }
            }
        }
        submission
    }

    pub fn check_player(&self) -> Result<String, FieldErrors> {
        let form = PlayerForm {
            player: self.player.clone(),
        };
        form.validate()?;
        Ok(form.player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::models::{Choice, Question};

    fn question(id: i64, correct: i64, others: &[i64]) -> QuizQuestion {
        let choice = |choice_id: i64| Choice {
            id: choice_id,
            question_id: id,
            text: format!("choice {choice_id}"),
            is_correct: choice_id == correct,
        };
        QuizQuestion {
            question: Question {
                id,
                text: format!("question {id}"),
            },
            choices: std::iter::once(correct).chain(others.iter().copied()).map(choice).collect(),
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn samples_distinct_ids() {
        let all: Vec<i64> = (1..=8).collect();
        let mut picked = sample_ids(&all);
        assert_eq!(picked.len(), QUIZ_LENGTH);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), QUIZ_LENGTH);
        assert!(picked.iter().all(|id| all.contains(id)));

        assert_eq!(sample_ids(&[4, 2]).len(), 2);
        assert!(sample_ids(&[]).is_empty());
    }

    #[test]
    fn grades_each_question_once() {
        let questions = [question(1, 10, &[11, 12]), question(2, 20, &[21]), question(3, 30, &[31])];
        // right, wrong, unanswered
        let picks = HashMap::from([(1, 10), (2, 21)]);

        let graded = grade(&questions, &picks);
        assert_eq!(
            graded,
            [
                GradedAnswer { question_id: 1, choice_id: Some(10), is_correct: true },
                GradedAnswer { question_id: 2, choice_id: Some(21), is_correct: false },
                GradedAnswer { question_id: 3, choice_id: None, is_correct: false },
            ]
        );
        assert_eq!(score(&graded), 1);
    }

    #[test]
    fn borrowed_choices_do_not_count() {
        let questions = [question(1, 10, &[11]), question(2, 20, &[21])];
        // question 2 answered with question 1's correct choice
        let graded = grade(&questions, &HashMap::from([(2, 10)]));
        assert_eq!(graded[1], GradedAnswer { question_id: 2, choice_id: None, is_correct: false });
        assert_eq!(score(&graded), 0);
    }

    #[test]
    fn reads_a_submission() {
        let submission = QuizSubmission::from_pairs(pairs(&[
            ("player", " Ayrton "),
            ("start_time", "1741000000000"),
            ("question_ids", "3"),
            ("question_ids", "1"),
            ("question_3", "9"),
            ("question_1", "two"),
            ("question_x", "4"),
        ]));
        assert_eq!(submission.player, "Ayrton");
        assert_eq!(submission.start_time, Some(1_741_000_000_000));
        assert_eq!(submission.question_ids, Some(vec![3, 1]));
        assert_eq!(submission.picks, HashMap::from([(3, 9)]));
    }

    #[test]
    fn unreadable_ids_spoil_the_list() {
        let submission = QuizSubmission::from_pairs(pairs(&[
            ("start_time", "soon"),
            ("question_ids", "3"),
            ("question_ids", "x"),
            ("question_ids", "1"),
        ]));
        assert_eq!(submission.start_time, None);
        assert_eq!(submission.question_ids, None);
    }

    #[test]
    fn player_is_required_and_short() {
        let blank = QuizSubmission::from_pairs(pairs(&[("player", "   ")]));
        assert_eq!(blank.check_player().unwrap_err().get("player"), Some("This field is required."));

        let long = QuizSubmission {
            player: "x".repeat(51),
            ..QuizSubmission::default()
        };
        assert_eq!(long.check_player().unwrap_err().get("player"), Some("Keep this under 50 characters."));

        let fine = QuizSubmission {
            player: "Ayrton".to_owned(),
            ..QuizSubmission::default()
        };
        assert_eq!(fine.check_player().unwrap(), "Ayrton");
    }
}

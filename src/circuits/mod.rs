//! Circuits quiz: six random Formula 1 questions, scored and ranked.

pub mod models;
pub mod quiz;
pub mod store;

use std::collections::HashMap;

use axum::{
    Form, Router, debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use sqlx::SqlitePool;

use crate::{
    AppError, AppResult, AppState, OrNotFound,
    forms::FieldErrors,
    include_res,
    mini_fb::models::now_millis,
    res::{self, escape, fill},
};

use models::{AnswerReview, QuizAttempt, QuizQuestion};
use quiz::QuizSubmission;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quiz_page))
        .route("/quiz", get(quiz_page).post(submit_quiz))
        .route("/attempt/{id}", get(attempt))
        .route("/leaderboard", get(leaderboard))
}

/// What the quiz form shows: who is playing, when they started and what they picked.
struct QuizForm<'a> {
    player: &'a str,
    start_time: i64,
    picks: &'a HashMap<i64, i64>,
    errors: &'a FieldErrors,
}

fn quiz_form(questions: &[QuizQuestion], form: &QuizForm<'_>) -> String {
    if questions.is_empty() {
        return "<h1>Circuits quiz</h1>\n<p>No quiz questions available yet.</p>".to_owned();
    }

    let question_ids: String = questions
        .iter()
        .map(|quiz_question| {
            format!(r#"<input type="hidden" name="question_ids" value="{}">"#, quiz_question.question.id)
        })
        .collect();
    let question_items: String = questions
        .iter()
        .enumerate()
        .map(|(n, quiz_question)| {
            let picked = form.picks.get(&quiz_question.question.id);
            let choices: String = quiz_question
                .choices
                .iter()
                .map(|choice| {
                    fill(
                        include_res!(str, "/pages/circuits/choice.html"),
                        &[
                            ("question_id", choice.question_id.to_string()),
                            ("id", choice.id.to_string()),
                            ("checked", (if picked == Some(&choice.id) { " checked" } else { "" }).to_owned()),
                            ("text", escape(&choice.text)),
                        ],
                    )
                })
                .collect();
            fill(
                include_res!(str, "/pages/circuits/question.html"),
                &[
                    ("number", (n + 1).to_string()),
                    ("text", escape(&quiz_question.question.text)),
                    ("choices", choices),
                ],
            )
        })
        .collect();
    let player_error = form
        .errors
        .get("player")
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default();

    fill(
        include_res!(str, "/pages/circuits/quiz.html"),
        &[
            ("player", escape(form.player)),
            ("player_error", player_error),
            ("start_time", form.start_time.to_string()),
            ("question_ids", question_ids),
            ("questions", question_items),
        ],
    )
}

fn answer_items(answers: &[AnswerReview]) -> String {
    answers
        .iter()
        .map(|answer| {
            let correction = if answer.is_correct {
                String::new()
            } else {
                format!("<br>Correct answer: {}", escape(&answer.correct_choice))
            };
            fill(
                include_res!(str, "/pages/circuits/answer.html"),
                &[
                    ("question", escape(&answer.question)),
                    ("picked", escape(answer.picked.as_deref().unwrap_or("nothing"))),
                    ("verdict", (if answer.is_correct { "right" } else { "wrong" }).to_owned()),
                    ("correction", correction),
                ],
            )
        })
        .collect()
}

fn leaderboard_rows(attempts: &[QuizAttempt]) -> String {
    if attempts.is_empty() {
        return r#"    <tr><td colspan="4">Nobody has played yet.</td></tr>"#.to_owned();
    }
    attempts
        .iter()
        .enumerate()
        .map(|(n, attempt)| {
            fill(
                include_res!(str, "/pages/circuits/leaderboard_row.html"),
                &[
                    ("rank", (n + 1).to_string()),
                    ("id", attempt.id.to_string()),
                    ("player", escape(&attempt.player)),
                    ("score", attempt.score.to_string()),
                    ("duration", attempt.formatted_duration()),
                ],
            )
        })
        .collect()
}

#[debug_handler]
async fn quiz_page(State(db_pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let all = store::question_ids(&db_pool).await?;
    let questions = store::load_questions(&db_pool, &quiz::sample_ids(&all)).await?;

    Ok(res::page(
        "Circuits quiz",
        &quiz_form(
            &questions,
            &QuizForm {
                player: "",
                start_time: now_millis(),
                picks: &HashMap::new(),
                errors: &FieldErrors::default(),
            },
        ),
    ))
}

/// Each id once, and no more of them than a quiz asks.
fn usable_ids(submission: &QuizSubmission) -> Option<&[i64]> {
    let ids = submission.question_ids.as_deref()?;
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    (!ids.is_empty() && unique.len() == ids.len() && ids.len() <= quiz::QUIZ_LENGTH).then_some(ids)
}

#[debug_handler]
async fn submit_quiz(
    State(db_pool): State<SqlitePool>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let submission = QuizSubmission::from_pairs(pairs);
    let end_time = now_millis();

    let Some(start_time) = submission.start_time.filter(|start| *start <= end_time) else {
        tracing::warn!("quiz submitted with a bad start time");
        return Ok(Redirect::to("/circuits/quiz").into_response());
    };
    let Some(ids) = usable_ids(&submission) else {
        tracing::warn!("quiz submitted with bad question ids {:?}", submission.question_ids);
        return Ok(Redirect::to("/circuits/quiz").into_response());
    };
    let questions = store::load_questions(&db_pool, ids).await?;
    if questions.len() != ids.len() {
        tracing::warn!("quiz submitted with unknown questions {ids:?}");
        return Ok(Redirect::to("/circuits/quiz").into_response());
    }

    let player = match submission.check_player() {
        Ok(player) => player,
        Err(errors) => {
            let form = QuizForm {
                player: &submission.player,
                start_time,
                picks: &submission.picks,
                errors: &errors,
            };
            return Ok(res::page("Circuits quiz", &quiz_form(&questions, &form)).into_response());
        }
    };

    let answers = quiz::grade(&questions, &submission.picks);
    let attempt = store::record_attempt(&db_pool, &player, start_time, end_time, &answers).await?;

    Ok(Redirect::to(&format!("/circuits/attempt/{}", attempt.id)).into_response())
}

#[debug_handler]
async fn attempt(Path(attempt_id): Path<String>, State(db_pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let id: i64 = attempt_id.parse().map_err(|_| AppError::NotFound("quiz attempt"))?;
    let attempt = store::get_attempt(&db_pool, id).await?.or_not_found("quiz attempt")?;
    let answers = store::attempt_answers(&db_pool, attempt.id).await?;

    Ok(res::page(
        "Quiz results",
        &fill(
            include_res!(str, "/pages/circuits/attempt.html"),
            &[
                ("player", escape(&attempt.player)),
                ("score", attempt.score.to_string()),
                ("total", answers.len().to_string()),
                ("duration", attempt.formatted_duration()),
                ("answers", answer_items(&answers)),
            ],
        ),
    ))
}

#[debug_handler]
async fn leaderboard(State(db_pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let attempts = store::leaderboard(&db_pool).await?;
    Ok(res::page(
        "Leaderboard",
        &fill(
            include_res!(str, "/pages/circuits/leaderboard.html"),
            &[("rows", leaderboard_rows(&attempts))],
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::models::{Choice, Question};

    fn submission(ids: &[i64]) -> QuizSubmission {
        QuizSubmission {
            question_ids: Some(ids.to_vec()),
            ..QuizSubmission::default()
        }
    }

    #[test]
    fn question_ids_must_be_distinct_and_few() {
        assert_eq!(usable_ids(&submission(&[3, 1])), Some(&[3, 1][..]));
        assert_eq!(usable_ids(&submission(&[3, 3])), None);
        assert_eq!(usable_ids(&submission(&[])), None);
        assert_eq!(usable_ids(&submission(&[1, 2, 3, 4, 5, 6, 7])), None);
        assert_eq!(usable_ids(&QuizSubmission::default()), None);
    }

    #[test]
    fn redisplay_keeps_picks_and_errors() {
        let questions = [QuizQuestion {
            question: Question {
                id: 4,
                text: "Which circuit has a figure-of-eight layout?".to_owned(),
            },
            choices: vec![
                Choice { id: 13, question_id: 4, text: "Suzuka".to_owned(), is_correct: true },
                Choice { id: 14, question_id: 4, text: "Monza".to_owned(), is_correct: false },
            ],
        }];
        let mut errors = FieldErrors::default();
        errors.add("player", "This field is required.");
        let html = quiz_form(
            &questions,
            &QuizForm {
                player: "<Ayrton>",
                start_time: 42,
                picks: &HashMap::from([(4, 14)]),
                errors: &errors,
            },
        );

        assert!(html.contains(r#"value="&lt;Ayrton&gt;""#));
        assert!(html.contains(r#"name="start_time" value="42""#));
        assert!(html.contains(r#"name="question_ids" value="4""#));
        assert!(html.contains(r#"name="question_4" value="14" checked"#));
        assert!(!html.contains(r#"value="13" checked"#));
        assert!(html.contains("This field is required."));
    }
}

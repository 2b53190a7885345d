use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{
    models::{AnswerReview, Choice, GradedAnswer, Question, QuizAttempt, QuizQuestion},
    quiz,
};

pub const LEADERBOARD_SIZE: i64 = 20;

const ATTEMPT_COLUMNS: &str = "id,player,start_time,end_time,score";

pub async fn question_ids(db_pool: &SqlitePool) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar("SELECT id FROM questions ORDER BY id").fetch_all(db_pool).await
}

/// The questions named by `ids` with their choices, in the order given.
/// Unknown ids are left out.
pub async fn load_questions(db_pool: &SqlitePool, ids: &[i64]) -> sqlx::Result<Vec<QuizQuestion>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT id,text FROM questions WHERE id IN (");
    let mut separated = query.separated(",");
    for id in ids {
        separated.push_bind(*id);
    }
    query.push(")");
    let questions: Vec<Question> = query.build_query_as().fetch_all(db_pool).await?;

    let mut query = QueryBuilder::<Sqlite>::new("SELECT id,question_id,text,is_correct FROM choices WHERE question_id IN (");
    let mut separated = query.separated(",");
    for id in ids {
        separated.push_bind(*id);
    }
    query.push(") ORDER BY id");
    let choices: Vec<Choice> = query.build_query_as().fetch_all(db_pool).await?;

    Ok(ids
        .iter()
        .filter_map(|id| questions.iter().find(|question| question.id == *id))
        .map(|question| QuizQuestion {
            question: question.clone(),
            choices: choices
                .iter()
                .filter(|choice| choice.question_id == question.id)
                .cloned()
                .collect(),
        })
        .collect())
}

/// Stores the attempt with its graded answers, all or nothing.
pub async fn record_attempt(
    db_pool: &SqlitePool,
    player: &str,
    start_time: i64,
    end_time: i64,
    answers: &[GradedAnswer],
) -> sqlx::Result<QuizAttempt> {
    let score = quiz::score(answers);
    let mut tx = db_pool.begin().await?;

    let attempt: QuizAttempt = sqlx::query_as(&format!(
        "INSERT INTO quiz_attempts (player,start_time,end_time,score) VALUES (?,?,?,?) RETURNING {ATTEMPT_COLUMNS}"
    ))
    .bind(player)
    .bind(start_time)
    .bind(end_time)
    .bind(score)
    .fetch_one(&mut *tx)
    .await?;

    for answer in answers {
        sqlx::query("INSERT INTO answers (attempt_id,question_id,choice_id,is_correct) VALUES (?,?,?,?)")
            .bind(attempt.id)
            .bind(answer.question_id)
            .bind(answer.choice_id)
            .bind(answer.is_correct)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!("{player} scored {score}/{} in attempt {}", answers.len(), attempt.id);
    Ok(attempt)
}

pub async fn get_attempt(db_pool: &SqlitePool, id: i64) -> sqlx::Result<Option<QuizAttempt>> {
    sqlx::query_as(&format!("SELECT {ATTEMPT_COLUMNS} FROM quiz_attempts WHERE id=?"))
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn attempt_answers(db_pool: &SqlitePool, attempt_id: i64) -> sqlx::Result<Vec<AnswerReview>> {
    sqlx::query_as(
        "SELECT q.text AS question, picked.text AS picked, \
         COALESCE((SELECT c.text FROM choices c WHERE c.question_id=a.question_id AND c.is_correct=1 ORDER BY c.id LIMIT 1), '') \
         AS correct_choice, a.is_correct \
         FROM answers a JOIN questions q ON q.id=a.question_id \
         LEFT JOIN choices picked ON picked.id=a.choice_id \
         WHERE a.attempt_id=? ORDER BY a.id",
    )
    .bind(attempt_id)
    .fetch_all(db_pool)
    .await
}

/// Highest score first, then the quickest, then the earliest.
pub async fn leaderboard(db_pool: &SqlitePool) -> sqlx::Result<Vec<QuizAttempt>> {
    sqlx::query_as(&format!(
        "SELECT {ATTEMPT_COLUMNS} FROM quiz_attempts \
         ORDER BY score DESC, end_time-start_time, end_time, id LIMIT ?"
    ))
    .bind(LEADERBOARD_SIZE)
    .fetch_all(db_pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn graded(question_id: i64, choice_id: Option<i64>, is_correct: bool) -> GradedAnswer {
        GradedAnswer {
            question_id,
            choice_id,
            is_correct,
        }
    }

    #[tokio::test]
    async fn loads_questions_in_the_asked_order() {
        let db_pool = db::memory().await;
        assert_eq!(question_ids(&db_pool).await.unwrap(), (1..=8).collect::<Vec<i64>>());

        let loaded = load_questions(&db_pool, &[5, 2, 99]).await.unwrap();
        let ids: Vec<i64> = loaded.iter().map(|quiz_question| quiz_question.question.id).collect();
        assert_eq!(ids, [5, 2]);
        assert_eq!(loaded[0].choices.len(), 4);
        assert!(loaded[0].choices.iter().all(|choice| choice.question_id == 5));
        assert_eq!(loaded[0].choices.iter().filter(|choice| choice.is_correct).count(), 1);

        assert!(load_questions(&db_pool, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_attempts_with_their_answers() {
        let db_pool = db::memory().await;
        let answers = [graded(1, Some(1), true), graded(2, Some(6), false), graded(3, None, false)];
        let attempt = record_attempt(&db_pool, "Ayrton", 1_000, 61_000, &answers).await.unwrap();
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.formatted_duration(), "01:00");
        assert_eq!(get_attempt(&db_pool, attempt.id).await.unwrap(), Some(attempt.clone()));

        let review = attempt_answers(&db_pool, attempt.id).await.unwrap();
        assert_eq!(review.len(), 3);
        assert_eq!(review[0].picked.as_deref(), Some("Circuit de Monaco"));
        assert!(review[0].is_correct);
        assert_eq!(review[1].picked.as_deref(), Some("Spain"));
        assert_eq!(review[1].correct_choice, "Italy");
        assert_eq!(review[2].picked, None);
    }

    #[tokio::test]
    async fn ranks_by_score_then_time() {
        let db_pool = db::memory().await;
        let right = graded(1, Some(1), true);
        let wrong = graded(1, Some(2), false);

        record_attempt(&db_pool, "slow", 0, 90_000, &[right]).await.unwrap();
        record_attempt(&db_pool, "zero", 0, 1_000, &[wrong]).await.unwrap();
        record_attempt(&db_pool, "fast", 50_000, 60_000, &[right]).await.unwrap();

        let players: Vec<String> = leaderboard(&db_pool)
            .await
            .unwrap()
            .into_iter()
            .map(|attempt| attempt.player)
            .collect();
        assert_eq!(players, ["fast", "slow", "zero"]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// A question with its choices, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: Question,
    pub choices: Vec<Choice>,
}

/// Start and end are milliseconds since the epoch, UTC.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct QuizAttempt {
    pub id: i64,
    pub player: String,
    pub start_time: i64,
    pub end_time: i64,
    pub score: i64,
}

impl QuizAttempt {
    pub fn duration_millis(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// `MM:SS`, whole seconds.
    pub fn formatted_duration(&self) -> String {
        let seconds = self.duration_millis().max(0) / 1000;
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

/// One graded question of an attempt. `choice_id` is `None` when nothing
/// usable was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradedAnswer {
    pub question_id: i64,
    pub choice_id: Option<i64>,
    pub is_correct: bool,
}

/// An answer as shown on the results page.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AnswerReview {
    pub question: String,
    pub picked: Option<String>,
    pub correct_choice: String,
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_read_as_minutes_and_seconds() {
        let attempt = QuizAttempt {
            id: 1,
            player: "Ayrton".to_owned(),
            start_time: 1_000,
            end_time: 1_000 + 125_900,
            score: 4,
        };
        assert_eq!(attempt.formatted_duration(), "02:05");
        assert_eq!(QuizAttempt { end_time: 1_000, ..attempt }.formatted_duration(), "00:00");
    }
}

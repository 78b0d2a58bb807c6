use chrono::{DateTime, Utc};

use crate::model::answers::decode_wire_answer;
use crate::model::exam::Exam;
use crate::model::ids::{ExamId, ExamResultId, UserId};

/// Scored attempt as returned by the API after submission.
///
/// Everything here is computed server-side; the client only displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamResult {
    pub id: ExamResultId,
    pub exam_id: ExamId,
    pub student_id: UserId,
    pub score: f64,
    pub passing_score: f64,
    pub submitted_at: DateTime<Utc>,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub feedback: String,
    pub passed: bool,
    pub answers: Vec<i32>,
}

/// How a single question fared in a scored attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
    Unanswered,
    /// The exam payload carried no correct option for this question.
    Unknown,
}

/// Per-question review line, pairing the learner's pick with the correct option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionReview {
    pub index: usize,
    pub selected: Option<usize>,
    pub correct: Option<usize>,
    pub outcome: QuestionOutcome,
}

impl ExamResult {
    /// A failed attempt can be retaken.
    #[must_use]
    pub fn can_retake(&self) -> bool {
        !self.passed
    }

    #[must_use]
    pub fn has_feedback(&self) -> bool {
        !self.feedback.trim().is_empty()
    }

    /// Compare the echoed answers with the exam's correct options.
    #[must_use]
    pub fn review(&self, exam: &Exam) -> Vec<QuestionReview> {
        exam.questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = self
                    .answers
                    .get(index)
                    .copied()
                    .and_then(decode_wire_answer);
                let correct = question.correct_option();
                let outcome = match (selected, correct) {
                    (_, None) => QuestionOutcome::Unknown,
                    (None, Some(_)) => QuestionOutcome::Unanswered,
                    (Some(picked), Some(right)) if picked == right => QuestionOutcome::Correct,
                    (Some(_), Some(_)) => QuestionOutcome::Incorrect,
                };
                QuestionReview {
                    index,
                    selected,
                    correct,
                    outcome,
                }
            })
            .collect()
    }
}

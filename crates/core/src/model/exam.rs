use thiserror::Error;

use crate::model::ids::{CourseId, ExamId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("exam must contain at least one question")]
    NoQuestions,

    #[error("passing score must be between 0 and 100, got {0}")]
    InvalidPassingScore(u32),

    #[error("question {index} has no options")]
    NoOptions { index: usize },

    #[error("question {index} marks option {correct} as correct but only has {options} options")]
    CorrectOptionOutOfRange {
        index: usize,
        correct: usize,
        options: usize,
    },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// `correct_option` is only present when the API chooses to send it. It is never
/// consulted while an exam is being taken; scoring happens server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_option: Option<usize>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id,
            text: text.into(),
            options,
            correct_option: None,
        }
    }

    #[must_use]
    pub fn with_correct_option(mut self, index: usize) -> Self {
        self.correct_option = Some(index);
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<usize> {
        self.correct_option
    }
}

//
// ─── EXAM ──────────────────────────────────────────────────────────────────────
//

/// Exam definition as loaded for a session. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    id: ExamId,
    title: String,
    description: String,
    course_id: CourseId,
    questions: Vec<Question>,
    time_limit_minutes: u32,
    passing_score: u32,
}

impl Exam {
    /// Build a validated exam.
    ///
    /// # Errors
    ///
    /// Returns `ExamError` when the exam has no questions, a passing score
    /// above 100, a question without options, or a correct
    /// option index that does not point at an option.
    pub fn new(
        id: ExamId,
        title: impl Into<String>,
        description: impl Into<String>,
        course_id: CourseId,
        questions: Vec<Question>,
        time_limit_minutes: u32,
        passing_score: u32,
    ) -> Result<Self, ExamError> {
        if questions.is_empty() {
            return Err(ExamError::NoQuestions);
        }
        if passing_score > 100 {
            return Err(ExamError::InvalidPassingScore(passing_score));
        }
        for (index, question) in questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(ExamError::NoOptions { index });
            }
            if let Some(correct) = question.correct_option
                && correct >= question.options.len()
            {
                return Err(ExamError::CorrectOptionOutOfRange {
                    index,
                    correct,
                    options: question.options.len(),
                });
            }
        }

        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            course_id,
            questions,
            time_limit_minutes,
            passing_score,
        })
    }

    #[must_use]
    pub fn id(&self) -> ExamId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    /// Time limit in seconds, the starting value of the session countdown.
    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_minutes.saturating_mul(60)
    }

    /// Passing score as a percentage in `0..=100`.
    #[must_use]
    pub fn passing_score(&self) -> u32 {
        self.passing_score
    }
}

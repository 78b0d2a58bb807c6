use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use lms_core::Clock;
use lms_core::model::{
    CourseId, Exam, ExamId, ExamResult, ExamResultId, Submission, UserId, decode_wire_answer,
};

use super::ExamApi;
use crate::error::ApiError;

#[derive(Default)]
struct State {
    exams: HashMap<ExamId, Exam>,
    results: Vec<ExamResult>,
    submissions: Vec<Submission>,
    exam_lookups: usize,
    failing_loads: bool,
    failing_submissions: usize,
}

/// In-memory `ExamApi` for tests, demos, and offline use.
///
/// Scores submissions the way the platform does: percentage of questions whose
/// selected option matches the correct one, passed when `score >= passing_score`.
#[derive(Clone)]
pub struct InMemoryExamApi {
    state: Arc<Mutex<State>>,
    student_id: UserId,
    clock: Clock,
}

impl Default for InMemoryExamApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryExamApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            student_id: UserId::new(1),
            clock: Clock::system(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_student(mut self, student_id: UserId) -> Self {
        self.student_id = student_id;
        self
    }

    /// Add or replace an exam.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the internal lock is poisoned.
    pub fn insert_exam(&self, exam: Exam) -> Result<(), ApiError> {
        self.lock()?.exams.insert(exam.id(), exam);
        Ok(())
    }

    /// Make every following `get_exam` call fail (or succeed again).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the internal lock is poisoned.
    pub fn fail_loads(&self, failing: bool) -> Result<(), ApiError> {
        self.lock()?.failing_loads = failing;
        Ok(())
    }

    /// Make the next `count` submissions fail.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the internal lock is poisoned.
    pub fn fail_next_submissions(&self, count: usize) -> Result<(), ApiError> {
        self.lock()?.failing_submissions = count;
        Ok(())
    }

    /// Every submission received so far, including ones that were made to fail.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the internal lock is poisoned.
    pub fn submissions(&self) -> Result<Vec<Submission>, ApiError> {
        Ok(self.lock()?.submissions.clone())
    }

    /// Number of `get_exam` calls received.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the internal lock is poisoned.
    pub fn exam_lookups(&self) -> Result<usize, ApiError> {
        Ok(self.lock()?.exam_lookups)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))
    }

    fn score(&self, exam: &Exam, submission: &Submission, id: u64) -> ExamResult {
        let total = exam.question_count();
        let correct = exam
            .questions()
            .iter()
            .zip(submission.answers())
            .filter(|(question, answer)| {
                question.correct_option().is_some()
                    && question.correct_option() == decode_wire_answer(**answer)
            })
            .count();
        #[allow(clippy::cast_precision_loss)]
        let score = if total == 0 {
            0.0
        } else {
            (correct as f64 * 100.0 / total as f64).round()
        };
        let passing_score = f64::from(exam.passing_score());
        let passed = score >= passing_score;
        let feedback = if passed {
            "Great work, you passed this exam."
        } else {
            "Review the course material and try again."
        };

        ExamResult {
            id: ExamResultId::new(id),
            exam_id: exam.id(),
            student_id: self.student_id,
            score,
            passing_score,
            submitted_at: self.clock.now(),
            correct_answers: u32::try_from(correct).unwrap_or(u32::MAX),
            total_questions: u32::try_from(total).unwrap_or(u32::MAX),
            feedback: feedback.into(),
            passed,
            answers: submission.answers().to_vec(),
        }
    }
}

#[async_trait]
impl ExamApi for InMemoryExamApi {
    async fn get_exam(&self, exam_id: ExamId) -> Result<Exam, ApiError> {
        let mut guard = self.lock()?;
        guard.exam_lookups += 1;
        if guard.failing_loads {
            return Err(ApiError::Unavailable("exam service offline".into()));
        }
        guard
            .exams
            .get(&exam_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("exam {exam_id}"),
            })
    }

    async fn submit_exam(
        &self,
        exam_id: ExamId,
        submission: &Submission,
    ) -> Result<ExamResult, ApiError> {
        let mut guard = self.lock()?;
        guard.submissions.push(submission.clone());
        if guard.failing_submissions > 0 {
            guard.failing_submissions -= 1;
            return Err(ApiError::Unavailable("submission service offline".into()));
        }
        let exam = guard
            .exams
            .get(&exam_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("exam {exam_id}"),
            })?;
        let next_id = u64::try_from(guard.results.len()).unwrap_or(u64::MAX) + 1;
        let result = self.score(&exam, submission, next_id);
        guard.results.push(result.clone());
        Ok(result)
    }

    async fn get_exam_result(&self, exam_id: ExamId) -> Result<ExamResult, ApiError> {
        self.lock()?
            .results
            .iter()
            .rev()
            .find(|result| result.exam_id == exam_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("result for exam {exam_id}"),
            })
    }

    async fn list_course_exams(&self, course_id: CourseId) -> Result<Vec<Exam>, ApiError> {
        let guard = self.lock()?;
        let mut exams: Vec<Exam> = guard
            .exams
            .values()
            .filter(|exam| exam.course_id() == course_id)
            .cloned()
            .collect();
        exams.sort_by_key(Exam::id);
        Ok(exams)
    }

    async fn list_my_results(&self, course_id: CourseId) -> Result<Vec<ExamResult>, ApiError> {
        let guard = self.lock()?;
        Ok(guard
            .results
            .iter()
            .filter(|result| {
                guard
                    .exams
                    .get(&result.exam_id)
                    .is_some_and(|exam| exam.course_id() == course_id)
            })
            .cloned()
            .collect())
    }
}

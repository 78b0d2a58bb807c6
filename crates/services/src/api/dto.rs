use chrono::{DateTime, NaiveDateTime, Utc};
use lms_core::model::{
    CourseId, Exam, ExamId, ExamResult, ExamResultId, Question, QuestionId, Submission, UserId,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Wire shape of an exam as served by `GET /exams/{id}`.
///
/// Kept separate from the domain `Exam` so payload quirks never leak past this module.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub course_id: u64,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    pub time_limit: u32,
    pub passing_score: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: u64,
    pub text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_option_index: Option<i64>,
}

/// Body of `POST /exams/submit/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub exam_id: u64,
    pub answers: Vec<i32>,
}

/// Scored attempt as returned by the submit and results endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResultRecord {
    pub id: u64,
    pub exam_id: u64,
    pub student_id: u64,
    pub score: f64,
    pub passing_score: f64,
    pub submission_date: String,
    pub correct_answers: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub feedback: Option<String>,
    pub passed: bool,
    #[serde(default)]
    pub answers: Vec<i32>,
}

impl ExamRecord {
    /// Convert the record into a validated domain `Exam`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidExam` when the payload violates exam invariants.
    pub fn into_exam(self) -> Result<Exam, ApiError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect();
        let exam = Exam::new(
            ExamId::new(self.id),
            self.title,
            self.description.unwrap_or_default(),
            CourseId::new(self.course_id),
            questions,
            self.time_limit,
            self.passing_score,
        )?;
        Ok(exam)
    }
}

impl QuestionRecord {
    fn into_question(self) -> Question {
        let question = Question::new(QuestionId::new(self.id), self.text, self.options);
        // Negative indices are how some payloads say "not disclosed".
        match self
            .correct_option_index
            .and_then(|index| usize::try_from(index).ok())
        {
            Some(index) => question.with_correct_option(index),
            None => question,
        }
    }
}

impl SubmissionRecord {
    #[must_use]
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            exam_id: submission.exam_id().value(),
            answers: submission.answers().to_vec(),
        }
    }
}

impl ExamResultRecord {
    /// Convert the record into a domain `ExamResult`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPayload` if the submission date cannot be parsed.
    pub fn into_result(self) -> Result<ExamResult, ApiError> {
        let submitted_at = parse_submission_date(&self.submission_date)?;
        Ok(ExamResult {
            id: ExamResultId::new(self.id),
            exam_id: ExamId::new(self.exam_id),
            student_id: UserId::new(self.student_id),
            score: self.score,
            passing_score: self.passing_score,
            submitted_at,
            correct_answers: self.correct_answers,
            total_questions: self.total_questions,
            feedback: self.feedback.unwrap_or_default(),
            passed: self.passed,
            answers: self.answers,
        })
    }
}

/// Accepts RFC 3339 timestamps and zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC).
fn parse_submission_date(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ApiError::InvalidPayload(format!("unrecognized submission date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::ExamError;

    const EXAM_JSON: &str = r#"{
        "id": 12,
        "title": "Lifetimes",
        "description": "Chapter 10",
        "courseId": 4,
        "questions": [
            { "id": 1, "text": "What is 'static?", "options": ["a", "b", "c"], "correctOptionIndex": 2 },
            { "id": 2, "text": "Elision?", "options": ["yes", "no"] }
        ],
        "timeLimit": 20,
        "passingScore": 70
    }"#;

    #[test]
    fn decodes_exam_payload() {
        let record: ExamRecord = serde_json::from_str(EXAM_JSON).unwrap();
        let exam = record.into_exam().unwrap();

        assert_eq!(exam.id(), ExamId::new(12));
        assert_eq!(exam.course_id(), CourseId::new(4));
        assert_eq!(exam.time_limit_secs(), 1200);
        assert_eq!(exam.question(0).unwrap().correct_option(), Some(2));
        assert_eq!(exam.question(1).unwrap().correct_option(), None);
    }

    #[test]
    fn negative_correct_index_means_undisclosed() {
        let record = QuestionRecord {
            id: 1,
            text: "q".into(),
            options: vec!["a".into()],
            correct_option_index: Some(-1),
        };
        assert_eq!(record.into_question().correct_option(), None);
    }

    #[test]
    fn exam_without_questions_is_rejected() {
        let record: ExamRecord = serde_json::from_str(
            r#"{"id":1,"title":"t","courseId":1,"timeLimit":5,"passingScore":50}"#,
        )
        .unwrap();
        let err = record.into_exam().unwrap_err();
        assert!(matches!(err, ApiError::InvalidExam(ExamError::NoQuestions)));
    }

    #[test]
    fn encodes_submission_in_camel_case() {
        let record = SubmissionRecord {
            exam_id: 12,
            answers: vec![1, -1],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "examId": 12, "answers": [1, -1] }));
    }

    #[test]
    fn decodes_result_with_zone_less_date() {
        let json = r#"{
            "id": 3, "examId": 12, "studentId": 8, "score": 50.0, "passingScore": 70.0,
            "submissionDate": "2024-05-01T10:15:30.123", "correctAnswers": 1,
            "totalQuestions": 2, "feedback": null, "passed": false, "answers": [2, 0]
        }"#;
        let record: ExamResultRecord = serde_json::from_str(json).unwrap();
        let result = record.into_result().unwrap();

        assert_eq!(result.exam_id, ExamId::new(12));
        assert_eq!(result.feedback, "");
        assert!(!result.passed);
        assert_eq!(
            result.submitted_at.to_rfc3339(),
            "2024-05-01T10:15:30.123+00:00"
        );
    }

    #[test]
    fn decodes_rfc3339_dates() {
        let parsed = parse_submission_date("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert!(parse_submission_date("yesterday").is_err());
    }
}

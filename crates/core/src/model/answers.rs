use thiserror::Error;

use crate::model::exam::Exam;
use crate::model::ids::ExamId;

/// Wire value for a question with no option selected.
pub const UNANSWERED: i32 = -1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question {index} is out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} is out of range for question {question} ({options} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        options: usize,
    },
}

/// The learner's current selection per question.
///
/// Always holds exactly one entry per exam question, in question order. Each
/// entry is either unanswered or a valid option index for its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: Vec<Option<usize>>,
    option_counts: Vec<usize>,
}

impl AnswerSheet {
    /// All-unanswered sheet shaped after the exam's questions.
    #[must_use]
    pub fn for_exam(exam: &Exam) -> Self {
        let option_counts: Vec<usize> = exam
            .questions()
            .iter()
            .map(|question| question.option_count())
            .collect();
        Self {
            selections: vec![None; option_counts.len()],
            option_counts,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Selected option for a question, `None` when unanswered or out of range.
    #[must_use]
    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    #[must_use]
    pub fn is_answered(&self, question: usize) -> bool {
        self.selection(question).is_some()
    }

    /// Overwrite the selection for a question. Re-selecting the same option is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` when either index is out of bounds.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), AnswerError> {
        let len = self.selections.len();
        let options = *self
            .option_counts
            .get(question)
            .ok_or(AnswerError::QuestionOutOfRange { index: question, len })?;
        if option >= options {
            return Err(AnswerError::OptionOutOfRange {
                question,
                option,
                options,
            });
        }
        self.selections[question] = Some(option);
        Ok(())
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.selections.iter().filter(|entry| entry.is_none()).count()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.len() - self.unanswered_count()
    }

    /// Wire encoding: option index per question, `-1` for unanswered.
    #[must_use]
    pub fn to_wire(&self) -> Vec<i32> {
        self.selections
            .iter()
            .map(|entry| entry.map_or(UNANSWERED, |option| i32::try_from(option).unwrap_or(i32::MAX)))
            .collect()
    }
}

/// Decode a single wire answer value; negative values mean unanswered.
#[must_use]
pub fn decode_wire_answer(value: i32) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Final answers for an exam, sent to the API exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    exam_id: ExamId,
    answers: Vec<i32>,
}

impl Submission {
    #[must_use]
    pub fn from_sheet(exam_id: ExamId, sheet: &AnswerSheet) -> Self {
        Self {
            exam_id,
            answers: sheet.to_wire(),
        }
    }

    #[must_use]
    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    #[must_use]
    pub fn answers(&self) -> &[i32] {
        &self.answers
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.answers.iter().filter(|value| **value == UNANSWERED).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exam::Question;
    use crate::model::ids::{CourseId, QuestionId};

    fn exam_with_options(counts: &[usize]) -> Exam {
        let questions = counts
            .iter()
            .enumerate()
            .map(|(i, n)| {
                Question::new(
                    QuestionId::new(i as u64 + 1),
                    format!("Q{i}"),
                    (0..*n).map(|o| format!("opt {o}")).collect(),
                )
            })
            .collect();
        Exam::new(
            ExamId::new(5),
            "Exam",
            "",
            CourseId::new(1),
            questions,
            10,
            60,
        )
        .unwrap()
    }

    #[test]
    fn fresh_sheet_matches_question_count_and_is_unanswered() {
        let exam = exam_with_options(&[4, 3, 2]);
        let sheet = AnswerSheet::for_exam(&exam);
        assert_eq!(sheet.len(), exam.question_count());
        assert_eq!(sheet.to_wire(), vec![-1, -1, -1]);
        assert_eq!(sheet.unanswered_count(), 3);
    }

    #[test]
    fn select_then_read_back() {
        let exam = exam_with_options(&[4, 3]);
        let mut sheet = AnswerSheet::for_exam(&exam);
        for question in 0..2 {
            for option in 0..exam.question(question).unwrap().option_count() {
                sheet.select(question, option).unwrap();
                assert_eq!(sheet.selection(question), Some(option));
            }
        }
    }

    #[test]
    fn reselecting_same_option_is_idempotent() {
        let exam = exam_with_options(&[3]);
        let mut sheet = AnswerSheet::for_exam(&exam);
        sheet.select(0, 1).unwrap();
        let snapshot = sheet.clone();
        sheet.select(0, 1).unwrap();
        assert_eq!(sheet, snapshot);
    }

    #[test]
    fn out_of_bounds_selection_leaves_sheet_untouched() {
        let exam = exam_with_options(&[2, 2]);
        let mut sheet = AnswerSheet::for_exam(&exam);

        assert_eq!(
            sheet.select(2, 0),
            Err(AnswerError::QuestionOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            sheet.select(1, 2),
            Err(AnswerError::OptionOutOfRange {
                question: 1,
                option: 2,
                options: 2
            })
        );
        assert_eq!(sheet.to_wire(), vec![-1, -1]);
    }

    #[test]
    fn submission_snapshots_wire_answers() {
        let exam = exam_with_options(&[3, 3]);
        let mut sheet = AnswerSheet::for_exam(&exam);
        sheet.select(0, 1).unwrap();
        let submission = Submission::from_sheet(exam.id(), &sheet);

        sheet.select(1, 2).unwrap();

        assert_eq!(submission.answers(), &[1, -1]);
        assert_eq!(submission.unanswered_count(), 1);
        assert_eq!(submission.exam_id(), ExamId::new(5));
    }

    #[test]
    fn decodes_wire_values() {
        assert_eq!(decode_wire_answer(-1), None);
        assert_eq!(decode_wire_answer(-7), None);
        assert_eq!(decode_wire_answer(2), Some(2));
    }
}

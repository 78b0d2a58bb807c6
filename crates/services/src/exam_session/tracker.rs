use lms_core::model::{AnswerError, AnswerSheet, Exam};

/// Answer state plus the current-question cursor.
///
/// Forward progress with `next` is gated on the current question being
/// answered, while `jump_to` reaches any question regardless of answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerTracker {
    sheet: AnswerSheet,
    current: usize,
}

impl AnswerTracker {
    #[must_use]
    pub fn new(exam: &Exam) -> Self {
        Self {
            sheet: AnswerSheet::for_exam(exam),
            current: 0,
        }
    }

    #[must_use]
    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.sheet.len()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.sheet.len()
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.sheet.selection(self.current)
    }

    /// # Errors
    ///
    /// Returns `AnswerError` when either index is out of bounds.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), AnswerError> {
        self.sheet.select(question, option)
    }

    /// # Errors
    ///
    /// Returns `AnswerError::OptionOutOfRange` for an invalid option.
    pub fn select_current(&mut self, option: usize) -> Result<(), AnswerError> {
        self.sheet.select(self.current, option)
    }

    /// "Next" is offered only before the last question and only once the
    /// current question has an answer.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        !self.is_last() && self.sheet.is_answered(self.current)
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        !self.is_first()
    }

    /// Advance one question. Returns `false` when not allowed.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step back one question. Returns `false` on the first question.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move straight to any question, answered or not.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::QuestionOutOfRange` for an index past the end.
    pub fn jump_to(&mut self, question: usize) -> Result<(), AnswerError> {
        let len = self.sheet.len();
        if question >= len {
            return Err(AnswerError::QuestionOutOfRange {
                index: question,
                len,
            });
        }
        self.current = question;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{CourseId, ExamId, Question, QuestionId};

    fn exam(questions: usize) -> Exam {
        Exam::new(
            ExamId::new(1),
            "Exam",
            "",
            CourseId::new(1),
            (0..questions)
                .map(|i| {
                    Question::new(
                        QuestionId::new(i as u64),
                        format!("Q{i}"),
                        vec!["a".into(), "b".into(), "c".into()],
                    )
                })
                .collect(),
            10,
            50,
        )
        .unwrap()
    }

    #[test]
    fn next_disabled_iff_current_unanswered() {
        let mut tracker = AnswerTracker::new(&exam(3));
        assert!(!tracker.can_go_next());
        assert!(!tracker.next());
        assert_eq!(tracker.current(), 0);

        tracker.select_current(2).unwrap();
        assert!(tracker.can_go_next());
        assert!(tracker.next());
        assert_eq!(tracker.current(), 1);
        assert!(!tracker.can_go_next());
    }

    #[test]
    fn no_next_from_last_question_even_when_answered() {
        let mut tracker = AnswerTracker::new(&exam(2));
        tracker.jump_to(1).unwrap();
        tracker.select_current(0).unwrap();
        assert!(tracker.is_last());
        assert!(!tracker.can_go_next());
        assert!(!tracker.next());
    }

    #[test]
    fn previous_stops_at_first_question() {
        let mut tracker = AnswerTracker::new(&exam(3));
        assert!(!tracker.previous());
        tracker.jump_to(2).unwrap();
        assert!(tracker.previous());
        assert_eq!(tracker.current(), 1);
    }

    #[test]
    fn jump_ignores_answer_state() {
        let mut tracker = AnswerTracker::new(&exam(4));
        tracker.jump_to(3).unwrap();
        assert_eq!(tracker.current(), 3);
        assert!(!tracker.sheet().is_answered(2));
        tracker.jump_to(0).unwrap();
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn jump_past_end_is_rejected() {
        let mut tracker = AnswerTracker::new(&exam(2));
        assert_eq!(
            tracker.jump_to(2),
            Err(AnswerError::QuestionOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn single_question_exam_is_first_and_last() {
        let tracker = AnswerTracker::new(&exam(1));
        assert!(tracker.is_first());
        assert!(tracker.is_last());
    }
}

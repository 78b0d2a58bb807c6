use lms_core::model::{Exam, ExamResult, QuestionOutcome};

use super::time_fmt::{format_datetime, format_elapsed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub question: String,
    pub selected: String,
    pub correct: Option<String>,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamResultVm {
    pub score_label: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub passing_label: String,
    pub correct_label: String,
    pub submitted_label: String,
    pub duration_label: Option<String>,
    pub feedback: Option<String>,
    pub review: Vec<ReviewRowVm>,
    pub can_retake: bool,
}

impl ExamResultVm {
    /// Build the results screen. `exam` enables the per-question review and
    /// `duration_secs` is only known when the result comes straight from an attempt.
    #[must_use]
    pub fn new(result: &ExamResult, exam: Option<&Exam>, duration_secs: Option<u64>) -> Self {
        let review = exam.map(|exam| review_rows(result, exam)).unwrap_or_default();
        Self {
            score_label: format!("{}%", format_score(result.score)),
            status_label: if result.passed { "Passed" } else { "Failed" },
            status_class: if result.passed {
                "result__status result__status--passed"
            } else {
                "result__status result__status--failed"
            },
            passing_label: format!("Passing score: {}%", format_score(result.passing_score)),
            correct_label: format!(
                "{} of {} correct",
                result.correct_answers, result.total_questions
            ),
            submitted_label: format!("Submitted {}", format_datetime(result.submitted_at)),
            duration_label: duration_secs
                .map(|secs| format!("Time taken: {}", format_elapsed(secs))),
            feedback: result.has_feedback().then(|| result.feedback.trim().to_string()),
            review,
            can_retake: result.can_retake(),
        }
    }
}

fn review_rows(result: &ExamResult, exam: &Exam) -> Vec<ReviewRowVm> {
    result
        .review(exam)
        .into_iter()
        .filter_map(|line| {
            let question = exam.question(line.index)?;
            let option_label = |index: usize| {
                question
                    .options()
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("Option {}", index + 1))
            };
            Some(ReviewRowVm {
                number: line.index + 1,
                question: question.text().to_string(),
                selected: line
                    .selected
                    .map_or_else(|| "No answer".to_string(), option_label),
                correct: line.correct.map(option_label),
                class: match line.outcome {
                    QuestionOutcome::Correct => "review__row review__row--correct",
                    QuestionOutcome::Incorrect => "review__row review__row--incorrect",
                    QuestionOutcome::Unanswered => "review__row review__row--unanswered",
                    QuestionOutcome::Unknown => "review__row",
                },
            })
        })
        .collect()
}

/// Whole numbers without decimals, otherwise one decimal place.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{CourseId, ExamId, ExamResultId, Question, QuestionId, UserId};
    use lms_core::time::fixed_now;

    fn exam() -> Exam {
        Exam::new(
            ExamId::new(2),
            "Traits",
            "",
            CourseId::new(1),
            vec![
                Question::new(
                    QuestionId::new(1),
                    "Which keyword declares a trait?",
                    vec!["impl".into(), "trait".into()],
                )
                .with_correct_option(1),
                Question::new(
                    QuestionId::new(2),
                    "Is dyn Trait sized?",
                    vec!["yes".into(), "no".into()],
                )
                .with_correct_option(1),
                Question::new(
                    QuestionId::new(3),
                    "Pick any",
                    vec!["a".into(), "b".into()],
                ),
            ],
            5,
            70,
        )
        .unwrap()
    }

    fn result(passed: bool, feedback: &str) -> ExamResult {
        ExamResult {
            id: ExamResultId::new(9),
            exam_id: ExamId::new(2),
            student_id: UserId::new(4),
            score: 33.3,
            passing_score: 70.0,
            submitted_at: fixed_now(),
            correct_answers: 1,
            total_questions: 3,
            feedback: feedback.into(),
            passed,
            answers: vec![1, -1, 0],
        }
    }

    #[test]
    fn failed_result_offers_retake() {
        let vm = ExamResultVm::new(&result(false, "  "), None, None);

        assert_eq!(vm.score_label, "33.3%");
        assert_eq!(vm.status_label, "Failed");
        assert_eq!(vm.passing_label, "Passing score: 70%");
        assert_eq!(vm.correct_label, "1 of 3 correct");
        assert_eq!(vm.feedback, None);
        assert_eq!(vm.duration_label, None);
        assert!(vm.review.is_empty());
        assert!(vm.can_retake);
    }

    #[test]
    fn passed_result_hides_retake_and_keeps_feedback() {
        let vm = ExamResultVm::new(&result(true, "Well done"), None, Some(754));
        assert_eq!(vm.status_label, "Passed");
        assert_eq!(vm.feedback.as_deref(), Some("Well done"));
        assert_eq!(vm.duration_label.as_deref(), Some("Time taken: 12:34"));
        assert!(!vm.can_retake);
    }

    #[test]
    fn review_pairs_picks_with_correct_options() {
        let vm = ExamResultVm::new(&result(false, ""), Some(&exam()), None);

        assert_eq!(vm.review.len(), 3);
        assert_eq!(vm.review[0].selected, "trait");
        assert_eq!(vm.review[0].class, "review__row review__row--correct");
        assert_eq!(vm.review[1].selected, "No answer");
        assert_eq!(vm.review[1].correct.as_deref(), Some("no"));
        assert_eq!(vm.review[1].class, "review__row review__row--unanswered");
        assert_eq!(vm.review[2].correct, None);
        assert_eq!(vm.review[2].class, "review__row");
    }
}

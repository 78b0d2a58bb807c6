use services::{ExamSession, SessionPhase};

use super::time_fmt::{format_countdown, is_urgent};

/// User actions on the exam screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamIntent {
    Select(usize),
    Next,
    Previous,
    Jump(usize),
    Submit,
    ConfirmSubmit,
    CancelSubmit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerState {
    Current,
    Answered,
    Unanswered,
}

impl PickerState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Current => "picker__item picker__item--current",
            Self::Answered => "picker__item picker__item--answered",
            Self::Unanswered => "picker__item",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerItemVm {
    pub index: usize,
    pub label: String,
    pub state: PickerState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Render-ready snapshot of an exam session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TakeExamVm {
    pub title: String,
    pub description: String,
    pub current: usize,
    pub position_label: String,
    pub progress_percent: u32,
    pub question_text: String,
    pub options: Vec<OptionVm>,
    pub picker: Vec<PickerItemVm>,
    pub countdown_label: String,
    pub urgent: bool,
    pub show_unanswered_warning: bool,
    pub can_previous: bool,
    pub can_next: bool,
    pub is_last: bool,
    pub submitting: bool,
    pub submit_label: &'static str,
    pub answered: usize,
    pub total: usize,
}

impl TakeExamVm {
    #[must_use]
    pub fn from_session(session: &ExamSession) -> Self {
        let exam = session.exam();
        let tracker = session.tracker();
        let sheet = session.answers();
        let current = tracker.current();
        let total = tracker.question_count();
        let question = exam.question(current);
        let selected = tracker.current_selection();

        let options = question
            .map(|question| {
                question
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(index, label)| OptionVm {
                        index,
                        label: label.clone(),
                        selected: selected == Some(index),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let picker = (0..total)
            .map(|index| PickerItemVm {
                index,
                label: (index + 1).to_string(),
                state: if index == current {
                    PickerState::Current
                } else if sheet.is_answered(index) {
                    PickerState::Answered
                } else {
                    PickerState::Unanswered
                },
            })
            .collect();

        let remaining = session.remaining_secs();
        let submitting = session.phase() != SessionPhase::Taking;

        Self {
            title: exam.title().to_string(),
            description: exam.description().to_string(),
            current,
            position_label: format!("Question {} of {total}", current + 1),
            progress_percent: progress_percent(current, total),
            question_text: question.map(|q| q.text().to_string()).unwrap_or_default(),
            options,
            picker,
            countdown_label: format_countdown(remaining),
            urgent: is_urgent(remaining),
            show_unanswered_warning: selected.is_none(),
            can_previous: tracker.can_go_previous(),
            can_next: tracker.can_go_next(),
            is_last: tracker.is_last(),
            submitting,
            submit_label: if submitting { "Submitting..." } else { "Submit exam" },
            answered: sheet.answered_count(),
            total,
        }
    }
}

/// Percentage of the way through the exam, counting the current question.
#[must_use]
pub fn progress_percent(current: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = ((current + 1) as f64 / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u32
}

/// Text of the confirmation prompt for submitting with gaps.
#[must_use]
pub fn confirmation_message(unanswered: usize) -> String {
    let noun = if unanswered == 1 { "question" } else { "questions" };
    format!("You have {unanswered} unanswered {noun}. Submit anyway?")
}

mod exam_vm;
mod result_vm;
mod time_fmt;

pub use exam_vm::{
    ExamIntent, OptionVm, PickerItemVm, PickerState, TakeExamVm, confirmation_message,
    progress_percent,
};
pub use result_vm::{ExamResultVm, ReviewRowVm};
pub use time_fmt::{URGENT_BELOW_SECS, format_countdown, format_datetime, format_elapsed, is_urgent};

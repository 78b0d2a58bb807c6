mod answers;
mod exam;
mod ids;
mod result;
mod user;

pub use answers::{AnswerError, AnswerSheet, Submission, UNANSWERED, decode_wire_answer};
pub use exam::{Exam, ExamError, Question};
pub use ids::{CourseId, ExamId, ExamResultId, ParseIdError, QuestionId, UserId};
pub use result::{ExamResult, QuestionOutcome, QuestionReview};
pub use user::{Role, User};

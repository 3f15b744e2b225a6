//! Wire types for the JudgeFlow backend.
//!
//! Response envelopes (`{"problems": [...]}`, `{"user": {...}}`) are unwrapped
//! in [`crate::api`]; the types here are the payloads inside them.

mod contest;
mod dashboard;
mod enums;
mod problem;
mod review;
mod submission;
mod time;
mod user;

pub use contest::{
    Contest, ContestProblem, ContestStatus, ContestSubmitRequest, ContestSummary, NewContest,
};
pub use dashboard::{DashboardData, DashboardStats, UpcomingContest};
pub use enums::{Difficulty, Language, SubmissionStatus};
pub use problem::{
    ActionResponse, NewQuestion, PendingFilter, PendingQuestion, Problem, ProblemQuery,
    ProblemSummary, TestCase,
};
pub use review::{ReviewRequest, ReviewResponse, UserProgress};
pub use submission::{
    RunRequest, RunResult, SubmitRequest, Submission, SubmissionSummary, TestCaseResult, Verdict,
};
pub use time::{format_timestamp, parse_timestamp};
pub use user::{AuthResponse, LoginRequest, SignupRequest, User};

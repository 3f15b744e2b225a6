//! Results delivered from spawned API tasks back to the event loop.

use crate::error::ApiResult;
use crate::models::{
    ActionResponse, Contest, ContestSummary, DashboardData, PendingFilter, PendingQuestion, Problem,
    ProblemSummary, ReviewResponse, RunResult, Submission, SubmissionSummary, User, UserProgress,
    Verdict,
};

/// Messages received by the event loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Startup profile fetch finished.
    SessionResolved(ApiResult<User>),
    /// Logout call finished (its result does not matter).
    LoggedOut,
    /// A task spawned while `generation` was current has finished.
    Task { generation: u64, payload: Payload },
}

/// What a finished task produced.
#[derive(Debug, Clone)]
pub enum Payload {
    LoggedIn(ApiResult<User>),
    SignedUp(ApiResult<User>),
    Dashboard(ApiResult<DashboardData>),
    Problems(ApiResult<Vec<ProblemSummary>>),
    Problem(ApiResult<Problem>),
    Submissions(ApiResult<Vec<SubmissionSummary>>),
    Submission(ApiResult<Submission>),
    Contests(ApiResult<Vec<ContestSummary>>),
    Contest(ApiResult<Contest>),
    /// Statement of the problem selected inside a contest.
    ContestProblem { id: i64, result: ApiResult<Problem> },
    ContestSubmissions(ApiResult<Vec<SubmissionSummary>>),
    PendingQuestions {
        filter: PendingFilter,
        result: ApiResult<Vec<PendingQuestion>>,
    },
    Progress(ApiResult<UserProgress>),
    Review(ApiResult<ReviewResponse>),
    Ran(ApiResult<RunResult>),
    Judged(ApiResult<Verdict>),
    ContestCreated(ApiResult<ContestSummary>),
    QuestionProposed(ApiResult<ActionResponse>),
    Moderated {
        action: ModerationAction,
        id: i64,
        result: ApiResult<ActionResponse>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    DeleteProblem,
}

impl ModerationAction {
    pub fn past_tense(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approved",
            ModerationAction::Reject => "rejected",
            ModerationAction::DeleteProblem => "deleted",
        }
    }
}

impl Payload {
    /// The error carried by the payload, if the call failed.
    pub fn error(&self) -> Option<&crate::error::ApiError> {
        match self {
            Payload::LoggedIn(r) | Payload::SignedUp(r) => r.as_ref().err(),
            Payload::Dashboard(r) => r.as_ref().err(),
            Payload::Problems(r) => r.as_ref().err(),
            Payload::Problem(r) | Payload::ContestProblem { result: r, .. } => r.as_ref().err(),
            Payload::Submissions(r) | Payload::ContestSubmissions(r) => r.as_ref().err(),
            Payload::Submission(r) => r.as_ref().err(),
            Payload::Contests(r) => r.as_ref().err(),
            Payload::Contest(r) => r.as_ref().err(),
            Payload::PendingQuestions { result: r, .. } => r.as_ref().err(),
            Payload::Progress(r) => r.as_ref().err(),
            Payload::Review(r) => r.as_ref().err(),
            Payload::Ran(r) => r.as_ref().err(),
            Payload::Judged(r) => r.as_ref().err(),
            Payload::ContestCreated(r) => r.as_ref().err(),
            Payload::QuestionProposed(r) => r.as_ref().err(),
            Payload::Moderated { result, .. } => result.as_ref().err(),
        }
    }
}

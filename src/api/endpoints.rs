//! Endpoint functions of [`JudgeApi`].

use serde::Deserialize;

use super::JudgeApi;
use crate::error::ApiResult;
use crate::models::{
    ActionResponse, AuthResponse, Contest, ContestSubmitRequest, ContestSummary, DashboardData,
    LoginRequest, NewContest, NewQuestion, PendingFilter, PendingQuestion, Problem, ProblemQuery,
    ProblemSummary, ReviewRequest, ReviewResponse, RunRequest, RunResult, SignupRequest,
    SubmitRequest, Submission, SubmissionSummary, User, UserProgress, Verdict,
};

/// API paths, relative to the base URL.
pub mod paths {
    pub const LOGIN: &str = "/accounts/login/";
    pub const SIGNUP: &str = "/accounts/signup/";
    pub const LOGOUT: &str = "/accounts/logout/";
    pub const PROFILE: &str = "/accounts/profile/";
    pub const DASHBOARD: &str = "/accounts/dashboard/";
    pub const TOKEN_REFRESH: &str = "/accounts/token/refresh/";
    pub const PROBLEMS: &str = "/problems/";
    pub const SUBMISSIONS: &str = "/problems/submissions/";
    pub const SUBMIT_PENDING_QUESTION: &str = "/problems/submit-pending-question/";
    pub const PENDING_QUESTIONS: &str = "/problems/pending-questions/";
    pub const RUN_CODE: &str = "/compiler/run-code/";
    pub const SUBMIT_SOLUTION: &str = "/compiler/submit-solution/";
    pub const CODE_REVIEW: &str = "/compiler/ai-review/";
    pub const CONTESTS: &str = "/contests/";
    pub const CREATE_CONTEST: &str = "/contests/create/";
    pub const SUBMIT_CONTEST: &str = "/contests/submit/";
    pub const COMPREHENSIVE_REVIEW: &str = "/ai-review/comprehensive-ai-review/";
    pub const USER_PROGRESS: &str = "/ai-review/user-progress/";

    pub fn problem(id: i64) -> String {
        format!("/problems/{}/", id)
    }

    pub fn submission(id: i64) -> String {
        format!("/problems/submissions/{}/", id)
    }

    pub fn approve_question(id: i64) -> String {
        format!("/problems/approve-pending-question/{}/", id)
    }

    pub fn reject_question(id: i64) -> String {
        format!("/problems/reject-pending-question/{}/", id)
    }

    pub fn delete_problem(id: i64) -> String {
        format!("/problems/delete-problem/{}/", id)
    }

    pub fn contest(id: i64) -> String {
        format!("/contests/{}/", id)
    }

    pub fn contest_submissions(id: i64) -> String {
        format!("/contests/{}/submissions/", id)
    }

    pub fn problem_review(id: i64) -> String {
        format!("/ai-review/problems/{}/ai-review/", id)
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct ProblemsEnvelope {
    problems: Vec<ProblemSummary>,
}

#[derive(Deserialize)]
struct ProblemEnvelope {
    problem: Problem,
}

#[derive(Deserialize)]
struct SubmissionsEnvelope {
    submissions: Vec<SubmissionSummary>,
}

#[derive(Deserialize)]
struct SubmissionEnvelope {
    submission: Submission,
}

#[derive(Deserialize)]
struct ContestsEnvelope {
    contests: Vec<ContestSummary>,
}

#[derive(Deserialize)]
struct ContestEnvelope {
    contest: Contest,
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<PendingQuestion>,
}

impl JudgeApi {
    // ========================================================================
    // Accounts
    // ========================================================================

    /// Log in with a username or email. Stores the issued tokens.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post_json(paths::LOGIN, &request, "Login failed").await?;
        self.storage().store(&response.tokens);
        tracing::info!("Logged in as {}", response.user.username);
        Ok(response.user)
    }

    /// Create an account. Stores the issued tokens.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> ApiResult<User> {
        let request = SignupRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self
            .post_json(paths::SIGNUP, &request, "Signup failed")
            .await?;
        self.storage().store(&response.tokens);
        tracing::info!("Signed up as {}", response.user.username);
        Ok(response.user)
    }

    /// Tell the backend, then forget the tokens whatever it answered.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .post_empty::<ActionResponse>(paths::LOGOUT, "Logout failed")
            .await;
        self.storage().clear();
        tracing::info!("Logged out");
        result.map(|_| ())
    }

    pub async fn profile(&self) -> ApiResult<User> {
        let envelope: UserEnvelope = self
            .get_json(paths::PROFILE, "Failed to fetch profile")
            .await?;
        Ok(envelope.user)
    }

    pub async fn dashboard(&self) -> ApiResult<DashboardData> {
        self.get_json(paths::DASHBOARD, "Failed to fetch dashboard data")
            .await
    }

    // ========================================================================
    // Problems and submissions
    // ========================================================================

    pub async fn problems(&self, query: &ProblemQuery) -> ApiResult<Vec<ProblemSummary>> {
        let path = format!("{}{}", paths::PROBLEMS, query.to_query_string());
        let envelope: ProblemsEnvelope = self.get_json(&path, "Failed to fetch problems").await?;
        Ok(envelope.problems)
    }

    pub async fn problem(&self, id: i64) -> ApiResult<Problem> {
        let envelope: ProblemEnvelope = self
            .get_json(&paths::problem(id), "Failed to fetch problem")
            .await?;
        Ok(envelope.problem)
    }

    pub async fn submissions(&self) -> ApiResult<Vec<SubmissionSummary>> {
        let envelope: SubmissionsEnvelope = self
            .get_json(paths::SUBMISSIONS, "Failed to fetch submissions")
            .await?;
        Ok(envelope.submissions)
    }

    pub async fn submission(&self, id: i64) -> ApiResult<Submission> {
        let envelope: SubmissionEnvelope = self
            .get_json(&paths::submission(id), "Failed to fetch submission")
            .await?;
        Ok(envelope.submission)
    }

    // ========================================================================
    // Moderation
    // ========================================================================

    pub async fn submit_pending_question(&self, question: &NewQuestion) -> ApiResult<ActionResponse> {
        self.post_json(
            paths::SUBMIT_PENDING_QUESTION,
            question,
            "Failed to submit question",
        )
        .await
    }

    /// Staff only; others get a 403.
    pub async fn pending_questions(&self, filter: PendingFilter) -> ApiResult<Vec<PendingQuestion>> {
        let path = format!("{}{}", paths::PENDING_QUESTIONS, filter.query());
        let envelope: QuestionsEnvelope = self
            .get_json(&path, "Failed to fetch pending questions")
            .await?;
        Ok(envelope.questions)
    }

    pub async fn approve_pending_question(&self, id: i64) -> ApiResult<ActionResponse> {
        self.post_empty(&paths::approve_question(id), "Failed to approve question")
            .await
    }

    pub async fn reject_pending_question(&self, id: i64) -> ApiResult<ActionResponse> {
        self.post_empty(&paths::reject_question(id), "Failed to reject question")
            .await
    }

    pub async fn delete_problem(&self, id: i64) -> ApiResult<ActionResponse> {
        self.delete_json(&paths::delete_problem(id), "Failed to delete problem")
            .await
    }

    // ========================================================================
    // Compiler
    // ========================================================================

    pub async fn run_code(&self, request: &RunRequest) -> ApiResult<RunResult> {
        self.post_json(paths::RUN_CODE, request, "Failed to run code")
            .await
    }

    pub async fn submit_solution(&self, request: &SubmitRequest) -> ApiResult<Verdict> {
        self.post_json(paths::SUBMIT_SOLUTION, request, "Failed to submit solution")
            .await
    }

    pub async fn code_review(&self, request: &ReviewRequest) -> ApiResult<ReviewResponse> {
        self.post_json(paths::CODE_REVIEW, request, "Failed to get AI review")
            .await
    }

    // ========================================================================
    // Contests
    // ========================================================================

    pub async fn contests(&self) -> ApiResult<Vec<ContestSummary>> {
        let envelope: ContestsEnvelope = self
            .get_json(paths::CONTESTS, "Failed to fetch contests")
            .await?;
        Ok(envelope.contests)
    }

    pub async fn contest(&self, id: i64) -> ApiResult<Contest> {
        let envelope: ContestEnvelope = self
            .get_json(&paths::contest(id), "Failed to fetch contest")
            .await?;
        Ok(envelope.contest)
    }

    pub async fn create_contest(&self, contest: &NewContest) -> ApiResult<ContestSummary> {
        self.post_json(paths::CREATE_CONTEST, contest, "Failed to create contest")
            .await
    }

    pub async fn submit_contest_solution(&self, request: &ContestSubmitRequest) -> ApiResult<Verdict> {
        self.post_json(
            paths::SUBMIT_CONTEST,
            request,
            "Failed to submit contest solution",
        )
        .await
    }

    pub async fn contest_submissions(&self, contest_id: i64) -> ApiResult<Vec<SubmissionSummary>> {
        let envelope: SubmissionsEnvelope = self
            .get_json(
                &paths::contest_submissions(contest_id),
                "Failed to fetch contest submissions",
            )
            .await?;
        Ok(envelope.submissions)
    }

    // ========================================================================
    // AI review
    // ========================================================================

    pub async fn comprehensive_review(&self) -> ApiResult<ReviewResponse> {
        self.post_empty(
            paths::COMPREHENSIVE_REVIEW,
            "Failed to get comprehensive AI review",
        )
        .await
    }

    pub async fn problem_review(&self, problem_id: i64, code: &str) -> ApiResult<ReviewResponse> {
        self.post_json(
            &paths::problem_review(problem_id),
            &serde_json::json!({ "code": code }),
            "Failed to get problem AI review",
        )
        .await
    }

    pub async fn user_progress(&self) -> ApiResult<UserProgress> {
        self.get_json(paths::USER_PROGRESS, "Failed to fetch progress")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySessionStorage, MockHttpClient, MockResponse};
    use crate::auth::Tokens;
    use crate::error::ApiError;
    use crate::models::{Difficulty, Language, SubmissionStatus};
    use crate::traits::{HttpError, Method, SessionStorage};
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://judge.test/api";

    fn api() -> (JudgeApi, MockHttpClient, MemorySessionStorage) {
        let http = MockHttpClient::new();
        let storage = MemorySessionStorage::new();
        let api = JudgeApi::with_parts(Arc::new(http.clone()), Arc::new(storage.clone()), BASE);
        (api, http, storage)
    }

    fn url(path: &str) -> String {
        format!("{}{}", BASE, path)
    }

    #[tokio::test]
    async fn test_login_stores_tokens_and_returns_user() {
        let (api, http, storage) = api();
        http.on_post(
            &url(paths::LOGIN),
            MockResponse::json(
                200,
                json!({"success": true, "tokens": {"access": "A", "refresh": "R"},
                       "user": {"id": 1, "username": "alice", "email": "a@x.io", "is_staff": false}}),
            ),
        );

        let user = api.login("alice", "secret").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(storage.snapshot(), Tokens::new("A", "R"));

        let sent: serde_json::Value =
            serde_json::from_str(http.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"username": "alice", "password": "secret"}));
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_backend_error() {
        let (api, http, storage) = api();
        http.on_post(
            &url(paths::LOGIN),
            MockResponse::json(400, json!({"success": false, "error": "Invalid credentials"})),
        );

        let err = api.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!storage.has_access_token());
    }

    #[tokio::test]
    async fn test_logout_clears_tokens_even_on_failure() {
        let (api, http, storage) = api();
        storage.store(&Tokens::new("A", "R"));
        http.on_post(
            &url(paths::LOGOUT),
            MockResponse::Error(HttpError::ConnectionFailed("down".into())),
        );

        assert!(api.logout().await.is_err());
        assert!(!storage.has_access_token());
    }

    #[tokio::test]
    async fn test_problems_sends_query_and_unwraps_envelope() {
        let (api, http, _) = api();
        let query = ProblemQuery {
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };
        http.on_get(
            &url("/problems/?difficulty=hard"),
            MockResponse::json(
                200,
                json!({"problems": [{"id": 4, "title": "Graph", "difficulty": "hard", "tags": ["bfs"], "is_pending": false}]}),
            ),
        );

        let problems = api.problems(&query).await.unwrap();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].tags, vec!["bfs".to_string()]);
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_static_message() {
        let (api, http, _) = api();
        http.on_get(&url(paths::SUBMISSIONS), MockResponse::status(500));

        let err = api.submissions().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                context: "Failed to fetch submissions",
                status: 500,
                detail: None
            }
        );
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let (api, http, _) = api();
        http.on_get(&url(&paths::contest(3)), MockResponse::json(200, json!({"nope": 1})));

        let err = api.contest(3).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { context: "Failed to fetch contest", .. }));
    }

    #[tokio::test]
    async fn test_submit_solution_body_and_verdict() {
        let (api, http, storage) = api();
        storage.store(&Tokens::new("A", "R"));
        http.on_post(
            &url(paths::SUBMIT_SOLUTION),
            MockResponse::json(
                200,
                json!({"submission_id": 77, "status": "accepted", "runtime": 0.0, "memory": 0.0, "test_results": []}),
            ),
        );

        let verdict = api
            .submit_solution(&SubmitRequest {
                problem_id: 5,
                code: "print(1)".into(),
                language: Language::Python,
            })
            .await
            .unwrap();
        assert_eq!(verdict.submission_id, 77);
        assert_eq!(verdict.status, SubmissionStatus::Accepted);

        let request = &http.requests()[0];
        assert_eq!(request.bearer(), Some("A"));
        let sent: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"problem_id": 5, "code": "print(1)", "language": "python"}));
    }

    #[tokio::test]
    async fn test_moderation_routes() {
        let (api, http, _) = api();
        http.on_post(
            &url(&paths::approve_question(9)),
            MockResponse::json(200, json!({"success": true, "message": "Question approved successfully"})),
        );
        http.on_delete(
            &url(&paths::delete_problem(4)),
            MockResponse::json(403, json!({"error": "Access denied"})),
        );

        let approved = api.approve_pending_question(9).await.unwrap();
        assert!(approved.success);

        let err = api.delete_problem(4).await.unwrap_err();
        assert!(err.is_forbidden());
        assert_eq!(err.user_message(), "Access denied");
        assert_eq!(http.requests()[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_pending_questions_filter_query() {
        let (api, http, _) = api();
        http.on_get(
            &url("/problems/pending-questions/?approved=true"),
            MockResponse::json(200, json!({"questions": []})),
        );
        assert!(api
            .pending_questions(PendingFilter::Approved)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_problem_review_posts_code() {
        let (api, http, _) = api();
        http.on_post(
            &url(&paths::problem_review(2)),
            MockResponse::json(200, json!({"feedback": "## Overall\n\nFine", "review_id": 3})),
        );

        let review = api.problem_review(2, "x = 1").await.unwrap();
        assert_eq!(review.review_id, Some(3));
        assert_eq!(http.requests()[0].body.as_deref(), Some(r#"{"code":"x = 1"}"#));
    }
}

use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Quiz Rally Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::quiz::list_quizzes,
        crate::routes::game::create_game,
        crate::routes::game::game_snapshot,
        crate::routes::game::advance_game,
        crate::routes::game::answered_progress,
        crate::routes::game::question_tally,
        crate::routes::game::delete_game,
        crate::routes::game::remove_participant,
        crate::routes::participant::join_game,
        crate::routes::participant::submit_guess,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::phase::VisiblePhase,
            crate::dto::quiz::QuizListItem,
            crate::dto::quiz::QuizzesResponse,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::GameSnapshot,
            crate::dto::game::QuizBrief,
            crate::dto::game::QuestionView,
            crate::dto::game::AnswerReveal,
            crate::dto::game::RevealView,
            crate::dto::game::StandingsRow,
            crate::dto::game::AnsweredResponse,
            crate::dto::game::TallyResponse,
            crate::dto::participant::JoinGameRequest,
            crate::dto::participant::JoinResponse,
            crate::dto::participant::SubmitGuessRequest,
            crate::dto::participant::GuessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quizzes", description = "Quiz catalog browsing"),
        (name = "games", description = "Game lifecycle and host controls"),
        (name = "participants", description = "Participant enrollment and guesses"),
    )
)]
pub struct ApiDoc;

// tests/api_tests.rs

use quiz_rally_back::{catalog::QuizCatalog, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    spawn_app_with_capacity(5).await
}

/// Same as [`spawn_app`] but with a caller-chosen public id keyspace, so
/// capacity tests stay deterministic.
async fn spawn_app_with_capacity(max_public_id: u32) -> String {
    let state = AppState::new(QuizCatalog::builtin(), max_public_id, 5);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Look up a quiz id from the catalog endpoint by title.
async fn quiz_id_by_title(client: &reqwest::Client, address: &str, title: &str) -> String {
    let body: serde_json::Value = client
        .get(format!("{}/quizzes", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse quizzes json");

    body["quizzes"]
        .as_array()
        .expect("quizzes array")
        .iter()
        .find(|quiz| quiz["title"] == title)
        .unwrap_or_else(|| panic!("quiz `{title}` not in catalog"))["id"]
        .as_str()
        .expect("quiz id")
        .to_string()
}

/// Create a game playing "Capitals of Europe" and return its snapshot.
async fn create_game(client: &reqwest::Client, address: &str) -> serde_json::Value {
    let quiz_id = quiz_id_by_title(client, address, "Capitals of Europe").await;

    let response = client
        .post(format!("{}/games", address))
        .json(&serde_json::json!({ "quiz_id": quiz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    response.json().await.expect("Failed to parse game json")
}

async fn join(
    client: &reqwest::Client,
    address: &str,
    public_id: u64,
    alias: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/participants", address))
        .json(&serde_json::json!({ "public_id": public_id, "alias": alias }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn advance(client: &reqwest::Client, address: &str, public_id: u64) -> serde_json::Value {
    let response = client
        .post(format!("{}/games/{}/advance", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    response.json().await.expect("Failed to parse snapshot json")
}

async fn submit_guess(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    public_id: u64,
    question_index: u64,
    answer_index: u64,
) -> reqwest::Response {
    client
        .post(format!("{}/guesses", address))
        .json(&serde_json::json!({
            "token": token,
            "public_id": public_id,
            "question_index": question_index,
            "answer_index": answer_index,
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn answered(client: &reqwest::Client, address: &str, public_id: u64) -> serde_json::Value {
    client
        .get(format!("{}/games/{}/answered", address, public_id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse answered json")
}

#[tokio::test]
async fn healthcheck_reports_live_games() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let body: serde_json::Value = client
        .get(format!("{}/healthcheck", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse health json");

    // Assert
    assert_eq!(body["status"], "ok");
    assert_eq!(body["live_games"], 0);

    create_game(&client, &address).await;

    let body: serde_json::Value = client
        .get(format!("{}/healthcheck", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse health json");
    assert_eq!(body["live_games"], 1);
}

#[tokio::test]
async fn listing_quizzes_exposes_the_catalog() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/quizzes", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse quizzes json");
    let quizzes = body["quizzes"].as_array().expect("quizzes array");
    assert_eq!(quizzes.len(), 2);

    let capitals = quizzes
        .iter()
        .find(|quiz| quiz["title"] == "Capitals of Europe")
        .expect("capitals quiz");
    assert_eq!(capitals["question_count"], 2);
    // The list view never leaks question or answer content.
    assert!(capitals.get("questions").is_none());
}

#[tokio::test]
async fn creating_a_game_starts_in_waiting() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let game = create_game(&client, &address).await;

    // Assert
    assert_eq!(game["phase"], "waiting");
    let public_id = game["public_id"].as_u64().expect("public id");
    assert!((1..=5).contains(&public_id));
    assert_eq!(game["participant_count"], 0);
    assert_eq!(game["countdown_seconds"], 5);
    assert!(game.get("question_index").is_none());
    assert_eq!(game["roster"], serde_json::json!([]));
    assert_eq!(game["quiz"]["question_count"], 2);
}

#[tokio::test]
async fn creating_a_game_for_an_unknown_quiz_fails() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(format!("{}/games", address))
        .json(&serde_json::json!({ "quiz_id": uuid::Uuid::new_v4() }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse error json");
    assert!(body["message"].as_str().expect("message").contains("not found"));
}

#[tokio::test]
async fn full_game_round_trip() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Create a game and enroll two players during the waiting phase.
    let game = create_game(&client, &address).await;
    let public_id = game["public_id"].as_u64().expect("public id");

    let ada: serde_json::Value = join(&client, &address, public_id, "ada")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let ada_token = ada["token"].as_str().expect("token");
    assert_eq!(ada["alias"], "ada");
    assert_eq!(ada["public_id"], public_id);

    let grace: serde_json::Value = join(&client, &address, public_id, "grace")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let grace_token = grace["token"].as_str().expect("token");

    let snapshot: serde_json::Value = client
        .get(format!("{}/games/{}", address, public_id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse snapshot json");
    assert_eq!(snapshot["roster"], serde_json::json!(["ada", "grace"]));
    assert_eq!(snapshot["participant_count"], 2);

    // First question: correct answers are never exposed alongside the options.
    let snapshot = advance(&client, &address, public_id).await;
    assert_eq!(snapshot["phase"], "question");
    assert_eq!(snapshot["question_index"], 0);
    assert_eq!(snapshot["countdown_seconds"], 10);
    assert_eq!(
        snapshot["question"]["answers"],
        serde_json::json!(["Paris", "Lyon", "Marseille"])
    );
    assert!(snapshot.get("roster").is_none());
    assert!(snapshot.get("reveal").is_none());

    let progress = answered(&client, &address, public_id).await;
    assert_eq!(progress["answered"], 0);
    assert_eq!(progress["participants"], 2);
    assert_eq!(progress["all_answered"], false);

    // Ada picks Paris (correct), Grace picks Lyon (wrong).
    let response = submit_guess(&client, &address, ada_token, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse guess json");
    assert_eq!(body["question_index"], 0);
    assert_eq!(body["answer_index"], 0);
    // Correctness is not echoed back to the player.
    assert!(body.get("correct").is_none());

    let progress = answered(&client, &address, public_id).await;
    assert_eq!(progress["answered"], 1);
    assert_eq!(progress["all_answered"], false);

    let response = submit_guess(&client, &address, grace_token, public_id, 0, 1).await;
    assert_eq!(response.status().as_u16(), 200);

    let progress = answered(&client, &address, public_id).await;
    assert_eq!(progress["answered"], 2);
    assert_eq!(progress["all_answered"], true);

    // Reveal: per-option counts plus the correct flags.
    let snapshot = advance(&client, &address, public_id).await;
    assert_eq!(snapshot["phase"], "answer");
    assert_eq!(snapshot["question_index"], 0);
    assert_eq!(snapshot["question"]["text"], "What is the capital of France?");
    let reveal = &snapshot["reveal"];
    assert_eq!(reveal["total_guesses"], 2);
    assert_eq!(reveal["answers"][0]["text"], "Paris");
    assert_eq!(reveal["answers"][0]["correct"], true);
    assert_eq!(reveal["answers"][0]["count"], 1);
    assert_eq!(reveal["answers"][1]["count"], 1);
    assert_eq!(reveal["answers"][2]["count"], 0);

    // Interim standings already reflect the first question's scores.
    assert_eq!(snapshot["standings"][0]["alias"], "ada");
    assert_eq!(snapshot["standings"][0]["points"], 1);
    assert_eq!(snapshot["standings"][1]["points"], 0);

    let tally: serde_json::Value = client
        .get(format!("{}/games/{}/tally?question=0", address, public_id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse tally json");
    assert_eq!(tally["question_index"], 0);
    assert_eq!(tally["counts"], serde_json::json!([1, 1, 0]));
    assert_eq!(tally["total"], 2);

    // Without an explicit question the current one is tallied.
    let tally: serde_json::Value = client
        .get(format!("{}/games/{}/tally", address, public_id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse tally json");
    assert_eq!(tally["question_index"], 0);
    assert_eq!(tally["total"], 2);

    // Second question: both pick Madrid (correct).
    let snapshot = advance(&client, &address, public_id).await;
    assert_eq!(snapshot["phase"], "question");
    assert_eq!(snapshot["question_index"], 1);
    assert_eq!(snapshot["question"]["text"], "What is the capital of Spain?");

    let response = submit_guess(&client, &address, ada_token, public_id, 1, 1).await;
    assert_eq!(response.status().as_u16(), 200);
    let response = submit_guess(&client, &address, grace_token, public_id, 1, 1).await;
    assert_eq!(response.status().as_u16(), 200);

    let snapshot = advance(&client, &address, public_id).await;
    assert_eq!(snapshot["phase"], "answer");

    // Leaderboard: sorted by points, alias as tiebreak, and terminal.
    let snapshot = advance(&client, &address, public_id).await;
    assert_eq!(snapshot["phase"], "leaderboard");
    assert_eq!(
        snapshot["standings"],
        serde_json::json!([
            { "alias": "ada", "points": 2 },
            { "alias": "grace", "points": 1 }
        ])
    );
    assert!(snapshot.get("question").is_none());
    assert!(snapshot.get("reveal").is_none());

    let snapshot = advance(&client, &address, public_id).await;
    assert_eq!(snapshot["phase"], "leaderboard");
    assert_eq!(snapshot["standings"][0]["alias"], "ada");

    // Cleanup deletes the game and everything hanging off it.
    let response = client
        .delete(format!("{}/games/{}", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/games/{}", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn joining_rules_are_enforced() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let game = create_game(&client, &address).await;
    let public_id = game["public_id"].as_u64().expect("public id");

    // Alias validation runs before the engine is touched.
    let response = join(&client, &address, public_id, "   ").await;
    assert_eq!(response.status().as_u16(), 400);
    let response = join(&client, &address, public_id, &"x".repeat(51)).await;
    assert_eq!(response.status().as_u16(), 400);
    let response = join(&client, &address, public_id, &"x".repeat(50)).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = join(&client, &address, public_id, "luis").await;
    assert_eq!(response.status().as_u16(), 200);

    // Same alias, same game: rejected, never renamed or merged.
    let response = join(&client, &address, public_id, "luis").await;
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.expect("Failed to parse error json");
    assert!(body["message"].as_str().expect("message").contains("already taken"));

    // Same alias, different game: fine.
    let other = create_game(&client, &address).await;
    let other_id = other["public_id"].as_u64().expect("public id");
    let response = join(&client, &address, other_id, "luis").await;
    assert_eq!(response.status().as_u16(), 200);

    // Once the game leaves the waiting phase the roster is frozen.
    advance(&client, &address, public_id).await;
    let response = join(&client, &address, public_id, "late").await;
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.expect("Failed to parse error json");
    assert!(body["message"].as_str().expect("message").contains("not accepting"));

    // Unknown game code.
    let response = join(&client, &address, 4242, "ada").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn guessing_rules_are_enforced() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let game = create_game(&client, &address).await;
    let public_id = game["public_id"].as_u64().expect("public id");

    let ada: serde_json::Value = join(&client, &address, public_id, "ada")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let ada_token = ada["token"].as_str().expect("token");
    let grace: serde_json::Value = join(&client, &address, public_id, "grace")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let grace_token = grace["token"].as_str().expect("token");

    // No answer window is open while the game is still waiting.
    let response = submit_guess(&client, &address, ada_token, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.expect("Failed to parse error json");
    assert!(body["message"].as_str().expect("message").contains("answer window"));

    advance(&client, &address, public_id).await;

    // Guesses from tokens the game has never issued are rejected.
    let stranger = uuid::Uuid::new_v4().to_string();
    let response = submit_guess(&client, &address, &stranger, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 404);

    // Out-of-range question and answer indices.
    let response = submit_guess(&client, &address, ada_token, public_id, 9, 0).await;
    assert_eq!(response.status().as_u16(), 400);
    let response = submit_guess(&client, &address, ada_token, public_id, 0, 9).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = submit_guess(&client, &address, ada_token, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 200);

    // One guess per participant per question, ever.
    let response = submit_guess(&client, &address, ada_token, public_id, 0, 2).await;
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.expect("Failed to parse error json");
    assert!(body["message"].as_str().expect("message").contains("already recorded"));

    // The window tolerates a guess for a question at or after the current
    // index, so an eager client is not rejected.
    let response = submit_guess(&client, &address, ada_token, public_id, 1, 1).await;
    assert_eq!(response.status().as_u16(), 200);

    // Reveal phase: the window is shut even for players yet to guess.
    advance(&client, &address, public_id).await;
    let response = submit_guess(&client, &address, grace_token, public_id, 0, 1).await;
    assert_eq!(response.status().as_u16(), 409);

    // Next question: a guess against the previous question is stale.
    advance(&client, &address, public_id).await;
    let response = submit_guess(&client, &address, grace_token, public_id, 0, 1).await;
    assert_eq!(response.status().as_u16(), 409);
    let response = submit_guess(&client, &address, grace_token, public_id, 1, 0).await;
    assert_eq!(response.status().as_u16(), 200);

    // Ada's early guess already occupies her (participant, question) slot.
    let response = submit_guess(&client, &address, ada_token, public_id, 1, 0).await;
    assert_eq!(response.status().as_u16(), 409);

    // Tally rejects questions outside the quiz.
    let response = client
        .get(format!("{}/games/{}/tally?question=9", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // Unknown game code.
    let response = submit_guess(&client, &address, ada_token, 4242, 0, 0).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn capacity_exhaustion_and_release() {
    let address = spawn_app_with_capacity(3).await;
    let client = reqwest::Client::new();

    // Fill the whole keyspace with distinct ids.
    let mut ids = std::collections::HashSet::new();
    for _ in 0..3 {
        let game = create_game(&client, &address).await;
        let public_id = game["public_id"].as_u64().expect("public id");
        assert!((1..=3).contains(&public_id));
        ids.insert(public_id);
    }
    assert_eq!(ids.len(), 3);

    // One more create has no id left to hand out.
    let quiz_id = quiz_id_by_title(&client, &address, "Capitals of Europe").await;
    let response = client
        .post(format!("{}/games", address))
        .json(&serde_json::json!({ "quiz_id": quiz_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 503);
    let body: serde_json::Value = response.json().await.expect("Failed to parse error json");
    assert!(body["message"].as_str().expect("message").contains("game codes are in use"));

    // Deleting a game frees its id for the next create.
    let freed = *ids.iter().next().expect("an allocated id");
    let response = client
        .delete(format!("{}/games/{}", address, freed))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);

    let game = create_game(&client, &address).await;
    assert_eq!(game["public_id"].as_u64(), Some(freed));
}

#[tokio::test]
async fn kicking_a_participant_drops_their_guesses() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let game = create_game(&client, &address).await;
    let public_id = game["public_id"].as_u64().expect("public id");

    let ada: serde_json::Value = join(&client, &address, public_id, "ada")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let ada_token = ada["token"].as_str().expect("token");
    let mallory: serde_json::Value = join(&client, &address, public_id, "mallory")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let mallory_token = mallory["token"].as_str().expect("token");

    advance(&client, &address, public_id).await;
    let response = submit_guess(&client, &address, mallory_token, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 200);

    let progress = answered(&client, &address, public_id).await;
    assert_eq!(progress["answered"], 1);
    assert_eq!(progress["participants"], 2);

    // Kicking removes the roster entry and every guess that participant made.
    let response = client
        .delete(format!(
            "{}/games/{}/participants/mallory",
            address, public_id
        ))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);

    let progress = answered(&client, &address, public_id).await;
    assert_eq!(progress["answered"], 0);
    assert_eq!(progress["participants"], 1);
    assert_eq!(progress["all_answered"], false);

    // The kicked token no longer resolves.
    let response = submit_guess(&client, &address, mallory_token, public_id, 0, 1).await;
    assert_eq!(response.status().as_u16(), 404);

    // The remaining roster plays on.
    let response = submit_guess(&client, &address, ada_token, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 200);
    let progress = answered(&client, &address, public_id).await;
    assert_eq!(progress["all_answered"], true);

    // Kicking an absent alias is a safe retry; an absent game is not.
    let response = client
        .delete(format!(
            "{}/games/{}/participants/mallory",
            address, public_id
        ))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .delete(format!("{}/games/4242/participants/mallory", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn deleting_a_game_cascades() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let game = create_game(&client, &address).await;
    let public_id = game["public_id"].as_u64().expect("public id");

    let ada: serde_json::Value = join(&client, &address, public_id, "ada")
        .await
        .json()
        .await
        .expect("Failed to parse join json");
    let ada_token = ada["token"].as_str().expect("token");

    advance(&client, &address, public_id).await;

    let response = client
        .delete(format!("{}/games/{}", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);

    // Every handle into the game is gone with it.
    let response = client
        .get(format!("{}/games/{}", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .post(format!("{}/games/{}/advance", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);

    let response = submit_guess(&client, &address, ada_token, public_id, 0, 0).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .delete(format!("{}/games/{}", address, public_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}

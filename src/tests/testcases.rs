use axum::http::{header, Method, StatusCode};
use serde_json::json;

use super::test_utils::{login_demo, mock_request, raw_request, read_json, setup_test_app};

#[tokio::test]
async fn test_list_and_fetch_polls() {
    let app = setup_test_app();

    let response = mock_request(&app, "/api/polls", Method::GET, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let polls = response.body["data"].as_array().unwrap();
    assert_eq!(polls.len(), 2);
    assert_eq!(polls[0]["totalVotes"], 90);

    let response = mock_request(&app, "/api/polls/2", Method::GET, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Best time for team meetings?");
    assert_eq!(response.body["data"]["requireAuth"], true);

    let response = mock_request(&app, "/api/polls/missing", Method::GET, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Poll not found");
}

#[tokio::test]
async fn test_poll_crud_operations() {
    let app = setup_test_app();

    let create_poll_body = json!({
        "pollData": {
            "title": "Test Poll",
            "description": "Created from a test",
            "options": ["Option 1", " ", "Option 2", "Option 3"],
            "allowMultipleVotes": true,
            "requireAuth": false
        },
        "creatorId": "test_user_id"
    });

    let response =
        mock_request(&app, "/api/polls", Method::POST, Some(create_poll_body), None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Poll created successfully");
    let poll = &response.body["data"];
    let poll_id = poll["id"].as_str().unwrap().to_string();
    assert_eq!(poll["options"].as_array().unwrap().len(), 3);
    assert_eq!(poll["options"][2]["order"], 3);
    assert_eq!(poll["isActive"], true);
    assert_eq!(poll["allowMultipleVotes"], true);

    let response = mock_request(&app, "/api/polls", Method::GET, None, None).await;
    assert_eq!(response.body["data"][0]["id"], poll_id.as_str());

    let response = mock_request(
        &app,
        "/api/polls/creator/test_user_id",
        Method::GET,
        None,
        None,
    )
    .await;
    let polls = response.body["data"].as_array().unwrap();
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0]["id"], poll_id.as_str());

    let response = mock_request(
        &app,
        &format!("/api/polls/{}/close", poll_id),
        Method::POST,
        None,
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = mock_request(
        &app,
        &format!("/api/polls/{}", poll_id),
        Method::GET,
        None,
        None,
    )
    .await;
    assert_eq!(response.body["data"]["isActive"], false);
}

#[tokio::test]
async fn test_poll_validation() {
    let app = setup_test_app();

    let one_option = json!({
        "pollData": { "title": "Lonely", "options": ["Only", "   "] },
        "creatorId": "test_user_id"
    });
    let response = mock_request(&app, "/api/polls", Method::POST, Some(one_option), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "At least 2 options are required");

    let no_creator = json!({ "pollData": { "title": "Orphan", "options": ["a", "b"] } });
    let response = mock_request(&app, "/api/polls", Method::POST, Some(no_creator), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Missing required fields");

    let no_title = json!({
        "pollData": { "title": "  ", "options": ["a", "b"] },
        "creatorId": "test_user_id"
    });
    let response = mock_request(&app, "/api/polls", Method::POST, Some(no_title), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = mock_request(&app, "/api/polls", Method::GET, None, None).await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_anonymous_vote_updates_tally() {
    let app = setup_test_app();

    let response = mock_request(
        &app,
        "/api/polls/1/vote",
        Method::POST,
        Some(json!({ "optionIds": ["4"] })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Vote recorded successfully");

    let response = mock_request(&app, "/api/polls/1", Method::GET, None, None).await;
    let poll = &response.body["data"];
    assert_eq!(poll["options"][3]["text"], "Go");
    assert_eq!(poll["options"][3]["voteCount"], 16);
    assert_eq!(poll["totalVotes"], 91);
    assert_eq!(poll["userVote"]["optionIds"], json!(["4"]));

    let response = mock_request(&app, "/api/polls/1/results", Method::GET, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["totalVotes"], 91);
    assert_eq!(response.body["data"]["options"][3]["votes"], 16);
}

#[tokio::test]
async fn test_revote_replaces_previous_vote() {
    let app = setup_test_app();

    for option in ["1", "2"] {
        let response = mock_request(
            &app,
            "/api/polls/1/vote",
            Method::POST,
            Some(json!({ "optionIds": [option], "userId": "u-7" })),
            None,
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = mock_request(&app, "/api/polls/1", Method::GET, None, None).await;
    let poll = &response.body["data"];
    assert_eq!(poll["options"][0]["voteCount"], 25);
    assert_eq!(poll["options"][1]["voteCount"], 31);
    assert_eq!(poll["totalVotes"], 91);
}

#[tokio::test]
async fn test_vote_failures_keep_status_mapping() {
    let app = setup_test_app();

    let response = mock_request(
        &app,
        "/api/polls/1/vote",
        Method::POST,
        Some(json!({ "optionIds": [] })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Option IDs are required");

    let response = mock_request(
        &app,
        "/api/polls/missing/vote",
        Method::POST,
        Some(json!({ "optionIds": ["1"] })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Poll not found");

    mock_request(&app, "/api/polls/1/close", Method::POST, None, None).await;
    let response = mock_request(
        &app,
        "/api/polls/1/vote",
        Method::POST,
        Some(json!({ "optionIds": ["4"] })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Poll is closed");

    let response = mock_request(&app, "/api/polls/1", Method::GET, None, None).await;
    assert_eq!(response.body["data"]["totalVotes"], 90);
}

#[tokio::test]
async fn test_login_and_register() {
    let app = setup_test_app();

    let response = mock_request(
        &app,
        "/api/auth/login",
        Method::POST,
        Some(json!({ "email": "demo@example.com", "password": "password" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "demo_user");

    let response = mock_request(
        &app,
        "/api/auth/login",
        Method::POST,
        Some(json!({ "email": "demo@example.com", "password": "nope" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid credentials");

    let response = mock_request(
        &app,
        "/api/auth/login",
        Method::POST,
        Some(json!({ "email": "demo@example.com" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = mock_request(
        &app,
        "/api/auth/register",
        Method::POST,
        Some(json!({
            "email": "ada@example.com",
            "password": "pw",
            "username": "ada",
            "firstName": "Ada"
        })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["username"], "ada");
    assert_eq!(response.body["data"]["firstName"], "Ada");
    let cookie = response.cookie.unwrap();

    let response = mock_request(&app, "/api/auth/me", Method::GET, None, Some(&cookie)).await;
    assert_eq!(response.body["data"]["email"], "ada@example.com");

    let response = mock_request(
        &app,
        "/api/auth/register",
        Method::POST,
        Some(json!({ "email": "bob@example.com", "password": "pw" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Email, password, and username are required"
    );
}

#[tokio::test]
async fn test_session_gates_eligibility_and_manage() {
    let app = setup_test_app();

    let response = mock_request(&app, "/api/polls/2/can-vote", Method::GET, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["canVote"], false);
    assert_eq!(response.body["data"]["reason"], "Authentication required");
    assert_eq!(response.body["data"]["shareUrl"], "/polls/2");

    let response = mock_request(&app, "/api/polls/manage", Method::GET, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let cookie = login_demo(&app).await;

    let response = mock_request(
        &app,
        "/api/polls/2/can-vote",
        Method::GET,
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.body["data"]["canVote"], true);

    let response =
        mock_request(&app, "/api/polls/manage", Method::GET, None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);

    let response =
        mock_request(&app, "/api/auth/logout", Method::POST, None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = mock_request(&app, "/api/auth/me", Method::GET, None, Some(&cookie)).await;
    assert_eq!(response.body["data"], serde_json::Value::Null);

    let response =
        mock_request(&app, "/api/polls/manage", Method::GET, None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_already_voted_marker() {
    let app = setup_test_app();

    mock_request(
        &app,
        "/api/polls/1/vote",
        Method::POST,
        Some(json!({ "optionIds": ["2"], "userId": "someone-else" })),
        None,
    )
    .await;

    let response = mock_request(&app, "/api/polls/1/can-vote", Method::GET, None, None).await;
    assert_eq!(response.body["data"]["canVote"], false);
    assert_eq!(response.body["data"]["reason"], "You have already voted");
}

#[tokio::test]
async fn test_credential_checks_are_advisory() {
    let app = setup_test_app();

    let response = mock_request(
        &app,
        "/api/auth/validate",
        Method::POST,
        Some(json!({ "email": "not-an-email", "password": "short" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["emailValid"], false);
    assert_eq!(response.body["data"]["password"]["isValid"], false);
    assert_eq!(
        response.body["data"]["password"]["errors"][0],
        "Password must be at least 8 characters long"
    );

    let response = mock_request(
        &app,
        "/api/auth/register",
        Method::POST,
        Some(json!({ "email": "not-an-email", "password": "short", "username": "lax" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_bodies_get_the_envelope() {
    let app = setup_test_app();

    let response = mock_request(
        &app,
        "/api/polls/1/vote",
        Method::POST,
        Some(json!({ "optionIds": "4" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Option IDs are required");

    for uri in ["/api/polls/1/vote", "/api/polls", "/api/auth/register", "/api/auth/login"] {
        let response = raw_request(&app, uri, Method::POST, "{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }

    let response = raw_request(&app, "/api/polls", Method::POST, r#"{"pollData": 5}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = mock_request(&app, "/api/polls/1", Method::GET, None, None).await;
    assert_eq!(response.body["data"]["totalVotes"], 90);
}

#[tokio::test]
async fn test_live_results_stream() {
    let app = setup_test_app();

    let response = raw_request(&app, "/api/polls/1/results?live=true", Method::GET, "").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    let response = mock_request(
        &app,
        "/api/polls/missing/results?live=true",
        Method::GET,
        None,
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Poll not found");
}

#[tokio::test]
async fn test_creator_is_embedded_for_the_signed_in_author() {
    let app = setup_test_app();
    let cookie = login_demo(&app).await;
    let body = |creator_id: &str| {
        json!({
            "pollData": { "title": "Standup time?", "options": ["9:30", "10:00"] },
            "creatorId": creator_id
        })
    };

    let response =
        mock_request(&app, "/api/polls", Method::POST, Some(body("1")), Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["creator"]["username"], "demo_user");
    assert_eq!(response.body["data"]["creator"]["id"], "1");

    let response =
        mock_request(&app, "/api/polls", Method::POST, Some(body("55")), Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"].get("creator").is_none());

    let response = mock_request(&app, "/api/polls", Method::POST, Some(body("1")), None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"].get("creator").is_none());
}

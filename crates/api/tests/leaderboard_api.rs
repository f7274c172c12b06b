//! Integration tests for `GET /api/leaderboard`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, guild_roster, member, Failure, ScriptedSource};

// ---------------------------------------------------------------------------
// Test: the Frost mage scenario end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leaderboard_returns_decorated_entries() {
    let app = build_test_app(ScriptedSource::new(guild_roster(0)));

    let response = get(app, "/api/leaderboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-cache"], "miss");

    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!([{
            "id": 1,
            "name": "Foo",
            "class": "Mage",
            "classId": 8,
            "classSlug": "mage",
            "spec": "Frost",
            "specSlug": "frost",
            "score": 88,
            "itemLevel": 489.0,
            "server": "Argent Dawn",
            "progress": "7/9",
            "bossScores": { "Boss1": 88 },
            "bestPerformances": [
                { "boss": "Boss1", "score": 88, "reportID": "r1", "fightID": 2 }
            ],
        }])
    );
}

// ---------------------------------------------------------------------------
// Test: hidden members are dropped and the rest are sorted
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hidden_members_are_excluded() {
    let mut roster = guild_roster(2);
    roster.push(member(50, "Ghost", 8));
    roster.last_mut().unwrap().hidden = true;
    let source = ScriptedSource::new(roster);
    let app = build_test_app(source.clone());

    let json = body_json(get(app, "/api/leaderboard").await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Foo", "Alt0", "Alt1"]);
    assert_eq!(source.ranking_calls(), 3);
}

// ---------------------------------------------------------------------------
// Test: members beyond the cap are listed as "Not fetched"
// ---------------------------------------------------------------------------

#[tokio::test]
async fn members_beyond_cap_are_not_fetched() {
    let source = ScriptedSource::new(guild_roster(29));
    let app = build_test_app(source.clone());

    let json = body_json(get(app, "/api/leaderboard").await).await;
    let entries = json.as_array().unwrap();

    assert_eq!(entries.len(), 30);
    assert_eq!(source.ranking_calls(), 25);
    assert_eq!(entries[0]["name"], "Foo");
    let not_fetched = entries
        .iter()
        .filter(|e| e["spec"] == "Not fetched")
        .count();
    assert_eq!(not_fetched, 5);
    assert!(entries[25..].iter().all(|e| e["spec"] == "Not fetched"));
}

// ---------------------------------------------------------------------------
// Test: second call is served from cache, refresh=true forces a pass
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_call_hits_cache() {
    let source = ScriptedSource::new(guild_roster(1));
    let app = build_test_app(source.clone());

    let first = get(app.clone(), "/api/leaderboard").await;
    let first_json = body_json(first).await;
    let second = get(app, "/api/leaderboard").await;

    assert_eq!(second.headers()["x-cache"], "hit");
    assert_eq!(body_json(second).await, first_json);
    assert_eq!(source.token_calls(), 1);
    assert_eq!(source.ranking_calls(), 2);
}

#[tokio::test]
async fn refresh_true_bypasses_cache() {
    let source = ScriptedSource::new(guild_roster(1));
    let app = build_test_app(source.clone());

    get(app.clone(), "/api/leaderboard").await;
    let forced = get(app.clone(), "/api/leaderboard?refresh=true").await;
    assert_eq!(forced.headers()["x-cache"], "miss");
    assert_eq!(source.token_calls(), 2);

    // Anything but the literal `true` is a normal read.
    let plain = get(app, "/api/leaderboard?refresh=1").await;
    assert_eq!(plain.headers()["x-cache"], "hit");
    assert_eq!(source.token_calls(), 2);
}

// ---------------------------------------------------------------------------
// Test: upstream failures map to error bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_credentials_return_500() {
    let source = ScriptedSource::failing(Failure::Authentication);
    let app = build_test_app(source.clone());

    let response = get(app, "/api/leaderboard").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "AUTHENTICATION_ERROR");
    assert_eq!(json["error"], "Authentication failed");
    assert_eq!(source.ranking_calls(), 0);
}

#[tokio::test]
async fn unknown_guild_returns_404() {
    let app = build_test_app(ScriptedSource::failing(Failure::GuildNotFound));

    let response = get(app, "/api/leaderboard").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Guild not found");
    assert_eq!(
        json["message"],
        "Could not find guild \"Roddan\" on argent-dawn-eu"
    );
}

#[tokio::test]
async fn graphql_errors_return_500_with_raw_errors() {
    let app = build_test_app(ScriptedSource::failing(Failure::GraphQl));

    let response = get(app, "/api/leaderboard").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "GRAPHQL_ERROR");
    assert_eq!(json["errors"][0]["message"], "Too many requests");
}

#[tokio::test]
async fn failed_refresh_is_not_cached() {
    let source = ScriptedSource::failing(Failure::Authentication);
    let app = build_test_app(source.clone());

    get(app.clone(), "/api/leaderboard").await;
    let again = get(app, "/api/leaderboard").await;

    assert_eq!(again.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(source.token_calls(), 2);
}

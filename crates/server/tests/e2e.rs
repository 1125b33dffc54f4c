use std::net::SocketAddr;

use axum::Router;
use models::db::{self, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::routes::{self, ServerState};
use server::startup::build_cors;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn video(&self, id: impl std::fmt::Display) -> String {
        format!("{}/video/{}", self.base_url, id)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = db::connect_with_config(&DatabaseConfig::in_memory()).await?;
    db::migrate(&db).await?;

    let app: Router = routes::build_router(ServerState::new(db), build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_put_then_get_returns_created_video() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.put(app.video(1)).json(&json!({"name": "a", "likes": 0, "views": 0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created, json!({"id": 1, "name": "a", "likes": 0, "views": 0}));

    let res = c.get(app.video(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);
    Ok(())
}

#[tokio::test]
async fn e2e_large_counts_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let body = json!({"name": "viral", "likes": 1, "views": 3_000_000_000i64});
    let res = c.put(app.video(1)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.get(app.video(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": 1, "name": "viral", "likes": 1, "views": 3_000_000_000i64}));

    let res = c.get(app.video(5_000_000_000i64)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"message": "video does not exist"}));
    Ok(())
}

#[tokio::test]
async fn e2e_put_twice_conflicts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.put(app.video(1)).json(&json!({"name": "a", "likes": 1, "views": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.put(app.video(1)).json(&json!({"name": "b", "likes": 2, "views": 2})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?, json!({"message": "video already exists"}));

    let stored = c.get(app.video(1)).send().await?.json::<Value>().await?;
    assert_eq!(stored["name"], "a");
    Ok(())
}

#[tokio::test]
async fn e2e_missing_video_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.video(999)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"message": "video does not exist"}));

    let res = c.patch(app.video(99)).json(&json!({"name": "b"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"message": "video does not exist"}));

    let res = c.get(app.video(99)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_put_reports_first_invalid_field() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.put(app.video(5)).json(&json!({"name": "a", "views": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"message": {"likes": "Number of likes is required"}}));

    let res = c.put(app.video(5)).json(&json!({"name": "a", "likes": "x", "views": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"message": {"likes": "Number of likes is required"}}));

    let res = c.put(app.video(5)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"message": {"name": "Name of video is required"}}));

    let res = c.get(app.video(5)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_put_accepts_strings_and_forms() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.put(app.video(2)).json(&json!({"name": "s", "likes": "7", "views": 8})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["likes"], 7);

    let res = c
        .put(app.video(3))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("name=form&likes=1&views=2")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({"id": 3, "name": "form", "likes": 1, "views": 2}));
    Ok(())
}

#[tokio::test]
async fn e2e_patch_updates_only_supplied_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    c.put(app.video(1)).json(&json!({"name": "a", "likes": 3, "views": 10})).send().await?;

    let res = c.patch(app.video(1)).json(&json!({"likes": 5})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({"id": 1, "name": "a", "likes": 5, "views": 10}));

    let res = c.patch(app.video(1)).json(&json!({"views": 0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["views"], 0);

    let res = c.patch(app.video(1)).json(&json!({"views": [1]})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"message": {"views": "views of video is required"}}));

    let stored = c.get(app.video(1)).send().await?.json::<Value>().await?;
    assert_eq!(stored, json!({"id": 1, "name": "a", "likes": 5, "views": 0}));
    Ok(())
}

#[tokio::test]
async fn e2e_delete_always_no_content() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    c.put(app.video(1)).json(&json!({"name": "a", "likes": 1, "views": 1})).send().await?;

    for id in [1, 424242] {
        let res = c.delete(app.video(id)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
        assert!(res.bytes().await?.is_empty());
    }

    // the record is still there
    let res = c.get(app.video(1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_non_integer_id_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for id in ["abc", "-1", "1.5"] {
        let res = c.get(app.video(id)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND, "{id}");
    }
    let res = c.put(app.video("abc")).json(&json!({"name": "a", "likes": 1, "views": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

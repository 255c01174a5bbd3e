use std::net::SocketAddr;
use std::time::Duration;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let app = server::app(db, Duration::from_secs(10));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_company_with_children() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    let res = http
        .post(format!("{}/api/companies", app.base_url))
        .json(&json!({"company_name": "OSConstruction Free Services", "company_phone": "+1-555-789-0123"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let company: Value = res.json().await?;
    let cid = company["id"].as_str().unwrap().to_string();

    let res = http
        .post(format!("{}/api/services", app.base_url))
        .json(&json!({"company_id": cid, "service_name": "Disaster Recovery", "is_free": false}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let svc: Value = res.json().await?;
    assert_eq!(svc["is_free"], false);

    let res = http
        .put(format!("{}/api/services/{}", app.base_url, svc["id"].as_str().unwrap()))
        .json(&json!({"description": "Storm and flood cleanup"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["service_name"], "Disaster Recovery");
    assert_eq!(updated["description"], "Storm and flood cleanup");

    let list: Value = http
        .get(format!("{}/api/services?company_id={}", app.base_url, cid))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let res = http.delete(format!("{}/api/companies/{}", app.base_url, cid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = http.get(format!("{}/api/services?company_id={}", app.base_url, cid)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let err: Value = res.json().await?;
    assert!(err["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn run_serves_until_shutdown() -> anyhow::Result<()> {
    // reserve a free port, then hand it to the server
    let port = {
        let probe = std::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))?;
        probe.local_addr()?.port()
    };

    let mut cfg = configs::AppConfig::default();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = port;
    cfg.database.url = "sqlite::memory:".into();
    cfg.database.max_connections = 1;
    cfg.database.min_connections = 1;

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::run(cfg, async move {
        let _ = rx.await;
    }));

    let url = format!("http://127.0.0.1:{}/api/health", port);
    let mut ok = false;
    for _ in 0..50 {
        if let Ok(res) = client().get(&url).send().await {
            ok = res.status() == HttpStatusCode::OK;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(ok, "server did not become healthy");

    let _ = tx.send(());
    let result = tokio::time::timeout(Duration::from_secs(5), handle).await??;
    assert!(result.is_ok());
    Ok(())
}

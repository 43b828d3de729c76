mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_database_ok() -> Result<()> {
    let Some(server) = common::TestServer::start().await? else {
        return Ok(());
    };

    let res = reqwest::get(server.url("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404_json() -> Result<()> {
    let Some(server) = common::TestServer::start().await? else {
        return Ok(());
    };

    let res = reqwest::get(server.url("/records/1")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Requested resource /records/1 does not exist");

    Ok(())
}

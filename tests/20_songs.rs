mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{unique_id, TestServer};

#[tokio::test]
async fn song_lifecycle() -> Result<()> {
    let Some(server) = TestServer::start().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let id = unique_id();

    let song = json!({
        "id": id,
        "name": "Teardrop",
        "duration": 330,
        "date": "1998-04-27",
        "popularity": 71,
        "label": "dropped before insert"
    });

    let res = client.post(server.url("/songs")).json(&song).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], id);
    assert_eq!(body["links"]["song"], format!("/songs/{}", id));

    let res = client.get(server.url(&format!("/songs/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let stored = res.json::<Value>().await?;
    assert_eq!(stored["name"], "Teardrop");
    assert_eq!(stored["duration"], 330);
    assert!(stored.get("label").is_none());

    let mut changed = song.clone();
    changed["name"] = json!("Teardrop (Remastered)");
    let res = client.put(server.url(&format!("/songs/{}", id))).json(&changed).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.delete(server.url(&format!("/songs/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let admin = server.admin_bearer()?;
    let res = client
        .delete(server.url(&format!("/songs/{}", id)))
        .header("Authorization", &admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(server.url(&format!("/songs/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn invalid_song_is_rejected() -> Result<()> {
    let Some(server) = TestServer::start().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/songs"))
        .json(&json!({ "id": unique_id(), "name": "no duration", "date": "2001-01-01" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(server.url("/songs/999999")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn page_envelope_is_consistent() -> Result<()> {
    let Some(server) = TestServer::start().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    client
        .post(server.url("/albums"))
        .json(&json!({ "id": unique_id(), "date": "2020", "songs": [], "cover": "cover.png" }))
        .send()
        .await?;

    let zero = client.get(server.url("/albums?page=0")).send().await?.json::<Value>().await?;
    let one = client.get(server.url("/albums?page=1")).send().await?.json::<Value>().await?;
    assert_eq!(zero["page"], 1);
    assert_eq!(one["page"], 1);
    assert_eq!(one["pageSize"], 10);

    let count = one["count"].as_i64().unwrap_or_default();
    assert!(count >= 1);
    assert_eq!(one["totalPages"].as_i64(), Some((count + 9) / 10));
    assert!(one["albums"].as_array().map_or(0, Vec::len) <= 10);

    Ok(())
}

use super::{User, UserPage, UserUpdate};
use crate::{Client, Error};
use httpmock::prelude::*;
use serde_json::{json, Map};

fn user(id: u64, first_name: &str, last_name: &str) -> User {
    User {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}.{}@reqres.in", first_name, last_name).to_lowercase(),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        extra: Map::new(),
    }
}

#[tokio::test]
async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let server_reply = UserPage {
        page: 2,
        per_page: 2,
        total: 4,
        total_pages: 2,
        data: vec![user(3, "Emma", "Wong"), user(4, "Eve", "Holt")],
    };
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/users")
            .query_param("page", "2")
            .query_param("per_page", "2");
        then.status(200).json_body(json!(server_reply.clone()));
    });
    let client = Client::builder()
        .no_env()
        .with_url(server.base_url())
        .with_per_page(2)
        .build()?;

    let r = client.users().list(2).await?;
    assert_eq!(r, server_reply);
    mock.assert_hits_async(1).await;

    Ok(())
}

#[tokio::test]
async fn list_without_page_size() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/users").query_param("page", "1");
        then.status(200).json_body(json!({
            "page": 1,
            "per_page": 6,
            "total": 1,
            "total_pages": 1,
            "data": [{
                "id": 1,
                "email": "george.bluth@reqres.in",
                "first_name": "George",
                "last_name": "Bluth",
                "avatar": "https://reqres.in/img/faces/1-image.jpg"
            }],
            "support": { "url": "https://reqres.in/#support-heading" }
        }));
    });
    let client = Client::builder()
        .no_env()
        .with_url(server.base_url())
        .build()?;

    let r = client.users().list(1).await?;
    assert_eq!(r.total_pages, 1);
    assert_eq!(r.data, vec![user(1, "George", "Bluth")]);
    mock.assert_hits_async(1).await;

    Ok(())
}

#[tokio::test]
async fn update() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let req = UserUpdate::new("Jane", "Doe", "jane@x.com");
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/api/users/2").json_body_obj(&req);
        then.status(200).json_body(json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@x.com",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }));
    });
    let client = Client::builder()
        .no_env()
        .with_url(server.base_url())
        .build()?;

    let r = client.users().update(2, &req).await?;
    assert_eq!(r.first_name.as_deref(), Some("Jane"));
    assert_eq!(r.last_name.as_deref(), Some("Doe"));
    assert_eq!(r.email.as_deref(), Some("jane@x.com"));
    assert_eq!(r.id, None);
    assert_eq!(
        r.extra.get("updatedAt"),
        Some(&json!("2024-05-01T10:00:00.000Z"))
    );
    mock.assert_hits_async(1).await;

    Ok(())
}

#[tokio::test]
async fn delete() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/users/2");
        then.status(204);
    });
    let client = Client::builder()
        .no_env()
        .with_url(server.base_url())
        .build()?;

    client.users().delete(2).await?;
    mock.assert_hits_async(1).await;

    Ok(())
}

#[tokio::test]
async fn delete_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/users/23");
        then.status(404).json_body(json!({}));
    });
    let client = Client::builder()
        .no_env()
        .with_url(server.base_url())
        .build()?;

    match client.users().delete(23).await {
        Err(Error::Api(e)) => assert_eq!(e.status, 404),
        res => panic!("Expected api error, got {:?}", res),
    }
    mock.assert_hits_async(1).await;

    Ok(())
}

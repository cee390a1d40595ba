use httpmock::prelude::*;
use serde_json::{json, Value};
use user_roster::{
    auth::Credentials,
    controller::{Controller, Deletion, Entry},
    routes::Route,
    session::Session,
    view, Client,
};

fn user(id: u64, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first_name, last_name).to_lowercase(),
        "first_name": first_name,
        "last_name": last_name,
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

fn client(server: &MockServer) -> Client {
    Client::builder()
        .no_env()
        .with_url(server.base_url())
        .with_api_key("reqres-free-v1")
        .with_per_page(2)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_gate_blocks_until_login() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/users");
        then.status(200).json_body(json!({
            "page": 1, "per_page": 2, "total": 1, "total_pages": 1,
            "data": [user(1, "George", "Bluth")]
        }));
    });
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/login");
        then.status(200).json_body(json!({ "token": "QpwL5tke4Pnpja7X4" }));
    });

    let client = client(&server);
    let mut session = Session::new();
    let mut users = Controller::new(client.clone());

    assert_eq!(users.enter(&session).await, Entry::Redirect(Route::Login));
    list.assert_hits_async(0).await;

    session
        .sign_in(
            &client.auth(),
            &Credentials::new("eve.holt@reqres.in", "cityslicka"),
        )
        .await
        .unwrap();
    assert_eq!(users.enter(&session).await, Entry::Shown);
    assert_eq!(users.users().len(), 1);

    login.assert_hits_async(1).await;
    list.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_browse_edit_and_delete() {
    let server = MockServer::start();
    let page_one = server.mock(|when, then| {
        when.method(GET)
            .path("/api/users")
            .query_param("page", "1")
            .query_param("per_page", "2");
        then.status(200).json_body(json!({
            "page": 1, "per_page": 2, "total": 3, "total_pages": 2,
            "data": [user(1, "George", "Bluth"), user(2, "Janet", "Weaver")]
        }));
    });
    let page_two = server.mock(|when, then| {
        when.method(GET)
            .path("/api/users")
            .query_param("page", "2")
            .query_param("per_page", "2");
        then.status(200).json_body(json!({
            "page": 2, "per_page": 2, "total": 3, "total_pages": 2,
            "data": [user(3, "Emma", "Wong")]
        }));
    });
    let update = server.mock(|when, then| {
        when.method(PUT).path("/api/users/3").json_body(json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@x.com"
        }));
        then.status(200).json_body(json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@x.com",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/users/3");
        then.status(204);
    });

    let mut session = Session::new();
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/login");
        then.status(200).json_body(json!({ "token": "QpwL5tke4Pnpja7X4" }));
    });
    let client = client(&server);
    session
        .sign_in(
            &client.auth(),
            &Credentials::new("eve.holt@reqres.in", "cityslicka"),
        )
        .await
        .unwrap();

    let mut users = Controller::new(client);
    users.enter(&session).await;
    assert!(view::render(&users).ends_with("(Previous)  Page 1 of 2  [n] Next"));

    assert!(users.next_page().await);
    assert_eq!(users.page(), 2);
    assert_eq!(users.users()[0].first_name, "Emma");

    assert!(users.begin_edit(3));
    {
        let draft = users.draft_mut().unwrap();
        draft.first_name = "Jane".to_string();
        draft.last_name = "Doe".to_string();
        draft.email = "jane@x.com".to_string();
    }
    users.submit_edit().await;
    assert!(users.draft().is_none());
    assert_eq!(users.users()[0].full_name(), "Jane Doe");
    assert_eq!(
        users.users()[0].avatar,
        "https://reqres.in/img/faces/3-image.jpg"
    );

    let res = users.delete(3, &mut |_: &str| true).await;
    assert_eq!(res, Deletion::Deleted);
    assert_eq!(users.page(), 1);
    assert_eq!(users.users().len(), 2);
    assert!(users.error().is_none());

    login.assert_hits_async(1).await;
    page_one.assert_hits_async(2).await;
    page_two.assert_hits_async(1).await;
    update.assert_hits_async(1).await;
    delete.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_server_errors_become_action_failures() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/users");
        then.status(200).json_body(json!({
            "page": 1, "per_page": 2, "total": 2, "total_pages": 1,
            "data": [user(1, "George", "Bluth"), user(2, "Janet", "Weaver")]
        }));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/users/2");
        then.status(500).json_body(json!({ "error": "database unavailable" }));
    });

    let mut session = Session::new();
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/login");
        then.status(200).json_body(json!({ "token": "QpwL5tke4Pnpja7X4" }));
    });
    let client = client(&server);
    session
        .sign_in(
            &client.auth(),
            &Credentials::new("eve.holt@reqres.in", "cityslicka"),
        )
        .await
        .unwrap();

    let mut users = Controller::new(client);
    users.enter(&session).await;
    let res = users.delete(2, &mut |_: &str| true).await;

    assert_eq!(res, Deletion::Failed);
    assert_eq!(users.users().len(), 2);
    // The cause stays in the logs, the screen only gets the generic message.
    let screen = view::render(&users);
    assert!(screen.contains("! Failed to delete user"));
    assert!(!screen.contains("database unavailable"));

    login.assert_hits_async(1).await;
    list.assert_hits_async(1).await;
    delete.assert_hits_async(1).await;
}

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use slackhook::{Attachment, Error, Field, Message, WebhookClient};

#[test]
fn posts_json_to_hook() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/services/T000/B000/XXXX")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "text": "deploy finished",
            "username": "ci",
            "attachments": [{
                "color": "good",
                "title": "v1.2.3",
                "fields": [{"title": "env", "value": "prod", "short": true}],
            }],
        })))
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create();

    let client = WebhookClient::new(format!("{}/services/T000/B000/XXXX", server.url()));
    let message = Message::new("deploy finished").username("ci").attachment(
        Attachment::good()
            .title("v1.2.3")
            .field(Field::new("env", "prod").short()),
    );
    client.send(&message).unwrap();

    mock.assert();
}

#[test]
fn error_status_is_reported() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hook")
        .with_status(404)
        .with_body("no_service")
        .expect(1)
        .create();

    let client = WebhookClient::new(format!("{}/hook", server.url()));
    let err = client.simple("hello").unwrap_err();

    assert_eq!(err.status(), Some(404));
    mock.assert();
}

#[test]
fn connection_reuse_across_sends() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/hook")
        .with_status(200)
        .with_body("ok".repeat(4096))
        .expect(3)
        .create();

    let client = WebhookClient::with_timeout(format!("{}/hook", server.url()), Duration::from_secs(5))
        .unwrap();
    for i in 0..3 {
        client.simple(format!("message #{i}")).unwrap();
    }

    mock.assert();
}

#[test]
fn unreachable_host_is_a_transport_error() {
    // Nothing listens on the discard port
    let client = WebhookClient::with_timeout("http://127.0.0.1:9/hook", Duration::from_secs(5))
        .unwrap();

    let err = client.simple("hello").unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn invalid_url_is_a_transport_error() {
    let client = WebhookClient::new("not a url");
    let err = client.simple("hello").unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

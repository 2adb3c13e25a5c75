//! HTTP client for the events API

use std::time::Duration;

use anyhow::{Context, Result};
use planboard_core::config::ClientConfig;
use planboard_core::{
    Event, EventId, EventPayload, EventUpdate, EventsApi, PlanboardError, PlanboardResult,
};
use serde::Deserialize;
use url::Url;

/// Talks to `{server_url}/api/events`.
pub struct ApiClient {
    http: reqwest::Client,
    events_url: Url,
}

/// Body the server sends alongside error statuses.
#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ApiClient {
            http,
            events_url: events_url(&config.server_url)?,
        })
    }

    pub fn events_url(&self) -> &Url {
        &self.events_url
    }

    fn event_url(&self, id: &EventId) -> PlanboardResult<Url> {
        let mut url = self.events_url.clone();
        url.path_segments_mut()
            .map_err(|_| PlanboardError::Config(format!("Invalid server URL: {}", self.events_url)))?
            .push(id.as_str());
        Ok(url)
    }
}

/// `http://host:5000` or `http://host/prefix/` -> `.../api/events`
fn events_url(server_url: &str) -> Result<Url> {
    let mut base = server_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Url::parse(&base)
        .and_then(|url| url.join("api/events"))
        .with_context(|| format!("Invalid server URL: {}", server_url))
}

fn transport(err: reqwest::Error) -> PlanboardError {
    PlanboardError::Transport(err.to_string())
}

/// Turn a non-2xx reply into an `Api` error, using the server's message when it sent one.
async fn check(resp: reqwest::Response) -> PlanboardResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = match resp.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    Err(PlanboardError::Api {
        status: status.as_u16(),
        message,
    })
}

impl EventsApi for ApiClient {
    /// GET /api/events
    async fn list_events(&self) -> PlanboardResult<Vec<Event>> {
        log::debug!("GET {}", self.events_url);
        let resp = self
            .http
            .get(self.events_url.clone())
            .send()
            .await
            .map_err(transport)?;

        check(resp)
            .await?
            .json()
            .await
            .map_err(|e| PlanboardError::Serialization(e.to_string()))
    }

    /// POST /api/events
    async fn create_event(&self, payload: &EventPayload) -> PlanboardResult<()> {
        log::debug!("POST {}", self.events_url);
        let resp = self
            .http
            .post(self.events_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        check(resp).await?;
        Ok(())
    }

    /// PUT /api/events/:id
    async fn update_event(&self, id: &EventId, update: &EventUpdate) -> PlanboardResult<()> {
        let url = self.event_url(id)?;
        log::debug!("PUT {}", url);
        let resp = self
            .http
            .put(url)
            .json(update)
            .send()
            .await
            .map_err(transport)?;

        check(resp).await?;
        Ok(())
    }

    /// DELETE /api/events/:id
    async fn delete_event(&self, id: &EventId) -> PlanboardResult<()> {
        let url = self.event_url(id)?;
        log::debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await.map_err(transport)?;

        check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server_url: &str) -> ApiClient {
        ApiClient::new(&ClientConfig {
            server_url: server_url.into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn events_url_from_bare_host() {
        assert_eq!(
            client("http://127.0.0.1:5000").events_url().as_str(),
            "http://127.0.0.1:5000/api/events"
        );
    }

    #[test]
    fn events_url_keeps_path_prefix() {
        assert_eq!(
            client("https://example.com/calendar").events_url().as_str(),
            "https://example.com/calendar/api/events"
        );
    }

    #[test]
    fn event_url_appends_id() {
        let c = client("http://localhost:5000/");
        assert_eq!(
            c.event_url(&EventId::new("42")).unwrap().as_str(),
            "http://localhost:5000/api/events/42"
        );
    }

    #[test]
    fn rejects_unparseable_server() {
        assert!(events_url("not a url").is_err());
    }

    /// Answer a single request with a canned reply. Returns the base URL.
    async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let reply = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn error_reply_carries_server_message() {
        let url = serve_once("404 Not Found", "application/json", r#"{"message":"Event not found"}"#).await;

        let err = client(&url).delete_event(&EventId::new("7")).await.unwrap_err();
        match err {
            PlanboardError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Event not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_reply_without_json_uses_status_reason() {
        let url = serve_once("500 Internal Server Error", "text/html", "<h1>oops</h1>").await;

        let err = client(&url).list_events().await.unwrap_err();
        match err {
            PlanboardError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn lists_events_from_server() {
        let url = serve_once(
            "200 OK",
            "application/json",
            r#"[{"id": 1, "title": "Dentist", "start": "2025-03-20T15:00", "end": null}]"#,
        )
        .await;

        let events = client(&url).list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Dentist");
        assert_eq!(events[0].id, EventId::new("1"));
    }
}

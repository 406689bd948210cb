use super::{Backend, BackendError, date_key, parse_date_key};
use crate::resource::Resource;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("mindleaf/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The MindLeaf REST API.
///
/// - `GET  {base}/{resource}?date=YYYY-MM-DD&user_id=ID` returns the record or `{}`
/// - `POST {base}/{resource}` with `{user_id, date, ...record}`
/// - `GET  {base}/{resource}/{history|dates}?user_id=ID` returns date strings
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn record_url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    fn index_url(&self, resource: Resource) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            resource.path(),
            resource.index_path()
        )
    }
}

/// The API answers `{}` (or `null`) for a date with nothing saved.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Turns a non-success response into an error, preferring the server's own
/// `{"error": "..."}` message.
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Value>, BackendError> {
        let url = self.record_url(resource);
        debug!("GET {url} date={date} user={user_id}");
        let response = self
            .client
            .get(&url)
            .query(&[("date", date_key(date).as_str()), ("user_id", user_id)])
            .send()
            .await?;
        let value: Value = check_status(response).await?.json().await?;
        Ok(if is_absent(&value) { None } else { Some(value) })
    }

    async fn put(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
        payload: Value,
    ) -> Result<(), BackendError> {
        let url = self.record_url(resource);
        debug!("POST {url} date={date} user={user_id}");
        let response = self.client.post(&url).json(&payload).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn dates(&self, resource: Resource, user_id: &str) -> Result<Vec<NaiveDate>, BackendError> {
        let url = self.index_url(resource);
        debug!("GET {url} user={user_id}");
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let keys: Vec<String> = check_status(response).await?.json().await?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                let date = parse_date_key(key);
                if date.is_none() {
                    warn!("ignoring malformed date '{key}' from {url}");
                }
                date
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasEntry;
    use crate::overlay::{OverlayKind, Spawn};
    use crate::store::EntryStore;
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// One request as the server saw it.
    #[derive(Debug)]
    struct Seen {
        request_line: String,
        body: String,
    }

    async fn read_request(stream: &mut TcpStream) -> std::io::Result<Seen> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let head_end = loop {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break buf.len();
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(i) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break i + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < head_end + length {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        Ok(Seen {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&buf[head_end..]).to_string(),
        })
    }

    /// Serves `replies` in order, one connection each, and hands back what
    /// was requested.
    async fn serve(replies: Vec<(u16, &'static str)>) -> (HttpBackend, JoinHandle<Vec<Seen>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let mut seen = Vec::new();
            for (status, body) in replies {
                let (mut stream, _) = listener.accept().await.unwrap();
                seen.push(read_request(&mut stream).await.unwrap());
                let response = format!(
                    "HTTP/1.1 {status} Reply\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
            seen
        });
        (HttpBackend::new(&base).unwrap(), server)
    }

    fn march_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn urls_follow_resource_paths() {
        let backend = HttpBackend::with_client(Client::new(), "http://localhost:5000/api/");
        assert_eq!(
            backend.record_url(Resource::Gratitude),
            "http://localhost:5000/api/gratitude"
        );
        assert_eq!(
            backend.index_url(Resource::Journal),
            "http://localhost:5000/api/journal/history"
        );
        assert_eq!(
            backend.index_url(Resource::Todo),
            "http://localhost:5000/api/todo/dates"
        );
    }

    #[test]
    fn empty_object_means_not_found() {
        assert!(is_absent(&json!({})));
        assert!(is_absent(&Value::Null));
        assert!(!is_absent(&json!({"text": ""})));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = HttpBackend::new(&format!("http://{addr}/api")).unwrap();
        let err = backend
            .fetch(Resource::Journal, "default", march_first())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn fetch_queries_date_and_user() {
        let (backend, server) = serve(vec![
            (200, "{}"),
            (200, r#"{"text":"Grateful for sunshine","stickers":[]}"#),
        ])
        .await;

        let absent = backend.fetch(Resource::Gratitude, "alice", march_first()).await.unwrap();
        assert_eq!(absent, None);
        let found = backend.fetch(Resource::Gratitude, "alice", march_first()).await.unwrap();
        assert_eq!(found, Some(json!({"text": "Grateful for sunshine", "stickers": []})));

        let seen = server.await.unwrap();
        assert_eq!(
            seen[0].request_line,
            "GET /api/gratitude?date=2024-03-01&user_id=alice HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn save_posts_the_whole_record_then_lists_dates() {
        let (backend, server) = serve(vec![(200, r#"{"message":"ok"}"#), (200, r#"["2024-03-01"]"#)]).await;
        let store = EntryStore::new(backend, Resource::Gratitude, "alice");

        let mut entry = CanvasEntry::new(march_first());
        entry.set_body("Grateful for sunshine");
        entry.add_overlay(OverlayKind::sticker("🌸"), &Spawn::GRATITUDE_STICKER, &mut StdRng::seed_from_u64(1));
        let index = store.save(&entry).await.unwrap();
        assert!(index.contains(march_first()));

        let seen = server.await.unwrap();
        assert_eq!(seen[0].request_line, "POST /api/gratitude HTTP/1.1");
        let body: Value = serde_json::from_str(&seen[0].body).unwrap();
        assert_eq!(body["user_id"], "alice");
        assert_eq!(body["date"], "2024-03-01");
        assert_eq!(body["text"], "Grateful for sunshine");
        assert_eq!(body["stickers"][0]["emoji"], "🌸");
        assert_eq!(body["images"], json!([]));
        assert_eq!(seen[1].request_line, "GET /api/gratitude/history?user_id=alice HTTP/1.1");
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let (backend, server) = serve(vec![
            (400, r#"{"error":"Gratitude text is required"}"#),
            (500, "oops"),
        ])
        .await;

        let err = backend
            .put(Resource::Gratitude, "alice", march_first(), json!({"text": ""}))
            .await
            .unwrap_err();
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Gratitude text is required");
            }
            other => panic!("expected a status error, got {other:?}"),
        }

        let err = backend.fetch(Resource::Journal, "alice", march_first()).await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 500, ref message } if message == "Internal Server Error"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_dates_are_skipped() {
        let (backend, server) = serve(vec![(200, r#"["2024-03-01","someday","2024-02-29"]"#)]).await;
        let dates = backend.dates(Resource::Todo, "alice").await.unwrap();
        assert_eq!(
            dates,
            vec![march_first(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()]
        );
        let seen = server.await.unwrap();
        assert_eq!(seen[0].request_line, "GET /api/todo/dates?user_id=alice HTTP/1.1");
    }
}

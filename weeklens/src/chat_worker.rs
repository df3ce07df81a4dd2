//! Background delivery of chat requests.
//!
//! The UI thread owns the [`ChatSession`](weeklens_core::ChatSession). Each
//! submitted request is handed to the worker, which runs the HTTP call on
//! its own runtime and posts the outcome back over a channel. The UI drains
//! the channel once per tick, so the session is only ever touched from one
//! thread.

use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use weeklens_core::config::AssistantConfig;
use weeklens_core::{AssistantClient, ChatRequest};

/// Outcome of one request, tagged with the id it was submitted under.
#[derive(Debug)]
pub struct ChatReply {
    pub request_id: u64,
    pub outcome: weeklens_core::Result<String>,
}

pub struct ChatWorker {
    runtime: Runtime,
    client: AssistantClient,
    tx: Sender<ChatReply>,
    rx: Receiver<ChatReply>,
}

impl ChatWorker {
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let client = AssistantClient::new(config).context("invalid assistant configuration")?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("weeklens-chat")
            .enable_all()
            .build()
            .context("failed to start chat runtime")?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            client,
            tx,
            rx,
        })
    }

    /// Send a request in the background.
    pub fn dispatch(&self, request: ChatRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        tracing::debug!(
            request_id = request.id(),
            endpoint = %client.endpoint(),
            "Dispatching chat request"
        );

        self.runtime.spawn(async move {
            let outcome = client.ask(request.message()).await;
            // The receiver only goes away on shutdown
            let _ = tx.send(ChatReply {
                request_id: request.id(),
                outcome,
            });
        });
    }

    /// Replies that arrived since the last call.
    pub fn drain(&self) -> Vec<ChatReply> {
        self.rx.try_iter().collect()
    }

    #[cfg(test)]
    fn wait(&self, timeout: std::time::Duration) -> Option<ChatReply> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;
    use weeklens_core::ChatSession;

    fn config_for(endpoint: String) -> AssistantConfig {
        AssistantConfig {
            endpoint,
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Answer one request on a plain thread with a canned body.
    fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if text.contains("\r\n\r\n") && text.trim_end().ends_with('}') {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/", addr)
    }

    #[test]
    fn test_reply_is_delivered_and_resolves_session() {
        let endpoint = serve_once(r#"{"response":"You went running twice."}"#);
        let worker = ChatWorker::new(&config_for(endpoint)).unwrap();
        let mut session = ChatSession::default();

        let request = session.submit("did I exercise?").unwrap();
        worker.dispatch(request);

        let reply = worker.wait(Duration::from_secs(10)).expect("reply");
        assert!(session.resolve(reply.request_id, reply.outcome));
        assert_eq!(
            session.messages().last().unwrap().content,
            "You went running twice."
        );
        assert!(!session.is_pending());
    }

    #[test]
    fn test_unreachable_endpoint_yields_error_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let worker = ChatWorker::new(&config_for(format!("http://{}/", addr))).unwrap();
        let mut session = ChatSession::new("offline");
        let request = session.submit("hello").unwrap();
        let id = request.id();
        worker.dispatch(request);

        let reply = worker.wait(Duration::from_secs(10)).expect("reply");
        assert_eq!(reply.request_id, id);
        assert!(reply.outcome.is_err());

        session.resolve(reply.request_id, reply.outcome);
        assert_eq!(session.messages().last().unwrap().content, "offline");
        assert!(worker.drain().is_empty());
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        assert!(ChatWorker::new(&config_for("not a url".to_string())).is_err());
    }
}

//! Connessione WebSocket per gli eventi push

use crate::error::ClientError;
use crate::types::ServerEvent;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tracing::{debug, info, warn};

const PING_INTERVAL_SECS: u64 = 30;

pub fn parse_event(text: &str) -> Result<ServerEvent, ClientError> {
    Ok(serde_json::from_str(text)?)
}

pub struct RealtimeClient {
    events: mpsc::UnboundedReceiver<ServerEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RealtimeClient {
    /// Apre il WebSocket con autenticazione bearer
    pub async fn connect(ws_url: &str, token: &str) -> Result<Self, ClientError> {
        let mut request = ws_url.into_client_request()?;
        let auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::MissingToken)?;
        request.headers_mut().insert("Authorization", auth);

        let (ws_stream, _) = connect_async(request).await?;
        info!("WebSocket connected to {}", ws_url);

        let (mut write, mut read) = ws_stream.split();
        let (events_tx, events) = mpsc::unbounded_channel();
        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ping = interval(Duration::from_secs(PING_INTERVAL_SECS));
            ping.tick().await; // primo tick immediato

            loop {
                tokio::select! {
                    frame = read.next() => match frame {
                        Some(Ok(Message::Text(text))) => match parse_event(&text) {
                            Ok(event) => {
                                if events_tx.send(event).is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("Unparsable event: {}", e),
                        },
                        Some(Ok(Message::Close(_))) | None => {
                            info!("WebSocket closed by server");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!("WebSocket error: {}", e);
                            break;
                        }
                    },
                    _ = ping.tick() => {
                        if let Err(e) = write.send(Message::Ping(Default::default())).await {
                            warn!("Failed to send ping: {}", e);
                            break;
                        }
                        debug!("Ping sent");
                    }
                    _ = &mut shutdown_rx => {
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
            debug!("Realtime task terminated");
        });

        Ok(Self {
            events,
            shutdown: Some(shutdown),
            task,
        })
    }

    /// Prossimo evento; `None` quando la connessione è chiusa
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        self.events.recv().await
    }

    pub async fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for RealtimeClient {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_online_users() {
        let event = parse_event(r#"{"type":"OnlineUsers","data":[1,2]}"#).unwrap();
        assert_eq!(event, ServerEvent::OnlineUsers(vec![1, 2]));
    }

    #[test]
    fn rejects_unknown_events() {
        assert!(matches!(
            parse_event(r#"{"type":"Typing","data":1}"#),
            Err(ClientError::Json(_))
        ));
    }
}

//! End-to-end con la libreria client: registrazione, login, sidebar,
//! invio con classificazione ed evento push al destinatario.

mod common;

#[cfg(test)]
mod client_flow_tests {
    use super::common::*;
    use client::{ApiClient, Composer, Conversation, RealtimeClient, ServerEvent, render_message};
    use emotion::Emotion;
    use sqlx::SqlitePool;
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn spawn_server(pool: SqlitePool) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server::create_router(create_test_state(pool));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn next_event(realtime: &mut RealtimeClient) -> ServerEvent {
        tokio::time::timeout(Duration::from_secs(5), realtime.next_event())
            .await
            .expect("timed out waiting for an event")
            .expect("connection closed")
    }

    #[sqlx::test]
    async fn test_full_conversation(pool: SqlitePool) -> sqlx::Result<()> {
        let base_url = spawn_server(pool).await;

        let mut alice = ApiClient::new(&base_url);
        let mut bob = ApiClient::new(&base_url);
        let alice_user = alice.register("alice", "Password123").await.unwrap();
        let bob_user = bob.register("bob", "Password456").await.unwrap();
        alice.login("alice", "Password123").await.unwrap();
        bob.login("bob", "Password456").await.unwrap();
        assert_eq!(alice.check_auth().await.unwrap().id, alice_user.id);

        let sidebar = alice.users().await.unwrap();
        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar[0].username, "bob");

        // bob apre la conversazione con alice e si mette in ascolto
        let mut bob_view = Conversation::new(bob_user.id);
        bob_view.select_peer(alice_user.id, bob.messages(alice_user.id).await.unwrap());
        let mut realtime = RealtimeClient::connect(&bob.ws_url(), bob.token().unwrap())
            .await
            .unwrap();
        loop {
            if let ServerEvent::OnlineUsers(ids) = next_event(&mut realtime).await {
                if ids.contains(&bob_user.id) {
                    break;
                }
            }
        }

        // alice scrive: l'anteprima e la classificazione del server possono divergere
        let mut composer = Composer::default();
        composer.set_text("I am so excited and happy!!!");
        assert_eq!(composer.preview(), Some(Emotion::Happy));
        let request = composer.submit().unwrap();
        let sent = alice.send_message(bob_user.id, &request).await.unwrap();
        assert_eq!(sent.emotion, Emotion::Excited);

        let received = loop {
            match next_event(&mut realtime).await {
                ServerEvent::NewMessage(message) => break message,
                _ => continue,
            }
        };
        assert_eq!(received, sent);
        assert!(bob_view.apply_event(ServerEvent::NewMessage(received)));

        let rendered = render_message(&bob_view.messages()[0], bob_user.id, true);
        assert!(!rendered.is_mine);
        assert_eq!(rendered.footer.as_deref(), Some("Mood: excited"));

        realtime.close().await;
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_errors_surface_as_status(pool: SqlitePool) -> sqlx::Result<()> {
        let base_url = spawn_server(pool).await;

        let mut api = ApiClient::new(&base_url);
        let err = api.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        let api = api.with_token(alice_token());
        let err = api
            .send_message(1, &client::SendMessageRequest {
                text: Some("me".to_string()),
                image: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        Ok(())
    }
}

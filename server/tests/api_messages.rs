//! Integration tests per gli endpoints dei messaggi
//!
//! Test per:
//! - GET /messages/users
//! - GET /messages/{user_id}
//! - POST /messages/send/{user_id}
//! - GET /media/{file}

mod common;

#[cfg(test)]
mod message_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use server::dtos::{MessageDTO, UserDTO};
    use server::entities::Emotion;
    use serde_json::json;
    use sqlx::SqlitePool;

    // ============================================================
    // GET /messages/users - sidebar
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_sidebar_excludes_caller(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/messages/users")
            .authorization_bearer(alice_token())
            .await;

        response.assert_status_ok();
        let users = response.json::<Vec<UserDTO>>();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "charlie"]);
        assert_eq!(users[0].profile_pic.as_deref(), Some("/media/bob.png"));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_sidebar_requires_auth(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server.get("/messages/users").await.assert_status_forbidden();
        Ok(())
    }

    // ============================================================
    // GET /messages/{user_id} - storico
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "messages")))]
    async fn test_history_both_directions_with_stored_emotion(
        pool: SqlitePool,
    ) -> sqlx::Result<()> {
        // label volutamente diversa da quella che darebbe il classificatore
        sqlx::query(
            "INSERT INTO messages (sender_id, receiver_id, text, emotion, created_at) VALUES (2, 1, 'I love it', 'sad', '2025-01-03T12:00:00Z')",
        )
        .execute(&pool)
        .await?;
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/messages/2")
            .authorization_bearer(alice_token())
            .await;

        response.assert_status_ok();
        let messages = response.json::<Vec<MessageDTO>>();
        let ids: Vec<_> = messages.iter().map(|m| m.message_id).collect();
        assert_eq!(&ids[..4], &[1, 2, 4, 5]);
        assert_eq!(messages.len(), 5);

        assert_eq!(messages[1].emotion, Emotion::Excited);
        assert_eq!(messages[2].text, None);
        // lo storico restituisce la label salvata, senza ricalcolarla
        assert_eq!(messages[4].text.as_deref(), Some("I love it"));
        assert_eq!(messages[4].emotion, Emotion::Sad);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "messages")))]
    async fn test_history_with_stranger_is_empty(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/messages/3")
            .authorization_bearer(alice_token())
            .await;

        response.assert_status_ok();
        assert!(response.json::<Vec<MessageDTO>>().is_empty());
        Ok(())
    }

    // ============================================================
    // POST /messages/send/{user_id}
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_classifies_text(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let cases = [
            ("I am so excited and happy!!!", Emotion::Excited),
            ("this is cool", Emotion::Happy),
            ("I hate this, it is stupid and terrible", Emotion::Angry),
            ("sorry", Emotion::Sad),
            ("what?!!", Emotion::Surprised),
            ("the meeting is at noon", Emotion::Neutral),
        ];

        for (text, expected) in cases {
            let response = server
                .post("/messages/send/2")
                .authorization_bearer(alice_token())
                .json(&json!({ "text": text }))
                .await;

            response.assert_status(StatusCode::CREATED);
            let message = response.json::<MessageDTO>();
            assert_eq!(message.emotion, expected, "text: {text}");
            assert_eq!(message.sender_id, 1);
            assert_eq!(message.receiver_id, 2);
            assert_eq!(message.text.as_deref(), Some(text));
        }

        // quanto salvato torna identico dallo storico
        let history = server
            .get("/messages/1")
            .authorization_bearer(bob_token())
            .await
            .json::<Vec<MessageDTO>>();
        let emotions: Vec<_> = history.iter().map(|m| m.emotion).collect();
        assert_eq!(
            emotions,
            cases.iter().map(|(_, e)| *e).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_image_only_is_neutral_and_served(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // testo assente oppure stringa vuota: in entrambi i casi conta solo l'immagine
        for body in [
            json!({ "image": PNG_DATA_URL }),
            json!({ "text": "", "image": PNG_DATA_URL }),
        ] {
            let response = server
                .post("/messages/send/2")
                .authorization_bearer(alice_token())
                .json(&body)
                .await;

            response.assert_status(StatusCode::CREATED);
            let message = response.json::<MessageDTO>();
            assert_eq!(message.emotion, Emotion::Neutral);
            assert_eq!(message.text, None);

            let url = message.image.expect("image url");
            assert!(url.starts_with("/media/") && url.ends_with(".png"));

            let served = server.get(&url).await;
            served.assert_status_ok();
            assert_eq!(&served.as_bytes()[1..4], b"PNG");
        }
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_failed_insert_removes_uploaded_image(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool.clone());
        let server = create_test_server(state.clone());

        sqlx::query(
            "CREATE TRIGGER reject_messages BEFORE INSERT ON messages BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&pool)
        .await?;

        let response = server
            .post("/messages/send/2")
            .authorization_bearer(alice_token())
            .json(&json!({ "text": "look", "image": PNG_DATA_URL }))
            .await;
        assert!(response.status_code().is_client_error() || response.status_code().is_server_error());

        let stored = std::fs::read_dir(state.media.dir())
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(stored, 0, "no image must outlive a message that was never saved");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_text_is_trimmed(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/messages/send/3")
            .authorization_bearer(bob_token())
            .json(&json!({ "text": "   hello there   " }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(
            response.json::<MessageDTO>().text.as_deref(),
            Some("hello there")
        );
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_without_content(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        for body in [json!({}), json!({ "text": "   " }), json!({ "text": "", "image": "" })] {
            server
                .post("/messages/send/2")
                .authorization_bearer(alice_token())
                .json(&body)
                .await
                .assert_status_bad_request();
        }
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_text_too_long(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/messages/send/2")
            .authorization_bearer(alice_token())
            .json(&json!({ "text": "a".repeat(5001) }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_to_self_or_unknown(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/messages/send/1")
            .authorization_bearer(alice_token())
            .json(&json!({ "text": "me" }))
            .await
            .assert_status_bad_request();

        server
            .post("/messages/send/42")
            .authorization_bearer(alice_token())
            .json(&json!({ "text": "anyone?" }))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_send_invalid_images(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/messages/send/2")
            .authorization_bearer(alice_token())
            .json(&json!({ "image": "data:text/plain;base64,aGVsbG8=" }))
            .await
            .assert_status_bad_request();

        let huge = format!("data:image/png;base64,{}", "A".repeat(TEST_MAX_IMAGE_BYTES * 2));
        server
            .post("/messages/send/2")
            .authorization_bearer(alice_token())
            .json(&json!({ "image": huge }))
            .await
            .assert_status(StatusCode::PAYLOAD_TOO_LARGE);

        // nessun messaggio salvato
        let history = server
            .get("/messages/2")
            .authorization_bearer(alice_token())
            .await
            .json::<Vec<MessageDTO>>();
        assert!(history.is_empty());
        Ok(())
    }
}

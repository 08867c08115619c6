//! MessageRepository - Repository per la gestione dei messaggi

use super::{Create, Read};
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use sqlx::{Error, SqlitePool};

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Tutti i messaggi scambiati tra due utenti, in entrambe le direzioni,
    /// ordinati per data di creazione (a parità di timestamp vale l'ordine di inserimento)
    pub async fn find_conversation(
        &self,
        user_a: &i32,
        user_b: &i32,
    ) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT
                message_id,
                sender_id,
                receiver_id,
                text,
                image,
                emotion,
                created_at
            FROM messages
            WHERE (sender_id = ?1 AND receiver_id = ?2)
               OR (sender_id = ?2 AND receiver_id = ?1)
            ORDER BY created_at ASC, message_id ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (sender_id, receiver_id, text, image, emotion, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.sender_id)
        .bind(data.receiver_id)
        .bind(&data.text)
        .bind(&data.image)
        .bind(data.emotion.as_str())
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        // Get the last inserted ID
        let new_id = result.last_insert_rowid() as i32;

        Ok(Message {
            message_id: new_id,
            sender_id: data.sender_id,
            receiver_id: data.receiver_id,
            text: data.text.clone(),
            image: data.image.clone(),
            emotion: data.emotion,
            created_at: data.created_at,
        })
    }
}

impl Read<Message, i32> for MessageRepository {
    async fn read(&self, id: &i32) -> Result<Option<Message>, Error> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT
                message_id,
                sender_id,
                receiver_id,
                text,
                image,
                emotion,
                created_at
            FROM messages
            WHERE message_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Emotion;
    use chrono::Utc;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "messages")))]
    async fn conversation_contains_both_directions_in_order(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = MessageRepository::new(pool);

        let messages = repo.find_conversation(&1, &2).await?;
        let ids: Vec<_> = messages.iter().map(|m| m.message_id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);

        // stessa conversazione vista dall'altro utente
        let reversed = repo.find_conversation(&2, &1).await?;
        assert_eq!(reversed.len(), 4);

        assert_eq!(messages[0].emotion, Emotion::Surprised);
        assert_eq!(messages[2].text, None);
        assert_eq!(messages[2].image.as_deref(), Some("/media/cat.png"));

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn create_persists_emotion(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = MessageRepository::new(pool);

        let created = repo
            .create(&CreateMessageDTO {
                sender_id: 1,
                receiver_id: 3,
                text: Some("so angry".to_string()),
                image: None,
                emotion: Emotion::Angry,
                created_at: Utc::now(),
            })
            .await?;

        let read = repo.read(&created.message_id).await?.expect("message just created");
        assert_eq!(read.emotion, Emotion::Angry);
        assert_eq!(read.text.as_deref(), Some("so angry"));
        assert_eq!(read.created_at.timestamp(), created.created_at.timestamp());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn label_outside_enumeration_is_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        // il CHECK dello schema blocca l'insert
        let insert = sqlx::query(
            "INSERT INTO messages (sender_id, receiver_id, text, emotion, created_at) VALUES (1, 2, 'x', 'bored', '2025-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await;
        assert!(matches!(insert, Err(sqlx::Error::Database(_))));

        Ok(())
    }
}

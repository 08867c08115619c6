//! Presentazione di un messaggio in base all'emozione salvata

use crate::types::ChatMessage;
use emotion::EmotionStyle;

/// Messaggio pronto per la UI: classi CSS già risolte
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub message_id: i32,
    pub is_mine: bool,
    pub text: Option<String>,
    pub image: Option<String>,
    pub bubble_class: String,
    pub text_class: String,
    /// `Mood: <label>`, solo per etichette diverse da neutral
    pub footer: Option<String>,
}

fn join_classes(classes: &[&str]) -> String {
    classes
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lo stile dell'emozione si applica solo con la detection abilitata
pub fn render_message(message: &ChatMessage, me: i32, detection_enabled: bool) -> RenderedMessage {
    let style = if detection_enabled {
        message.emotion.style()
    } else {
        EmotionStyle::NONE
    };

    let footer = (detection_enabled && !message.emotion.is_neutral())
        .then(|| format!("Mood: {}", message.emotion));

    RenderedMessage {
        message_id: message.message_id,
        is_mine: message.sender_id == me,
        text: message.text.clone(),
        image: message.image.clone(),
        bubble_class: join_classes(&[
            "chat-bubble",
            "flex",
            "flex-col",
            style.background_color,
            style.animation_class,
        ]),
        text_class: join_classes(&[style.text_color, style.font_weight]),
        footer,
    }
}

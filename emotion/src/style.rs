//! Presentation mapping - Etichetta -> attributi di stile del messaggio
//!
//! Solo presentazione, nessuna logica. La tabella è totale sull'enumerazione:
//! `neutral` ha un bundle vuoto (nessuna distinzione visiva).

use crate::label::Emotion;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionStyle {
    pub text_color: &'static str,
    pub background_color: &'static str,
    pub animation_class: &'static str,
    pub font_weight: &'static str,
}

impl EmotionStyle {
    pub const NONE: EmotionStyle = EmotionStyle {
        text_color: "",
        background_color: "",
        animation_class: "",
        font_weight: "",
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Etichetta mostrata accanto al campo di input durante la composizione
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewBadge {
    pub text: &'static str,
    pub color: &'static str,
}

impl Emotion {
    pub const fn style(&self) -> EmotionStyle {
        match self {
            Emotion::Neutral => EmotionStyle::NONE,
            Emotion::Happy => EmotionStyle {
                text_color: "text-amber-600 dark:text-amber-400",
                background_color: "bg-amber-100 dark:bg-amber-900/30",
                animation_class: "",
                font_weight: "font-medium",
            },
            Emotion::Sad => EmotionStyle {
                text_color: "text-blue-600 dark:text-blue-400",
                background_color: "bg-blue-100 dark:bg-blue-900/30",
                animation_class: "",
                font_weight: "font-normal",
            },
            Emotion::Angry => EmotionStyle {
                text_color: "text-red-600 dark:text-red-400",
                background_color: "bg-red-100 dark:bg-red-900/30",
                animation_class: "",
                font_weight: "font-bold",
            },
            Emotion::Excited => EmotionStyle {
                text_color: "text-green-600 dark:text-green-400",
                background_color: "bg-green-100 dark:bg-green-900/30",
                animation_class: "animate-pulse",
                font_weight: "font-semibold",
            },
            Emotion::Surprised => EmotionStyle {
                text_color: "text-purple-600 dark:text-purple-400",
                background_color: "bg-purple-100 dark:bg-purple-900/30",
                animation_class: "animate-bounce",
                font_weight: "font-medium",
            },
        }
    }

    /// `None` per neutral: l'anteprima non lo nomina mai
    pub const fn preview_badge(&self) -> Option<PreviewBadge> {
        let (text, color) = match self {
            Emotion::Neutral => return None,
            Emotion::Happy => ("Happy", "text-amber-500"),
            Emotion::Sad => ("Sad", "text-blue-500"),
            Emotion::Angry => ("Angry", "text-red-500"),
            Emotion::Excited => ("Excited", "text-green-500"),
            Emotion::Surprised => ("Surprised", "text-purple-500"),
        };
        Some(PreviewBadge { text, color })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_maps_to_empty_bundle() {
        assert!(Emotion::Neutral.style().is_empty());
        assert_eq!(Emotion::Neutral.preview_badge(), None);
    }

    #[test]
    fn every_other_label_is_visually_distinct() {
        let styled: Vec<_> = Emotion::ALL
            .into_iter()
            .filter(|e| !e.is_neutral())
            .map(|e| e.style())
            .collect();

        assert_eq!(styled.len(), 5);
        for (i, style) in styled.iter().enumerate() {
            assert!(!style.text_color.is_empty());
            assert!(!style.background_color.is_empty());
            assert!(!style.font_weight.is_empty());
            for other in &styled[i + 1..] {
                assert_ne!(style, other);
            }
        }
    }

    #[test]
    fn only_lively_emotions_animate() {
        assert_eq!(Emotion::Excited.style().animation_class, "animate-pulse");
        assert_eq!(Emotion::Surprised.style().animation_class, "animate-bounce");
        assert_eq!(Emotion::Angry.style().animation_class, "");
        assert_eq!(Emotion::Angry.style().font_weight, "font-bold");
    }

    #[test]
    fn badges_use_title_case_names() {
        let badge = Emotion::Excited.preview_badge().unwrap();
        assert_eq!(badge.text, "Excited");
        assert_eq!(badge.color, "text-green-500");
    }
}

//! Bozza del messaggio in composizione
//!
//! A ogni modifica del testo l'anteprima viene ricalcolata in modo sincrono
//! con il [`KeywordClassifier`]; l'ultimo testo impostato vince. L'anteprima
//! è solo indicativa: l'emozione salvata è quella calcolata dal server.

use crate::error::ClientError;
use crate::types::SendMessageRequest;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use emotion::{Classify, Emotion, KeywordClassifier, PreviewBadge};

#[derive(Debug, Clone)]
pub struct Composer {
    classifier: KeywordClassifier,
    detection_enabled: bool,
    text: String,
    image: Option<String>,
    preview: Option<Emotion>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(KeywordClassifier::default(), true)
    }
}

impl Composer {
    pub fn new(classifier: KeywordClassifier, detection_enabled: bool) -> Self {
        Self {
            classifier,
            detection_enabled,
            text: String::new(),
            image: None,
            preview: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn preview(&self) -> Option<Emotion> {
        self.preview
    }

    pub fn preview_badge(&self) -> Option<PreviewBadge> {
        self.preview.and_then(|e| e.preview_badge())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.refresh_preview();
    }

    /// Con la detection disabilitata l'anteprima resta vuota
    pub fn set_detection_enabled(&mut self, enabled: bool) {
        self.detection_enabled = enabled;
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.preview = if self.detection_enabled {
            self.classifier.classify(Some(&self.text))
        } else {
            None
        };
    }

    /// Allega un'immagine come data url; solo MIME `image/*`
    pub fn attach_image(&mut self, mime: &str, bytes: &[u8]) -> Result<(), ClientError> {
        let mime = mime.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") {
            return Err(ClientError::InvalidImage(format!(
                "{mime} is not an image type"
            )));
        }
        if bytes.is_empty() {
            return Err(ClientError::InvalidImage("empty file".to_string()));
        }
        self.image = Some(format!("data:{};base64,{}", mime, B64.encode(bytes)));
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.image = None;
    }

    pub fn can_send(&self) -> bool {
        !self.text.trim().is_empty() || self.image.is_some()
    }

    /// Svuota la bozza e ritorna la richiesta da inviare; `None` se non c'è nulla da inviare
    pub fn submit(&mut self) -> Option<SendMessageRequest> {
        if !self.can_send() {
            return None;
        }
        let text = self.text.trim();
        let request = SendMessageRequest {
            text: (!text.is_empty()).then(|| text.to_string()),
            image: self.image.take(),
        };
        self.text.clear();
        self.preview = None;
        Some(request)
    }
}

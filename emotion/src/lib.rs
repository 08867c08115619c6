//! Emotion - Pipeline di classificazione emotiva dei messaggi
//!
//! - [`SentimentClassifier`]: classificazione autorevole, eseguita dal server all'invio
//!   e salvata con il messaggio
//! - [`KeywordClassifier`]: anteprima indicativa calcolata dal client a ogni modifica della bozza
//! - [`EmotionStyle`]: mappatura etichetta -> stile di presentazione
//!
//! I due classificatori implementano lo stesso trait [`Classify`] e condividono
//! solo l'enumerazione [`Emotion`].

pub mod classifier;
pub mod label;
pub mod lexicon;
pub mod preview;
pub mod sentiment;
pub mod style;

pub use classifier::{Classify, SentimentClassifier, emotion_for_score};
pub use label::{Emotion, UnknownEmotion};
pub use lexicon::{Lexicon, LexiconError};
pub use preview::{KeywordClassifier, PreviewError};
pub use sentiment::{Analysis, SentimentScorer};
pub use style::{EmotionStyle, PreviewBadge};

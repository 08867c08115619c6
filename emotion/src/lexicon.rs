//! Lexicon - Dizionario parola -> peso usato dallo scorer di sentiment
//!
//! Il lessico è una dipendenza sostituibile: quello incorporato è un sottoinsieme
//! in stile AFINN (pesi interi tra -5 e +5), ma qualsiasi file `parola peso`
//! può rimpiazzarlo tramite [`Lexicon::load`].

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

const BUILTIN_WEIGHTS: &str = include_str!("../data/afinn_en.tsv");
const BUILTIN_NEGATORS: &str = include_str!("../data/negators_en.txt");

lazy_static! {
    static ref BUILTIN: Lexicon = Lexicon::parse(BUILTIN_WEIGHTS)
        .expect("embedded lexicon is well-formed")
        .with_negators(words(BUILTIN_NEGATORS));
}

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed lexicon entry at line {line}: {content:?}")]
    Parse { line: usize, content: String },
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
    negators: HashSet<String>,
}

impl Lexicon {
    /// Lessico inglese incorporato nel binario, con i negatori inglesi
    pub fn builtin() -> Lexicon {
        BUILTIN.clone()
    }

    /// Parsing di righe `parola<TAB|spazi>peso`.
    /// Righe vuote e commenti (`#`) sono ignorati, le parole vengono portate in minuscolo.
    pub fn parse(source: &str) -> Result<Lexicon, LexiconError> {
        let mut weights = HashMap::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = || LexiconError::Parse {
                line: idx + 1,
                content: raw.to_string(),
            };

            let mut parts = line.split_whitespace();
            let (word, weight) = match (parts.next(), parts.next(), parts.next()) {
                (Some(word), Some(weight), None) => (word, weight),
                _ => return Err(malformed()),
            };
            let weight: f64 = weight.parse().map_err(|_| malformed())?;
            if !weight.is_finite() {
                return Err(malformed());
            }

            weights.insert(word.to_lowercase(), weight);
        }

        debug!(entries = weights.len(), "Lexicon parsed");
        Ok(Lexicon {
            weights,
            negators: HashSet::new(),
        })
    }

    /// Carica un lessico da file, mantenendo i negatori inglesi incorporati
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Lexicon, LexiconError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let lexicon = Lexicon::parse(&source)?.with_negators(BUILTIN.negators.iter().cloned());
        info!(entries = lexicon.len(), "Custom sentiment lexicon loaded");
        Ok(lexicon)
    }

    pub fn from_pairs<I, W>(pairs: I) -> Lexicon
    where
        I: IntoIterator<Item = (W, f64)>,
        W: Into<String>,
    {
        Lexicon {
            weights: pairs
                .into_iter()
                .map(|(w, score)| (w.into().to_lowercase(), score))
                .collect(),
            negators: HashSet::new(),
        }
    }

    pub fn with_negators<I, W>(mut self, negators: I) -> Lexicon
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.negators = negators
            .into_iter()
            .map(|w| w.into().to_lowercase())
            .collect();
        self
    }

    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn words(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_lexicon_is_loaded() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.len() > 2500);
        assert_eq!(lexicon.weight("lol"), Some(3.0));
        assert_eq!(lexicon.weight("stop"), Some(-1.0));
        assert_eq!(lexicon.weight("happy"), Some(3.0));
        assert_eq!(lexicon.weight("excited"), Some(3.0));
        assert_eq!(lexicon.weight("hate"), Some(-3.0));
        assert_eq!(lexicon.weight("table"), None);
        assert!(lexicon.is_negator("not"));
        assert!(lexicon.is_negator("don't"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let lexicon = Lexicon::parse("# header\n\nGood\t3\nmeh -1.5\n").unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.weight("good"), Some(3.0));
        assert_eq!(lexicon.weight("meh"), Some(-1.5));
    }

    #[test]
    fn parse_reports_the_offending_line() {
        let err = Lexicon::parse("good 3\nbad\n").unwrap_err();
        match err {
            LexiconError::Parse { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "bad");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(Lexicon::parse("good three").is_err());
        assert!(Lexicon::parse("good 3 extra").is_err());
        assert!(Lexicon::parse("good NaN").is_err());
    }

    #[test]
    fn load_reads_file_and_keeps_builtin_negators() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "splendid\t4").unwrap();
        writeln!(file, "dreary\t-2").unwrap();

        let lexicon = Lexicon::load(file.path()).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.weight("splendid"), Some(4.0));
        assert!(lexicon.is_negator("never"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Lexicon::load("/definitely/not/here.tsv").unwrap_err();
        assert!(matches!(err, LexiconError::Io(_)));
    }
}

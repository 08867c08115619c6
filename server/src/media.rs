//! Media store - Upload delle immagini allegate ai messaggi
//!
//! Il client invia l'immagine come data url (`data:image/png;base64,...`);
//! lo store la decodifica, la salva su disco e restituisce un url durevole
//! servito da `GET /media/{file}`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("payload is not a base64 data url")]
    InvalidDataUrl,

    #[error("unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("image is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Servizio di upload: payload inline -> url durevole
pub trait MediaUpload {
    async fn upload(&self, payload: &str) -> Result<String, MediaError>;

    /// Elimina un'immagine caricata in precedenza; un url sconosciuto non è un errore
    async fn remove(&self, url: &str) -> Result<(), MediaError>;
}

/// Immagine decodificata da un data url
#[derive(Debug, PartialEq)]
pub struct DecodedImage {
    pub mime: String,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Parsing di `data:<mime>[;param...];base64,<payload>` con controllo della dimensione
pub fn decode_data_url(payload: &str, max_bytes: usize) -> Result<DecodedImage, MediaError> {
    let rest = payload
        .trim()
        .strip_prefix("data:")
        .ok_or(MediaError::InvalidDataUrl)?;
    let (meta, data) = rest.split_once(',').ok_or(MediaError::InvalidDataUrl)?;

    let mut params = meta.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(MediaError::InvalidDataUrl);
    }

    let extension = extension_for(&mime).ok_or_else(|| MediaError::UnsupportedType(mime.clone()))?;

    // stima prima di decodificare, per non allocare payload enormi
    let estimated = data.len() / 4 * 3;
    if estimated > max_bytes.saturating_add(3) {
        return Err(MediaError::TooLarge {
            size: estimated,
            max: max_bytes,
        });
    }

    let bytes = B64.decode(data.trim())?;
    if bytes.is_empty() {
        return Err(MediaError::InvalidDataUrl);
    }
    if bytes.len() > max_bytes {
        return Err(MediaError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }

    Ok(DecodedImage {
        mime,
        extension,
        bytes,
    })
}

fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/bmp" => Some("bmp"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// Store su filesystem locale: un file `<uuid>.<ext>` per immagine
pub struct LocalMediaStore {
    dir: PathBuf,
    base_url: String,
    max_bytes: usize,
}

impl LocalMediaStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

impl MediaUpload for LocalMediaStore {
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn upload(&self, payload: &str) -> Result<String, MediaError> {
        let image = decode_data_url(payload, self.max_bytes).map_err(|e| {
            warn!("Rejected image upload: {}", e);
            e
        })?;

        fs::create_dir_all(&self.dir).await?;
        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        let path = self.dir.join(&file_name);
        debug!(mime = %image.mime, size = image.bytes.len(), "Writing image to {}", path.display());
        fs::write(&path, &image.bytes).await?;

        let url = format!("{}/{}", self.base_url, file_name);
        info!(url = %url, "Image stored");
        Ok(url)
    }

    #[instrument(skip(self))]
    async fn remove(&self, url: &str) -> Result<(), MediaError> {
        let Some(file_name) = url
            .strip_prefix(&self.base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
        else {
            warn!("Url does not belong to this store");
            return Ok(());
        };

        match fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => {
                info!("Image removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

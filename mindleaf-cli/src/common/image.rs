use anyhow::{Context, Result};
use base64ct::{Base64, Encoding};
use std::path::Path;

/// Images larger than this are refused rather than inlined into an entry.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Reads an image file into a `data:` URL, the form entries store images in.
pub fn data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.len() > MAX_IMAGE_BYTES {
        anyhow::bail!(
            "{} is {} KB; images are limited to {} KB",
            path.display(),
            bytes.len() / 1024,
            MAX_IMAGE_BYTES / 1024
        );
    }
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        anyhow::bail!("{} does not look like an image ({mime})", path.display());
    }
    Ok(format!("data:{mime};base64,{}", Base64::encode_string(&bytes)))
}

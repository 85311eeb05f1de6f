//! Upload checks: file extension allow-list and content sniffing.

/// Image formats recognized from their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// File extensions conventionally used for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Jpeg => &["jpg", "jpeg"],
        }
    }
}

/// Lowercased text after the last `.`, if there is one.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Whether `filename` carries one of the `allowed` extensions.
pub fn allowed_file(filename: &str, allowed: &[String]) -> bool {
    extension_of(filename)
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

/// Detect a PNG or JPEG from its signature.
pub fn sniff_image(bytes: &[u8]) -> Option<ImageKind> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    if bytes.starts_with(PNG) {
        Some(ImageKind::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageKind::Jpeg)
    } else {
        None
    }
}

/// The sniffed format of `bytes`, provided it agrees with the extension of
/// `filename`.
pub fn check_content(filename: &str, bytes: &[u8]) -> Option<ImageKind> {
    let kind = sniff_image(bytes)?;
    let ext = extension_of(filename)?;
    kind.extensions().contains(&ext.as_str()).then_some(kind)
}

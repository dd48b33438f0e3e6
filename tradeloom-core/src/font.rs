//! Chart font selection.
//!
//! The dashboard text is Korean, so the chart font has to carry Hangul glyphs.
//! A bundled font file wins; otherwise the conventional Korean system font of
//! the host OS family is named; otherwise generic `sans-serif` with a note.
//!
//! Resolution happens once per process. Later calls return the cached choice.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, warn};
use ttf_parser::{name, name_id, PlatformId, RawFace, Tag};

/// Note attached to the generic fallback.
pub const FALLBACK_NOTE: &str = "Korean glyphs may not render correctly";

static RESOLVED: OnceCell<FontChoice> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FontSource {
    Bundled { path: PathBuf },
    Platform { os: String },
    Fallback,
}

/// Font family used for chart titles, axes and legends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontChoice {
    pub family: String,
    pub source: FontSource,
    /// Raw font file, for embedding. Only set for bundled fonts.
    #[serde(skip)]
    pub data: Option<Vec<u8>>,
    pub note: Option<&'static str>,
}

impl FontChoice {
    fn fallback() -> Self {
        Self {
            family: "sans-serif".into(),
            source: FontSource::Fallback,
            data: None,
            note: Some(FALLBACK_NOTE),
        }
    }

    /// CSS `font-family` value with a generic fallback appended.
    pub fn css_family(&self) -> String {
        match self.source {
            FontSource::Fallback => self.family.clone(),
            _ => format!("'{}', sans-serif", self.family.replace('\'', "")),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, FontSource::Fallback)
    }
}

/// Resolve the chart font once per process.
///
/// The first call decides; the argument of any later call is ignored.
pub fn resolve(bundled: Option<&Path>) -> &'static FontChoice {
    RESOLVED.get_or_init(|| {
        let choice = resolve_uncached(bundled, std::env::consts::OS);
        debug!(family = %choice.family, source = ?choice.source, "resolved chart font");
        choice
    })
}

/// Resolution without the process cache. `os` uses the values of
/// `std::env::consts::OS`.
pub fn resolve_uncached(bundled: Option<&Path>, os: &str) -> FontChoice {
    if let Some(path) = bundled.filter(|p| p.is_file()) {
        match std::fs::read(path) {
            Ok(data) => {
                let family = family_name(&data).unwrap_or_else(|| file_stem(path));
                return FontChoice {
                    family,
                    source: FontSource::Bundled {
                        path: path.to_path_buf(),
                    },
                    data: Some(data),
                    note: None,
                };
            }
            Err(e) => warn!(path = %path.display(), error = %e, "unreadable font file"),
        }
    }

    match platform_family(os) {
        Some(family) => FontChoice {
            family: family.to_string(),
            source: FontSource::Platform { os: os.to_string() },
            data: None,
            note: None,
        },
        None => FontChoice::fallback(),
    }
}

/// Conventional Korean UI font per OS family.
pub fn platform_family(os: &str) -> Option<&'static str> {
    match os {
        "windows" => Some("Malgun Gothic"),
        "macos" | "ios" => Some("AppleGothic"),
        "linux" | "android" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris"
        | "illumos" => Some("NanumGothic"),
        _ => None,
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sans-serif".into())
}

/// Family name from the `name` table of a TrueType/OpenType file, or of the
/// first face of a collection. Prefers the typographic family over the
/// legacy family, and English Windows records over the rest.
pub fn family_name(data: &[u8]) -> Option<String> {
    let raw = RawFace::parse(data, 0).ok()?;
    let table = name::Table::parse(raw.table(Tag::from_bytes(b"name"))?)?;

    let mut best: Option<(u8, String)> = None;
    for record in table.names {
        let mut rank = match record.name_id {
            name_id::TYPOGRAPHIC_FAMILY => 0,
            name_id::FAMILY => 4,
            _ => continue,
        };
        let Some(text) = record_text(&record).filter(|t| !t.trim().is_empty()) else {
            continue;
        };

        rank += match (record.platform_id, record.language_id) {
            (PlatformId::Windows, 0x0409) => 0,
            (PlatformId::Windows | PlatformId::Unicode, _) => 1,
            _ => 2,
        };
        if best.as_ref().map_or(true, |(r, _)| rank < *r) {
            best = Some((rank, text));
        }
    }

    best.map(|(_, name)| name.trim().to_string())
}

fn record_text(record: &name::Name) -> Option<String> {
    record.to_string().or_else(|| {
        // Mac Roman, ASCII range only.
        (record.platform_id == PlatformId::Macintosh && record.encoding_id == 0)
            .then(|| record.name.iter().map(|&b| b as char).collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// (platform, encoding, language, name id, string bytes)
    type NameRecord = (u16, u16, u16, u16, Vec<u8>);

    fn be16(s: &str) -> Vec<u8> {
        s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    fn font_with_names(records: &[NameRecord]) -> Vec<u8> {
        let mut name = Vec::new();
        let string_offset = 6 + 12 * records.len() as u16;
        name.extend_from_slice(&0u16.to_be_bytes());
        name.extend_from_slice(&(records.len() as u16).to_be_bytes());
        name.extend_from_slice(&string_offset.to_be_bytes());

        let mut strings = Vec::new();
        for (platform, encoding, language, id, bytes) in records {
            for v in [*platform, *encoding, *language, *id, bytes.len() as u16, strings.len() as u16] {
                name.extend_from_slice(&v.to_be_bytes());
            }
            strings.extend_from_slice(bytes);
        }
        name.extend_from_slice(&strings);

        let mut font = Vec::new();
        font.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        font.extend_from_slice(&1u16.to_be_bytes());
        font.extend_from_slice(&[0u8; 6]);
        font.extend_from_slice(b"name");
        font.extend_from_slice(&0u32.to_be_bytes());
        font.extend_from_slice(&28u32.to_be_bytes());
        font.extend_from_slice(&(name.len() as u32).to_be_bytes());
        font.extend_from_slice(&name);
        font
    }

    #[test]
    fn reads_windows_family_name() {
        let font = font_with_names(&[(3, 1, 0x0409, 1, be16("Nanum Gothic"))]);
        assert_eq!(family_name(&font).as_deref(), Some("Nanum Gothic"));
    }

    #[test]
    fn typographic_family_beats_legacy() {
        let font = font_with_names(&[
            (3, 1, 0x0409, 1, be16("Nanum Gothic Bold")),
            (3, 1, 0x0409, 16, be16("Nanum Gothic")),
        ]);
        assert_eq!(family_name(&font).as_deref(), Some("Nanum Gothic"));
    }

    #[test]
    fn english_record_beats_korean() {
        let font = font_with_names(&[
            (3, 1, 0x0412, 1, be16("나눔고딕")),
            (3, 1, 0x0409, 1, be16("NanumGothic")),
        ]);
        assert_eq!(family_name(&font).as_deref(), Some("NanumGothic"));
    }

    #[test]
    fn mac_roman_record() {
        let font = font_with_names(&[(1, 0, 0, 1, b"AppleGothic".to_vec())]);
        assert_eq!(family_name(&font).as_deref(), Some("AppleGothic"));
    }

    #[test]
    fn first_face_of_collection() {
        let face = font_with_names(&[(3, 1, 0x0409, 1, be16("Collected Sans"))]);
        let mut ttc = Vec::new();
        ttc.extend_from_slice(b"ttcf");
        ttc.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        ttc.extend_from_slice(&1u32.to_be_bytes());
        ttc.extend_from_slice(&16u32.to_be_bytes());
        ttc.extend_from_slice(&face);
        // Table offsets are from the start of the file.
        ttc[36..40].copy_from_slice(&44u32.to_be_bytes());
        assert_eq!(family_name(&ttc).as_deref(), Some("Collected Sans"));
    }

    #[test]
    fn other_name_ids_are_ignored() {
        let font = font_with_names(&[(3, 1, 0x0409, 4, be16("Nanum Gothic Regular"))]);
        assert_eq!(family_name(&font), None);
    }

    #[test]
    fn garbage_has_no_name() {
        assert_eq!(family_name(b"not a font"), None);
        assert_eq!(family_name(&[]), None);
    }

    #[test]
    fn bundled_file_wins() {
        let font = font_with_names(&[(3, 1, 0x0409, 1, be16("Bundled Sans"))]);
        let mut file = tempfile::Builder::new().suffix(".ttf").tempfile().unwrap();
        file.write_all(&font).unwrap();

        let choice = resolve_uncached(Some(file.path()), "linux");
        assert_eq!(choice.family, "Bundled Sans");
        assert!(matches!(choice.source, FontSource::Bundled { .. }));
        assert_eq!(choice.data.as_deref(), Some(font.as_slice()));
        assert_eq!(choice.note, None);
    }

    #[test]
    fn unparsable_bundled_file_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MyFont.ttf");
        std::fs::write(&path, b"junk").unwrap();
        let choice = resolve_uncached(Some(&path), "linux");
        assert_eq!(choice.family, "MyFont");
    }

    #[test]
    fn missing_bundled_file_falls_through_to_platform() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ttf");
        assert_eq!(resolve_uncached(Some(&path), "windows").family, "Malgun Gothic");
        assert_eq!(resolve_uncached(None, "macos").family, "AppleGothic");
        assert_eq!(resolve_uncached(None, "linux").family, "NanumGothic");
    }

    #[test]
    fn unknown_os_gets_fallback_with_note() {
        let choice = resolve_uncached(None, "plan9");
        assert!(choice.is_fallback());
        assert_eq!(choice.family, "sans-serif");
        assert_eq!(choice.note, Some(FALLBACK_NOTE));
        assert_eq!(choice.css_family(), "sans-serif");
    }

    #[test]
    fn css_family_appends_generic() {
        let choice = resolve_uncached(None, "linux");
        assert_eq!(choice.css_family(), "'NanumGothic', sans-serif");
    }

    #[test]
    fn resolve_is_cached() {
        let first = resolve(None);
        let dir = tempfile::tempdir().unwrap();
        let second = resolve(Some(dir.path()));
        assert!(std::ptr::eq(first, second));
    }
}

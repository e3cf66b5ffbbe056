//! UV atlas rects
//!
//! Two interchangeable representations:
//!
//! - embedded in version 1011+ containers as an `int32` count followed by
//!   four `float32` values per rect
//! - a sidecar text file next to the image, one `x;y;width;height` rect per line
//!
//! Order is significant in both: rect indices are referenced by atlas consumers.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::TexError;
use crate::io::{read_f32, read_i32, remaining, write_f32, write_i32};

/// Suffix appended to an image file name to locate its sidecar
pub const UV_SIDECAR_SUFFIX: &str = ".uv.csv";

/// Size of one embedded rect (4 × f32)
pub const RECT_SIZE: usize = 16;

/// Atlas sub-rectangle, in UV space
///
/// No bounds or overlap checks are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parse one sidecar line. Returns `None` for blank or malformed lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line
            .split(';')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();

        let [x, y, width, height] = fields.as_slice() else {
            return None;
        };

        Some(Self {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }

    /// Format as a sidecar line (no trailing newline)
    ///
    /// `f32`'s `Display` is locale independent and prints the shortest
    /// representation that parses back to the same value.
    pub fn to_line(&self) -> String {
        format!("{};{};{};{}", self.x, self.y, self.width, self.height)
    }
}

/// Path of the sidecar that belongs to `image_path` (`face.png` → `face.png.uv.csv`)
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    let mut name = image_path.as_os_str().to_os_string();
    name.push(UV_SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Whether `path` names a UV sidecar file
pub fn is_sidecar_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(UV_SIDECAR_SUFFIX))
}

/// Parse sidecar text
///
/// Blank lines are ignored. Lines with the wrong field count or numbers that
/// fail to parse are skipped individually.
pub fn parse_sidecar(text: &str) -> Vec<Rect> {
    let mut rects = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Rect::parse_line(line) {
            Some(rect) => rects.push(rect),
            None => tracing::debug!("Skipping malformed UV rect on line {}: {:?}", index + 1, line),
        }
    }

    rects
}

/// Format rects as sidecar text, one line per rect in order
pub fn format_sidecar(rects: &[Rect]) -> String {
    let mut text = String::new();
    for rect in rects {
        text.push_str(&rect.to_line());
        text.push('\n');
    }
    text
}

/// Read the embedded rect block (count + rects)
pub(crate) fn read_rects(cursor: &mut Cursor<&[u8]>) -> Result<Vec<Rect>, TexError> {
    let count = read_i32(cursor, "rect count")?;
    if count < 0 {
        return Err(TexError::InvalidHeader {
            field: "rect count",
            value: i64::from(count),
        });
    }

    let needed = count as usize * RECT_SIZE;
    let available = remaining(cursor);
    if needed > available {
        return Err(TexError::TruncatedData {
            context: "rect array",
            needed,
            available,
        });
    }

    let mut rects = Vec::with_capacity(count as usize);
    for _ in 0..count {
        rects.push(Rect {
            x: read_f32(cursor, "rect array")?,
            y: read_f32(cursor, "rect array")?,
            width: read_f32(cursor, "rect array")?,
            height: read_f32(cursor, "rect array")?,
        });
    }

    Ok(rects)
}

/// Write the embedded rect block (count + rects)
pub(crate) fn write_rects(output: &mut Vec<u8>, rects: &[Rect]) {
    write_i32(output, rects.len() as i32);
    for rect in rects {
        write_f32(output, rect.x);
        write_f32(output, rect.y);
        write_f32(output, rect.width);
        write_f32(output, rect.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            Rect::parse_line("0.25;0.5;0.125;1"),
            Some(Rect::new(0.25, 0.5, 0.125, 1.0))
        );
    }

    #[test]
    fn test_parse_line_with_spaces() {
        // Older tools wrote "; " separators
        assert_eq!(
            Rect::parse_line("0.1; 0.2; 0.3; 0.4"),
            Some(Rect::new(0.1, 0.2, 0.3, 0.4))
        );
    }

    #[test]
    fn test_parse_line_rejects_bad_input() {
        assert_eq!(Rect::parse_line("1;2;3"), None);
        assert_eq!(Rect::parse_line("1;2;3;4;5"), None);
        assert_eq!(Rect::parse_line("1;2;x;4"), None);
        // Comma decimal separators are not accepted
        assert_eq!(Rect::parse_line("0,5;0,5;1;1"), None);
    }

    #[test]
    fn test_parse_sidecar_skips_bad_lines() {
        let text = "0;0;0.5;0.5\n\n   \nnot;a;rect\n0.5;0;0.5;0.5\n1;2;3\r\n0;0.5;1;0.5\r\n";
        let rects = parse_sidecar(text);
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 0.5, 0.5),
                Rect::new(0.5, 0.0, 0.5, 0.5),
                Rect::new(0.0, 0.5, 1.0, 0.5),
            ]
        );
    }

    #[test]
    fn test_format_sidecar_roundtrip() {
        let rects = vec![
            Rect::new(0.1, 0.2, 0.3, 0.4),
            Rect::new(-1.5, 1e-7, 1024.0, 0.333_333_34),
        ];
        let text = format_sidecar(&rects);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("0.1;0.2;0.3;0.4\n"));
        assert_eq!(parse_sidecar(&text), rects);
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("dir/face.png")),
            PathBuf::from("dir/face.png.uv.csv")
        );
        assert!(is_sidecar_path(Path::new("dir/face.png.uv.csv")));
        assert!(is_sidecar_path(Path::new("FACE.PNG.UV.CSV")));
        assert!(!is_sidecar_path(Path::new("dir/face.png")));
    }

    #[test]
    fn test_embedded_roundtrip() {
        let rects = vec![Rect::new(0.0, 0.0, 0.5, 0.5), Rect::new(0.5, 0.5, 0.5, 0.5)];
        let mut out = Vec::new();
        write_rects(&mut out, &rects);
        assert_eq!(out.len(), 4 + 2 * RECT_SIZE);

        let mut cursor = Cursor::new(&out[..]);
        assert_eq!(read_rects(&mut cursor).unwrap(), rects);
    }

    #[test]
    fn test_embedded_count_exceeds_data() {
        let mut out = Vec::new();
        write_i32(&mut out, 3);
        write_f32(&mut out, 1.0);
        let mut cursor = Cursor::new(&out[..]);
        assert_eq!(
            read_rects(&mut cursor),
            Err(TexError::TruncatedData {
                context: "rect array",
                needed: 48,
                available: 4,
            })
        );
    }

    #[test]
    fn test_embedded_negative_count() {
        let mut out = Vec::new();
        write_i32(&mut out, -1);
        let mut cursor = Cursor::new(&out[..]);
        assert!(matches!(
            read_rects(&mut cursor),
            Err(TexError::InvalidHeader {
                field: "rect count",
                value: -1
            })
        ));
    }
}

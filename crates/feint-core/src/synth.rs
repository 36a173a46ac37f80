//! Synthetic file generation for storage-abuse testing.
//!
//! Files open with a format-specific signature and are filled to an exact
//! byte count in bounded chunks, so peak memory stays flat no matter how
//! large the requested file is.

use std::io::Write;
use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::debug;

use crate::error::SynthError;

/// Ceiling on a single write buffer.
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024 * 1024;

const PATTERN: &[u8] = b"ABCD0123";

/// Catalog of generatable file formats.
///
/// Signatures are minimal fixtures, not conformant encoder output — the
/// JPEG one is just the JFIF prefix. They only need to satisfy magic-byte
/// sniffing on the receiving side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Jpg,
    Png,
    Pdf,
    Txt,
    Bin,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Jpg,
        FileKind::Png,
        FileKind::Pdf,
        FileKind::Txt,
        FileKind::Bin,
    ];

    /// Constant leading bytes of the format, empty for txt/bin.
    pub fn signature(self) -> &'static [u8] {
        match self {
            FileKind::Jpg => b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00",
            FileKind::Png => b"\x89PNG\r\n\x1a\n",
            FileKind::Pdf => b"%PDF-1.4\n",
            FileKind::Txt | FileKind::Bin => b"",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Jpg => "jpg",
            FileKind::Png => "png",
            FileKind::Pdf => "pdf",
            FileKind::Txt => "txt",
            FileKind::Bin => "bin",
        }
    }
}

/// Size units, binary multiples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kb,
    Mb,
    Gb,
}

impl SizeUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kb => 1024,
            SizeUnit::Mb => 1024 * 1024,
            SizeUnit::Gb => 1024 * 1024 * 1024,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::Bytes => "bytes",
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
        }
    }
}

/// What the body bytes look like after the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Random,
    Zeros,
    Pattern,
}

/// Resolve a value+unit pair into a byte count.
pub fn resolve_size(value: f64, unit: SizeUnit) -> Result<u64, SynthError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SynthError::BadSize(value));
    }
    Ok((value * unit.multiplier() as f64) as u64)
}

/// Check that `total_bytes` can hold the kind's signature.
///
/// Callers run this before creating the destination file so an undersized
/// request fails with nothing on disk.
pub fn check_size(kind: FileKind, total_bytes: u64) -> Result<(), SynthError> {
    let signature = kind.signature();
    if total_bytes < signature.len() as u64 {
        return Err(SynthError::SizeTooSmall {
            requested: total_bytes,
            kind: kind.extension(),
            signature: signature.len(),
        });
    }
    Ok(())
}

/// Write the signature and fill `sink` up to exactly `total_bytes`.
///
/// No single write materializes a buffer larger than `chunk_size`; the
/// remaining counter drops by exactly the written length each iteration and
/// terminates at zero.
pub fn fill<W: Write>(
    sink: &mut W,
    kind: FileKind,
    total_bytes: u64,
    mode: ContentMode,
    chunk_size: usize,
) -> Result<(), SynthError> {
    check_size(kind, total_bytes)?;
    if chunk_size == 0 {
        return Err(SynthError::ZeroChunk);
    }

    let signature = kind.signature();
    if !signature.is_empty() {
        sink.write_all(signature)?;
    }
    let mut remaining = total_bytes - signature.len() as u64;
    let buf_len = remaining.min(chunk_size as u64) as usize;
    debug!(total_bytes, buf_len, ?mode, "filling body");

    match mode {
        ContentMode::Random => {
            let mut rng = rand::thread_rng();
            let mut buf = vec![0u8; buf_len];
            while remaining > 0 {
                let take = remaining.min(buf.len() as u64) as usize;
                rng.fill_bytes(&mut buf[..take]);
                sink.write_all(&buf[..take])?;
                remaining -= take as u64;
            }
        }
        ContentMode::Zeros => {
            let buf = vec![0u8; buf_len];
            while remaining > 0 {
                let take = remaining.min(buf.len() as u64) as usize;
                sink.write_all(&buf[..take])?;
                remaining -= take as u64;
            }
        }
        ContentMode::Pattern => {
            let mut buf = Vec::with_capacity(buf_len);
            while buf.len() < buf_len {
                let take = PATTERN.len().min(buf_len - buf.len());
                buf.extend_from_slice(&PATTERN[..take]);
            }
            while remaining > 0 {
                let take = remaining.min(buf.len() as u64) as usize;
                sink.write_all(&buf[..take])?;
                remaining -= take as u64;
            }
        }
    }
    Ok(())
}

/// Expand a leading `~`, absolutize, and create the directory.
///
/// A path that already exists as a regular file resolves to its parent
/// directory instead.
pub fn resolve_dir(input: &str) -> Result<PathBuf, SynthError> {
    let expanded = expand_home(input);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };
    let dir = if absolute.is_file() {
        absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        absolute
    };
    std::fs::create_dir_all(&dir).map_err(|source| SynthError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

fn expand_home(input: &str) -> PathBuf {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}

/// Append the kind's extension unless the name already carries it.
pub fn ensure_extension(filename: &str, kind: FileKind) -> String {
    let suffix = format!(".{}", kind.extension());
    if filename.to_ascii_lowercase().ends_with(&suffix) {
        filename.to_string()
    } else {
        format!("{filename}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_then_zeros_to_exact_size() {
        let mut sink = Vec::new();
        fill(&mut sink, FileKind::Png, 1024, ContentMode::Zeros, 256).unwrap();
        assert_eq!(sink.len(), 1024);
        assert_eq!(&sink[..8], b"\x89PNG\r\n\x1a\n");
        assert!(sink[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn pattern_repeats_across_chunk_boundaries() {
        let mut sink = Vec::new();
        // Chunk of 6 does not divide the pattern length or the total.
        fill(&mut sink, FileKind::Bin, 20, ContentMode::Pattern, 6).unwrap();
        assert_eq!(&sink, b"ABCD01ABCD01ABCD01AB");
    }

    #[test]
    fn random_fill_hits_exact_size_with_odd_chunk() {
        let mut sink = Vec::new();
        fill(&mut sink, FileKind::Txt, 1000, ContentMode::Random, 7).unwrap();
        assert_eq!(sink.len(), 1000);
    }

    #[test]
    fn pdf_header_leads_the_file() {
        let mut sink = Vec::new();
        fill(&mut sink, FileKind::Pdf, 64, ContentMode::Random, 16).unwrap();
        assert_eq!(&sink[..9], b"%PDF-1.4\n");
        assert_eq!(sink.len(), 64);
    }

    #[test]
    fn undersized_request_writes_nothing() {
        let mut sink = Vec::new();
        let err = fill(&mut sink, FileKind::Jpg, 4, ContentMode::Zeros, 256).unwrap_err();
        assert!(matches!(err, SynthError::SizeTooSmall { requested: 4, .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn size_exactly_signature_is_allowed() {
        let mut sink = Vec::new();
        let sig_len = FileKind::Jpg.signature().len() as u64;
        fill(&mut sink, FileKind::Jpg, sig_len, ContentMode::Random, 256).unwrap();
        assert_eq!(sink.len() as u64, sig_len);
    }

    #[test]
    fn resolves_units() {
        assert_eq!(resolve_size(10.0, SizeUnit::Bytes).unwrap(), 10);
        assert_eq!(resolve_size(10.0, SizeUnit::Kb).unwrap(), 10_240);
        assert_eq!(resolve_size(0.5, SizeUnit::Mb).unwrap(), 524_288);
        assert_eq!(resolve_size(2.0, SizeUnit::Gb).unwrap(), 2_147_483_648);
        assert!(matches!(
            resolve_size(-1.0, SizeUnit::Kb),
            Err(SynthError::BadSize(_))
        ));
    }

    #[test]
    fn extension_appended_once() {
        assert_eq!(ensure_extension("probe", FileKind::Png), "probe.png");
        assert_eq!(ensure_extension("probe.png", FileKind::Png), "probe.png");
        assert_eq!(ensure_extension("PROBE.PNG", FileKind::Png), "PROBE.PNG");
    }

    #[test]
    fn dir_resolution_creates_nested_dirs() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b/c");
        let resolved = resolve_dir(nested.to_str().unwrap()).unwrap();
        assert_eq!(resolved, nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn existing_file_path_resolves_to_parent() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("already.bin");
        std::fs::write(&file, b"x").unwrap();
        let resolved = resolve_dir(file.to_str().unwrap()).unwrap();
        assert_eq!(resolved, root.path());
    }
}

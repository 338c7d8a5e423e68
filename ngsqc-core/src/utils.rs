use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;

use crate::errors::{NgsQcError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const READ_BUFFER_CAPACITY: usize = 65536;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// Compression is detected from the gzip magic number rather than the file
/// extension, so `reads.bed` holding gzip data is decoded too.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(|e| NgsQcError::io(label.as_str(), e))?;
    let mut buf_input = BufReader::with_capacity(READ_BUFFER_CAPACITY, file);

    let is_gzipped = {
        let peek = buf_input
            .fill_buf()
            .map_err(|e| NgsQcError::io(label.as_str(), e))?;
        peek.starts_with(&GZIP_MAGIC)
    };

    let reader: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(buf_input)),
        false => Box::new(buf_input),
    };

    Ok(BufReader::with_capacity(READ_BUFFER_CAPACITY, reader))
}

///
/// Fail with [NgsQcError::FileNotFound] unless `path` is an existing regular file.
///
pub fn ensure_file_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(NgsQcError::FileNotFound(path.display().to_string()))
    }
}

/// True for BED comment and header lines (`#...`, `track ...`, `browser ...`).
pub fn is_bed_header(line: &str) -> bool {
    if line.starts_with('#') {
        return true;
    }
    starts_with_ignore_case(line, "track") || starts_with_ignore_case(line, "browser")
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn read_all(path: &Path) -> String {
        let mut reader = get_dynamic_reader(path).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        out
    }

    #[rstest]
    fn test_plain_and_gzip_read_the_same() {
        let tempdir = tempfile::tempdir().unwrap();
        let data = b"chr1\t10\t20\tr1\t0\t+\n";

        let plain = tempdir.path().join("reads.bed");
        std::fs::write(&plain, data).unwrap();

        // gzip content without a .gz extension is still decoded
        let gzipped = tempdir.path().join("reads_gz.bed");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        std::fs::write(&gzipped, encoder.finish().unwrap()).unwrap();

        assert_eq!(read_all(&plain), read_all(&gzipped));
    }

    #[rstest]
    fn test_empty_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.bed");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(read_all(&path), "");
    }

    #[rstest]
    fn test_missing_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("missing.bed");
        assert!(matches!(
            get_dynamic_reader(&path),
            Err(NgsQcError::Io { .. })
        ));
        assert!(matches!(
            ensure_file_exists(&path),
            Err(NgsQcError::FileNotFound(_))
        ));
    }

    #[rstest]
    #[case("# comment", true)]
    #[case("track name=reads", true)]
    #[case("TRACK name=reads", true)]
    #[case("Browser position chr1:1-100", true)]
    #[case("chr1\t10\t20", false)]
    #[case("tr", false)]
    fn test_bed_header(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_bed_header(line), expected);
    }
}

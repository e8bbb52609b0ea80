//! Writes the clean addresses to a file, one per line.

use crate::config::OutputSettings;
use crate::errors::{export_error, CleanIpError};
use crate::measurement::Measurement;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export `records` to `destination`, returning how many lines were written.
///
/// Nothing happens when the destination is blank or there are no records.
/// Failing to create the file is an error; failing to write a single line or
/// to flush at the end is logged and the export carries on.
pub fn export(
    records: &[Measurement],
    destination: &Path,
) -> Result<usize, CleanIpError> {
    if OutputSettings::is_blank_path(destination) || records.is_empty() {
        return Ok(0);
    }

    let file =
        File::create(destination).map_err(|e| export_error(destination, e))?;
    let mut writer = BufWriter::new(file);

    let written = write_addresses(records, &mut writer);

    if let Err(e) = writer.flush() {
        warn!("Error flushing {}: {}", destination.display(), e);
    }

    info!(
        "Wrote {} clean IPs (one per line) to {}",
        written,
        destination.display()
    );

    Ok(written)
}

/// Write one address per line to `writer`, skipping lines that fail.
///
/// Returns the number of lines written successfully.
pub fn write_addresses<W: Write>(
    records: &[Measurement],
    writer: &mut W,
) -> usize {
    let mut written = 0;

    for record in records {
        match writeln!(writer, "{}", record.address()) {
            Ok(()) => written += 1,
            Err(e) => {
                warn!("Error writing {} to file: {}", record.address(), e)
            }
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::path::PathBuf;
    use std::time::Duration;

    fn records() -> Vec<Measurement> {
        vec![
            Measurement::new(
                IpAddr::V4(Ipv4Addr::new(104, 16, 1, 1)),
                4,
                4,
                Duration::from_millis(30),
            ),
            Measurement::new(
                IpAddr::V6(Ipv6Addr::new(
                    0x2606, 0x4700, 0, 0, 0, 0, 0, 0x1111,
                )),
                4,
                3,
                Duration::from_millis(45),
            )
            .with_download_speed(2_000_000.0),
            Measurement::new(
                IpAddr::V4(Ipv4Addr::new(104, 16, 1, 3)),
                0,
                0,
                Duration::ZERO,
            ),
        ]
    }

    /// Refuses any write that carries an IPv6 separator.
    struct NoColonWriter {
        buffer: Vec<u8>,
    }

    impl Write for NoColonWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.contains(&b':') {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_export_writes_one_address_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.txt");

        let written = export(&records(), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert_eq!(written, 3);
        assert_eq!(contents, "104.16.1.1\n2606:4700::1111\n104.16.1.3\n");
    }

    #[test]
    fn test_export_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        std::fs::write(&path, "IP,Sent,Received\nstale\nstale\nstale\n")
            .unwrap();

        export(&records()[..1], &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "104.16.1.1\n");
    }

    #[test]
    fn test_export_empty_records_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.txt");

        assert_eq!(export(&[], &path).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_export_blank_destination_is_noop() {
        assert_eq!(export(&records(), &PathBuf::from("")).unwrap(), 0);
        assert_eq!(export(&records(), &PathBuf::from(" ")).unwrap(), 0);
        assert!(!Path::new(" ").exists());
    }

    #[test]
    fn test_export_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("clean.txt");

        let err = export(&records(), &path).unwrap_err();
        assert_eq!(err.kind, crate::errors::ErrorKind::Export);
        assert!(err.message.contains("clean.txt"));
    }

    #[test]
    fn test_write_addresses_skips_failed_lines() {
        let mut writer = NoColonWriter { buffer: Vec::new() };

        let written = write_addresses(&records(), &mut writer);

        assert_eq!(written, 2);
        let text = String::from_utf8(writer.buffer).unwrap();
        assert!(text.starts_with("104.16.1.1\n"));
        assert!(text.ends_with("104.16.1.3\n"));
    }
}

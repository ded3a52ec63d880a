//! Platform printer discovery
//!
//! Exactly one enumerator runs per host: the spooler on Windows, CUPS
//! everywhere else, with a raw `/dev` scan when a host has no CUPS at all.
//! Discovery never opens a data channel to the hardware; it only reads what
//! the platform already knows.

use crate::error::{PrinterError, PrinterResult};
use crate::types::{ConnectionKind, OnlineState, PrinterDescriptor};
use tracing::instrument;

/// Status keywords that mark a CUPS queue as unreachable
pub(crate) const FAILURE_KEYWORDS: &[&str] = &[
    "error",
    "stopped",
    "offline",
    "no contact",
    "lost communication",
];

/// Name/driver keywords for likely thermal receipt hardware
const THERMAL_KEYWORDS: &[&str] = &[
    "thermal", "receipt", "pos", "text", "dot matrix", "impact", "epson", "star", "citizen",
    "zebra", "bixolon", "rongta", "xprinter", "escpos",
];

/// Port/URI fragments that usually mean directly attached hardware
const THERMAL_PORT_HINTS: &[&str] = &["usb", "com", "serial"];

/// Enumerate the printers this host knows about
#[instrument]
pub async fn discover() -> PrinterResult<Vec<PrinterDescriptor>> {
    #[cfg(windows)]
    {
        spooler::enumerate().await
    }
    #[cfg(not(windows))]
    {
        cups::enumerate().await
    }
}

/// Keep only descriptors that look like thermal/receipt hardware
pub fn filter_thermal(printers: Vec<PrinterDescriptor>) -> Vec<PrinterDescriptor> {
    printers.into_iter().filter(looks_thermal).collect()
}

fn looks_thermal(printer: &PrinterDescriptor) -> bool {
    let mut haystack = printer.name.to_lowercase();
    for value in printer.raw_metadata.values() {
        haystack.push(' ');
        haystack.push_str(&value.to_lowercase());
    }
    if THERMAL_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return true;
    }

    // Port hints only apply to the connection fields, not the whole record
    let mut ports: Vec<String> = Vec::new();
    if let Some(address) = &printer.address {
        ports.push(address.to_lowercase());
    }
    for key in ["port", "device-uri"] {
        if let Some(value) = printer.raw_metadata.get(key) {
            ports.push(value.to_lowercase());
        }
    }
    ports
        .iter()
        .any(|p| THERMAL_PORT_HINTS.iter().any(|h| p.contains(h)))
}

#[cfg(not(windows))]
mod cups {
    use super::*;
    use tokio::process::Command;
    use tracing::{debug, warn};

    /// Map a CUPS status line to a connectivity state
    fn online_from_status(status: &str) -> OnlineState {
        let status = status.to_lowercase();
        if FAILURE_KEYWORDS.iter().any(|k| status.contains(k)) {
            OnlineState::Offline
        } else if status.contains("idle") || status.contains("printing") {
            OnlineState::Online
        } else {
            OnlineState::Unknown
        }
    }

    #[instrument]
    pub async fn enumerate() -> PrinterResult<Vec<PrinterDescriptor>> {
        let output = match Command::new("lpstat").args(["-p", "-d"]).output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("lpstat not installed, scanning raw device nodes");
                return Ok(super::raw_scan::enumerate());
            }
            Err(e) => {
                return Err(PrinterError::Discovery(format!("failed to run lpstat: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Some CUPS versions exit non-zero when no queue exists at all
            if stderr.to_lowercase().contains("no destinations") {
                return Ok(Vec::new());
            }
            return Err(PrinterError::Discovery(format!(
                "lpstat failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut printers = parse_lpstat(&stdout);
        debug!(count = printers.len(), "parsed lpstat output");

        for printer in &mut printers {
            if let Err(e) = enrich(printer).await {
                warn!(printer = %printer.name, error = %e, "lpoptions detail unavailable");
            }
        }
        Ok(printers)
    }

    /// Parse `lpstat -p -d` output: one `printer NAME status…` line per
    /// queue plus an optional `system default destination:` line.
    pub(super) fn parse_lpstat(stdout: &str) -> Vec<PrinterDescriptor> {
        let mut printers = Vec::new();
        let mut default_name: Option<String> = None;

        for line in stdout.lines() {
            if let Some(rest) = line.strip_prefix("printer ") {
                let Some(name) = rest.split_whitespace().next() else {
                    continue;
                };
                let status_text = rest[name.len()..].trim();
                let mut descriptor = PrinterDescriptor::new(name, ConnectionKind::Cups);
                descriptor.online = online_from_status(status_text);
                if !status_text.is_empty() {
                    descriptor
                        .raw_metadata
                        .insert("status".to_string(), status_text.to_string());
                }
                printers.push(descriptor);
            } else if let Some(rest) = line.strip_prefix("system default destination:") {
                default_name = Some(rest.trim().to_string());
            }
        }

        if let Some(default_name) = default_name {
            for printer in &mut printers {
                if printer.name == default_name {
                    printer.is_default = true;
                }
            }
        }
        printers
    }

    /// Pull per-queue detail from `lpoptions -p NAME` into the metadata map
    async fn enrich(printer: &mut PrinterDescriptor) -> std::io::Result<()> {
        let output = Command::new("lpoptions")
            .args(["-p", &printer.name])
            .output()
            .await?;
        if !output.status.success() {
            return Ok(());
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        for (key, value) in parse_lpoptions(&stdout) {
            if key == "device-uri" {
                printer.address = Some(value.clone());
            }
            printer.raw_metadata.insert(key, value);
        }
        Ok(())
    }

    /// `lpoptions` prints space-separated `key=value` tokens; values with
    /// embedded spaces get truncated at the first space, matching what the
    /// utility itself emits unquoted.
    pub(super) fn parse_lpoptions(stdout: &str) -> impl Iterator<Item = (String, String)> + '_ {
        stdout.split_whitespace().filter_map(|token| {
            token
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const LPSTAT_SAMPLE: &str = "\
printer EPSON_TM_T20 is idle.  enabled since Mon 01 Jan 2024 10:00:00 AM
printer Back_Office disabled since Mon 01 Jan 2024 09:00:00 AM
printer Kitchen is idle.  enabled since Mon 01 Jan 2024 10:00:00 AM
\tUnable to locate printer, offline.
system default destination: Kitchen
";

        #[test]
        fn test_parse_lpstat_names_and_default() {
            let printers = parse_lpstat(LPSTAT_SAMPLE);
            assert_eq!(printers.len(), 3);
            assert_eq!(printers[0].name, "EPSON_TM_T20");
            assert!(!printers[0].is_default);
            assert!(printers[2].is_default);
            assert!(printers.iter().all(|p| p.kind == ConnectionKind::Cups));
        }

        #[test]
        fn test_parse_lpstat_online_states() {
            let printers = parse_lpstat(LPSTAT_SAMPLE);
            assert_eq!(printers[0].online, OnlineState::Online);
            // disabled is a readiness problem, not proof the device is gone
            assert_eq!(printers[1].online, OnlineState::Unknown);
        }

        #[test]
        fn test_parse_lpstat_failure_keywords() {
            for status in [
                "printer P1 is idle.  stopped with status reasons",
                "printer P1 no contact with printer",
                "printer P1 error: lost communication with device",
            ] {
                let printers = parse_lpstat(status);
                assert_eq!(printers[0].online, OnlineState::Offline, "{status}");
            }
        }

        #[test]
        fn test_parse_lpstat_empty() {
            assert!(parse_lpstat("").is_empty());
            assert!(parse_lpstat("system default destination: Ghost\n").is_empty());
        }

        #[test]
        fn test_parse_lpstat_status_metadata() {
            let printers = parse_lpstat("printer P1 is idle.  enabled since today\n");
            assert_eq!(
                printers[0].raw_metadata.get("status").map(String::as_str),
                Some("is idle.  enabled since today")
            );
        }

        #[test]
        fn test_parse_lpoptions_pairs() {
            let pairs: std::collections::BTreeMap<_, _> =
                parse_lpoptions("copies=1 device-uri=usb://EPSON/TM-T20 job-sheets=none,none")
                    .collect();
            assert_eq!(
                pairs.get("device-uri").map(String::as_str),
                Some("usb://EPSON/TM-T20")
            );
            assert_eq!(pairs.get("copies").map(String::as_str), Some("1"));
            assert!(!pairs.contains_key("no-equals-token"));
        }

        #[test]
        fn test_online_from_status_mapping() {
            assert_eq!(online_from_status("is idle.  enabled since"), OnlineState::Online);
            assert_eq!(online_from_status("now printing job 17"), OnlineState::Online);
            assert_eq!(online_from_status("stopped with reasons"), OnlineState::Offline);
            assert_eq!(online_from_status("disabled since yesterday"), OnlineState::Unknown);
            assert_eq!(online_from_status(""), OnlineState::Unknown);
        }
    }
}

#[cfg(not(windows))]
mod raw_scan {
    use super::*;
    use std::os::unix::fs::FileTypeExt;
    use tracing::debug;

    /// Device node patterns USB and serial printers appear under
    const DEVICE_PATTERNS: &[(&str, &str)] = &[("/dev/usb", "lp"), ("/dev", "ttyUSB"), ("/dev", "ttyS")];

    /// Last-resort enumeration for hosts without CUPS: character devices
    /// under the usual printer/serial node names.
    pub(super) fn enumerate() -> Vec<PrinterDescriptor> {
        let mut printers = Vec::new();
        for (dir, prefix) in DEVICE_PATTERNS {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let file_name = entry.file_name();
                let Some(file_name) = file_name.to_str() else {
                    continue;
                };
                let Some(suffix) = file_name.strip_prefix(prefix) else {
                    continue;
                };
                if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                    continue;
                }
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                if !file_type.is_char_device() {
                    continue;
                }
                printers.push(PrinterDescriptor::raw_device(format!("{dir}/{file_name}")));
            }
        }
        printers.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = printers.len(), "raw device scan complete");
        printers
    }
}

#[cfg(windows)]
mod spooler {
    use super::*;
    use tracing::debug;
    use windows::core::PWSTR;
    use windows::Win32::Graphics::Printing::{
        EnumPrintersW, GetDefaultPrinterW, PRINTER_ATTRIBUTE_WORK_OFFLINE,
        PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_INFO_5W,
    };

    #[instrument]
    pub async fn enumerate() -> PrinterResult<Vec<PrinterDescriptor>> {
        tokio::task::spawn_blocking(enumerate_blocking)
            .await
            .map_err(|e| PrinterError::Discovery(format!("enumeration task failed: {e}")))?
    }

    fn enumerate_blocking() -> PrinterResult<Vec<PrinterDescriptor>> {
        let default_name = default_printer();
        let mut printers = Vec::new();

        unsafe {
            let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
            let mut needed: u32 = 0;
            let mut returned: u32 = 0;

            let _ = EnumPrintersW(flags, None, 5, None, &mut needed, &mut returned);
            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                5,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|e| PrinterError::Discovery(format!("EnumPrintersW failed: {e}")))?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_5W;
            let slice = std::slice::from_raw_parts(ptr, returned as usize);

            for info in slice {
                if info.pPrinterName.is_null() {
                    continue;
                }
                let name = PWSTR(info.pPrinterName.0).to_string().unwrap_or_default();
                let port = if info.pPortName.is_null() {
                    String::new()
                } else {
                    PWSTR(info.pPortName.0).to_string().unwrap_or_default()
                };
                if is_virtual_port(&port) {
                    continue;
                }

                let mut descriptor = PrinterDescriptor::new(&name, ConnectionKind::Spooler);
                descriptor.online = if info.Attributes & PRINTER_ATTRIBUTE_WORK_OFFLINE != 0 {
                    OnlineState::Offline
                } else {
                    OnlineState::Online
                };
                descriptor.is_default = default_name.as_deref() == Some(name.as_str());
                if !port.is_empty() {
                    descriptor.raw_metadata.insert("port".to_string(), port);
                }
                printers.push(descriptor);
            }
        }

        debug!(count = printers.len(), "spooler enumeration complete");
        Ok(printers)
    }

    /// Ports backing virtual destinations (PDF writers, XPS, OneNote)
    fn is_virtual_port(port: &str) -> bool {
        let p = port.to_lowercase();
        p == "file:"
            || p == "portprompt:"
            || p == "xpsport:"
            || p == "nul:"
            || p.starts_with("onenote")
            || p.starts_with("wfsport:")
    }

    fn default_printer() -> Option<String> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);
            if needed == 0 {
                return None;
            }
            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);
            if !ok.as_bool() {
                return None;
            }
            PWSTR(buf.as_mut_ptr()).to_string().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> PrinterDescriptor {
        PrinterDescriptor::new(name, ConnectionKind::Cups)
    }

    #[test]
    fn test_thermal_filter_by_name() {
        let printers = vec![
            descriptor("EPSON TM-T20 Receipt"),
            descriptor("Office LaserJet"),
            descriptor("Star TSP100"),
        ];
        let thermal = filter_thermal(printers);
        let names: Vec<_> = thermal.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["EPSON TM-T20 Receipt", "Star TSP100"]);
    }

    #[test]
    fn test_thermal_filter_by_port_hint() {
        let mut usb = descriptor("Generic Queue");
        usb.raw_metadata
            .insert("device-uri".into(), "usb://Unknown/Printer".into());
        let mut plain = descriptor("Generic Queue 2");
        plain
            .raw_metadata
            .insert("device-uri".into(), "ipp://10.0.0.2/ipp/print".into());

        let thermal = filter_thermal(vec![usb, plain]);
        assert_eq!(thermal.len(), 1);
        assert_eq!(thermal[0].name, "Generic Queue");
    }

    #[test]
    fn test_thermal_filter_ignores_name_for_port_hints() {
        // "com" in the printer name alone must not qualify it
        let thermal = filter_thermal(vec![descriptor("accounting-printer.company")]);
        assert!(thermal.is_empty());
    }
}

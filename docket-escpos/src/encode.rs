//! Command encoder: one logical print operation in, one tagged segment out
//!
//! Every function here is pure. Payloads are validated before a single byte
//! is produced, so a returned segment is always safe to transmit as-is.

use crate::codepage::{Charset, CodePage};
use crate::command;
use crate::error::{EncodeError, EncodeResult};
use crate::segment::{CommandSegment, SegmentKind};
use serde::{Deserialize, Serialize};

/// Default drawer pulse: 50 ms on
pub const DRAWER_ON_MS: u16 = 50;
/// Default drawer pulse: 500 ms off
pub const DRAWER_OFF_MS: u16 = 500;
/// Drawer pulse bounds in milliseconds (ESC p times are 2 ms units in one byte)
pub const DRAWER_PULSE_RANGE_MS: std::ops::RangeInclusive<u16> = 2..=510;

/// Maximum QR payload in bytes (model 2, version 40, binary mode)
pub const QR_MAX_DATA: usize = 2953;

/// Text style and alignment toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    BoldOn,
    BoldOff,
    UnderlineOn,
    UnderlineOff,
    ItalicOn,
    ItalicOff,
    DoubleHeight,
    DoubleWidth,
    DoubleSize,
    NormalSize,
    AlignLeft,
    AlignCenter,
    AlignRight,
}

impl TextStyle {
    fn bytes(&self) -> &'static [u8] {
        match self {
            TextStyle::BoldOn => &command::BOLD_ON,
            TextStyle::BoldOff => &command::BOLD_OFF,
            TextStyle::UnderlineOn => &command::UNDERLINE_ON,
            TextStyle::UnderlineOff => &command::UNDERLINE_OFF,
            TextStyle::ItalicOn => &command::ITALIC_ON,
            TextStyle::ItalicOff => &command::ITALIC_OFF,
            TextStyle::DoubleHeight => &command::DOUBLE_HEIGHT,
            TextStyle::DoubleWidth => &command::DOUBLE_WIDTH,
            TextStyle::DoubleSize => &command::DOUBLE_SIZE,
            TextStyle::NormalSize => &command::NORMAL_SIZE,
            TextStyle::AlignLeft => &command::ALIGN_LEFT,
            TextStyle::AlignCenter => &command::ALIGN_CENTER,
            TextStyle::AlignRight => &command::ALIGN_RIGHT,
        }
    }
}

/// Paper cut variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutMode {
    /// Cut at the current position
    Full,
    /// Leave a small connection
    Partial,
    /// Feed n lines to the cut position, then cut. Lets the printer manage
    /// cutter-to-head distance, wasting less top margin than feed + cut.
    FeedAndCut(u8),
}

/// Barcode symbologies (GS k type byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Itf,
    Codabar,
    Code93,
    Code128,
}

impl Symbology {
    fn type_byte(&self) -> u8 {
        match self {
            Symbology::UpcA => 0,
            Symbology::UpcE => 1,
            Symbology::Ean13 => 2,
            Symbology::Ean8 => 3,
            Symbology::Code39 => 4,
            Symbology::Itf => 5,
            Symbology::Codabar => 6,
            Symbology::Code93 => 7,
            Symbology::Code128 => 8,
        }
    }

    /// Symbology name as printed in validation messages
    pub fn name(&self) -> &'static str {
        match self {
            Symbology::UpcA => "UPC-A",
            Symbology::UpcE => "UPC-E",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::Code39 => "CODE39",
            Symbology::Itf => "ITF",
            Symbology::Codabar => "CODABAR",
            Symbology::Code93 => "CODE93",
            Symbology::Code128 => "CODE128",
        }
    }
}

/// Barcode rendering knobs
///
/// Height and width are device-tuning values and are clamped to the ranges
/// the firmware accepts (1-255 dots, module width 2-6); payload data is
/// validated, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeOptions {
    /// Bar height in dots
    pub height: u8,
    /// Module width
    pub width: u8,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            height: 162,
            width: 3,
        }
    }
}

/// QR error correction levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrEcLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl QrEcLevel {
    fn level_byte(&self) -> u8 {
        match self {
            QrEcLevel::L => 0x30,
            QrEcLevel::M => 0x31,
            QrEcLevel::Q => 0x32,
            QrEcLevel::H => 0x33,
        }
    }
}

/// Cash drawer connector pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerPin {
    Pin2,
    Pin5,
}

impl DrawerPin {
    fn pulse_byte(&self) -> u8 {
        match self {
            DrawerPin::Pin2 => 0x00,
            DrawerPin::Pin5 => 0x01,
        }
    }
}

// === Text ===

/// Encode a text payload
///
/// When `bold` is set the payload is wrapped in a bold-on prefix and a
/// bold-off suffix, so a segment never leaks style state into the next one.
/// Fails when a character has no representation in `code_page`.
pub fn text(text: &str, bold: bool, code_page: CodePage) -> EncodeResult<CommandSegment> {
    let payload = code_page.encode(text)?;
    let mut bytes = Vec::with_capacity(payload.len() + 6);
    if bold {
        bytes.extend_from_slice(&command::BOLD_ON);
    }
    bytes.extend_from_slice(&payload);
    if bold {
        bytes.extend_from_slice(&command::BOLD_OFF);
    }
    Ok(CommandSegment::new(SegmentKind::Text, bytes))
}

/// Encode a text payload followed by a line feed
pub fn line(s: &str, bold: bool, code_page: CodePage) -> EncodeResult<CommandSegment> {
    let payload = code_page.encode(s)?;
    let mut bytes = Vec::with_capacity(payload.len() + 7);
    if bold {
        bytes.extend_from_slice(&command::BOLD_ON);
    }
    bytes.extend_from_slice(&payload);
    if bold {
        bytes.extend_from_slice(&command::BOLD_OFF);
    }
    bytes.push(command::LF);
    Ok(CommandSegment::new(SegmentKind::Text, bytes))
}

// === Styles and Control ===

/// A single style or alignment toggle
pub fn style(style: TextStyle) -> CommandSegment {
    CommandSegment::new(SegmentKind::Style, style.bytes().to_vec())
}

/// Initialize the printer (ESC @): clears styles and line spacing
pub fn init() -> CommandSegment {
    CommandSegment::new(SegmentKind::Style, command::INIT.to_vec())
}

/// Feed n lines: empty for 0, a bare LF for 1, `ESC d n` otherwise
pub fn feed(lines: u8) -> CommandSegment {
    let bytes = match lines {
        0 => Vec::new(),
        1 => vec![command::LF],
        n => vec![command::FEED_LINES[0], command::FEED_LINES[1], n],
    };
    CommandSegment::new(SegmentKind::Style, bytes)
}

/// Set line spacing in motion units, or reset to the firmware default
pub fn line_spacing(spacing: Option<u8>) -> CommandSegment {
    let bytes = match spacing {
        Some(n) => vec![command::SET_LINE_SPACING[0], command::SET_LINE_SPACING[1], n],
        None => command::DEFAULT_LINE_SPACING.to_vec(),
    };
    CommandSegment::new(SegmentKind::Style, bytes)
}

/// Select the firmware code page (ESC t n)
pub fn select_code_page(code_page: CodePage) -> CommandSegment {
    CommandSegment::new(SegmentKind::Style, code_page.select().to_vec())
}

/// Select the international charset (ESC R n)
pub fn select_charset(charset: Charset) -> CommandSegment {
    CommandSegment::new(SegmentKind::Style, charset.select().to_vec())
}

/// Cut the paper
pub fn cut(mode: CutMode) -> CommandSegment {
    let bytes = match mode {
        CutMode::Full => command::CUT_FULL.to_vec(),
        CutMode::Partial => command::CUT_PARTIAL.to_vec(),
        CutMode::FeedAndCut(n) => vec![command::CUT_FEED[0], command::CUT_FEED[1], command::CUT_FEED[2], n],
    };
    CommandSegment::new(SegmentKind::Cut, bytes)
}

// === Barcode ===

/// Encode a barcode: `GS h height, GS w width, GS k type data NUL`
///
/// `data` must satisfy the symbology's character set and length rules,
/// otherwise the operation fails with a validation error naming both.
pub fn barcode(data: &str, symbology: Symbology, opts: BarcodeOptions) -> EncodeResult<CommandSegment> {
    validate_barcode(data, symbology)?;

    let mut bytes = Vec::with_capacity(data.len() + 10);
    bytes.extend_from_slice(&command::BARCODE_HEIGHT);
    bytes.push(opts.height.max(1));
    bytes.extend_from_slice(&command::BARCODE_WIDTH);
    bytes.push(opts.width.clamp(2, 6));
    bytes.extend_from_slice(&command::BARCODE_PRINT);
    bytes.push(symbology.type_byte());
    bytes.extend_from_slice(data.as_bytes());
    bytes.push(command::NUL);
    Ok(CommandSegment::new(SegmentKind::Barcode, bytes))
}

fn validate_barcode(data: &str, symbology: Symbology) -> EncodeResult<()> {
    let fail = |constraint: &str| {
        Err(EncodeError::Validation(format!(
            "{} {}, got {:?}",
            symbology.name(),
            constraint,
            data
        )))
    };
    let digits_only = data.bytes().all(|b| b.is_ascii_digit());

    match symbology {
        Symbology::UpcA if !digits_only || !matches!(data.len(), 11 | 12) => {
            fail("requires 11 or 12 numeric digits")
        }
        Symbology::UpcE if !digits_only || !matches!(data.len(), 6..=8) => {
            fail("requires 6 to 8 numeric digits")
        }
        Symbology::Ean13 if !digits_only || !matches!(data.len(), 12 | 13) => {
            fail("requires 12 or 13 numeric digits")
        }
        Symbology::Ean8 if !digits_only || !matches!(data.len(), 7 | 8) => {
            fail("requires 7 or 8 numeric digits")
        }
        Symbology::Itf if !digits_only || data.is_empty() || data.len() % 2 != 0 || data.len() > 254 => {
            fail("requires an even number of digits (2-254)")
        }
        Symbology::Code39
            if data.is_empty()
                || data.len() > 255
                || !data
                    .chars()
                    .all(|c| matches!(c, '0'..='9' | 'A'..='Z' | ' ' | '$' | '%' | '+' | '-' | '.' | '/')) =>
        {
            fail("accepts 1-255 characters from 0-9 A-Z space $ % + - . /")
        }
        Symbology::Codabar
            if data.is_empty()
                || data.len() > 255
                || !data
                    .chars()
                    .all(|c| matches!(c, '0'..='9' | 'A'..='D' | '$' | '+' | '-' | '.' | '/' | ':')) =>
        {
            fail("accepts 1-255 characters from 0-9 A-D $ + - . / :")
        }
        Symbology::Code93 | Symbology::Code128
            if data.is_empty() || data.len() > 255 || !data.chars().all(|c| matches!(c, ' '..='~')) =>
        {
            fail("accepts 1-255 printable ASCII characters")
        }
        _ => Ok(()),
    }
}

// === QR Code ===

/// Encode a QR code (model 2)
///
/// `module_size` is the dot size of one module (1-16). Payload must be
/// 1-2953 bytes, the binary capacity of a version 40 symbol.
pub fn qr(data: &str, level: QrEcLevel, module_size: u8) -> EncodeResult<CommandSegment> {
    if !(1..=16).contains(&module_size) {
        return Err(EncodeError::Validation(format!(
            "QR module size must be 1-16, got {module_size}"
        )));
    }
    let payload = data.as_bytes();
    if payload.is_empty() || payload.len() > QR_MAX_DATA {
        return Err(EncodeError::Validation(format!(
            "QR payload must be 1-{} bytes, got {}",
            QR_MAX_DATA,
            payload.len()
        )));
    }

    let mut bytes = Vec::with_capacity(payload.len() + 40);

    // Function 165: select model 2
    bytes.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);

    // Function 167: module size
    bytes.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, module_size]);

    // Function 169: error correction level
    bytes.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, level.level_byte()]);

    // Function 180: store data (length counts the 1P0 header)
    let len = payload.len() + 3;
    let p_l = (len & 0xFF) as u8;
    let p_h = ((len >> 8) & 0xFF) as u8;
    bytes.extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
    bytes.extend_from_slice(payload);

    // Function 181: print
    bytes.extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

    Ok(CommandSegment::new(SegmentKind::Qr, bytes))
}

// === Cash Drawer ===

/// Encode a drawer kick pulse (`ESC p m t1 t2`)
///
/// Times are rounded down to the 2 ms units the protocol carries. Values
/// outside 2-510 ms are rejected: longer pulses can overheat the drawer
/// solenoid.
pub fn drawer_pulse(pin: DrawerPin, on_ms: u16, off_ms: u16) -> EncodeResult<CommandSegment> {
    for (label, ms) in [("on", on_ms), ("off", off_ms)] {
        if !DRAWER_PULSE_RANGE_MS.contains(&ms) {
            return Err(EncodeError::Validation(format!(
                "drawer pulse {label} time must be 2-510 ms, got {ms}"
            )));
        }
    }
    let bytes = vec![
        command::DRAWER_PULSE[0],
        command::DRAWER_PULSE[1],
        pin.pulse_byte(),
        (on_ms / 2) as u8,
        (off_ms / 2) as u8,
    ];
    Ok(CommandSegment::new(SegmentKind::CashDrawer, bytes))
}

// === Raw ===

/// Raw byte passthrough, no validation
///
/// This is the escape hatch for commands the encoder does not model. The
/// bytes go to the device exactly as given: a malformed sequence can leave
/// the printer in an undefined state, eat following bytes as operands, or
/// trigger hardware actions. The caller owns that risk.
pub fn raw(bytes: &[u8]) -> CommandSegment {
    CommandSegment::new(SegmentKind::Raw, bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_plain() {
        let seg = text("Hello", false, CodePage::Cp437).unwrap();
        assert_eq!(seg.kind(), SegmentKind::Text);
        assert_eq!(seg.bytes(), b"Hello");
    }

    #[test]
    fn test_text_bold_wraps_payload() {
        let seg = text("Hi", true, CodePage::Cp437).unwrap();
        let mut expected = vec![0x1B, 0x45, 0x01];
        expected.extend_from_slice(b"Hi");
        expected.extend_from_slice(&[0x1B, 0x45, 0x00]);
        assert_eq!(seg.bytes(), expected);
        // The reset suffix is always the trailing sequence
        assert!(seg.bytes().ends_with(&[0x1B, 0x45, 0x00]));
    }

    #[test]
    fn test_text_deterministic() {
        let a = text("Order #42", true, CodePage::Cp858).unwrap();
        let b = text("Order #42", true, CodePage::Cp858).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_appends_lf() {
        let seg = line("abc", false, CodePage::Cp437).unwrap();
        assert_eq!(seg.bytes(), b"abc\n");
        let bold = line("abc", true, CodePage::Cp437).unwrap();
        assert!(bold.bytes().ends_with(&[0x1B, 0x45, 0x00, 0x0A]));
    }

    #[test]
    fn test_style_segments() {
        assert_eq!(style(TextStyle::BoldOn).bytes(), [0x1B, 0x45, 0x01]);
        assert_eq!(style(TextStyle::UnderlineOff).bytes(), [0x1B, 0x2D, 0x00]);
        assert_eq!(style(TextStyle::DoubleSize).bytes(), [0x1B, 0x21, 0x30]);
        assert_eq!(style(TextStyle::AlignRight).bytes(), [0x1B, 0x61, 0x02]);
        assert_eq!(style(TextStyle::AlignLeft).kind(), SegmentKind::Style);
        assert_eq!(init().bytes(), [0x1B, 0x40]);
    }

    #[test]
    fn test_feed_shapes() {
        assert!(feed(0).bytes().is_empty());
        assert_eq!(feed(1).bytes(), [0x0A]);
        assert_eq!(feed(3).bytes(), [0x1B, 0x64, 0x03]);
        assert_eq!(feed(255).bytes(), [0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing(Some(30)).bytes(), [0x1B, 0x33, 30]);
        assert_eq!(line_spacing(None).bytes(), [0x1B, 0x32]);
    }

    #[test]
    fn test_cut_modes() {
        assert_eq!(cut(CutMode::Full).bytes(), [0x1D, 0x56, 0x00]);
        assert_eq!(cut(CutMode::Partial).bytes(), [0x1D, 0x56, 0x01]);
        assert_eq!(cut(CutMode::FeedAndCut(4)).bytes(), [0x1D, 0x56, 0x42, 0x04]);
        assert_eq!(cut(CutMode::Full).kind(), SegmentKind::Cut);
    }

    #[test]
    fn test_barcode_bytes() {
        let seg = barcode("4006381333931", Symbology::Ean13, BarcodeOptions::default()).unwrap();
        let mut expected = vec![0x1D, 0x68, 162, 0x1D, 0x77, 3, 0x1D, 0x6B, 2];
        expected.extend_from_slice(b"4006381333931");
        expected.push(0x00);
        assert_eq!(seg.kind(), SegmentKind::Barcode);
        assert_eq!(seg.bytes(), expected);
    }

    #[test]
    fn test_barcode_options_clamped() {
        let opts = BarcodeOptions { height: 0, width: 9 };
        let seg = barcode("12345678", Symbology::Code128, opts).unwrap();
        // height clamps up to 1, width down to 6
        assert_eq!(seg.bytes()[2], 1);
        assert_eq!(seg.bytes()[5], 6);
    }

    #[test]
    fn test_ean13_rejects_bad_lengths_and_digits() {
        for data in ["12345", "12345678901234", "40063813339AB", ""] {
            let err = barcode(data, Symbology::Ean13, BarcodeOptions::default()).unwrap_err();
            match err {
                EncodeError::Validation(msg) => assert!(msg.contains("EAN13"), "{msg}"),
                other => panic!("expected Validation, got {other:?}"),
            }
        }
        // 12 digits (without check digit) and 13 digits both pass
        assert!(barcode("400638133393", Symbology::Ean13, BarcodeOptions::default()).is_ok());
        assert!(barcode("4006381333931", Symbology::Ean13, BarcodeOptions::default()).is_ok());
    }

    #[test]
    fn test_symbology_rules() {
        let opts = BarcodeOptions::default();
        assert!(barcode("01234565", Symbology::Ean8, opts).is_ok());
        assert!(barcode("0123456", Symbology::Ean8, opts).is_ok());
        assert!(barcode("012345", Symbology::Ean8, opts).is_err());

        assert!(barcode("CODE-39 TEST", Symbology::Code39, opts).is_ok());
        assert!(barcode("lowercase", Symbology::Code39, opts).is_err());

        assert!(barcode("1234", Symbology::Itf, opts).is_ok());
        assert!(barcode("123", Symbology::Itf, opts).is_err());

        assert!(barcode("A1234$D", Symbology::Codabar, opts).is_ok());
        assert!(barcode("A12E4", Symbology::Codabar, opts).is_err());

        assert!(barcode("Order #42", Symbology::Code128, opts).is_ok());
        assert!(barcode("tab\there", Symbology::Code128, opts).is_err());
    }

    #[test]
    fn test_qr_bytes() {
        let seg = qr("HELLO", QrEcLevel::M, 4).unwrap();
        let bytes = seg.bytes();
        assert_eq!(seg.kind(), SegmentKind::Qr);
        // Model select frame first
        assert_eq!(&bytes[..9], &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);
        // Module size frame
        assert_eq!(&bytes[9..17], &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 4]);
        // EC level M = 0x31
        assert_eq!(&bytes[17..25], &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);
        // Store: length = 5 + 3, little endian
        assert_eq!(&bytes[25..33], &[0x1D, 0x28, 0x6B, 0x08, 0x00, 0x31, 0x50, 0x30]);
        assert_eq!(&bytes[33..38], b"HELLO");
        // Print frame last
        assert_eq!(&bytes[38..], &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);
    }

    #[test]
    fn test_qr_store_length_two_bytes() {
        let data = "x".repeat(300);
        let seg = qr(&data, QrEcLevel::L, 3).unwrap();
        let bytes = seg.bytes();
        // 300 + 3 = 303 = 0x012F
        assert_eq!(bytes[25 + 3], 0x2F);
        assert_eq!(bytes[25 + 4], 0x01);
    }

    #[test]
    fn test_qr_bounds() {
        assert!(qr("", QrEcLevel::L, 4).is_err());
        assert!(qr("x", QrEcLevel::L, 0).is_err());
        assert!(qr("x", QrEcLevel::L, 17).is_err());
        assert!(qr(&"x".repeat(QR_MAX_DATA), QrEcLevel::L, 4).is_ok());
        assert!(qr(&"x".repeat(QR_MAX_DATA + 1), QrEcLevel::L, 4).is_err());
    }

    #[test]
    fn test_drawer_pulse_bytes() {
        let seg = drawer_pulse(DrawerPin::Pin2, DRAWER_ON_MS, DRAWER_OFF_MS).unwrap();
        assert_eq!(seg.kind(), SegmentKind::CashDrawer);
        assert_eq!(seg.bytes(), [0x1B, 0x70, 0x00, 25, 250]);
        let pin5 = drawer_pulse(DrawerPin::Pin5, 100, 300).unwrap();
        assert_eq!(pin5.bytes(), [0x1B, 0x70, 0x01, 50, 150]);
    }

    #[test]
    fn test_drawer_pulse_bounds() {
        assert!(drawer_pulse(DrawerPin::Pin2, 0, 500).is_err());
        assert!(drawer_pulse(DrawerPin::Pin2, 50, 511).is_err());
        assert!(drawer_pulse(DrawerPin::Pin2, 2, 510).is_ok());
    }

    #[test]
    fn test_raw_passthrough() {
        let seg = raw(&[0x1B, 0x21, 0x30, 0xFF]);
        assert_eq!(seg.kind(), SegmentKind::Raw);
        assert_eq!(seg.bytes(), [0x1B, 0x21, 0x30, 0xFF]);
    }

    #[test]
    fn test_boundary_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Symbology::Ean13).unwrap(), "\"ean13\"");
        assert_eq!(serde_json::to_string(&TextStyle::BoldOn).unwrap(), "\"bold_on\"");
        assert_eq!(
            serde_json::to_string(&CutMode::FeedAndCut(4)).unwrap(),
            "{\"feed_and_cut\":4}"
        );
        assert_eq!(serde_json::from_str::<QrEcLevel>("\"m\"").unwrap(), QrEcLevel::M);
    }
}

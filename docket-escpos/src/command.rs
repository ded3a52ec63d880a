//! ESC/POS command constants
//!
//! The fixed byte sequences of the protocol. Parameterized commands
//! (barcodes, QR codes, drawer pulses) are assembled in [`crate::encode`]
//! from the prefixes defined here.

/// Escape
pub const ESC: u8 = 0x1B;
/// Group separator (function prefix)
pub const GS: u8 = 0x1D;
/// File separator (multibyte-mode prefix)
pub const FS: u8 = 0x1C;
/// Data link escape (real-time command prefix)
pub const DLE: u8 = 0x10;
/// Line feed (print and advance one line)
pub const LF: u8 = 0x0A;
/// Carriage return
pub const CR: u8 = 0x0D;
/// Terminator for NUL-delimited payloads
pub const NUL: u8 = 0x00;

/// Initialize printer (ESC @): clears styles, resets line spacing
pub const INIT: [u8; 2] = [ESC, b'@'];

// === Text Style ===

pub const BOLD_ON: [u8; 3] = [ESC, b'E', 0x01];
pub const BOLD_OFF: [u8; 3] = [ESC, b'E', 0x00];
pub const UNDERLINE_ON: [u8; 3] = [ESC, b'-', 0x01];
pub const UNDERLINE_OFF: [u8; 3] = [ESC, b'-', 0x00];
pub const ITALIC_ON: [u8; 2] = [ESC, b'4'];
pub const ITALIC_OFF: [u8; 2] = [ESC, b'5'];

// ESC ! master select: bit 4 = double height, bit 5 = double width
pub const DOUBLE_HEIGHT: [u8; 3] = [ESC, b'!', 0x10];
pub const DOUBLE_WIDTH: [u8; 3] = [ESC, b'!', 0x20];
pub const DOUBLE_SIZE: [u8; 3] = [ESC, b'!', 0x30];
pub const NORMAL_SIZE: [u8; 3] = [ESC, b'!', 0x00];

// === Alignment ===

pub const ALIGN_LEFT: [u8; 3] = [ESC, b'a', 0x00];
pub const ALIGN_CENTER: [u8; 3] = [ESC, b'a', 0x01];
pub const ALIGN_RIGHT: [u8; 3] = [ESC, b'a', 0x02];

// === Line Spacing ===

/// Reset to the firmware default (1/6 inch)
pub const DEFAULT_LINE_SPACING: [u8; 2] = [ESC, b'2'];
/// ESC 3 n: spacing in motion units, n follows
pub const SET_LINE_SPACING: [u8; 2] = [ESC, b'3'];

// === Paper Feed and Cut ===

/// ESC d n: print and feed n lines, n follows
pub const FEED_LINES: [u8; 2] = [ESC, b'd'];

/// GS V 0: full cut at the current position
pub const CUT_FULL: [u8; 3] = [GS, b'V', 0x00];
/// GS V 1: partial cut (leave a small connection)
pub const CUT_PARTIAL: [u8; 3] = [GS, b'V', 0x01];
/// GS V 66 n: feed n lines to the cut position, then full cut; n follows
pub const CUT_FEED: [u8; 3] = [GS, b'V', 0x42];

// === Barcode ===

/// GS h n: barcode height in dots, n follows
pub const BARCODE_HEIGHT: [u8; 2] = [GS, b'h'];
/// GS w n: module width 2-6, n follows
pub const BARCODE_WIDTH: [u8; 2] = [GS, b'w'];
/// GS k m d1..dk NUL: symbology byte and NUL-terminated data follow
pub const BARCODE_PRINT: [u8; 2] = [GS, b'k'];

// === Cash Drawer ===

/// ESC p m t1 t2: pulse pin m for t1*2 ms on, t2*2 ms off; m t1 t2 follow
pub const DRAWER_PULSE: [u8; 2] = [ESC, b'p'];

// === Real-Time Status (DLE EOT n) ===

/// Transmit printer status
pub const STATUS_PRINTER: [u8; 3] = [DLE, 0x04, 0x01];
/// Transmit offline cause
pub const STATUS_OFFLINE_CAUSE: [u8; 3] = [DLE, 0x04, 0x02];
/// Transmit error cause
pub const STATUS_ERROR_CAUSE: [u8; 3] = [DLE, 0x04, 0x03];
/// Transmit paper sensor status
pub const STATUS_PAPER: [u8; 3] = [DLE, 0x04, 0x04];

/// Offline bit in the DLE EOT 1 reply byte
pub const STATUS_OFFLINE_BIT: u8 = 0x08;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_sequences() {
        assert_eq!(INIT, [0x1B, 0x40]);
        assert_eq!(BOLD_ON, [0x1B, 0x45, 0x01]);
        assert_eq!(BOLD_OFF, [0x1B, 0x45, 0x00]);
        assert_eq!(UNDERLINE_ON, [0x1B, 0x2D, 0x01]);
        assert_eq!(ALIGN_CENTER, [0x1B, 0x61, 0x01]);
        assert_eq!(DOUBLE_SIZE, [0x1B, 0x21, 0x30]);
        assert_eq!(CUT_FULL, [0x1D, 0x56, 0x00]);
        assert_eq!(CUT_PARTIAL, [0x1D, 0x56, 0x01]);
        assert_eq!(BARCODE_PRINT, [0x1D, 0x6B]);
        assert_eq!(STATUS_PRINTER, [0x10, 0x04, 0x01]);
    }
}

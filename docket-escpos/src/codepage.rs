//! Single-byte code pages for thermal printer firmware
//!
//! Receipt printers interpret text bytes through a selectable code page.
//! This module provides:
//! - The `ESC t n` / `ESC R n` selection sequences
//! - Unicode to single-byte conversion for the supported pages
//!
//! Conversion is strict: a character without a representation in the target
//! page fails the whole encode. Nothing is substituted or dropped, so the
//! same input always produces the same bytes.

use crate::command::ESC;
use crate::error::{EncodeError, EncodeResult};
use serde::{Deserialize, Serialize};

/// Code pages supported by common ESC/POS firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePage {
    /// IBM PC (box drawing, Greek); the usual firmware default
    #[default]
    Cp437,
    /// Latin-1 (Western European)
    Cp850,
    /// CP850 with the Euro sign at 0xD5
    Cp858,
    /// Windows-1252
    Win1252,
}

impl CodePage {
    /// The `ESC t n` sequence selecting this page
    pub fn select(&self) -> [u8; 3] {
        let n = match self {
            CodePage::Cp437 => 0x00,
            CodePage::Cp850 => 0x02,
            CodePage::Cp858 => 0x13,
            CodePage::Win1252 => 0x10,
        };
        [ESC, b't', n]
    }

    /// Page name as printed in error messages
    pub fn name(&self) -> &'static str {
        match self {
            CodePage::Cp437 => "CP437",
            CodePage::Cp850 => "CP850",
            CodePage::Cp858 => "CP858",
            CodePage::Win1252 => "Windows-1252",
        }
    }

    /// Encode a string into this page
    ///
    /// ASCII 0x20-0x7E passes through unchanged on every page; LF, CR and
    /// TAB are the only control characters allowed in payload text. High-half
    /// bytes come from the page table. Fails with [`EncodeError::Encoding`]
    /// on the first unrepresentable character.
    pub fn encode(&self, s: &str) -> EncodeResult<Vec<u8>> {
        let mut out = Vec::with_capacity(s.len());
        for c in s.chars() {
            out.push(self.encode_char(c)?);
        }
        Ok(out)
    }

    fn encode_char(&self, c: char) -> EncodeResult<u8> {
        match c {
            '\n' | '\r' | '\t' => Ok(c as u8),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => Err(EncodeError::Validation(format!(
                "control character U+{:04X} is not allowed in text payload",
                c as u32
            ))),
            c if (c as u32) < 0x7F => Ok(c as u8),
            c => self
                .encode_high(c)
                .ok_or_else(|| EncodeError::unencodable(c, self.name())),
        }
    }

    fn encode_high(&self, c: char) -> Option<u8> {
        match self {
            CodePage::Cp437 => table_lookup(&CP437_HIGH, c),
            CodePage::Cp850 => table_lookup(&CP850_HIGH, c),
            // CP858 is CP850 with the Euro sign replacing dotless i at 0xD5
            CodePage::Cp858 => match c {
                '€' => Some(0xD5),
                'ı' => None,
                c => table_lookup(&CP850_HIGH, c),
            },
            CodePage::Win1252 => {
                let mut buf = [0u8; 4];
                let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
                if had_errors { None } else { Some(bytes[0]) }
            }
        }
    }
}

/// International charsets (ESC R n) remapping a handful of ASCII positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    #[default]
    Usa,
    France,
    Germany,
    Uk,
}

impl Charset {
    /// The `ESC R n` sequence selecting this charset
    pub fn select(&self) -> [u8; 3] {
        let n = match self {
            Charset::Usa => 0x00,
            Charset::France => 0x01,
            Charset::Germany => 0x02,
            Charset::Uk => 0x03,
        };
        [ESC, b'R', n]
    }
}

fn table_lookup(table: &[char; 128], c: char) -> Option<u8> {
    table
        .iter()
        .position(|&t| t == c)
        .map(|i| (i as u8) | 0x80)
}

/// CP437 bytes 0x80-0xFF
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', // 0x80
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', // 0x90
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', // 0xA0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', // 0xB0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', // 0xC0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', // 0xD0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', // 0xE0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}', // 0xF0
];

/// CP850 bytes 0x80-0xFF
const CP850_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', // 0x80
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ', // 0x90
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '®', '¬', '½', '¼', '¡', '«', '»', // 0xA0
    '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À', '©', '╣', '║', '╗', '╝', '¢', '¥', '┐', // 0xB0
    '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã', '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤', // 0xC0
    'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î', 'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀', // 0xD0
    'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', 'µ', 'þ', 'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '¯', '´', // 0xE0
    '\u{AD}', '±', '‗', '¾', '¶', '§', '÷', '¸', '°', '¨', '·', '¹', '³', '²', '■', '\u{A0}', // 0xF0
];

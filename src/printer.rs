//! Renders raw packets for manual inspection.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::ValueEnum;

const RULER: &str = "                                1  1  1  1  1  1\n  0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5\n";
const SEPARATOR: &str = "+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+\n";
const ODD_PADDING: &str = "                        |\n";
const HEX_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// RFC 1035 style bit table, 16 bits per row
    #[default]
    Bits,
    /// Hex dump, 16 bytes per line
    Hex,
    /// Unpadded base64url, as used in DoH GET requests
    Base64,
}

pub fn render(buf: &[u8], format: OutputFormat) -> String {
    match format {
        OutputFormat::Bits => render_bits(buf),
        OutputFormat::Hex => render_hex(buf),
        OutputFormat::Base64 => render_base64(buf),
    }
}

pub fn print(buf: &[u8], format: OutputFormat) {
    print!("{}", render(buf, format));
}

fn bits(b: u8) -> [u8; 8] {
    let mut out = [0u8; 8];
    for (i, bit) in out.iter_mut().enumerate() {
        *bit = (b >> (7 - i)) & 1;
    }
    out
}

/// Two bytes per row, a separator under every second row.
pub fn render_bits(buf: &[u8]) -> String {
    let mut out = String::new();
    out.push_str(RULER);
    out.push_str(SEPARATOR);

    for (i, b) in buf.iter().enumerate() {
        let cells: Vec<String> = bits(*b).iter().map(|bit| bit.to_string()).collect();
        let cells = cells.join("  ");

        if i % 2 == 0 {
            let _ = write!(out, "| {} ", cells);
        } else {
            let _ = writeln!(out, " {} |", cells);
        }

        if i % 4 == 3 {
            out.push_str(SEPARATOR);
        }
    }

    if buf.len() % 2 == 1 {
        out.push_str(ODD_PADDING);
    }
    if buf.len() % 4 != 0 {
        out.push_str(SEPARATOR);
    }

    out
}

pub fn render_hex(buf: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in buf.chunks(HEX_WIDTH).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let _ = writeln!(out, "{:04x}: {}", row * HEX_WIDTH, bytes.join(" "));
    }
    out
}

pub fn render_base64(buf: &[u8]) -> String {
    format!("{}\n", URL_SAFE_NO_PAD.encode(buf))
}

// DNS Header
pub const HEADER_LEN: usize = 12;
pub const QDCOUNT_1: u16 = 1;
pub const ZERO: u16 = 0;

// DNS Flags
pub const QR_SHIFT: u16 = 15;
pub const OPCODE_SHIFT: u16 = 11;
pub const AA_SHIFT: u16 = 10;
pub const TC_SHIFT: u16 = 9;
pub const RD_SHIFT: u16 = 8;
pub const RA_SHIFT: u16 = 7;
pub const Z_SHIFT: u16 = 4;
// Legacy packers also wrote TC into the low nibble
pub const LEGACY_TC_SHIFT: u16 = 3;

pub const OPCODE_MASK: u16 = 0x7800; // Bits 11-14
pub const Z_MASK: u16 = 0x0070; // Bits 4-6
pub const RC_MASK: u16 = 0x000F; // Bits 0-3
pub const NIBBLE: u8 = 0x0F;
pub const Z_BITS: u8 = 0x07;

// DNS Question
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;
pub const ROOT: u8 = 0;
pub const TYPE_CLASS_LEN: usize = 4;
pub const LABEL_TYPE_MASK: u8 = 0xC0;

// Record types
pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_MX: u16 = 15;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_ANY: u16 = 255;

pub const CLASS_IN: u16 = 1;

// Transport
pub const DNS_PORT: u16 = 53;
pub const DEFAULT_RESOLVER: &str = "8.8.8.8:53";
pub const MAX_UDP_PAYLOAD: usize = 512;

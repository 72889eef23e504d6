use std::fmt;
use std::str::FromStr;

use crate::dns_consts::*;
use crate::error::{DnsError, Result};
use crate::id::IdSource;

/// Which flag and class layout the encoders emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireMode {
    /// RFC 1035 layout: Z is always zero, QCLASS written as given.
    #[default]
    Rfc1035,
    /// Byte-compatible with the older packer: TC repeated in bit 3, RCODE
    /// dropped, and QTYPE written where QCLASS belongs.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeader {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    pub num_questions: u16,
    pub num_answers: u16,
    pub num_authorities: u16,
    pub num_additionals: u16,
}

impl DnsHeader {
    /// Standard recursive query with a single question.
    pub fn query(id: u16) -> Self {
        DnsHeader {
            id,
            rd: true,
            num_questions: QDCOUNT_1,
            num_answers: ZERO,
            num_authorities: ZERO,
            num_additionals: ZERO,
            ..Default::default()
        }
    }

    /// Packs the second header word.
    pub fn flags(&self, mode: WireMode) -> u16 {
        let mut flags: u16 = 0;
        flags |= (self.qr as u16) << QR_SHIFT;
        flags |= ((self.opcode & NIBBLE) as u16) << OPCODE_SHIFT;
        flags |= (self.aa as u16) << AA_SHIFT;
        flags |= (self.tc as u16) << TC_SHIFT;
        flags |= (self.rd as u16) << RD_SHIFT;
        flags |= (self.ra as u16) << RA_SHIFT;

        match mode {
            WireMode::Rfc1035 => {
                flags |= (self.rcode & NIBBLE) as u16;
            }
            WireMode::Legacy => {
                flags |= ((self.z & Z_BITS) as u16) << Z_SHIFT;
                flags |= (self.tc as u16) << LEGACY_TC_SHIFT;
            }
        }

        flags
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String,
    pub type_: u16,
    pub class: u16,
}

/// Query types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    ANY,
    Other(u16),
}

impl RecordType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            TYPE_A => RecordType::A,
            TYPE_NS => RecordType::NS,
            TYPE_CNAME => RecordType::CNAME,
            TYPE_SOA => RecordType::SOA,
            TYPE_PTR => RecordType::PTR,
            TYPE_MX => RecordType::MX,
            TYPE_TXT => RecordType::TXT,
            TYPE_AAAA => RecordType::AAAA,
            TYPE_ANY => RecordType::ANY,
            other => RecordType::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            RecordType::A => TYPE_A,
            RecordType::NS => TYPE_NS,
            RecordType::CNAME => TYPE_CNAME,
            RecordType::SOA => TYPE_SOA,
            RecordType::PTR => TYPE_PTR,
            RecordType::MX => TYPE_MX,
            RecordType::TXT => TYPE_TXT,
            RecordType::AAAA => TYPE_AAAA,
            RecordType::ANY => TYPE_ANY,
            RecordType::Other(v) => v,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::NS => write!(f, "NS"),
            RecordType::CNAME => write!(f, "CNAME"),
            RecordType::SOA => write!(f, "SOA"),
            RecordType::PTR => write!(f, "PTR"),
            RecordType::MX => write!(f, "MX"),
            RecordType::TXT => write!(f, "TXT"),
            RecordType::AAAA => write!(f, "AAAA"),
            RecordType::ANY => write!(f, "ANY"),
            RecordType::Other(v) => write!(f, "TYPE{}", v),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let parsed = match upper.as_str() {
            "A" => RecordType::A,
            "NS" => RecordType::NS,
            "CNAME" => RecordType::CNAME,
            "SOA" => RecordType::SOA,
            "PTR" => RecordType::PTR,
            "MX" => RecordType::MX,
            "TXT" => RecordType::TXT,
            "AAAA" => RecordType::AAAA,
            "ANY" => RecordType::ANY,
            other => {
                let code = other
                    .strip_prefix("TYPE")
                    .and_then(|n| n.parse::<u16>().ok())
                    .ok_or_else(|| format!("unknown record type '{}'", s))?;
                RecordType::from_u16(code)
            }
        };

        Ok(parsed)
    }
}

/// Header, question and their concatenated encoding.
#[derive(Debug, Clone)]
pub struct QueryPacket {
    pub header: DnsHeader,
    pub question: DnsQuestion,
    pub bytes: Vec<u8>,
}

pub fn create_dh(ids: &mut impl IdSource) -> Result<DnsHeader> {
    Ok(DnsHeader::query(ids.next_id()?))
}

pub fn create_dq(name: &str, qtype: RecordType) -> DnsQuestion {
    DnsQuestion {
        name: name.to_string(),
        type_: qtype.to_u16(),
        class: CLASS_IN,
    }
}

pub fn encode_dh(dns_header: &DnsHeader, mode: WireMode) -> [u8; HEADER_LEN] {
    let mut buf = [0u8; HEADER_LEN];
    buf[0..2].copy_from_slice(&dns_header.id.to_be_bytes());
    buf[2..4].copy_from_slice(&dns_header.flags(mode).to_be_bytes());
    buf[4..6].copy_from_slice(&dns_header.num_questions.to_be_bytes());
    buf[6..8].copy_from_slice(&dns_header.num_answers.to_be_bytes());
    buf[8..10].copy_from_slice(&dns_header.num_authorities.to_be_bytes());
    buf[10..12].copy_from_slice(&dns_header.num_additionals.to_be_bytes());

    buf
}

pub fn encode_dq(dns_question: &DnsQuestion, mode: WireMode) -> Result<Vec<u8>> {
    let mut buf = encode_dq_name(&dns_question.name)?;
    buf.extend_from_slice(&dns_question.type_.to_be_bytes());

    let class = match mode {
        WireMode::Rfc1035 => dns_question.class,
        WireMode::Legacy => dns_question.type_,
    };
    buf.extend_from_slice(&class.to_be_bytes());

    let expected = expected_name_len(&dns_question.name) + TYPE_CLASS_LEN;
    if buf.len() != expected {
        return Err(DnsError::LengthMismatch {
            expected,
            actual: buf.len(),
        });
    }

    Ok(buf)
}

/// Encodes a dotted name as length-prefixed labels. A single trailing dot
/// is accepted; `""` and `"."` both encode the root.
pub fn encode_dq_name(name: &str) -> Result<Vec<u8>> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);

    let mut buf = Vec::with_capacity(trimmed.len() + 2);
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DnsError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DnsError::LabelTooLong(label.to_string(), label.len()));
            }
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
    }
    buf.push(ROOT);

    if buf.len() > MAX_NAME_LEN {
        return Err(DnsError::NameTooLong(name.to_string(), buf.len()));
    }

    Ok(buf)
}

// Every dot becomes a length byte, plus one leading length byte and the terminator
fn expected_name_len(name: &str) -> usize {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() { 1 } else { trimmed.len() + 2 }
}

// Header plus one question, derived from the name alone
fn expected_query_len(name: &str) -> usize {
    HEADER_LEN + expected_name_len(name) + TYPE_CLASS_LEN
}

/// Draws an ID and encodes a complete single-question query.
pub fn build_query(
    name: &str,
    qtype: RecordType,
    ids: &mut impl IdSource,
    mode: WireMode,
) -> Result<QueryPacket> {
    let header = create_dh(ids)?;
    let question = create_dq(name, qtype);

    let enc_dh = encode_dh(&header, mode);
    let enc_dq = encode_dq(&question, mode)?;

    let mut bytes = Vec::with_capacity(enc_dh.len() + enc_dq.len());
    bytes.extend_from_slice(&enc_dh);
    bytes.extend_from_slice(&enc_dq);

    let expected = expected_query_len(name);
    if bytes.len() != expected {
        return Err(DnsError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(QueryPacket {
        header,
        question,
        bytes,
    })
}

fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    match buf.get(offset..offset + 2) {
        Some(b) => Ok(u16::from_be_bytes([b[0], b[1]])),
        None => Err(DnsError::Truncated { offset, needed: 2 }),
    }
}

/// Reads an RFC 1035 header from the start of a packet.
pub fn decode_dh(buf: &[u8]) -> Result<DnsHeader> {
    if buf.len() < HEADER_LEN {
        return Err(DnsError::Truncated {
            offset: 0,
            needed: HEADER_LEN,
        });
    }

    let flags = read_u16(buf, 2)?;

    Ok(DnsHeader {
        id: read_u16(buf, 0)?,
        qr: flags & (1 << QR_SHIFT) != 0,
        opcode: ((flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8,
        aa: flags & (1 << AA_SHIFT) != 0,
        tc: flags & (1 << TC_SHIFT) != 0,
        rd: flags & (1 << RD_SHIFT) != 0,
        ra: flags & (1 << RA_SHIFT) != 0,
        z: ((flags & Z_MASK) >> Z_SHIFT) as u8,
        rcode: (flags & RC_MASK) as u8,
        num_questions: read_u16(buf, 4)?,
        num_answers: read_u16(buf, 6)?,
        num_authorities: read_u16(buf, 8)?,
        num_additionals: read_u16(buf, 10)?,
    })
}

/// Reads an uncompressed name starting at `offset`. Returns the dotted name
/// (no trailing dot) and the offset just past the terminator.
pub fn decode_dq_name(buf: &[u8], offset: usize) -> Result<(String, usize)> {
    let mut labels: Vec<&str> = Vec::new();
    let mut pos = offset;

    loop {
        let len = *buf
            .get(pos)
            .ok_or(DnsError::Truncated { offset: pos, needed: 1 })?;

        if len == ROOT {
            pos += 1;
            break;
        }
        if len & LABEL_TYPE_MASK == LABEL_TYPE_MASK {
            return Err(DnsError::CompressedName(pos));
        }
        if len & LABEL_TYPE_MASK != 0 {
            return Err(DnsError::InvalidLabel(pos));
        }

        let start = pos + 1;
        let end = start + len as usize;
        let raw = buf.get(start..end).ok_or(DnsError::Truncated {
            offset: start,
            needed: len as usize,
        })?;
        let label = std::str::from_utf8(raw).map_err(|_| DnsError::InvalidLabel(pos))?;
        labels.push(label);
        pos = end;
    }

    Ok((labels.join("."), pos))
}

pub fn decode_dq(buf: &[u8], offset: usize) -> Result<(DnsQuestion, usize)> {
    let (name, pos) = decode_dq_name(buf, offset)?;
    let type_ = read_u16(buf, pos)?;
    let class = read_u16(buf, pos + 2)?;

    Ok((DnsQuestion { name, type_, class }, pos + TYPE_CLASS_LEN))
}

//! SMPP v3.4 PDU encoding and decoding
//!
//! Every PDU starts with a 16-byte header: command_length, command_id,
//! command_status, sequence_number, all big-endian u32. String fields are
//! null-terminated C-octet strings with protocol-mandated maximum lengths.

use bytes::{Buf, BufMut, BytesMut};

use crate::InfrastructureError;

pub const BIND_TRANSMITTER: u32 = 0x0000_0002;
pub const BIND_TRANSMITTER_RESP: u32 = 0x8000_0002;
pub const SUBMIT_SM: u32 = 0x0000_0004;
pub const SUBMIT_SM_RESP: u32 = 0x8000_0004;
pub const UNBIND: u32 = 0x0000_0006;
pub const UNBIND_RESP: u32 = 0x8000_0006;

/// Success command status
pub const ESME_ROK: u32 = 0x0000_0000;

/// SMPP v3.4 interface version byte
pub const INTERFACE_VERSION: u8 = 0x34;

/// Header size in bytes
pub const HEADER_LEN: usize = 16;

// Type-of-number / numbering-plan-indicator values used for submits:
// alphanumeric source addresses, international destination numbers.
const TON_ALPHANUMERIC: u8 = 0x05;
const TON_INTERNATIONAL: u8 = 0x01;
const NPI_UNKNOWN: u8 = 0x00;
const NPI_ISDN: u8 = 0x01;

const MAX_SYSTEM_ID_LEN: usize = 15;
const MAX_PASSWORD_LEN: usize = 8;
const MAX_ADDR_LEN: usize = 20;
const MAX_SHORT_MESSAGE_LEN: usize = 254;

/// Decoded PDU header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: u32,
}

/// Decode a 16-byte PDU header
pub fn decode_header(bytes: &[u8]) -> Result<PduHeader, InfrastructureError> {
    if bytes.len() < HEADER_LEN {
        return Err(InfrastructureError::Smpp(format!(
            "PDU header truncated: {} bytes",
            bytes.len()
        )));
    }
    let mut buf = bytes;
    Ok(PduHeader {
        command_length: buf.get_u32(),
        command_id: buf.get_u32(),
        command_status: buf.get_u32(),
        sequence_number: buf.get_u32(),
    })
}

/// Encode a `bind_transmitter` PDU
pub fn encode_bind_transmitter(
    sequence: u32,
    system_id: &str,
    password: &str,
) -> Result<Vec<u8>, InfrastructureError> {
    check_len("system_id", system_id, MAX_SYSTEM_ID_LEN)?;
    check_len("password", password, MAX_PASSWORD_LEN)?;

    let mut body = BytesMut::new();
    put_cstring(&mut body, system_id);
    put_cstring(&mut body, password);
    put_cstring(&mut body, ""); // system_type
    body.put_u8(INTERFACE_VERSION);
    body.put_u8(0); // addr_ton
    body.put_u8(0); // addr_npi
    put_cstring(&mut body, ""); // address_range

    Ok(assemble(BIND_TRANSMITTER, sequence, &body))
}

/// Encode a `submit_sm` PDU carrying one short message
pub fn encode_submit_sm(
    sequence: u32,
    source: &str,
    destination: &str,
    message: &str,
) -> Result<Vec<u8>, InfrastructureError> {
    check_len("source_addr", source, MAX_ADDR_LEN)?;
    check_len("destination_addr", destination, MAX_ADDR_LEN)?;
    if message.len() > MAX_SHORT_MESSAGE_LEN {
        return Err(InfrastructureError::Smpp(format!(
            "short_message exceeds {} bytes ({})",
            MAX_SHORT_MESSAGE_LEN,
            message.len()
        )));
    }

    let mut body = BytesMut::new();
    put_cstring(&mut body, ""); // service_type
    body.put_u8(TON_ALPHANUMERIC);
    body.put_u8(NPI_UNKNOWN);
    put_cstring(&mut body, source);
    body.put_u8(TON_INTERNATIONAL);
    body.put_u8(NPI_ISDN);
    put_cstring(&mut body, destination);
    body.put_u8(0); // esm_class
    body.put_u8(0); // protocol_id
    body.put_u8(0); // priority_flag
    put_cstring(&mut body, ""); // schedule_delivery_time
    put_cstring(&mut body, ""); // validity_period
    body.put_u8(0); // registered_delivery
    body.put_u8(0); // replace_if_present_flag
    body.put_u8(0); // data_coding
    body.put_u8(0); // sm_default_msg_id
    body.put_u8(message.len() as u8);
    body.put_slice(message.as_bytes());

    Ok(assemble(SUBMIT_SM, sequence, &body))
}

/// Encode an `unbind` PDU (empty body)
pub fn encode_unbind(sequence: u32) -> Vec<u8> {
    assemble(UNBIND, sequence, &[])
}

/// Read the leading C-octet string out of a PDU body
///
/// `submit_sm_resp` bodies consist of a single `message_id` string; a
/// missing terminator just yields the whole body.
pub fn parse_cstring(body: &[u8]) -> String {
    let end = body.iter().position(|&b| b == 0).unwrap_or(body.len());
    String::from_utf8_lossy(&body[..end]).into_owned()
}

fn assemble(command_id: u32, sequence: u32, body: &[u8]) -> Vec<u8> {
    let mut pdu = BytesMut::with_capacity(HEADER_LEN + body.len());
    pdu.put_u32((HEADER_LEN + body.len()) as u32);
    pdu.put_u32(command_id);
    pdu.put_u32(ESME_ROK);
    pdu.put_u32(sequence);
    pdu.put_slice(body);
    pdu.to_vec()
}

fn put_cstring(buf: &mut BytesMut, value: &str) {
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), InfrastructureError> {
    if value.len() > max {
        return Err(InfrastructureError::Smpp(format!(
            "{} exceeds {} bytes ({})",
            field,
            max,
            value.len()
        )));
    }
    Ok(())
}

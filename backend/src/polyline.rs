//! Google encoded polyline format.
//!
//! Each coordinate is stored as the delta from the previous one, scaled by
//! 1e5, zig-zag encoded, and split into 5-bit chunks offset by 63 so every
//! chunk lands on a printable ASCII character. Bit 0x20 marks continuation.

use crate::models::Coordinate;

const PRECISION: f64 = 1e5;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION: i64 = 0x20;
const ASCII_OFFSET: u8 = 63;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("invalid polyline character {character:?} at byte {offset}")]
    InvalidCharacter { offset: usize, character: char },
    #[error("polyline ends in the middle of a value")]
    Truncated,
    #[error("polyline value at byte {0} overflows 64 bits")]
    Overflow(usize),
    #[error("polyline point ending at byte {0} is outside valid latitude/longitude")]
    OutOfRange(usize),
}

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut path = Vec::with_capacity(bytes.len() / 4);
    let mut offset = 0;
    let mut lat = 0i64;
    let mut lon = 0i64;

    while offset < bytes.len() {
        let start = offset;
        lat = lat
            .checked_add(next_value(bytes, &mut offset)?)
            .ok_or(PolylineError::Overflow(start))?;
        lon = lon
            .checked_add(next_value(bytes, &mut offset)?)
            .ok_or(PolylineError::Overflow(start))?;

        let point = Coordinate {
            lat: lat as f64 / PRECISION,
            lon: lon as f64 / PRECISION,
        };
        if !point.is_valid() {
            return Err(PolylineError::OutOfRange(offset));
        }
        path.push(point);
    }

    Ok(path)
}

pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;

    for coord in path {
        let lat = (coord.lat * PRECISION).round() as i64;
        let lon = (coord.lon * PRECISION).round() as i64;
        push_value(&mut out, lat - prev_lat);
        push_value(&mut out, lon - prev_lon);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn next_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let start = *offset;
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated);
        };
        if !(ASCII_OFFSET..=ASCII_OFFSET + 63).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                offset: *offset,
                character: byte as char,
            });
        }
        if shift >= 64 - CHUNK_BITS {
            return Err(PolylineError::Overflow(start));
        }

        let chunk = (byte - ASCII_OFFSET) as i64;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        *offset += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn push_value(out: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= CONTINUATION {
        out.push((((value & CHUNK_MASK) | CONTINUATION) as u8 + ASCII_OFFSET) as char);
        value >>= CHUNK_BITS;
    }
    out.push((value as u8 + ASCII_OFFSET) as char);
}

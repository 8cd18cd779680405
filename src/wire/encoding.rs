//! Field-level codecs for the tag/length/value wire format.
//!
//! Each submodule handles one proto scalar kind and exposes `encode`,
//! `merge` and `encoded_len` for a single field; `repeated`, `optional`
//! and `nullable` submodules cover the other field labels. Generated
//! message impls (see [`crate::message!`]) dispatch into these by name.

use std::collections::BTreeMap;

use ::bytes::{Buf, BufMut};

use super::{DecodeContext, DecodeError, DecodeErrorKind, Message, WireType};

pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

pub fn decode_varint(buf: &mut impl Buf) -> Result<u64, DecodeError> {
    let mut value = 0u64;
    for index in 0..10 {
        if !buf.has_remaining() {
            return Err(DecodeErrorKind::Truncated.into());
        }
        let byte = buf.get_u8();
        // The tenth byte may only carry the top bit of a u64.
        if index == 9 && byte > 0x01 {
            return Err(DecodeErrorKind::VarintOverflow.into());
        }
        value |= u64::from(byte & 0x7F) << (index * 7);
        if byte < 0x80 {
            return Ok(value);
        }
    }
    Err(DecodeErrorKind::VarintOverflow.into())
}

pub fn encoded_len_varint(value: u64) -> usize {
    ((((value | 1).leading_zeros() ^ 63) * 9 + 73) / 64) as usize
}

pub fn encode_key(tag: u32, wire_type: WireType, buf: &mut impl BufMut) {
    encode_varint((u64::from(tag) << 3) | wire_type as u64, buf);
}

pub fn decode_key(buf: &mut impl Buf) -> Result<(u32, WireType), DecodeError> {
    let key = decode_varint(buf)?;
    if key > u64::from(u32::MAX) {
        return Err(DecodeErrorKind::InvalidKey(key).into());
    }
    let wire_type = WireType::try_from(key & 0x07)?;
    let tag = (key >> 3) as u32;
    if tag == 0 {
        return Err(DecodeErrorKind::InvalidTag.into());
    }
    Ok((tag, wire_type))
}

pub fn key_len(tag: u32) -> usize {
    encoded_len_varint(u64::from(tag) << 3)
}

pub fn check_wire_type(expected: WireType, actual: WireType) -> Result<(), DecodeError> {
    if expected != actual {
        return Err(DecodeErrorKind::WireTypeMismatch { expected, actual }.into());
    }
    Ok(())
}

/// Reads a length prefix and checks that the buffer actually holds that many bytes.
pub fn decode_length(buf: &mut impl Buf) -> Result<usize, DecodeError> {
    let len = decode_varint(buf)?;
    if len > buf.remaining() as u64 {
        return Err(DecodeErrorKind::Truncated.into());
    }
    Ok(len as usize)
}

fn advance_checked(buf: &mut impl Buf, len: usize) -> Result<(), DecodeError> {
    if buf.remaining() < len {
        return Err(DecodeErrorKind::Truncated.into());
    }
    buf.advance(len);
    Ok(())
}

/// Consumes a field whose tag the target message does not declare.
pub fn skip_field(
    wire_type: WireType,
    _tag: u32,
    buf: &mut impl Buf,
    _ctx: DecodeContext,
) -> Result<(), DecodeError> {
    match wire_type {
        WireType::Varint => decode_varint(buf).map(|_| ()),
        WireType::Fixed64 => advance_checked(buf, 8),
        WireType::Fixed32 => advance_checked(buf, 4),
        WireType::LengthDelimited => {
            let len = decode_length(buf)?;
            advance_checked(buf, len)
        }
        WireType::StartGroup | WireType::EndGroup => {
            Err(DecodeErrorKind::UnsupportedWireType(wire_type as u64).into())
        }
    }
}

/// Walks the fields of one length-delimited record, handing each key to `field`.
fn merge_delimited<B: Buf>(
    buf: &mut B,
    mut field: impl FnMut(u32, WireType, &mut B) -> Result<(), DecodeError>,
) -> Result<(), DecodeError> {
    let len = decode_length(buf)?;
    let limit = buf.remaining() - len;
    while buf.remaining() > limit {
        let (tag, wire_type) = decode_key(buf)?;
        field(tag, wire_type, buf)?;
    }
    if buf.remaining() != limit {
        return Err(DecodeErrorKind::LengthOverrun.into());
    }
    Ok(())
}

macro_rules! varint {
    ($name:ident, $ty:ty, |$enc:ident| $to_u64:expr, |$dec:ident| $from_u64:expr) => {
        pub mod $name {
            use super::*;

            pub fn encode(tag: u32, value: &$ty, buf: &mut impl BufMut) {
                if *value != <$ty>::default() {
                    encode_key(tag, WireType::Varint, buf);
                    let $enc = *value;
                    encode_varint($to_u64, buf);
                }
            }

            pub fn merge(
                wire_type: WireType,
                value: &mut $ty,
                buf: &mut impl Buf,
                _ctx: DecodeContext,
            ) -> Result<(), DecodeError> {
                check_wire_type(WireType::Varint, wire_type)?;
                let $dec = decode_varint(buf)?;
                *value = $from_u64;
                Ok(())
            }

            pub fn encoded_len(tag: u32, value: &$ty) -> usize {
                if *value == <$ty>::default() {
                    return 0;
                }
                let $enc = *value;
                key_len(tag) + encoded_len_varint($to_u64)
            }
        }
    };
}

varint!(int32, i32, |v| v as i64 as u64, |v| v as i32);
varint!(int64, i64, |v| v as u64, |v| v as i64);
varint!(uint32, u32, |v| u64::from(v), |v| v as u32);
varint!(uint64, u64, |v| v, |v| v);
varint!(boolean, bool, |v| u64::from(v), |v| v != 0);

pub mod double {
    use super::*;

    pub fn encode(tag: u32, value: &f64, buf: &mut impl BufMut) {
        // Bit comparison keeps -0.0 on the wire.
        if value.to_bits() != 0 {
            encode_key(tag, WireType::Fixed64, buf);
            buf.put_f64_le(*value);
        }
    }

    pub fn merge(
        wire_type: WireType,
        value: &mut f64,
        buf: &mut impl Buf,
        _ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        check_wire_type(WireType::Fixed64, wire_type)?;
        if buf.remaining() < 8 {
            return Err(DecodeErrorKind::Truncated.into());
        }
        *value = buf.get_f64_le();
        Ok(())
    }

    pub fn encoded_len(tag: u32, value: &f64) -> usize {
        if value.to_bits() == 0 {
            0
        } else {
            key_len(tag) + 8
        }
    }
}

pub mod bytes {
    use super::*;

    pub fn encode(tag: u32, value: &[u8], buf: &mut impl BufMut) {
        if !value.is_empty() {
            encode_present(tag, value, buf);
        }
    }

    pub fn merge(
        wire_type: WireType,
        value: &mut Vec<u8>,
        buf: &mut impl Buf,
        _ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        check_wire_type(WireType::LengthDelimited, wire_type)?;
        let len = decode_length(buf)?;
        *value = buf.copy_to_bytes(len).to_vec();
        Ok(())
    }

    pub fn encoded_len(tag: u32, value: &[u8]) -> usize {
        if value.is_empty() {
            0
        } else {
            present_len(tag, value)
        }
    }

    pub(super) fn encode_present(tag: u32, value: &[u8], buf: &mut impl BufMut) {
        encode_key(tag, WireType::LengthDelimited, buf);
        encode_varint(value.len() as u64, buf);
        buf.put_slice(value);
    }

    pub(super) fn present_len(tag: u32, value: &[u8]) -> usize {
        key_len(tag) + encoded_len_varint(value.len() as u64) + value.len()
    }

    pub mod repeated {
        use super::*;

        pub fn encode(tag: u32, values: &[Vec<u8>], buf: &mut impl BufMut) {
            for value in values {
                encode_present(tag, value, buf);
            }
        }

        pub fn merge(
            wire_type: WireType,
            values: &mut Vec<Vec<u8>>,
            buf: &mut impl Buf,
            ctx: DecodeContext,
        ) -> Result<(), DecodeError> {
            let mut value = Vec::new();
            super::merge(wire_type, &mut value, buf, ctx)?;
            values.push(value);
            Ok(())
        }

        pub fn encoded_len(tag: u32, values: &[Vec<u8>]) -> usize {
            values.iter().map(|value| present_len(tag, value)).sum()
        }
    }
}

pub mod string {
    use super::*;

    pub fn encode(tag: u32, value: &str, buf: &mut impl BufMut) {
        if !value.is_empty() {
            super::bytes::encode_present(tag, value.as_bytes(), buf);
        }
    }

    pub fn merge(
        wire_type: WireType,
        value: &mut String,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let mut raw = Vec::new();
        super::bytes::merge(wire_type, &mut raw, buf, ctx)?;
        *value = String::from_utf8(raw).map_err(|_| DecodeError::new(DecodeErrorKind::InvalidUtf8))?;
        Ok(())
    }

    pub fn encoded_len(tag: u32, value: &str) -> usize {
        if value.is_empty() {
            0
        } else {
            super::bytes::present_len(tag, value.as_bytes())
        }
    }

    pub mod repeated {
        use super::*;

        pub fn encode(tag: u32, values: &[String], buf: &mut impl BufMut) {
            for value in values {
                super::super::bytes::encode_present(tag, value.as_bytes(), buf);
            }
        }

        pub fn merge(
            wire_type: WireType,
            values: &mut Vec<String>,
            buf: &mut impl Buf,
            ctx: DecodeContext,
        ) -> Result<(), DecodeError> {
            let mut value = String::new();
            super::merge(wire_type, &mut value, buf, ctx)?;
            values.push(value);
            Ok(())
        }

        pub fn encoded_len(tag: u32, values: &[String]) -> usize {
            values
                .iter()
                .map(|value| super::super::bytes::present_len(tag, value.as_bytes()))
                .sum()
        }
    }
}

pub mod message {
    use super::*;

    pub fn encode<M: Message>(tag: u32, msg: &M, buf: &mut impl BufMut) {
        encode_key(tag, WireType::LengthDelimited, buf);
        encode_varint(msg.encoded_len() as u64, buf);
        msg.encode_raw(buf);
    }

    pub fn merge<M: Message>(
        wire_type: WireType,
        msg: &mut M,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        check_wire_type(WireType::LengthDelimited, wire_type)?;
        let inner = ctx.enter_recursion()?;
        merge_delimited(buf, |tag, wire_type, buf| {
            msg.merge_field(tag, wire_type, buf, inner)
        })
    }

    pub fn encoded_len<M: Message>(tag: u32, msg: &M) -> usize {
        let len = msg.encoded_len();
        key_len(tag) + encoded_len_varint(len as u64) + len
    }

    /// A singular embedded message; `None` is simply not written.
    pub mod optional {
        use super::*;

        pub fn encode<M: Message>(tag: u32, msg: &Option<M>, buf: &mut impl BufMut) {
            if let Some(msg) = msg {
                super::encode(tag, msg, buf);
            }
        }

        pub fn merge<M: Message>(
            wire_type: WireType,
            msg: &mut Option<M>,
            buf: &mut impl Buf,
            ctx: DecodeContext,
        ) -> Result<(), DecodeError> {
            super::merge(wire_type, msg.get_or_insert_with(M::default), buf, ctx)
        }

        pub fn encoded_len<M: Message>(tag: u32, msg: &Option<M>) -> usize {
            msg.as_ref().map_or(0, |msg| super::encoded_len(tag, msg))
        }
    }

    pub mod repeated {
        use super::*;

        pub fn encode<M: Message>(tag: u32, msgs: &[M], buf: &mut impl BufMut) {
            for msg in msgs {
                super::encode(tag, msg, buf);
            }
        }

        pub fn merge<M: Message>(
            wire_type: WireType,
            msgs: &mut Vec<M>,
            buf: &mut impl Buf,
            ctx: DecodeContext,
        ) -> Result<(), DecodeError> {
            let mut msg = M::default();
            super::merge(wire_type, &mut msg, buf, ctx)?;
            msgs.push(msg);
            Ok(())
        }

        pub fn encoded_len<M: Message>(tag: u32, msgs: &[M]) -> usize {
            msgs.iter().map(|msg| super::encoded_len(tag, msg)).sum()
        }
    }

    /// A repeated message field that remembers whether any element was seen.
    ///
    /// `None` and `Some(vec![])` are indistinguishable on the wire; decoding
    /// yields `None` unless at least one element is present.
    pub mod nullable {
        use super::*;

        pub fn encode<M: Message>(tag: u32, msgs: &Option<Vec<M>>, buf: &mut impl BufMut) {
            if let Some(msgs) = msgs {
                super::repeated::encode(tag, msgs, buf);
            }
        }

        pub fn merge<M: Message>(
            wire_type: WireType,
            msgs: &mut Option<Vec<M>>,
            buf: &mut impl Buf,
            ctx: DecodeContext,
        ) -> Result<(), DecodeError> {
            super::repeated::merge(wire_type, msgs.get_or_insert_with(Vec::new), buf, ctx)
        }

        pub fn encoded_len<M: Message>(tag: u32, msgs: &Option<Vec<M>>) -> usize {
            msgs.as_ref()
                .map_or(0, |msgs| super::repeated::encoded_len(tag, msgs))
        }
    }
}

macro_rules! string_keyed_map {
    ($name:ident, $value_ty:ty, $value:ident) => {
        /// `map<string, _>` field, encoded as repeated key/value entry records.
        pub mod $name {
            use super::*;

            fn entry_len(key: &str, value: &$value_ty) -> usize {
                super::string::encoded_len(1, key) + super::$value::encoded_len(2, value)
            }

            pub fn encode(tag: u32, values: &BTreeMap<String, $value_ty>, buf: &mut impl BufMut) {
                for (key, value) in values {
                    encode_key(tag, WireType::LengthDelimited, buf);
                    encode_varint(entry_len(key, value) as u64, buf);
                    super::string::encode(1, key, buf);
                    super::$value::encode(2, value, buf);
                }
            }

            pub fn merge(
                wire_type: WireType,
                values: &mut BTreeMap<String, $value_ty>,
                buf: &mut impl Buf,
                ctx: DecodeContext,
            ) -> Result<(), DecodeError> {
                check_wire_type(WireType::LengthDelimited, wire_type)?;
                let mut key = String::new();
                let mut value = <$value_ty>::default();
                merge_delimited(buf, |tag, wire_type, buf| match tag {
                    1 => super::string::merge(wire_type, &mut key, buf, ctx),
                    2 => super::$value::merge(wire_type, &mut value, buf, ctx),
                    _ => skip_field(wire_type, tag, buf, ctx),
                })?;
                values.insert(key, value);
                Ok(())
            }

            pub fn encoded_len(tag: u32, values: &BTreeMap<String, $value_ty>) -> usize {
                values
                    .iter()
                    .map(|(key, value)| {
                        let len = entry_len(key, value);
                        key_len(tag) + encoded_len_varint(len as u64) + len
                    })
                    .sum()
            }
        }
    };
}

string_keyed_map!(string_map, String, string);
string_keyed_map!(bytes_map, Vec<u8>, bytes);
string_keyed_map!(double_map, f64, double);

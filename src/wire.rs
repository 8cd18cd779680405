//! Shared binary wire format.
//!
//! Messages are written as a flat run of `key | payload` records, where the
//! key packs a field tag and a [`WireType`]. Two independently declared
//! message types interoperate exactly on the tags they share with a matching
//! wire type; every other field is skipped on decode.

pub mod encoding;
mod error;

pub use self::error::{DecodeError, DecodeErrorKind, EncodeError};
pub use ::bytes::{Buf, BufMut};

use std::fmt::Debug;

/// Nesting depth allowed by [`DecodeContext::default`].
pub const DEFAULT_RECURSION_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl TryFrom<u64> for WireType {
    type Error = DecodeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(DecodeErrorKind::UnsupportedWireType(other).into()),
        }
    }
}

/// Per-decode state threaded through nested message merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    recurse_budget: u32,
}

impl Default for DecodeContext {
    fn default() -> Self {
        DecodeContext::with_recursion_limit(DEFAULT_RECURSION_LIMIT)
    }
}

impl DecodeContext {
    pub fn with_recursion_limit(limit: u32) -> Self {
        DecodeContext {
            recurse_budget: limit,
        }
    }

    /// Context for one level of embedded message, or an error once the budget is spent.
    pub fn enter_recursion(self) -> Result<Self, DecodeError> {
        match self.recurse_budget.checked_sub(1) {
            Some(recurse_budget) => Ok(DecodeContext { recurse_budget }),
            None => Err(DecodeErrorKind::RecursionLimit.into()),
        }
    }
}

/// A schema type with a canonical binary encoding.
///
/// Implementations are normally generated with [`crate::message!`].
pub trait Message: Debug + Default + Send + Sync {
    /// Schema name, used in decode error paths and trace events.
    const NAME: &'static str;

    /// Writes every non-default field. The buffer must have room for
    /// [`Message::encoded_len`] bytes.
    fn encode_raw(&self, buf: &mut impl BufMut);

    /// Decodes one field, skipping tags this type does not declare.
    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>;

    fn encoded_len(&self) -> usize;

    fn encode(&self, buf: &mut impl BufMut) -> Result<(), EncodeError> {
        let required = self.encoded_len();
        let remaining = buf.remaining_mut();
        if required > remaining {
            return Err(EncodeError::InsufficientCapacity {
                required,
                remaining,
            });
        }
        self.encode_raw(buf);
        Ok(())
    }

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_raw(&mut buf);
        buf
    }

    fn decode(buf: impl Buf) -> Result<Self, DecodeError> {
        Self::decode_with_context(buf, DecodeContext::default())
    }

    fn decode_with_context(mut buf: impl Buf, ctx: DecodeContext) -> Result<Self, DecodeError> {
        let mut msg = Self::default();
        msg.merge_with_context(&mut buf, ctx)?;
        Ok(msg)
    }

    fn merge_with_context(&mut self, buf: &mut impl Buf, ctx: DecodeContext) -> Result<(), DecodeError> {
        while buf.has_remaining() {
            let (tag, wire_type) = encoding::decode_key(buf)?;
            self.merge_field(tag, wire_type, buf, ctx)?;
        }
        Ok(())
    }
}

/// Declares a schema struct and its [`Message`] impl.
///
/// Each field is written `name: Type = (tag, codec)` or
/// `name: Type = (tag, codec, label)`, where `codec` names a module under
/// [`encoding`] and `label` one of its submodules (`repeated`, `optional`,
/// `nullable`).
///
/// ```ignore
/// ledger_bridge::message! {
///     pub struct Receipt {
///         txid: Vec<u8> = (1, bytes),
///         height: i64 = (2, int64),
///         notes: Vec<String> = (3, string, repeated),
///     }
/// }
/// ```
#[macro_export]
macro_rules! message {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = ($tag:literal, $codec:ident $(, $label:ident)?)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::wire::Message for $name {
            const NAME: &'static str = stringify!($name);

            #[allow(unused_variables)]
            fn encode_raw(&self, buf: &mut impl $crate::wire::BufMut) {
                $(
                    $crate::wire::encoding::$codec $(::$label)? ::encode($tag, &self.$field, buf);
                )*
            }

            fn merge_field(
                &mut self,
                tag: u32,
                wire_type: $crate::wire::WireType,
                buf: &mut impl $crate::wire::Buf,
                ctx: $crate::wire::DecodeContext,
            ) -> ::std::result::Result<(), $crate::wire::DecodeError> {
                match tag {
                    $(
                        $tag => $crate::wire::encoding::$codec $(::$label)? ::merge(
                            wire_type,
                            &mut self.$field,
                            buf,
                            ctx,
                        )
                        .map_err(|err| err.within(stringify!($name), stringify!($field))),
                    )*
                    _ => $crate::wire::encoding::skip_field(wire_type, tag, buf, ctx),
                }
            }

            fn encoded_len(&self) -> usize {
                0 $( + $crate::wire::encoding::$codec $(::$label)? ::encoded_len($tag, &self.$field) )*
            }
        }
    };
}

/// Declares an `i32`-backed schema enum.
///
/// Enum-typed message fields are stored as raw `i32` so values unknown to one
/// schema survive a decode; `TryFrom<i32>` recovers the typed value.
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        impl $name {
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant), )*
                }
            }
        }

        impl ::std::convert::TryFrom<i32> for $name {
            type Error = i32;

            fn try_from(value: i32) -> ::std::result::Result<Self, i32> {
                match value {
                    $( $value => Ok($name::$variant), )*
                    other => Err(other),
                }
            }
        }

        impl ::std::convert::From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value as i32
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::message! {
        struct Account {
            name: String = (1, string),
            balance: u64 = (2, uint64),
            frozen: bool = (3, boolean),
        }
    }

    crate::message! {
        struct AccountName {
            name: String = (1, string),
        }
    }

    crate::message! {
        struct Node {
            label: String = (1, string),
            children: Vec<Node> = (2, message, repeated),
        }
    }

    crate::message! {
        struct Wrapper {
            inner: Option<Account> = (1, message, optional),
            trailer: u32 = (2, uint32),
        }
    }

    fn chain(depth: usize) -> Node {
        let mut node = Node {
            label: "leaf".to_string(),
            children: Vec::new(),
        };
        for _ in 0..depth {
            node = Node {
                label: "branch".to_string(),
                children: vec![node],
            };
        }
        node
    }

    #[test]
    fn test_encoded_len_matches_output() {
        let account = Account {
            name: "alice".to_string(),
            balance: 1_000,
            frozen: true,
        };
        assert_eq!(account.encode_to_vec().len(), account.encoded_len());
        assert_eq!(Account::decode(account.encode_to_vec().as_slice()).unwrap(), account);
    }

    #[test]
    fn test_unknown_fields_are_skipped() {
        let account = Account {
            name: "alice".to_string(),
            balance: 1_000,
            frozen: true,
        };
        let decoded = AccountName::decode(account.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.name, "alice");
    }

    #[test]
    fn test_default_message_encodes_empty() {
        assert!(Account::default().encode_to_vec().is_empty());
        assert_eq!(Account::decode(&[0u8; 0][..]).unwrap(), Account::default());
    }

    #[test]
    fn test_last_scalar_wins() {
        let mut buf = Account {
            name: "first".to_string(),
            ..Default::default()
        }
        .encode_to_vec();
        buf.extend(
            Account {
                name: "second".to_string(),
                ..Default::default()
            }
            .encode_to_vec(),
        );
        assert_eq!(Account::decode(buf.as_slice()).unwrap().name, "second");
    }

    #[test]
    fn test_encode_checks_capacity() {
        let account = Account {
            name: "alice".to_string(),
            ..Default::default()
        };
        let mut storage = [0u8; 2];
        let mut slice = &mut storage[..];
        let err = account.encode(&mut slice).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InsufficientCapacity {
                required: 7,
                remaining: 2
            }
        );
    }

    #[test]
    fn test_recursion_limit() {
        let deep = chain(5).encode_to_vec();
        assert!(Node::decode_with_context(deep.as_slice(), DecodeContext::with_recursion_limit(5)).is_ok());

        let err = Node::decode_with_context(deep.as_slice(), DecodeContext::with_recursion_limit(4)).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::RecursionLimit);
        assert_eq!(err.path().first(), Some(&("Node", "children")));
    }

    #[test]
    fn test_nested_length_overrun() {
        let wrapper = Wrapper {
            inner: Some(Account {
                name: "alice".to_string(),
                ..Default::default()
            }),
            trailer: 9,
        };
        let mut buf = wrapper.encode_to_vec();
        // Stretch the inner string length past the end of the embedded message.
        assert_eq!(buf[3], 5);
        buf[3] = 6;

        let err = Wrapper::decode(buf.as_slice()).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::LengthOverrun);
        assert_eq!(err.path(), &[("Wrapper", "inner")]);
    }

    #[test]
    fn test_truncated_buffer() {
        let buf = Account {
            name: "alice".to_string(),
            ..Default::default()
        }
        .encode_to_vec();
        let err = Account::decode(&buf[..buf.len() - 1]).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        assert_eq!(err.to_string(), "failed to decode message: Account.name: buffer ended inside a field");
    }

    #[test]
    fn test_wire_type_roundtrip() {
        for value in 0..6u64 {
            assert_eq!(WireType::try_from(value).unwrap() as u64, value);
        }
        assert!(WireType::try_from(6).is_err());
    }
}

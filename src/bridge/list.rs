//! Ordered, fail-fast conversion of collections.
//!
//! An absent list converts to an absent list and an empty list to an empty
//! one. Output order matches input order; the first element that fails
//! discards everything converted so far.

use tracing::warn;

use crate::error::{BridgeError, Result};

/// Converts each element with a silent-policy converter.
///
/// An element that converts to `None` aborts the list with
/// [`BridgeError::ElementUnavailable`].
pub fn convert_list<A, B>(
    srcs: Option<&[A]>,
    entity: &'static str,
    mut convert: impl FnMut(&A) -> Option<B>,
) -> Result<Option<Vec<B>>> {
    try_convert_list(srcs, entity, |src| Ok(convert(src)))
}

/// Converts each element with an explicit-policy converter.
///
/// A converter error aborts the list with [`BridgeError::Element`] carrying
/// the cause; a converter returning `Ok(None)` aborts it with
/// [`BridgeError::ElementUnavailable`].
pub fn try_convert_list<A, B>(
    srcs: Option<&[A]>,
    entity: &'static str,
    mut convert: impl FnMut(&A) -> Result<Option<B>>,
) -> Result<Option<Vec<B>>> {
    let Some(srcs) = srcs else {
        return Ok(None);
    };

    let mut dsts = Vec::with_capacity(srcs.len());
    for (index, src) in srcs.iter().enumerate() {
        match convert(src) {
            Ok(Some(dst)) => dsts.push(dst),
            Ok(None) => {
                warn!(entity, index, total = srcs.len(), "list conversion aborted");
                return Err(BridgeError::ElementUnavailable { entity, index });
            }
            Err(e) => {
                warn!(entity, index, total = srcs.len(), error = %e, "list conversion aborted");
                return Err(BridgeError::Element {
                    entity,
                    index,
                    source: Box::new(e),
                });
            }
        }
    }
    Ok(Some(dsts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::EncodeError;

    fn halve(value: &u32) -> Option<u32> {
        (value % 2 == 0).then(|| value / 2)
    }

    #[test]
    fn test_absent_and_empty_are_distinct() {
        assert_eq!(convert_list(None, "number", halve), Ok(None));
        assert_eq!(convert_list(Some(&[][..]), "number", halve), Ok(Some(vec![])));
    }

    #[test]
    fn test_order_is_preserved() {
        let srcs = [8, 2, 6, 4];
        assert_eq!(convert_list(Some(&srcs[..]), "number", halve), Ok(Some(vec![4, 1, 3, 2])));
    }

    #[test]
    fn test_first_failure_aborts() {
        let srcs = [2, 3, 5];
        let mut seen = Vec::new();
        let result = convert_list(Some(&srcs[..]), "number", |value| {
            seen.push(*value);
            halve(value)
        });

        assert_eq!(
            result,
            Err(BridgeError::ElementUnavailable {
                entity: "number",
                index: 1
            })
        );
        // nothing after the failing element is attempted
        assert_eq!(seen, vec![2, 3]);
    }

    #[test]
    fn test_error_is_carried_as_source() {
        let srcs = [1u32, 2];
        let cause = BridgeError::Encode(EncodeError::TooLarge {
            message: "Number",
            size: 10,
            limit: 1,
        });
        let result = try_convert_list(Some(&srcs[..]), "number", |value| {
            if *value == 2 {
                Err(cause.clone())
            } else {
                Ok(Some(*value))
            }
        });

        assert_eq!(
            result,
            Err(BridgeError::Element {
                entity: "number",
                index: 1,
                source: Box::new(cause),
            })
        );
    }
}

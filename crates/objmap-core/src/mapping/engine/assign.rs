//! Assignment pipeline for one target member
//!
//! Steps run in a fixed order and the first one that yields a value wins:
//! null handling, direct assignment, collection mapping, nested mapping through
//! the registry, then scalar conversion.
//!
//! Failures inside the pipeline leave the member unset. The exception is
//! [`Error::Construction`] from a nested mapping, which aborts the enclosing
//! mapping call because no nested instance could be produced at all.

use super::{coerce, collection};
use crate::mapping::{Mapper, MappingContext};
use crate::shape::Shape;
use crate::value::Value;
use crate::{Error, Result};

/// Turn a raw source value into a value assignable to a member of `declared`
///
/// `Ok(None)` leaves the member at its default.
pub(crate) fn resolve_assignment(
    declared: &Shape,
    raw: Value,
    context: &MappingContext,
    mapper: &Mapper,
) -> Result<Option<Value>> {
    let underlying = declared.underlying();

    if raw.is_null() {
        return Ok(declared.is_optional().then_some(Value::Null));
    }

    if raw.is_assignable_to(underlying) {
        return Ok(Some(raw));
    }

    if let (Some(element), Some(items)) = (underlying.element(), raw.as_seq()) {
        let mapped =
            collection::map_collection(&items.items, underlying, element, context, mapper)?;
        return Ok(Some(mapped));
    }

    if !raw.is_primitive_like() && !underlying.is_primitive_like() {
        match mapper.map_value(raw.clone(), underlying, Some(context)) {
            Ok(value) => return Ok(Some(value)),
            Err(e @ Error::Construction { .. }) => return Err(e),
            Err(e) => log::debug!(
                "Nested mapping {} -> {} failed: {}",
                raw.type_name(),
                underlying.name(),
                e
            ),
        }
    }

    let converted = coerce::convert(&raw, underlying);
    if converted.is_none() {
        log::debug!(
            "No conversion from {} to {}",
            raw.type_name(),
            underlying.name()
        );
    }
    Ok(converted)
}

//! Element-wise collection mapping

use crate::mapping::{Mapper, MappingContext};
use crate::shape::Shape;
use crate::value::{Sequence, Value};
use crate::{Error, Result};

/// Map `items` into a sequence of the declared `collection` type
///
/// Elements already of the element type are copied; the rest go through the
/// registry. Elements that fail to map, or map to null, are dropped. Order is
/// preserved. A [`Error::Construction`] from an element aborts the whole
/// collection.
pub(crate) fn map_collection(
    items: &[Value],
    collection: &Shape,
    element: &Shape,
    context: &MappingContext,
    mapper: &Mapper,
) -> Result<Value> {
    let element = element.underlying();
    let mut mapped = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if item.is_assignable_to(element) {
            mapped.push(item.clone());
            continue;
        }

        match mapper.map_value(item.clone(), element, Some(context)) {
            Ok(Value::Null) => {
                log::debug!("Dropping absent element {} of {}", index, collection.name());
            }
            Ok(value) => mapped.push(value),
            Err(e @ Error::Construction { .. }) => return Err(e),
            Err(e) => log::debug!(
                "Dropping element {} of {}: {}",
                index,
                collection.name(),
                e
            ),
        }
    }

    Ok(Value::Seq(Sequence::new(collection.key(), mapped)))
}

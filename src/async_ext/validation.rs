//! Element-wise validation of array-valued fields inside one scope.

use core::future::Future;

use crate::async_ext::FutureScopeExt;
use crate::structure::element_path;

/// Converts the elements of one array-valued field, one after another.
///
/// Element `i` runs with the current property set to `field[i]`, so codecs inside
/// it attribute their failures to that element. Returns every value only when
/// every element produced one; failures are left in the active scope.
pub async fn validate_elements_async<T, Fut, I>(field: &str, elements: I) -> Option<Vec<T>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Option<T>>,
{
    let mut values = Vec::new();
    let mut complete = true;

    for (index, element) in elements.into_iter().enumerate() {
        match element.with_property(element_path(field, index)).await {
            Some(value) if complete => values.push(value),
            Some(_) => {},
            None => complete = false,
        }
    }

    complete.then_some(values)
}

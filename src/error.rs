/// Returned when the capability is invoked on an [`InplaceValue`] whose payload
/// has been moved out.
///
/// [`InplaceValue`]: crate::InplaceValue
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("InplaceValue is empty: its payload has been moved out")]
pub struct EmptyError;

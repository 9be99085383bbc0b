//! The contract a payload fulfils to be held by an [`InplaceValue`].
//!
//! Besides user types, two adapters implement [`Capability`] here:
//!
//! - [`FromFn`] turns any `Fn(A) -> R` closure into a payload, so an anonymous
//!   closure can be erased without naming a type for it.
//! - [`InplaceValue`] itself, which forwards to its own payload. This lets a
//!   container be nested inside another container with a larger capacity.

use std::fmt;

use crate::InplaceValue;

/// The single operation an [`InplaceValue`] forwards to its payload.
///
/// `A` is the argument of the operation; use a tuple to pass several values,
/// or `()` for none.
///
/// ```
/// use inplace_value::Capability;
/// use inplace_value::InplaceValue;
///
/// struct Greeter(&'static str);
///
/// impl Capability for Greeter {
///     type Output = String;
///
///     fn invoke(&self, _: ()) -> String {
///         format!("hello, {}", self.0)
///     }
/// }
///
/// let v: InplaceValue<(), String> = InplaceValue::new(Greeter("world"));
/// assert_eq!(v.invoke(()), "hello, world");
/// ```
pub trait Capability<A = ()> {
    type Output;

    fn invoke(&self, args: A) -> Self::Output;
}

/// Adapts a closure into a [`Capability`].
///
/// ```
/// use inplace_value::FromFn;
/// use inplace_value::InplaceValue;
///
/// let offset = 10;
/// let v: InplaceValue<u32, u32, 16> =
///     InplaceValue::new(FromFn(move |x: u32| x + offset));
/// assert_eq!(v.invoke(5), 15);
/// ```
#[derive(Clone, Copy)]
pub struct FromFn<F>(pub F);

impl<A, R, F> Capability<A> for FromFn<F>
where F: Fn(A) -> R
{
    type Output = R;

    #[inline]
    fn invoke(&self, args: A) -> R {
        (self.0)(args)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FromFn").finish_non_exhaustive()
    }
}

impl<A, R, const SIZE: usize> Capability<A> for InplaceValue<A, R, SIZE>
where
    A: 'static,
    R: 'static,
{
    type Output = R;

    /// Forwards to the inner payload.
    ///
    /// # Panics
    ///
    /// Panics if this container is empty.
    #[inline]
    fn invoke(&self, args: A) -> R {
        InplaceValue::invoke(self, args)
    }
}

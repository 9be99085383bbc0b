//! A fixed-capacity polymorphic value stored inline.
//!
//! [`InplaceValue`] holds one payload of any type implementing [`Capability`],
//! keeps its bytes inside the container itself, and calls the capability
//! through a per-type dispatch record. Payload types share no base type and
//! no heap allocation is made.
//!
//! ```
//! use inplace_value::Capability;
//! use inplace_value::InplaceValue;
//!
//! struct Lion;
//! struct Penguin {
//!     kg: u32,
//! }
//!
//! impl Capability for Lion {
//!     type Output = String;
//!     fn invoke(&self, _: ()) -> String {
//!         "meat".to_string()
//!     }
//! }
//!
//! impl Capability for Penguin {
//!     type Output = String;
//!     fn invoke(&self, _: ()) -> String {
//!         format!("fish ({}kg/day)", self.kg)
//!     }
//! }
//!
//! let roster: Vec<InplaceValue<(), String>> = vec![
//!     InplaceValue::new(Lion),
//!     InplaceValue::new(Penguin { kg: 2 }),
//! ];
//!
//! let food = roster.iter().map(|a| a.invoke(())).collect::<Vec<_>>();
//! assert_eq!(food, vec!["meat", "fish (2kg/day)"]);
//! ```

mod capability;
mod dispatch;
mod error;
mod impl_downcast;
mod impl_move;
mod storage;
mod tracing_macros;

use std::fmt;
use std::marker::PhantomData;
use std::mem::align_of;
use std::mem::size_of;

pub use capability::Capability;
pub use capability::FromFn;
pub use error::EmptyError;
pub use storage::MAX_ALIGN;

use crate::dispatch::DispatchRecord;
use crate::storage::Storage;
use crate::tracing_macros::trace;

/// Capacity in bytes of an [`InplaceValue`] when `SIZE` is not given.
pub const DEFAULT_CAPACITY: usize = 128;

/// A move-only container holding one payload inline.
///
/// * `A`: argument of the forwarded operation.
/// * `R`: result of the forwarded operation.
/// * `SIZE`: capacity of the inline storage in bytes. The storage is always
///   aligned to [`MAX_ALIGN`].
///
/// A container is either occupied by exactly one payload or empty. It starts
/// occupied; it only becomes empty when its payload is moved out with
/// [`take`](Self::take), [`assign_from`](Self::assign_from) or
/// [`try_resize`](Self::try_resize). Invoking an empty container panics, see
/// [`try_invoke`](Self::try_invoke) for the checked form.
///
/// The container is neither `Send` nor `Sync`, whatever the payload.
pub struct InplaceValue<
    A: 'static = (),
    R: 'static = (),
    const SIZE: usize = DEFAULT_CAPACITY,
> {
    storage: Storage<SIZE>,

    /// `Some` iff `storage` holds a live payload of the record's type.
    dispatch: Option<&'static DispatchRecord<A, R>>,

    _not_send: PhantomData<*const ()>,
}

impl<A: 'static, R: 'static, const SIZE: usize> InplaceValue<A, R, SIZE> {
    /// Capacity of the inline storage in bytes.
    pub const CAPACITY: usize = SIZE;

    /// Alignment of the inline storage.
    pub const ALIGNMENT: usize = MAX_ALIGN;

    /// Moves `value` into a new container.
    ///
    /// The size and alignment of `T` are checked at compile time: a type that
    /// does not fit fails to build.
    ///
    /// ```compile_fail
    /// use inplace_value::FromFn;
    /// use inplace_value::InplaceValue;
    ///
    /// let big = [1u8; 64];
    /// let _v: InplaceValue<(), u8, 32> =
    ///     InplaceValue::new(FromFn(move |()| big[0]));
    /// ```
    ///
    /// ```compile_fail
    /// use inplace_value::Capability;
    /// use inplace_value::InplaceValue;
    ///
    /// #[repr(align(32))]
    /// struct Wide;
    ///
    /// impl Capability for Wide {
    ///     type Output = ();
    ///     fn invoke(&self, _: ()) {}
    /// }
    ///
    /// let _v: InplaceValue = InplaceValue::new(Wide);
    /// ```
    pub fn new<T>(value: T) -> Self
    where T: Capability<A, Output = R> + 'static {
        const {
            assert!(
                size_of::<T>() <= SIZE,
                "payload size exceeds the capacity of InplaceValue"
            );
            assert!(
                align_of::<T>() <= MAX_ALIGN,
                "payload alignment exceeds the alignment of InplaceValue"
            );
        }

        let mut storage = Storage::uninit();

        // SAFETY: `T` fits in size and alignment, checked above.
        unsafe {
            storage.as_mut_ptr().cast::<T>().as_ptr().write(value);
        }

        trace!(
            payload = std::any::type_name::<T>(),
            capacity = SIZE,
            "InplaceValue::new"
        );

        Self {
            storage,
            dispatch: Some(DispatchRecord::of::<T>()),
            _not_send: PhantomData,
        }
    }

    /// Returns whether a value of type `T` can be held by this container type.
    pub const fn fits<T>() -> bool {
        size_of::<T>() <= SIZE && align_of::<T>() <= MAX_ALIGN
    }

    /// Calls the payload's capability.
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    #[track_caller]
    pub fn invoke(&self, args: A) -> R {
        match self.try_invoke(args) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }

    /// Calls the payload's capability, or returns [`EmptyError`] if the
    /// payload has been moved out.
    pub fn try_invoke(&self, args: A) -> Result<R, EmptyError> {
        let dispatch = self.dispatch.ok_or(EmptyError)?;

        // SAFETY: `dispatch` is present, so `storage` holds its live payload.
        let r = unsafe { dispatch.invoke(self.storage.as_ptr(), args) };
        Ok(r)
    }

    /// Returns `true` if the payload has been moved out.
    pub fn is_empty(&self) -> bool {
        self.dispatch.is_none()
    }

    /// Name of the payload's concrete type, `None` when empty.
    pub fn type_name(&self) -> Option<&'static str> {
        self.dispatch.map(|d| d.type_name())
    }

    pub(crate) const fn empty() -> Self {
        Self {
            storage: Storage::uninit(),
            dispatch: None,
            _not_send: PhantomData,
        }
    }

    /// Destroys the payload, if any, and leaves the container empty.
    fn clear(&mut self) {
        // Emptied before destroying: a panicking destructor must not be run
        // again by `Drop`.
        if let Some(dispatch) = self.dispatch.take() {
            trace!(
                payload = dispatch.type_name(),
                "InplaceValue: destroy payload"
            );

            // SAFETY: `dispatch` was present, so `storage` holds its live
            // payload, and the container no longer refers to it.
            unsafe { dispatch.destroy(self.storage.as_mut_ptr()) }
        }
    }
}

impl<A: 'static, R: 'static, const SIZE: usize> Drop
    for InplaceValue<A, R, SIZE>
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<A: 'static, R: 'static, const SIZE: usize> fmt::Debug
    for InplaceValue<A, R, SIZE>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InplaceValue")
            .field("payload", &self.type_name().unwrap_or("<empty>"))
            .field("capacity", &SIZE)
            .finish()
    }
}

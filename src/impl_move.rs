//! Ownership transfer between containers.
//!
//! A Rust move of an `InplaceValue` (`let b = a;`) already transfers the
//! payload and makes `a` unusable at compile time. The operations here cover
//! the cases where the source must stay usable as an *empty* container: moving
//! out of a slot behind `&mut`, and overwriting an occupied container.
//!
//! Every transfer goes through the relocate action of the payload's dispatch
//! record, and always leaves exactly one live payload: in the destination.

use std::ptr;

use crate::storage::MAX_ALIGN;
use crate::tracing_macros::debug;
use crate::tracing_macros::trace;
use crate::InplaceValue;

impl<A: 'static, R: 'static, const SIZE: usize> InplaceValue<A, R, SIZE> {
    /// Moves the payload out into a new container and leaves `self` empty.
    ///
    /// Taking from an empty container returns an empty container.
    ///
    /// ```
    /// use inplace_value::FromFn;
    /// use inplace_value::InplaceValue;
    ///
    /// let mut a: InplaceValue<(), u8, 8> =
    ///     InplaceValue::new(FromFn(|()| 7u8));
    /// let b = a.take();
    ///
    /// assert_eq!(b.invoke(()), 7);
    /// assert!(a.is_empty());
    /// assert!(a.try_invoke(()).is_err());
    /// ```
    #[must_use = "the payload is dropped along with the returned container"]
    pub fn take(&mut self) -> Self {
        let mut out = Self::empty();
        out.assign_from(self);
        out
    }

    /// Destroys the current payload, if any, then moves the payload of
    /// `source` into `self`, leaving `source` empty.
    ///
    /// The payload type may differ from the one it replaces. If `source` is
    /// empty, `self` ends up empty.
    ///
    /// Assigning a container to itself cannot be expressed, the two exclusive
    /// borrows would alias:
    ///
    /// ```compile_fail
    /// use inplace_value::FromFn;
    /// use inplace_value::InplaceValue;
    ///
    /// let mut a: InplaceValue<(), u8, 8> =
    ///     InplaceValue::new(FromFn(|()| 7u8));
    /// a.assign_from(&mut a);
    /// ```
    pub fn assign_from(&mut self, source: &mut Self) {
        if ptr::eq(&*self, &*source) {
            return;
        }

        self.clear();

        if let Some(dispatch) = source.dispatch.take() {
            trace!(
                payload = dispatch.type_name(),
                capacity = SIZE,
                "InplaceValue: relocate payload"
            );

            // SAFETY: `source` held a live payload of the record's type; its
            // dispatch slot is already cleared so it will not touch it again.
            // `self` is empty and its storage has the same size and alignment.
            unsafe {
                dispatch.relocate(
                    source.storage.as_mut_ptr(),
                    self.storage.as_mut_ptr(),
                );
            }
            self.dispatch = Some(dispatch);
        }
    }

    /// Replaces the payload with the one held by `source`.
    ///
    /// By-value form of [`assign_from`](Self::assign_from).
    pub fn assign(&mut self, mut source: Self) {
        self.assign_from(&mut source);
    }

    /// Moves the payload into a container with capacity `M`.
    ///
    /// Unlike [`new`](Self::new), the payload type is no longer known
    /// statically, so the fit is checked at runtime against the size recorded
    /// for it. If it does not fit, `self` is returned unchanged.
    ///
    /// ```
    /// use inplace_value::FromFn;
    /// use inplace_value::InplaceValue;
    ///
    /// let n = 5u64;
    /// let v: InplaceValue<(), u64, 64> =
    ///     InplaceValue::new(FromFn(move |()| n));
    ///
    /// let v = v.try_resize::<4>().unwrap_err();
    /// let v = v.try_resize::<8>().unwrap();
    /// assert_eq!(v.invoke(()), 5);
    /// ```
    pub fn try_resize<const M: usize>(
        mut self,
    ) -> Result<InplaceValue<A, R, M>, Self> {
        let mut out = InplaceValue::<A, R, M>::empty();

        let Some(dispatch) = self.dispatch else {
            return Ok(out);
        };

        // Admitted by the const check in `new`; every storage shares it.
        debug_assert!(dispatch.align() <= MAX_ALIGN);

        if dispatch.size() > M {
            debug!(
                payload = dispatch.type_name(),
                size = dispatch.size(),
                capacity = M,
                "InplaceValue: payload does not fit the resized container"
            );
            return Err(self);
        }

        self.dispatch = None;

        // SAFETY: `self` held a live payload of the record's type and no longer
        // refers to it. `out` is empty and large enough, checked above; all
        // storages share the same alignment.
        unsafe {
            dispatch
                .relocate(self.storage.as_mut_ptr(), out.storage.as_mut_ptr());
        }
        out.dispatch = Some(dispatch);

        Ok(out)
    }
}

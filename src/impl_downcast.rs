use std::any::TypeId;

use crate::InplaceValue;

impl<A: 'static, R: 'static, const SIZE: usize> InplaceValue<A, R, SIZE> {
    /// Returns `true` if the payload is of type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.dispatch
            .is_some_and(|d| d.type_id() == TypeId::of::<T>())
    }

    /// Borrows the payload as a `T`, `None` if it is of another type or the
    /// container is empty.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }

        // SAFETY: the storage holds a live `T`, checked above.
        Some(unsafe { self.storage.as_ptr().cast::<T>().as_ref() })
    }

    /// Mutably borrows the payload as a `T`.
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        if !self.is::<T>() {
            return None;
        }

        // SAFETY: the storage holds a live `T`, checked above.
        Some(unsafe { self.storage.as_mut_ptr().cast::<T>().as_mut() })
    }

    /// Moves the payload out as a `T`, or returns `self` unchanged if it holds
    /// another type or nothing.
    pub fn try_into_inner<T: 'static>(mut self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }

        // Ownership passes to the caller; `Drop` must not destroy it.
        self.dispatch = None;

        // SAFETY: the storage held a live `T`; `self` no longer refers to it.
        Ok(unsafe { self.storage.as_ptr().cast::<T>().as_ptr().read() })
    }
}

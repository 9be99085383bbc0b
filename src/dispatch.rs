//! Per-type dispatch records.
//!
//! A [`DispatchRecord`] holds the function pointers an `InplaceValue` needs to
//! operate on a payload whose concrete type has been erased: invoke its
//! capability, destroy it, and relocate it to another storage region.
//!
//! The fields are private to this module. Records can only be obtained through
//! [`DispatchRecord::of`], which pairs every function pointer with one
//! concrete type `T` at compile time. That is the invariant every `unsafe`
//! accessor below relies on: **the record's `T` is the type of the value that
//! lives behind the pointer handed to it**.

use std::any::type_name;
use std::any::TypeId;
use std::mem::align_of;
use std::mem::size_of;
use std::ptr;
use std::ptr::NonNull;

use crate::capability::Capability;

/// Type-erased operations of one concrete payload type.
///
/// One record exists per `(T, A, R)` instantiation. It is built in a `const`
/// block and promoted to `'static`, so every container holding a `T` shares it.
pub(crate) struct DispatchRecord<A, R> {
    type_name: fn() -> &'static str,
    type_id: fn() -> TypeId,
    size: usize,
    align: usize,
    invoke: unsafe fn(NonNull<u8>, A) -> R,
    destroy: unsafe fn(NonNull<u8>),
    relocate: unsafe fn(NonNull<u8>, NonNull<u8>),
}

impl<A: 'static, R: 'static> DispatchRecord<A, R> {
    /// Returns the record for payload type `T`.
    pub(crate) const fn of<T>() -> &'static Self
    where T: Capability<A, Output = R> + 'static {
        const {
            &Self {
                type_name: type_name::<T>,
                type_id: TypeId::of::<T>,
                size: size_of::<T>(),
                align: align_of::<T>(),
                invoke: invoke::<T, A, R>,
                destroy: destroy::<T>,
                relocate: relocate::<T>,
            }
        }
    }
}

impl<A, R> DispatchRecord<A, R> {
    #[inline]
    pub(crate) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline]
    pub(crate) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn align(&self) -> usize {
        self.align
    }

    /// Calls the payload's capability.
    ///
    /// # Safety
    ///
    /// `data` must point to a live value of the type this record was built for.
    #[inline]
    pub(crate) unsafe fn invoke(&self, data: NonNull<u8>, args: A) -> R {
        // SAFETY: forwarded to the caller.
        unsafe { (self.invoke)(data, args) }
    }

    /// Drops the payload in place.
    ///
    /// # Safety
    ///
    /// `data` must point to a live value of the type this record was built for,
    /// and that value must not be used afterwards.
    #[inline]
    pub(crate) unsafe fn destroy(&self, data: NonNull<u8>) {
        // SAFETY: forwarded to the caller.
        unsafe { (self.destroy)(data) }
    }

    /// Moves the payload from `src` to `dst`.
    ///
    /// # Safety
    ///
    /// `src` must point to a live value of the type this record was built for.
    /// `dst` must be valid for writes of that type and suitably aligned, and
    /// must not overlap `src`. Afterwards `src` is logically uninitialized.
    #[inline]
    pub(crate) unsafe fn relocate(&self, src: NonNull<u8>, dst: NonNull<u8>) {
        // SAFETY: forwarded to the caller.
        unsafe { (self.relocate)(src, dst) }
    }
}

unsafe fn invoke<T, A, R>(data: NonNull<u8>, args: A) -> R
where T: Capability<A, Output = R> {
    // SAFETY: `data` points to a live `T`, guaranteed by the caller. The
    // storage behind it is an `UnsafeCell`, so `T` may mutate itself through
    // this shared reference.
    let value = unsafe { data.cast::<T>().as_ref() };
    value.invoke(args)
}

unsafe fn destroy<T>(data: NonNull<u8>) {
    // SAFETY: `data` points to a live `T` that is never used again.
    unsafe { ptr::drop_in_place(data.cast::<T>().as_ptr()) }
}

unsafe fn relocate<T>(src: NonNull<u8>, dst: NonNull<u8>) {
    // SAFETY: `src` holds a live `T`, `dst` is a disjoint slot for one.
    unsafe {
        let value = ptr::read(src.cast::<T>().as_ptr());
        ptr::write(dst.cast::<T>().as_ptr(), value);
    }
}

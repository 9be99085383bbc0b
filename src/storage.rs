use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

/// Alignment of every [`Storage`], whatever its size.
///
/// Matches `max_align_t` on the mainstream 64-bit targets.
pub const MAX_ALIGN: usize = 16;

/// Uninitialized, `MAX_ALIGN`-aligned bytes that hold at most one payload.
///
/// `Storage` never knows whether it is occupied; the owning `InplaceValue`
/// tracks that through its dispatch slot.
///
/// The bytes sit in an `UnsafeCell`: a payload reached through `&Storage` may
/// still mutate itself through `Cell`, `RefCell` or atomics, so the pointer
/// handed to the dispatch thunks must permit writes even from `&self`.
#[repr(C, align(16))]
pub(crate) struct Storage<const SIZE: usize> {
    bytes: UnsafeCell<MaybeUninit<[u8; SIZE]>>,
}

impl<const SIZE: usize> Storage<SIZE> {
    #[inline]
    pub(crate) const fn uninit() -> Self {
        Self {
            bytes: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Pointer to the first byte, valid for reads and writes.
    #[inline]
    pub(crate) fn as_ptr(&self) -> NonNull<u8> {
        // SAFETY: `UnsafeCell::get` never returns null.
        unsafe { NonNull::new_unchecked(self.bytes.get().cast()) }
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> NonNull<u8> {
        NonNull::from(self.bytes.get_mut()).cast()
    }
}

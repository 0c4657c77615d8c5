//! The backing array the benchmark chases pointers through.
//!
//! The memory comes straight from an anonymous private `mmap` with `MAP_POPULATE`, so every page
//! is faulted in before the array is handed out and no allocator sits between the benchmark and
//! the kernel.

use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use libc::{
    mmap as libc_mmap, munmap as libc_munmap, MAP_ANONYMOUS, MAP_FAILED, MAP_POPULATE,
    MAP_PRIVATE, PROT_READ, PROT_WRITE,
};

use crate::error::{Error, Result};

/// A fixed-length, zero-filled array of `u64` backed by its own mapping.
///
/// Always holds at least two entries.
pub struct BackingArray {
    ptr: *mut u64,
    len: usize,
}

// The mapping is uniquely owned, like a `Box<[u64]>`.
unsafe impl Send for BackingArray {}
unsafe impl Sync for BackingArray {}

impl BackingArray {
    /// Map `len` entries.
    ///
    /// Fails with `Error::ArrayTooSmall` if `len < 2`, and with `Error::Allocation` if the byte
    /// size overflows or the kernel refuses the mapping.
    pub fn allocate(len: usize) -> Result<Self> {
        if len < 2 {
            return Err(Error::ArrayTooSmall { len });
        }

        let bytes = len
            .checked_mul(std::mem::size_of::<u64>())
            .ok_or(Error::Allocation {
                bytes: usize::MAX,
                errno: errno::Errno(libc::ENOMEM),
            })?;

        let addr = unsafe {
            libc_mmap(
                ptr::null_mut(),
                bytes,
                PROT_READ | PROT_WRITE,
                MAP_PRIVATE | MAP_ANONYMOUS | MAP_POPULATE,
                -1,
                0,
            )
        };

        if addr == MAP_FAILED {
            return Err(Error::Allocation {
                bytes,
                errno: errno::errno(),
            });
        }

        Ok(BackingArray {
            ptr: addr as *mut u64,
            len,
        })
    }

    /// Size of the mapping in bytes.
    pub fn bytes(&self) -> usize {
        self.len * std::mem::size_of::<u64>()
    }
}

impl Deref for BackingArray {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl DerefMut for BackingArray {
    fn deref_mut(&mut self) -> &mut [u64] {
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl Drop for BackingArray {
    fn drop(&mut self) {
        let res = unsafe { libc_munmap(self.ptr as *mut libc::c_void, self.bytes()) };

        if res != 0 {
            log::warn!("munmap of backing array failed: {}", errno::errno());
        }
    }
}

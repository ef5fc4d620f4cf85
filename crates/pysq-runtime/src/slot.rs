//! A single variable slot and its allocation primitive.

use pysq_core::TableError;

/// One entry of the variable table.
///
/// `data` is `Some` exactly when the slot is initialized. The generation
/// counter increments on every release and wraps at `u32::MAX`.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    data: Option<Box<[u8]>>,
    generation: u32,
}

impl Slot {
    pub(crate) fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    pub(crate) fn size(&self) -> Option<usize> {
        self.data.as_ref().map(|d| d.len())
    }

    pub(crate) fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }

    /// Install a buffer. The caller must have released any previous one.
    pub(crate) fn install(&mut self, buf: Box<[u8]>) {
        debug_assert!(self.data.is_none(), "installing over a live allocation");
        self.data = Some(buf);
    }

    /// Drop the buffer and bump the generation. Returns the released size,
    /// or `None` if the slot was already empty.
    pub(crate) fn release(&mut self) -> Option<usize> {
        let buf = self.data.take()?;
        self.generation = self.generation.wrapping_add(1);
        Some(buf.len())
    }
}

/// Allocate a zeroed buffer of exactly `size` bytes.
///
/// Uses a fallible reservation so allocator refusal surfaces as
/// [`TableError::OutOfMemory`] rather than aborting the process.
pub(crate) fn allocate(size: usize) -> Result<Box<[u8]>, TableError> {
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| TableError::OutOfMemory { requested: size })?;
    buf.resize(size, 0);
    Ok(buf.into_boxed_slice())
}

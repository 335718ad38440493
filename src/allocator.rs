//! Offset allocator used for per-frame bookkeeping.
//!
//! Blocks are addresses computed from a user supplied base. Nothing is ever
//! read from or written to them; they only live for the duration of a frame.

use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemBlock {
    pub addr: usize,
    pub size: usize,
}

impl fmt::Display for MemBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} ({} bytes)", self.addr, self.size)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OffsetAllocator {
    base: usize,
}

impl OffsetAllocator {
    pub fn new(base: usize) -> OffsetAllocator {
        OffsetAllocator { base }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Block address is `base + size`. `None` if that overflows the address space.
    pub fn allocate(&self, size: usize) -> Option<MemBlock> {
        self.base
            .checked_add(size)
            .map(|addr| MemBlock { addr, size })
    }
}

/// Parses an address the way `strtoull(text, nullptr, 0)` picks a radix:
/// `0x`/`0X` prefix is hex, a leading `0` is octal, anything else decimal.
/// One leading `+` is allowed; a `-` is rejected instead of wrapping around.
pub fn parse_base_address(text: &str) -> Result<usize> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (digits, radix) = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (hex, 16)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        (&trimmed[1..], 8)
    } else {
        (trimmed, 10)
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(Error::InvalidAddress(text.to_string()));
    }
    usize::from_str_radix(digits, radix).map_err(|_| Error::InvalidAddress(text.to_string()))
}

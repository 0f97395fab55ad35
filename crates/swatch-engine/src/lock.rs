//! Locked-role preservation.
//!
//! A lock pins a role to the value it had before regeneration. Merging is
//! all-or-nothing: if any locked role has no prior value the merge fails
//! rather than silently keeping the fresh one.

use crate::error::{PaletteError, PaletteResult};
use crate::palette::{LockSet, Palette};

/// `new` with every locked role copied verbatim from `old`.
///
/// Locked values are copied as strings, never reparsed or renormalized.
///
/// # Errors
///
/// [`PaletteError::LockedRoleMissing`] for the first locked role `old`
/// does not carry.
pub fn merge(new: &Palette, old: &Palette, locks: &LockSet) -> PaletteResult<Palette> {
    check_locks(old, locks)?;

    let mut out = new.clone();
    for role in locks.iter() {
        if let Some(value) = old.get(role) {
            out.insert(role, value.to_string());
        }
    }
    Ok(out)
}

/// Fail fast if `base` cannot satisfy `locks`.
///
/// # Errors
///
/// [`PaletteError::LockedRoleMissing`] naming the first missing role.
pub fn check_locks(base: &Palette, locks: &LockSet) -> PaletteResult<()> {
    match locks.iter().find(|role| !base.contains(role)) {
        Some(role) => Err(PaletteError::LockedRoleMissing { role: role.to_string() }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

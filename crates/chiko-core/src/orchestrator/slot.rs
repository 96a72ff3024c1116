//! Per-slot in-flight guards

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Logical call site admitting one request at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Chat session
    Chat,
    /// Image generation screen
    Generate,
    /// Image edit screen
    Edit,
}

impl Slot {
    /// Slot name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Generate => "generate",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds a slot busy until dropped
#[derive(Debug)]
pub struct SlotGuard {
    slot: Slot,
    flag: Arc<AtomicBool>,
}

impl SlotGuard {
    /// Slot held by this guard
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub(crate) struct SlotTable {
    chat: Arc<AtomicBool>,
    generate: Arc<AtomicBool>,
    edit: Arc<AtomicBool>,
}

impl SlotTable {
    fn flag(&self, slot: Slot) -> &Arc<AtomicBool> {
        match slot {
            Slot::Chat => &self.chat,
            Slot::Generate => &self.generate,
            Slot::Edit => &self.edit,
        }
    }

    /// Claim `slot`, or `None` if a request already holds it
    pub(crate) fn try_acquire(&self, slot: Slot) -> Option<SlotGuard> {
        let flag = self.flag(slot);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotGuard {
                slot,
                flag: Arc::clone(flag),
            })
    }

    pub(crate) fn is_busy(&self, slot: Slot) -> bool {
        self.flag(slot).load(Ordering::Acquire)
    }
}

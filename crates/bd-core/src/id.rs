use lasso::{Spur, ThreadedRodeo};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for object IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for scene objects.
/// Internally a 4-byte `Spur` index, so copies and comparisons are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Spur);

impl ObjectId {
    /// Intern a string as an ObjectId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ObjectId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique ID with a kind prefix (e.g. `block_1`, `port_2`).
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    /// Look up an already-interned ID without creating a new entry.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ObjectId)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

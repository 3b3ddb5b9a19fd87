//! Shape identity.
//!
//! Ids are interned strings: the board stores a small `Copy` handle and the
//! text form only appears at the edges (logs, JSON).

use crate::model::ShapeType;
use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Suffix for the next generated id. Shared by all shape types, so a suffix
/// is never reused even across types.
static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Names one shape on the board for its whole life, across moves, resizes,
/// undo and redo.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(Spur);

impl ShapeId {
    /// The id named `name`. Equal names always give equal ids.
    pub fn intern(name: &str) -> Self {
        ShapeId(NAMES.get_or_intern(name))
    }

    /// A never-before-generated id for a new shape, e.g. `ellipse_7`.
    pub fn fresh(shape_type: ShapeType) -> Self {
        let suffix = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{}_{suffix}", shape_type.name()))
    }

    pub fn as_str(&self) -> &str {
        NAMES.resolve(&self.0)
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// On the wire an id is just its name.
impl Serialize for ShapeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShapeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ShapeId::intern(&name))
    }
}

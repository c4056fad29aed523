//! Tunable constants shared across the search.

pub const MAX_PLY: u16 = 126;
pub const THREAD_STACK_SIZE: usize = MAX_PLY as usize + 7;
pub const MAX_THREADS: usize = 256;

pub const DEFAULT_TT_SIZE_MB: usize = 256;

/// Marker trait distinguishing PV nodes (full window, exact score expected) from
/// non-PV nodes (null window, only a cutoff test) at compile time, letting the search
/// monomorphize its hottest loop instead of branching on a node-type flag at runtime.
pub trait PVNode {
    fn is_pv() -> bool;
}

pub struct PV {}
pub struct NonPV {}

impl PVNode for PV {
    fn is_pv() -> bool {
        true
    }
}

impl PVNode for NonPV {
    fn is_pv() -> bool {
        false
    }
}

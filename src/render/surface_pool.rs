use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::foundation::error::FiguraResult;
use crate::render::surface::{Surface, SurfaceDesc};

/// Source of scratch surfaces used while painting.
///
/// `acquire` must hand out a zeroed surface matching `desc`. Every acquired
/// surface is given back through `release`.
pub trait SurfaceCache {
    /// Obtain a zeroed surface for `desc`.
    fn acquire(&self, desc: SurfaceDesc) -> anyhow::Result<Surface>;

    /// Give a surface back.
    fn release(&self, surface: Surface);
}

/// Scoped scratch surface, released to its cache on drop.
pub struct PooledSurface<'a> {
    cache: &'a dyn SurfaceCache,
    surface: Surface,
}

impl<'a> PooledSurface<'a> {
    /// Acquire a zeroed surface from `cache`.
    pub fn acquire(cache: &'a dyn SurfaceCache, desc: SurfaceDesc) -> FiguraResult<Self> {
        let surface = cache.acquire(desc)?;
        Ok(Self { cache, surface })
    }
}

impl Deref for PooledSurface<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        &self.surface
    }
}

impl DerefMut for PooledSurface<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

impl Drop for PooledSurface<'_> {
    fn drop(&mut self) {
        self.cache.release(std::mem::take(&mut self.surface));
    }
}

/// Pool configuration for cached surfaces.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoolOpts {
    /// Maximum bytes retained across all buckets.
    pub max_pool_bytes: usize,
    /// Maximum number of retained surfaces per (w,h,format) bucket.
    pub max_surfaces_per_bucket: usize,
}

impl Default for SurfacePoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 64 * 1024 * 1024,
            max_surfaces_per_bucket: 8,
        }
    }
}

/// Counters exposed by [`SurfacePool::stats`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfacePoolStats {
    /// Surfaces currently kept for reuse.
    pub retained_surfaces: usize,
    /// Bytes currently kept for reuse.
    pub retained_bytes: usize,
    /// Fresh allocations so far.
    pub alloc_surfaces: u64,
    /// Bytes of fresh allocations so far.
    pub alloc_bytes: u64,
    /// Released surfaces that did not fit the caps.
    pub dropped_on_release: u64,
    /// Surfaces acquired and not yet released.
    pub outstanding: usize,
}

#[derive(Default)]
struct PoolState {
    stats: SurfacePoolStats,
    // Hash lookup is acceptable here: acquisition is per figure, not per pixel.
    bucket_idx_by_key: HashMap<SurfaceDesc, usize>,
    buckets: Vec<Vec<Surface>>,
}

/// Bounded pool of scratch surfaces keyed by `(width, height, format)`.
pub struct SurfacePool {
    opts: SurfacePoolOpts,
    state: RefCell<PoolState>,
}

impl SurfacePool {
    /// Create an empty pool.
    pub fn new(opts: SurfacePoolOpts) -> Self {
        Self {
            opts,
            state: RefCell::new(PoolState::default()),
        }
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> SurfacePoolStats {
        self.state.borrow().stats.clone()
    }
}

impl Default for SurfacePool {
    fn default() -> Self {
        Self::new(SurfacePoolOpts::default())
    }
}

impl SurfaceCache for SurfacePool {
    fn acquire(&self, desc: SurfaceDesc) -> anyhow::Result<Surface> {
        let mut st = self.state.borrow_mut();
        st.stats.outstanding += 1;

        if let Some(&bi) = st.bucket_idx_by_key.get(&desc)
            && let Some(mut s) = st.buckets[bi].pop()
        {
            st.stats.retained_surfaces = st.stats.retained_surfaces.saturating_sub(1);
            st.stats.retained_bytes = st.stats.retained_bytes.saturating_sub(desc.byte_len());
            s.clear();
            return Ok(s);
        }

        st.stats.alloc_surfaces = st.stats.alloc_surfaces.saturating_add(1);
        st.stats.alloc_bytes = st
            .stats
            .alloc_bytes
            .saturating_add(desc.byte_len() as u64);
        tracing::trace!(w = desc.width, h = desc.height, "allocating scratch surface");
        Ok(Surface::with_desc(desc))
    }

    fn release(&self, surface: Surface) {
        let mut st = self.state.borrow_mut();
        st.stats.outstanding = st.stats.outstanding.saturating_sub(1);

        if self.opts.max_pool_bytes == 0 || self.opts.max_surfaces_per_bucket == 0 {
            st.stats.dropped_on_release = st.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let desc = surface.desc();
        let bytes = desc.byte_len();
        if st.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes {
            st.stats.dropped_on_release = st.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bi = match st.bucket_idx_by_key.get(&desc).copied() {
            Some(i) => i,
            None => {
                let i = st.buckets.len();
                st.buckets.push(Vec::new());
                st.bucket_idx_by_key.insert(desc, i);
                i
            }
        };

        if st.buckets[bi].len() >= self.opts.max_surfaces_per_bucket {
            st.stats.dropped_on_release = st.stats.dropped_on_release.saturating_add(1);
            return;
        }

        st.buckets[bi].push(surface);
        st.stats.retained_surfaces = st.stats.retained_surfaces.saturating_add(1);
        st.stats.retained_bytes = st.stats.retained_bytes.saturating_add(bytes);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface_pool.rs"]
mod tests;

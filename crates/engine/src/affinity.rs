//! CPU pinning for worker and epoch-advancer threads.

use core_affinity::CoreId;

/// Return one core id per requested slot if the platform exposes at least
/// that many logical cores, else `None` (the caller falls back to
/// unpinned threads and logs a warning).
pub fn core_ids_for(count: usize) -> Option<Vec<CoreId>> {
    let ids = core_affinity::get_core_ids()?;
    if ids.len() < count {
        return None;
    }
    Some(ids.into_iter().take(count).collect())
}

/// Pin the calling thread to `core_id`, if given. A `None` pin is a no-op,
/// matching the unpinned fallback.
pub fn pin_current_thread(core_id: Option<CoreId>) {
    if let Some(id) = core_id {
        if !core_affinity::set_for_current(id) {
            tracing::warn!(?id, "failed to pin thread to core");
        }
    }
}

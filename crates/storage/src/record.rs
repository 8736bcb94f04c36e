//! The atomically-manipulated record: a fixed-size key/value pair guarded by
//! a single-word control word.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::control_word::ControlWord;

/// Fixed width of a value payload, in bytes.
///
/// The reference tool maps a 64-bit integer into a configurable `VAL_SIZE`;
/// this implementation fixes it at 8 bytes (exactly one `u64`), which is
/// sufficient for every workload in this benchmark's scope.
pub const VAL_SIZE: usize = 8;

/// A single table record: an immutable key, a control word, and a mutable
/// value payload whose access is gated entirely by the control word's lock
/// bit.
///
/// # Safety model
///
/// `value` is an [`UnsafeCell`] rather than a `Mutex`, because the lock
/// protecting it already lives in `word` — wrapping it in a second lock
/// would defeat the point of a lock-free control word. Every accessor that
/// touches `value` is `unsafe` and documents the invariant the caller must
/// uphold. `Record` is `Sync` because the executors that hold `&Record`
/// across threads only ever read or write `value` while they have
/// externally established, via the control word protocol, that no other
/// thread can be doing the same concurrently (either they hold the lock, or
/// they are in the optimistic-read retry loop and validate the word did not
/// change around the copy).
pub struct Record<W: ControlWord> {
    word: AtomicU64,
    key: cc_core::Key,
    value: UnsafeCell<[u8; VAL_SIZE]>,
    _word: std::marker::PhantomData<W>,
}

// SAFETY: see the struct-level safety note. All mutable access to `value`
// goes through `unsafe` methods whose callers serialize on the control word.
unsafe impl<W: ControlWord> Sync for Record<W> {}

impl<W: ControlWord> Record<W> {
    /// Construct a record with an initial control word and value.
    pub fn new(key: cc_core::Key, initial_word: W, initial_value: [u8; VAL_SIZE]) -> Self {
        Self {
            word: AtomicU64::new(initial_word.to_raw()),
            key,
            value: UnsafeCell::new(initial_value),
            _word: std::marker::PhantomData,
        }
    }

    /// The record's key.
    pub fn key(&self) -> cc_core::Key {
        self.key
    }

    /// Load the control word with acquire ordering.
    ///
    /// Used to gate every read of `value` and to observe whether the
    /// record is currently locked.
    pub fn load_acquire(&self) -> W {
        W::from_raw(self.word.load(Ordering::Acquire))
    }

    /// Attempt to set the lock bit, failing if the observed word does not
    /// match `expected` (including if it is already locked).
    ///
    /// Per the control-word contract: relaxed ordering on failure, acq-rel
    /// on success.
    pub fn try_lock(&self, expected: W) -> Result<W, W> {
        let desired = expected.locked();
        match self.word.compare_exchange(
            expected.to_raw(),
            desired.to_raw(),
            Ordering::AcqRel,
            Ordering::Relaxed,
        ) {
            Ok(_) => Ok(desired),
            Err(actual) => Err(W::from_raw(actual)),
        }
    }

    /// General compare-exchange on the raw word, used by TicToc's rts
    /// extension and by unlock-on-abort paths that need a fresh read first.
    pub fn compare_exchange(&self, expected: W, desired: W) -> Result<W, W> {
        match self.word.compare_exchange(
            expected.to_raw(),
            desired.to_raw(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(desired),
            Err(actual) => Err(W::from_raw(actual)),
        }
    }

    /// Publish a new control word unconditionally, with release ordering.
    ///
    /// Used to clear the lock bit on abort, and to publish the committed
    /// word (and, by convention, the new value) at the end of a commit.
    pub fn store_release(&self, new: W) {
        self.word.store(new.to_raw(), Ordering::Release);
    }

    /// Copy the current value out.
    ///
    /// # Safety
    ///
    /// The caller must have just observed, via [`Self::load_acquire`], a
    /// word with the lock bit clear, and must re-validate (reload the word
    /// and compare) after the copy before trusting it — this is the Silo
    /// and TicToc optimistic-read protocol. Calling this while racing an
    /// unvalidated writer produces a torn read that the caller is
    /// responsible for detecting and retrying.
    pub unsafe fn read_value_unchecked(&self) -> [u8; VAL_SIZE] {
        *self.value.get()
    }

    /// Overwrite the value.
    ///
    /// # Safety
    ///
    /// The caller must hold the lock bit on this record (via a successful
    /// [`Self::try_lock`] whose `cll` entry has not yet been released).
    pub unsafe fn write_value_unchecked(&self, bytes: [u8; VAL_SIZE]) {
        *self.value.get() = bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_word::SiloTidWord;

    #[test]
    fn try_lock_succeeds_from_unlocked_and_fails_when_held() {
        let word = SiloTidWord::new(false, 0, 0);
        let r = Record::new(1, word, [0; VAL_SIZE]);

        let locked = r.try_lock(word).expect("first lock should succeed");
        assert!(locked.is_locked());

        // A second attempt with the stale unlocked expectation must fail.
        assert!(r.try_lock(word).is_err());
    }

    #[test]
    fn store_release_then_load_acquire_roundtrips() {
        let word = SiloTidWord::new(false, 0, 0);
        let r = Record::new(1, word, [0; VAL_SIZE]);
        let new_word = SiloTidWord::new(false, 5, 1);
        r.store_release(new_word);
        assert_eq!(r.load_acquire(), new_word);
    }

    #[test]
    fn value_write_then_read_roundtrips_under_lock() {
        let word = SiloTidWord::new(false, 0, 0);
        let r = Record::new(1, word, [0; VAL_SIZE]);
        let locked = r.try_lock(word).unwrap();
        unsafe {
            r.write_value_unchecked([7; VAL_SIZE]);
            assert_eq!(r.read_value_unchecked(), [7; VAL_SIZE]);
        }
        r.store_release(locked.unlocked());
    }
}

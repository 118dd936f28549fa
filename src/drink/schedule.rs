//! Countdown lists for scheduled drink consequences
//!
//! Both the delayed-effect queue and the timed-attribute queue are an
//! `ExpiringList`: entries count down once per tick, stay active while the
//! countdown is positive, and are dropped on the tick it reaches zero.

/// A scheduled payload with its countdown and the drink snapshot it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntry<P> {
    pub ticks_left: i32,
    pub quality: f64,
    pub age: f64,
    payload: Vec<P>,
}

impl<P: Clone> ScheduledEntry<P> {
    /// Copy `payload` into a new entry; later changes to the source slice
    /// never reach the entry.
    pub fn new(ticks: i32, age: f64, quality: f64, payload: &[P]) -> Self {
        Self::from_parts(ticks, age, quality, payload.to_vec())
    }
}

impl<P> ScheduledEntry<P> {
    pub(crate) fn from_parts(ticks: i32, age: f64, quality: f64, payload: Vec<P>) -> Self {
        Self {
            ticks_left: ticks,
            quality,
            age,
            payload,
        }
    }

    pub fn payload(&self) -> &[P] {
        &self.payload
    }
}

/// Insertion-ordered list of scheduled entries
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiringList<P> {
    entries: Vec<ScheduledEntry<P>>,
}

impl<P> Default for ExpiringList<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P> ExpiringList<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ScheduledEntry<P>) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEntry<P>> {
        self.entries.iter()
    }

    /// Count every entry down by one tick.
    ///
    /// Entries whose countdown is still positive are handed to `on_active`
    /// and kept. The rest go to `on_expire` exactly once and are dropped.
    /// Both callbacks receive `ctx`. Returns how many entries expired.
    pub fn advance<C, A, E>(&mut self, ctx: &mut C, mut on_active: A, mut on_expire: E) -> usize
    where
        C: ?Sized,
        A: FnMut(&mut C, &ScheduledEntry<P>),
        E: FnMut(&mut C, &ScheduledEntry<P>),
    {
        let before = self.entries.len();
        self.entries.retain_mut(|entry| {
            entry.ticks_left = entry.ticks_left.saturating_sub(1);
            if entry.ticks_left > 0 {
                on_active(&mut *ctx, &*entry);
                true
            } else {
                on_expire(&mut *ctx, &*entry);
                false
            }
        });
        before - self.entries.len()
    }
}

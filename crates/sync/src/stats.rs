/// Per-run counters, reset at the start of every [`run`](crate::SyncEngine::run).
///
/// `processed` counts every record seen, including skips and the record
/// that short-circuited the run. `created` and `updated` only count
/// successful note writes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub processed: u64,
    pub created: u64,
    pub updated: u64,
}

impl std::ops::AddAssign for SyncStats {
    fn add_assign(&mut self, rhs: Self) {
        self.processed += rhs.processed;
        self.created += rhs.created;
        self.updated += rhs.updated;
    }
}

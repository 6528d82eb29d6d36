use serde::Serialize;

/// Milliseconds since the Unix epoch, as carried by the earthquake feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EpochMillis(pub i64);

impl EpochMillis {
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for EpochMillis {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

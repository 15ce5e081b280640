use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
/// Decoder counters
pub enum Counter {
    #[strum(serialize = "decoder.ethernet")]
    Ethernet,
    #[strum(serialize = "decoder.vlan")]
    Vlan,
    #[strum(serialize = "decoder.erspan")]
    Erspan,
}

/// Decoder statistic information
///
/// Each worker thread owns its own, so no synchronization is involved
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Total decoded ethernet frames
    pub ethernet: u64,
    /// Total decoded VLAN headers
    pub vlan: u64,
    /// Total ERSPAN packets seen, including the malformed ones
    pub erspan: u64,
}

impl Stats {
    #[inline]
    pub fn incr(&mut self, counter: Counter) {
        *self.counter_mut(counter) += 1;
    }

    fn counter_mut(&mut self, counter: Counter) -> &mut u64 {
        match counter {
            Counter::Ethernet => &mut self.ethernet,
            Counter::Vlan => &mut self.vlan,
            Counter::Erspan => &mut self.erspan,
        }
    }
}

impl std::ops::AddAssign for Stats {
    fn add_assign(&mut self, rhs: Self) {
        self.ethernet += rhs.ethernet;
        self.vlan += rhs.vlan;
        self.erspan += rhs.erspan;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr() {
        let mut stats = Stats::default();
        stats.incr(Counter::Erspan);
        stats.incr(Counter::Erspan);
        stats.incr(Counter::Vlan);
        assert_eq!(stats.erspan, 2);
        assert_eq!(stats.vlan, 1);
        assert_eq!(stats.ethernet, 0);
    }

    #[test]
    fn gather() {
        let mut total = Stats::default();
        let mut worker = Stats::default();
        worker.incr(Counter::Ethernet);
        total += worker.clone();
        total += worker;
        assert_eq!(total.ethernet, 2);
    }

    #[test]
    fn counter_names() -> anyhow::Result<()> {
        let name: &str = Counter::Erspan.as_ref();
        assert_eq!(name, "decoder.erspan");
        let mut stats = Stats::default();
        stats.incr(Counter::Erspan);
        assert_eq!(
            serde_json::to_string(&stats)?,
            r#"{"ethernet":0,"vlan":0,"erspan":1}"#
        );
        Ok(())
    }
}

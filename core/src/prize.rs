use alloc::string::{String, ToString};
use core::slice;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Prize tiers as numbered by the scratch-card contract.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PrizeTier {
    #[default]
    NoPrize = 0,
    GrandPrize = 1,
    SmallPrize = 2,
    LuckyPrize = 3,
}

impl PrizeTier {
    /// Unknown codes are treated as no prize.
    pub const fn from_code(code: u8) -> Self {
        use PrizeTier::*;
        match code {
            1 => GrandPrize,
            2 => SmallPrize,
            3 => LuckyPrize,
            _ => NoPrize,
        }
    }

    pub const fn label(self) -> &'static str {
        use PrizeTier::*;
        match self {
            NoPrize => "谢谢惠顾",
            GrandPrize => "大奖",
            SmallPrize => "小奖",
            LuckyPrize => "幸运奖",
        }
    }

    pub const fn is_win(self) -> bool {
        !matches!(self, Self::NoPrize)
    }
}

/// Decoded arguments of one `LotteryResultEvent` log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeEvent {
    pub prize: u8,
    /// Payout in wei, as a decimal string.
    #[serde(default)]
    pub amount: String,
}

impl PrizeEvent {
    pub fn tier(&self) -> PrizeTier {
        PrizeTier::from_code(self.prize)
    }
}

/// Ordered prize labels shown under the mask. Fixed once a session opens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(SmallVec<[String; 1]>);

impl ResultSet {
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Fallback shown when the result could not be reconciled.
    pub fn no_prize() -> Self {
        Self::from_tiers([PrizeTier::NoPrize])
    }

    pub fn from_tiers<I: IntoIterator<Item = PrizeTier>>(tiers: I) -> Self {
        Self::new(tiers.into_iter().map(PrizeTier::label))
    }

    pub fn from_events<'a, I: IntoIterator<Item = &'a PrizeEvent>>(events: I) -> Self {
        Self::from_tiers(events.into_iter().map(PrizeEvent::tier))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The only label, when there is exactly one.
    pub fn single(&self) -> Option<&str> {
        match self.as_slice() {
            [label] => Some(label.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PrizeTier> for ResultSet {
    fn from_iter<I: IntoIterator<Item = PrizeTier>>(iter: I) -> Self {
        Self::from_tiers(iter)
    }
}

impl From<&str> for ResultSet {
    fn from(label: &str) -> Self {
        Self::new([label.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_is_no_prize() {
        assert_eq!(PrizeTier::from_code(1), PrizeTier::GrandPrize);
        assert_eq!(PrizeTier::from_code(3).label(), "幸运奖");
        assert_eq!(PrizeTier::from_code(9), PrizeTier::NoPrize);
        assert!(!PrizeTier::from_code(0).is_win());
    }

    #[test]
    fn events_map_to_labels_in_order() {
        let events: alloc::vec::Vec<PrizeEvent> = serde_json::from_str(
            r#"[{"prize": 2, "amount": "1000000000000000"}, {"prize": 0}]"#,
        )
        .unwrap();

        let results = ResultSet::from_events(&events);

        assert_eq!(results.as_slice(), ["小奖", "谢谢惠顾"]);
        assert_eq!(results.single(), None);
        assert_eq!(events[0].amount, "1000000000000000");
    }

    #[test]
    fn single_result_is_exposed() {
        let results = ResultSet::from("大奖");

        assert_eq!(results.single(), Some("大奖"));
        assert_eq!(ResultSet::no_prize().single(), Some("谢谢惠顾"));
        assert!(ResultSet::default().is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let results: ResultSet = [PrizeTier::GrandPrize, PrizeTier::LuckyPrize]
            .into_iter()
            .collect();

        assert_eq!(
            serde_json::to_string(&results).unwrap(),
            r#"["大奖","幸运奖"]"#
        );
    }
}

//! Pool configuration and its storage-boundary serialization.

use serde::{Deserialize, Serialize};

use crate::essential::{Participant, PayoutSplit, DEFAULT_BOX_PRICE, DEFAULT_VIG_PERCENT};

/// The full editable configuration of a squares pool.  Numeric fields
/// keep their raw input form; parsing happens in the compute paths.
#[derive(Debug, PartialEq, Clone)]
pub struct SquaresConfig {
    pub participants: Vec<Participant>,
    pub team_top: String,
    pub team_left: String,
    pub box_price: String,
    pub payout_split: PayoutSplit,
    pub use_vig: bool,
    pub vig_percent: String,
    pub custom_split_inputs: [String; 4],
}

impl Default for SquaresConfig {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            team_top: String::new(),
            team_left: String::new(),
            box_price: DEFAULT_BOX_PRICE.to_string(),
            payout_split: PayoutSplit::default(),
            use_vig: false,
            vig_percent: DEFAULT_VIG_PERCENT.to_string(),
            custom_split_inputs: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }
}

/// The four raw quarter-percent strings, kept for form repopulation even
/// when never applied.
#[derive(Serialize, Deserialize, Default, PartialEq, Debug, Clone)]
pub struct CustomSplitInputs {
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub q4: String,
}

/// The JSON record stored under the config key.  Field order is fixed;
/// the serialized string doubles as the configuration fingerprint, so
/// two configurations are equal iff their records are byte-equal.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    pub participants: Vec<Participant>,
    pub team_top: String,
    pub team_left: String,
    pub box_price: String,
    pub payout_split: String,
    pub use_vig: bool,
    pub vig_percent: String,
    pub custom_split_inputs: CustomSplitInputs,
}

impl ConfigRecord {
    /// Serialized form used for grid-invalidation equality checks.
    pub fn fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&SquaresConfig> for ConfigRecord {
    fn from(config: &SquaresConfig) -> Self {
        let [q1, q2, q3, q4] = config.custom_split_inputs.clone();
        Self {
            participants: config.participants.clone(),
            team_top: config.team_top.clone(),
            team_left: config.team_left.clone(),
            box_price: config.box_price.clone(),
            payout_split: config.payout_split.token(),
            use_vig: config.use_vig,
            vig_percent: config.vig_percent.clone(),
            custom_split_inputs: CustomSplitInputs { q1, q2, q3, q4 },
        }
    }
}

impl From<&ConfigRecord> for SquaresConfig {
    fn from(record: &ConfigRecord) -> Self {
        let inputs = &record.custom_split_inputs;
        Self {
            participants: record.participants.clone(),
            team_top: record.team_top.clone(),
            team_left: record.team_left.clone(),
            box_price: if record.box_price.is_empty() {
                DEFAULT_BOX_PRICE.to_string()
            } else {
                record.box_price.clone()
            },
            // An unknown token falls back to the default split, the same
            // way the form select falls back to its first option.
            payout_split: PayoutSplit::from_token(&record.payout_split).unwrap_or_default(),
            use_vig: record.use_vig,
            vig_percent: if record.vig_percent.is_empty() {
                DEFAULT_VIG_PERCENT.to_string()
            } else {
                record.vig_percent.clone()
            },
            custom_split_inputs: [
                inputs.q1.clone(),
                inputs.q2.clone(),
                inputs.q3.clone(),
                inputs.q4.clone(),
            ],
        }
    }
}

use serde::{Deserialize, Serialize};

/// Node balances per Cashu mint, in the mint's unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintBalance {
    pub mint_url: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub wallet_balance: i64,
    #[serde(default)]
    pub user_balance: i64,
    #[serde(default)]
    pub owner_balance: i64,
    /// Set when the backend could not reach the mint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    #[serde(default)]
    pub total_wallet: i64,
    #[serde(default)]
    pub user_balances: i64,
    #[serde(default)]
    pub owner_balance: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub mints: Vec<MintBalance>,
}

fn default_unit() -> String {
    "sat".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_balance_summary() {
        let json = r#"{
            "total_wallet": 150000,
            "user_balances": 100000,
            "owner_balance": 50000,
            "unit": "msat",
            "mints": [
                { "mint_url": "https://mint.example.com", "wallet_balance": 150000,
                  "user_balance": 100000, "owner_balance": 50000 },
                { "mint_url": "https://down.example.com", "error": "timeout" }
            ]
        }"#;
        let summary: BalanceSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.owner_balance, 50000);
        assert_eq!(summary.mints.len(), 2);
        assert_eq!(summary.mints[0].unit, "sat");
        assert_eq!(summary.mints[1].error.as_deref(), Some("timeout"));
        assert_eq!(summary.mints[1].wallet_balance, 0);
    }

    #[test]
    fn empty_summary_defaults() {
        let summary: BalanceSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.unit, "sat");
        assert!(summary.mints.is_empty());
    }
}

//! Subscription facts and the read-only views derived from them.

use serde::{Deserialize, Serialize};

/// One active subscription as reported by `SubscriptionManager`.
///
/// This is the raw platform record; adapters fill it without applying any
/// version policy. `embedded` is `None` when the platform could not report the
/// flag (the accessor does not exist below API 28).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub subscription_id: i32,
    pub carrier_name: String,
    pub mcc: String,
    pub mnc: String,
    #[serde(default)]
    pub embedded: Option<bool>,
}

impl SubscriptionRecord {
    /// Whether the platform flagged this record as eUICC-backed.
    pub fn is_embedded(&self) -> bool {
        self.embedded == Some(true)
    }

    pub fn carrier_identity(&self) -> CarrierIdentity {
        CarrierIdentity {
            carrier_name: self.carrier_name.clone(),
            mobile_country_code: self.mcc.clone(),
            mobile_network_code: self.mnc.clone(),
        }
    }
}

/// Descriptive fields of the embedded subscription reported by `getEsimInfo`.
///
/// Kept as one value so the three fields are present or absent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierIdentity {
    pub carrier_name: String,
    pub mobile_country_code: String,
    pub mobile_network_code: String,
}

/// Result of `getEsimInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsimInfo {
    pub is_esim_supported: bool,
    pub is_esim_enabled: bool,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<CarrierIdentity>,
}

/// One entry of `getCellularPlans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellularPlan {
    pub carrier_name: String,
    pub mobile_country_code: String,
    pub mobile_network_code: String,
    pub subscription_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_embedded: Option<bool>,
}

impl CellularPlan {
    /// Build a plan from a platform record.
    ///
    /// `report_embedded` is the capability decision for the embedded flag;
    /// when false `isEmbedded` is left out of the plan entirely.
    pub fn from_record(record: &SubscriptionRecord, report_embedded: bool) -> Self {
        Self {
            carrier_name: record.carrier_name.clone(),
            mobile_country_code: record.mcc.clone(),
            mobile_network_code: record.mnc.clone(),
            subscription_id: record.subscription_id,
            is_embedded: report_embedded.then(|| record.is_embedded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(embedded: Option<bool>) -> SubscriptionRecord {
        SubscriptionRecord {
            subscription_id: 3,
            carrier_name: "Telia".to_string(),
            mcc: "240".to_string(),
            mnc: "1".to_string(),
            embedded,
        }
    }

    #[test]
    fn test_esim_info_omits_carrier_fields_when_absent() {
        let info = EsimInfo {
            is_esim_supported: true,
            is_esim_enabled: false,
            carrier: None,
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({"isEsimSupported": true, "isEsimEnabled": false})
        );
    }

    #[test]
    fn test_esim_info_flattens_carrier_fields() {
        let info = EsimInfo {
            is_esim_supported: true,
            is_esim_enabled: true,
            carrier: Some(record(Some(true)).carrier_identity()),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["carrierName"], "Telia");
        assert_eq!(value["mobileCountryCode"], "240");
        assert_eq!(value["mobileNetworkCode"], "1");
    }

    #[test]
    fn test_plan_embedded_flag_gating() {
        let plan = CellularPlan::from_record(&record(Some(true)), true);
        assert_eq!(plan.is_embedded, Some(true));

        let plan = CellularPlan::from_record(&record(None), true);
        assert_eq!(plan.is_embedded, Some(false));

        let plan = CellularPlan::from_record(&record(Some(true)), false);
        assert_eq!(plan.is_embedded, None);
        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.get("isEmbedded").is_none());
        assert_eq!(value["subscriptionId"], 3);
    }
}

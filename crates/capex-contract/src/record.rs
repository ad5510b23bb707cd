//! Capex record type and its JSON codec.
//!
//! Records are stored as JSON objects with the lowercase field tags `bu`,
//! `cocd`, `docno` and `mru`. All four fields are required when decoding.

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ContractResult};

/// A capital-expenditure transaction record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capex {
    /// Business unit.
    pub bu: String,
    /// Company code.
    pub cocd: String,
    /// Document number.
    pub docno: String,
    /// Most recently used value.
    pub mru: String,
}

impl Capex {
    pub fn new(
        bu: impl Into<String>,
        cocd: impl Into<String>,
        docno: impl Into<String>,
        mru: impl Into<String>,
    ) -> Self {
        Self {
            bu: bu.into(),
            cocd: cocd.into(),
            docno: docno.into(),
            mru: mru.into(),
        }
    }

    /// Copy of this record with the MRU field replaced.
    pub fn with_mru(mut self, mru: impl Into<String>) -> Self {
        self.mru = mru.into();
        self
    }

    /// Encode the record as the bytes stored under `key`.
    pub fn encode(&self, key: &str) -> ContractResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ContractError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Decode the bytes stored under `key`.
    pub fn decode(key: &str, bytes: &[u8]) -> ContractResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| ContractError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

/// A key paired with its decoded record, as returned by a full scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Capex,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_with_lowercase_tags() {
        let capex = Capex::new("B1", "C1", "D1", "M1");
        let json: serde_json::Value = serde_json::from_slice(&capex.encode("k").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"bu": "B1", "cocd": "C1", "docno": "D1", "mru": "M1"})
        );
    }

    #[test]
    fn decodes_stored_bytes() {
        let bytes = br#"{"bu":"BU1","cocd":"CC1","docno":"DOC1","mru":"MRU1"}"#;
        let capex = Capex::decode("T100", bytes).unwrap();
        assert_eq!(capex, Capex::new("BU1", "CC1", "DOC1", "MRU1"));
    }

    #[test]
    fn malformed_bytes_are_an_encode_error() {
        let err = Capex::decode("T1", b"{not json").unwrap_err();
        assert!(matches!(err, ContractError::Encode { ref key, .. } if key == "T1"));
    }

    #[test]
    fn missing_field_is_an_encode_error() {
        let err = Capex::decode("T1", br#"{"bu":"B","cocd":"C","docno":"D"}"#).unwrap_err();
        assert!(err.to_string().contains("mru"));
    }

    #[test]
    fn with_mru_only_touches_mru() {
        let capex = Capex::new("B", "C", "D", "M").with_mru("M2");
        assert_eq!(capex, Capex::new("B", "C", "D", "M2"));
    }

    #[test]
    fn query_result_uses_capitalized_tags() {
        let result = QueryResult {
            key: "Transaction0".into(),
            record: Capex::new("B1", "C1", "D1", "M1"),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["Key"], "Transaction0");
        assert_eq!(json["Record"]["bu"], "B1");
    }

    proptest! {
        #[test]
        fn field_values_survive_the_codec(
            bu in ".*",
            cocd in ".*",
            docno in ".*",
            mru in ".*",
        ) {
            let capex = Capex::new(bu, cocd, docno, mru);
            let bytes = capex.encode("k").unwrap();
            prop_assert_eq!(Capex::decode("k", &bytes).unwrap(), capex);
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// JSON body POSTed to the stats endpoint: which statistic to compute and
/// which dataset to compute it on. Constructed once per invocation and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsRequest {
    pub graphic: Graphic,
    pub data: DataRef,
}

/// The statistic to compute, with free-form parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Graphic {
    #[serde(rename = "type")]
    pub kind: String,
    pub parameters: Map<String, Value>,
}

/// Reference to the dataset the server should compute on (a frame URI).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataRef {
    pub uri: String,
}

impl StatsRequest {
    /// A `stats` request exactly as the prototype sent it: three rounding
    /// digits, raw data included.
    pub fn stats(uri: impl Into<String>) -> Self {
        let mut parameters = Map::new();
        parameters.insert("digits".to_string(), json!(3));
        parameters.insert("data".to_string(), json!(true));
        Self {
            graphic: Graphic {
                kind: "stats".to_string(),
                parameters,
            },
            data: DataRef { uri: uri.into() },
        }
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.graphic
            .parameters
            .insert("digits".to_string(), json!(digits));
        self
    }

    pub fn with_data(mut self, data: bool) -> Self {
        self.graphic
            .parameters
            .insert("data".to_string(), json!(data));
        self
    }
}

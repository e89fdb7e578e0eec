//! JSON test vector loader shared by push-lane tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub body: BodyData,
    #[serde(default)]
    pub expect: Option<serde_json::Value>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
}

/// Request body either as raw text (may be malformed) or as embedded JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BodyData {
    Raw { raw: String },
    Json { json: serde_json::Value },
}

impl BodyData {
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            BodyData::Raw { raw } => raw.clone().into_bytes(),
            BodyData::Json { json } => serde_json::to_vec(json).unwrap(),
        }
    }
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

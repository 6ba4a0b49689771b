//! Shared test data: server responses for a small simulation workflow

#![allow(dead_code)]

use dtool_graph_core::DatasetRecord;

pub const ROOT: &str = "a2218059-5bd0-4690-b090-062faf08e046";
pub const TRAJECTORY: &str = "1a1f9fad-8589-413e-9602-5bbd66bfe675";
pub const INPUT: &str = "0ec1dc3b-6ae6-4e3d-a3c2-1e0fb4a0a0f8";
pub const POTENTIAL: &str = "5c5d1a4e-0b87-4fb5-9c1f-1f3f7a0d6b21";
pub const DELETED: &str = "9f2c6b8e-3a71-4d0e-8c55-7e4b2d1a9c03";

/// Post-processing dataset derived from a trajectory, which in turn was
/// derived from an input set and a potential. One reference points to a
/// dataset that has since been removed, one is garbage.
pub const WORKFLOW_RESPONSE: &str = r#"[
    {
        "uuid": "a2218059-5bd0-4690-b090-062faf08e046",
        "name": "rdf-analysis",
        "base_uri": "s3://simulation-data",
        "creator_username": "hoermann",
        "derived_from": ["1a1f9fad-8589-413e-9602-5bbd66bfe675"]
    },
    {
        "uuid": "1a1f9fad-8589-413e-9602-5bbd66bfe675",
        "name": "md-trajectory",
        "base_uri": "s3://simulation-data",
        "derived_from": [
            "0ec1dc3b-6ae6-4e3d-a3c2-1e0fb4a0a0f8",
            "5c5d1a4e-0b87-4fb5-9c1f-1f3f7a0d6b21",
            "9f2c6b8e-3a71-4d0e-8c55-7e4b2d1a9c03"
        ]
    },
    {
        "uuid": "0ec1dc3b-6ae6-4e3d-a3c2-1e0fb4a0a0f8",
        "name": "initial-configuration",
        "base_uri": "s3://simulation-data",
        "derived_from": ["see lab notebook p. 12", 7]
    },
    {
        "uuid": "5c5d1a4e-0b87-4fb5-9c1f-1f3f7a0d6b21",
        "name": "eam-potential",
        "base_uri": "smb://group-share"
    }
]"#;

pub fn workflow_records() -> Vec<DatasetRecord> {
    DatasetRecord::list_from_str(WORKFLOW_RESPONSE).expect("fixture is valid JSON")
}

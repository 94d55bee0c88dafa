//! Wire shapes shared by the store server and client.
//!
//! Sequences travel as a bare list of `{action, emotions}` records under a
//! `sequence` key; the `emotions` value is a name→weight mapping.

use fido_behavior::{Sequence, SequenceStep};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadRequest {
    pub sequence: Vec<SequenceStep>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SequenceEnvelope {
    pub sequence: Option<Vec<SequenceStep>>,
}

impl From<Sequence> for UploadRequest {
    fn from(seq: Sequence) -> Self {
        Self {
            sequence: seq.steps,
        }
    }
}

impl SequenceEnvelope {
    pub fn into_sequence(self) -> Option<Sequence> {
        self.sequence.map(|steps| Sequence { steps })
    }
}

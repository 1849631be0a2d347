//! Secondary attribute source carrying structured routine signatures

use std::collections::HashMap;

use serde::Deserialize;

use crate::model::NodeId;

/// A logical name record: the full signature text plus the bare name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogicalName {
    #[serde(rename = "Full_Name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PhysicalRecord {
    #[serde(rename = "Logical", default)]
    pub logical: Option<LogicalName>,
}

/// Everything the secondary source knows about one routine or method.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SignatureRecord {
    #[serde(rename = "Logical", default)]
    pub logical: Option<LogicalName>,
    #[serde(rename = "Physical", default)]
    pub physical: Option<PhysicalRecord>,
    #[serde(rename = "Full_Name", default)]
    pub full_name: Option<String>,
}

/// A signature picked from a record. Only `full_name` shapes the display
/// name; `name` is informational (log output) and is `None` when the record
/// only had a flat full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    pub full_name: &'a str,
    pub name: Option<&'a str>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl LogicalName {
    fn signature(&self) -> Option<Signature<'_>> {
        non_empty(&self.full_name).map(|full_name| Signature {
            full_name,
            name: non_empty(&self.name),
        })
    }
}

impl SignatureRecord {
    /// The first available signature, in priority order: `Logical`,
    /// `Physical.Logical`, flat `Full_Name`. A level counts as available
    /// only when its full name is non-empty; a `Logical` block with a blank
    /// full name falls through to `Physical.Logical`, not straight to the
    /// flat full name.
    pub fn signature(&self) -> Option<Signature<'_>> {
        self.logical
            .as_ref()
            .and_then(LogicalName::signature)
            .or_else(|| {
                self.physical
                    .as_ref()
                    .and_then(|p| p.logical.as_ref())
                    .and_then(LogicalName::signature)
            })
            .or_else(|| {
                non_empty(&self.full_name).map(|full_name| Signature {
                    full_name,
                    name: None,
                })
            })
    }
}

/// Signature records keyed by the node they describe.
#[derive(Debug, Default)]
pub struct SignatureSource {
    records: HashMap<NodeId, SignatureRecord>,
}

impl SignatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId, record: SignatureRecord) {
        self.records.insert(node, record);
    }

    pub fn record(&self, node: NodeId) -> Option<&SignatureRecord> {
        self.records.get(&node)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

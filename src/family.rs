use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Male => "\u{2642}",
            Self::Female => "\u{2640}",
        }
    }
}

/// One person in the tree. `is_bloodline` separates blood relatives from
/// married-in members and drives node coloring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouse_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub is_bloodline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Spouse,
    Bloodline,
}

/// Annotated relation between two members. Carried by the dataset for
/// completeness; the graph builder derives structure from the member records
/// themselves and does not consume these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyConnection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTree {
    pub root_member_id: String,
    pub members: BTreeMap<String, FamilyMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<FamilyConnection>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("family tree has no members")]
    Empty,
    #[error("root member `{0}` is not in the member map")]
    UnknownRoot(String),
    #[error("member `{member}` lists unknown spouse `{spouse}`")]
    UnknownSpouse { member: String, spouse: String },
    #[error("member `{member}` lists unknown parent `{parent}`")]
    UnknownParent { member: String, parent: String },
    #[error("member `{member}` lists unknown child `{child}`")]
    UnknownChild { member: String, child: String },
    #[error("connection references unknown member `{0}`")]
    UnknownConnectionEndpoint(String),
}

impl FamilyTree {
    /// Checks referential integrity: every spouse/parent/child id and the
    /// root id must resolve to a member. Reports the first violation found.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.members.is_empty() {
            return Err(DatasetError::Empty);
        }
        if !self.members.contains_key(&self.root_member_id) {
            return Err(DatasetError::UnknownRoot(self.root_member_id.clone()));
        }

        for member in self.members.values() {
            for spouse in &member.spouse_ids {
                if !self.members.contains_key(spouse) {
                    return Err(DatasetError::UnknownSpouse {
                        member: member.id.clone(),
                        spouse: spouse.clone(),
                    });
                }
            }
            for parent in &member.parent_ids {
                if !self.members.contains_key(parent) {
                    return Err(DatasetError::UnknownParent {
                        member: member.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            for child in &member.children {
                if !self.members.contains_key(child) {
                    return Err(DatasetError::UnknownChild {
                        member: member.id.clone(),
                        child: child.clone(),
                    });
                }
            }
        }

        for connection in &self.connections {
            for endpoint in [&connection.from, &connection.to] {
                if !self.members.contains_key(endpoint) {
                    return Err(DatasetError::UnknownConnectionEndpoint(endpoint.clone()));
                }
            }
        }

        Ok(())
    }
}

use std::collections::HashSet;

use super::EmployeeId;

/// An employee who can be assigned to shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "skillSet", default))]
    pub skills: HashSet<String>,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: HashSet::new(),
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for skill in skills {
            self.skills.insert(skill.into());
        }
        self
    }

    #[inline]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }
}

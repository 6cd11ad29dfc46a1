use serde::Serialize;

/// One line of the eligibility checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub text: String,
    pub passed: bool,
}

/// Itemized checklist, in rule order, with the overall result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub items: Vec<ChecklistItem>,
}

impl EligibilityReport {
    pub fn new(items: Vec<ChecklistItem>) -> Self {
        Self {
            eligible: items.iter().all(|item| item.passed),
            items,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(|item| !item.passed)
    }

    /// Look up an item by rule id.
    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

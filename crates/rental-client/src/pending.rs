//! Actions remembered across a login redirect

use serde::{Deserialize, Serialize};

/// Something the user tried to do before signing in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    /// Express interest in a listing
    ExpressInterest { listing_id: String },
    /// Ask to schedule a visit to a listing
    ScheduleVisit { listing_id: String },
}

impl PendingAction {
    pub fn listing_id(&self) -> &str {
        match self {
            PendingAction::ExpressInterest { listing_id }
            | PendingAction::ScheduleVisit { listing_id } => listing_id,
        }
    }
}

/// Session-scoped store; each action resumes at most once
#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    actions: Vec<PendingAction>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `action`; remembering the same action twice keeps one copy
    pub fn remember(&mut self, action: PendingAction) {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingAction> {
        self.actions.iter()
    }

    /// Remove and return everything remembered, oldest first
    pub fn take_all(&mut self) -> Vec<PendingAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn interest(id: &str) -> PendingAction {
        PendingAction::ExpressInterest {
            listing_id: id.to_string(),
        }
    }

    #[test]
    fn test_take_all_is_one_shot() {
        let mut pending = PendingActions::new();
        pending.remember(interest("l-1"));
        pending.remember(PendingAction::ScheduleVisit {
            listing_id: "l-2".to_string(),
        });

        let taken = pending.take_all();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0], interest("l-1"));
        assert!(pending.take_all().is_empty());
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let mut pending = PendingActions::new();
        pending.remember(interest("l-1"));
        pending.remember(interest("l-1"));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(interest("l-9")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "express_interest", "listing_id": "l-9"})
        );
        assert_eq!(interest("l-9").listing_id(), "l-9");
    }
}

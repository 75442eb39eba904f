/// Shown when a submission fails; the panel stays open so the player can retry.
pub const SAVE_FAILED_MESSAGE: &str = "Error at saving the score. Try again please!";

const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    Editing,
    /// A submission is in flight; further submits are refused.
    Saving,
    Failed,
}

/// Game-over panel: name entry plus the submit button state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverPanel {
    name: String,
    status: PanelStatus,
}

impl Default for GameOverPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl GameOverPanel {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            status: PanelStatus::Editing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn status(&self) -> &PanelStatus {
        &self.status
    }

    pub fn push(&mut self, c: char) {
        if self.status != PanelStatus::Saving && self.name.chars().count() < MAX_NAME_LEN {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.status != PanelStatus::Saving {
            self.name.pop();
        }
    }

    /// Disable the button and mark a submission in flight. False if one already is.
    pub fn begin_submit(&mut self) -> bool {
        if self.status == PanelStatus::Saving {
            return false;
        }
        self.status = PanelStatus::Saving;
        true
    }

    /// Name to submit while a submission is in flight.
    pub fn pending_name(&self) -> Option<&str> {
        (self.status == PanelStatus::Saving).then_some(self.name.as_str())
    }

    /// Re-enable the button after a failed save, keeping the typed name.
    pub fn submit_failed(&mut self) {
        self.status = PanelStatus::Failed;
    }

    pub fn button_label(&self) -> &'static str {
        match self.status {
            PanelStatus::Saving => "Saving...",
            _ => "Send Score",
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        (self.status == PanelStatus::Failed).then_some(SAVE_FAILED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_name() {
        let mut panel = GameOverPanel::new();
        for c in "ana".chars() {
            panel.push(c);
        }
        panel.backspace();
        assert_eq!(panel.name(), "an");
        for _ in 0..40 {
            panel.push('x');
        }
        assert_eq!(panel.name().chars().count(), 24);
    }

    #[test]
    fn second_submit_is_refused_while_saving() {
        let mut panel = GameOverPanel::new();
        panel.push('z');
        assert!(panel.begin_submit());
        assert_eq!(panel.button_label(), "Saving...");
        assert_eq!(panel.pending_name(), Some("z"));
        assert!(!panel.begin_submit());
        panel.push('q');
        panel.backspace();
        assert_eq!(panel.name(), "z");
    }

    #[test]
    fn failure_reenables_retry() {
        let mut panel = GameOverPanel::new();
        assert!(panel.begin_submit());
        panel.submit_failed();
        assert_eq!(panel.message(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(panel.button_label(), "Send Score");
        assert_eq!(panel.pending_name(), None);
        assert!(panel.begin_submit());
        assert_eq!(panel.message(), None);
    }
}

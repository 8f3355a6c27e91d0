//! Draft state for the vehicle notes editor.
//!
//! Save and Reset are only offered once the draft differs from the stored
//! notes, and each goes through a confirmation step before taking effect.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotesStep {
    #[default]
    Editing,
    ConfirmSave,
    ConfirmReset,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotesEditor {
    original: String,
    draft: String,
    step: NotesStep,
}

impl NotesEditor {
    pub fn new(original: Option<&str>) -> Self {
        let original = original.unwrap_or_default().to_string();
        Self {
            draft: original.clone(),
            original,
            step: NotesStep::Editing,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn step(&self) -> NotesStep {
        self.step
    }

    pub fn char_count(&self) -> usize {
        self.draft.chars().count()
    }

    pub fn has_changes(&self) -> bool {
        self.draft != self.original
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.step = NotesStep::Editing;
    }

    pub fn request_save(&mut self) {
        if self.has_changes() {
            self.step = NotesStep::ConfirmSave;
        }
    }

    pub fn request_reset(&mut self) {
        if self.has_changes() {
            self.step = NotesStep::ConfirmReset;
        }
    }

    pub fn cancel(&mut self) {
        self.step = NotesStep::Editing;
    }

    /// Confirm a pending reset, discarding the draft.
    pub fn confirm_reset(&mut self) {
        if self.step == NotesStep::ConfirmReset {
            self.draft = self.original.clone();
        }
        self.step = NotesStep::Editing;
    }

    /// The saved draft becomes the new baseline.
    pub fn mark_saved(&mut self) {
        self.original = self.draft.clone();
        self.step = NotesStep::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_draft_blocks_save_and_reset() {
        let mut editor = NotesEditor::new(Some("brakes checked"));
        assert!(!editor.has_changes());
        editor.request_save();
        assert_eq!(editor.step(), NotesStep::Editing);
        editor.request_reset();
        assert_eq!(editor.step(), NotesStep::Editing);
    }

    #[test]
    fn test_save_flow() {
        let mut editor = NotesEditor::new(None);
        editor.set_draft("new tyres");
        assert!(editor.has_changes());
        assert_eq!(editor.char_count(), 9);

        editor.request_save();
        assert_eq!(editor.step(), NotesStep::ConfirmSave);
        editor.mark_saved();
        assert_eq!(editor.original(), "new tyres");
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_reset_flow_and_cancel() {
        let mut editor = NotesEditor::new(Some("a"));
        editor.set_draft("ab");
        editor.request_reset();
        editor.cancel();
        assert_eq!(editor.draft(), "ab");

        editor.request_reset();
        editor.confirm_reset();
        assert_eq!(editor.draft(), "a");
        assert_eq!(editor.step(), NotesStep::Editing);
    }

    #[test]
    fn test_editing_leaves_confirmation() {
        let mut editor = NotesEditor::new(Some("a"));
        editor.set_draft("b");
        editor.request_save();
        editor.set_draft("c");
        assert_eq!(editor.step(), NotesStep::Editing);
    }
}

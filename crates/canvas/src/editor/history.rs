//! Undo/redo on the editor

use super::{Editor, EditorEvent};

impl Editor {
    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo() || self.pending.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Undo the latest batch.
    ///
    /// An open stroke is cancelled and an open tile-painting gesture is
    /// committed first, so undo always reverts the most recent edit.
    /// Returns true if a batch was undone.
    pub fn undo(&mut self) -> bool {
        self.cancel_stroke();
        self.commit();

        let Some(batch_id) = self.stack.undo() else {
            return false;
        };
        self.bounds.recompute(self.stack.active());
        self.emit(EditorEvent::Undone { batch_id });
        self.request_redraw();
        true
    }

    /// Re-apply the most recently undone batch.
    /// Returns true if a batch was redone.
    pub fn redo(&mut self) -> bool {
        self.cancel_stroke();
        if self.commit().is_some() {
            // A new edit pruned the redo branch
            return false;
        }

        let Some(batch_id) = self.stack.redo() else {
            return false;
        };
        if let Some(top) = self.stack.top() {
            self.bounds.include(top);
        }
        self.emit(EditorEvent::Redone { batch_id });
        self.request_redraw();
        true
    }
}

/// Cursor over the currently visible (filtered) games.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub selected_index: usize,
}

impl LibraryState {
    pub fn new() -> Self {
        LibraryState { selected_index: 0 }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected_index = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list that just shrank.
    pub fn clamp(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = LibraryState::new();
        state.select_prev();
        assert_eq!(state.selected_index, 0);

        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected_index, 2);

        state.clamp(1);
        assert_eq!(state.selected_index, 0);

        state.select_last(5);
        assert_eq!(state.selected_index, 4);
        state.clamp(0);
        assert_eq!(state.selected_index, 0);
    }
}

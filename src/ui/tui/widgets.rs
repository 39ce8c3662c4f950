use crate::app::Track;
use ratatui::text::Line;
use ratatui::widgets::{ListItem, ListState};

use super::utils::fmt_duration;

pub(super) fn list_state(selected: usize, len: usize) -> ListState {
    let mut st = ListState::default();
    if len > 0 {
        st.select(Some(selected.min(len - 1)));
    }
    st
}

pub(super) fn track_item(prefix: String, t: &Track) -> ListItem<'static> {
    ListItem::new(Line::from(format!(
        "{prefix}{}  [{}]",
        t.display_title(),
        fmt_duration(t.duration_ms)
    )))
}

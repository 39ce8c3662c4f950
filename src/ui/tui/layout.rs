use ratatui::layout::{Constraint, Direction, Layout, Rect};

const TABS_HEIGHT: u16 = 1;
const NOW_PLAYING_HEIGHT: u16 = 5;
const TRANSPORT_HEIGHT: u16 = 3;
const TOAST_HEIGHT: u16 = 3;
const HINT_HEIGHT: u16 = 1;

pub(super) struct CanvasLayout {
    pub tabs: Rect,
    pub body: Rect,
    pub now_playing: Rect,
    pub transport: TransportLayout,
    pub toast: Rect,
    pub hint: Rect,
}

/// 播放控制区：状态行 / 进度条 / 音量与模式
pub(super) struct TransportLayout {
    pub status: Rect,
    pub scrubber: Rect,
    pub controls: Rect,
}

/// 鼠标命中测试与绘制共用同一份布局
pub(super) fn split_canvas(canvas: Rect, with_toast: bool) -> CanvasLayout {
    let toast_height = if with_toast { TOAST_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(NOW_PLAYING_HEIGHT),
            Constraint::Length(TRANSPORT_HEIGHT),
            Constraint::Length(toast_height),
            Constraint::Length(HINT_HEIGHT),
        ])
        .split(canvas);

    CanvasLayout {
        tabs: chunks[0],
        body: chunks[1],
        now_playing: chunks[2],
        transport: split_transport(chunks[3]),
        toast: chunks[4],
        hint: chunks[5],
    }
}

fn split_transport(area: Rect) -> TransportLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    TransportLayout {
        status: rows[0],
        scrubber: rows[1],
        controls: rows[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrubber_sits_on_its_own_row() {
        let area = Rect::new(0, 0, 80, 30);
        let l = split_canvas(area, false);
        assert_eq!(l.tabs.y, 0);
        assert_eq!(l.transport.scrubber.height, 1);
        assert_eq!(l.transport.scrubber.width, 80);
        assert_eq!(l.toast.height, 0);
        assert_eq!(l.hint.y, 29);
    }

    #[test]
    fn toast_shrinks_body() {
        let area = Rect::new(0, 0, 80, 30);
        let without = split_canvas(area, false);
        let with = split_canvas(area, true);
        assert_eq!(with.toast.height, TOAST_HEIGHT);
        assert_eq!(without.body.height - with.body.height, TOAST_HEIGHT);
    }
}

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::model::Track;

use super::RepeatMode;

/// 播放队列
///
/// `order` 是 `tracks` 下标的一个排列，`cursor` 指向 `order` 中的位置。
/// 随机播放只打乱游标之后的部分，已播放的前缀保持不动。
#[derive(Debug, Clone)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    order: Vec<usize>,
    cursor: Option<usize>,
    repeat: RepeatMode,
    shuffled: bool,
}

impl PlayQueue {
    pub fn new(repeat: RepeatMode) -> Self {
        Self {
            tracks: Vec::new(),
            order: Vec::new(),
            cursor: None,
            repeat,
            shuffled: false,
        }
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>, start_index: Option<usize>) {
        self.tracks = tracks;
        self.order.clear();
        self.order.extend(0..self.tracks.len());
        if self.tracks.is_empty() {
            self.cursor = None;
            return;
        }
        let start = start_index
            .unwrap_or(0)
            .min(self.tracks.len().saturating_sub(1));
        self.cursor = Some(start);
        if self.shuffled {
            self.shuffle_remaining_with(&mut rand::thread_rng());
        }
    }

    /// 从持久化数据恢复；`order` 不是合法排列时退回库顺序
    pub fn restore(
        &mut self,
        tracks: Vec<Track>,
        order: Vec<usize>,
        cursor: Option<usize>,
        shuffled: bool,
    ) {
        let len = tracks.len();
        let mut seen = vec![false; len];
        let valid = order.len() == len
            && order
                .iter()
                .all(|&i| i < len && !std::mem::replace(&mut seen[i], true));

        self.tracks = tracks;
        if valid {
            self.order = order;
            self.shuffled = shuffled;
        } else {
            tracing::warn!(len, "恢复的播放顺序无效，使用曲库顺序");
            self.order = (0..len).collect();
            self.shuffled = false;
        }
        self.cursor = cursor.filter(|&c| c < len).or(if len > 0 { Some(0) } else { None });
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.order.clear();
        self.cursor = None;
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.and_then(|pos| self.order.get(pos).copied())
    }

    pub fn cursor_pos(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Track> {
        self.current_index().and_then(|idx| self.tracks.get(idx))
    }

    /// 游标位于播放顺序的第一首
    pub fn at_start(&self) -> bool {
        self.cursor.is_none_or(|pos| pos == 0)
    }

    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|&i| i == index) {
            self.cursor = Some(pos);
            true
        } else {
            false
        }
    }

    /// 游标之后、按播放顺序排列的曲目下标
    pub fn upcoming_indices(&self) -> Vec<usize> {
        let start = self.cursor.map(|c| c + 1).unwrap_or(0);
        self.order.get(start..).unwrap_or_default().to_vec()
    }

    pub fn upcoming(&self) -> Vec<Track> {
        self.upcoming_indices()
            .into_iter()
            .filter_map(|idx| self.tracks.get(idx).cloned())
            .collect()
    }

    /// 当前曲目自然播放结束后的下一首
    ///
    /// 顺序模式播到末尾返回 None，游标留在最后一首。
    pub fn advance_auto(&mut self) -> Option<usize> {
        let pos = self.cursor?;
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        match self.repeat {
            RepeatMode::LoopOne => self.order.get(pos).copied(),
            RepeatMode::None => {
                if pos + 1 < len {
                    self.cursor = Some(pos + 1);
                    self.order.get(pos + 1).copied()
                } else {
                    None
                }
            }
            RepeatMode::LoopQueue => {
                let next = (pos + 1) % len;
                self.cursor = Some(next);
                self.order.get(next).copied()
            }
        }
    }

    /// 用户主动切到下一首：单曲循环也会前进
    pub fn skip_next(&mut self) -> Option<usize> {
        let pos = self.cursor?;
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let next = if pos + 1 < len {
            pos + 1
        } else if matches!(self.repeat, RepeatMode::None) {
            return None;
        } else {
            0
        };
        self.cursor = Some(next);
        self.order.get(next).copied()
    }

    /// 游标后退一首；已在开头时返回 None
    pub fn step_back(&mut self) -> Option<usize> {
        let pos = self.cursor?;
        if pos == 0 {
            return None;
        }
        self.cursor = Some(pos - 1);
        self.order.get(pos - 1).copied()
    }

    pub fn set_shuffle(&mut self, on: bool) {
        if on {
            self.shuffle_remaining_with(&mut rand::thread_rng());
        } else {
            self.unshuffle();
        }
    }

    pub fn shuffle_remaining_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shuffled = true;
        let start = self.cursor.map(|c| c + 1).unwrap_or(0);
        if let Some(rest) = self.order.get_mut(start..) {
            rest.shuffle(rng);
        }
    }

    pub fn unshuffle(&mut self) {
        self.shuffled = false;
        let current = self.current_index();
        self.order.clear();
        self.order.extend(0..self.tracks.len());
        self.cursor = current.or(if self.tracks.is_empty() { None } else { Some(0) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn queue(n: usize, repeat: RepeatMode) -> PlayQueue {
        let mut q = PlayQueue::new(repeat);
        let tracks = (0..n)
            .map(|i| Track {
                title: format!("t{i}"),
                ..Default::default()
            })
            .collect();
        q.set_tracks(tracks, None);
        q
    }

    #[test]
    fn auto_advance_without_repeat_stops_at_end() {
        let mut q = queue(2, RepeatMode::None);
        assert_eq!(q.advance_auto(), Some(1));
        assert_eq!(q.advance_auto(), None);
        assert_eq!(q.current_index(), Some(1));
    }

    #[test]
    fn auto_advance_loop_queue_wraps() {
        let mut q = queue(2, RepeatMode::LoopQueue);
        assert_eq!(q.advance_auto(), Some(1));
        assert_eq!(q.advance_auto(), Some(0));
    }

    #[test]
    fn auto_advance_loop_one_repeats() {
        let mut q = queue(3, RepeatMode::LoopOne);
        assert_eq!(q.advance_auto(), Some(0));
        assert_eq!(q.cursor_pos(), Some(0));
    }

    #[test]
    fn skip_moves_even_in_loop_one() {
        let mut q = queue(2, RepeatMode::LoopOne);
        assert_eq!(q.skip_next(), Some(1));
        assert_eq!(q.skip_next(), Some(0));
    }

    #[test]
    fn skip_at_end_without_repeat_is_noop() {
        let mut q = queue(2, RepeatMode::None);
        q.set_current_index(1);
        assert_eq!(q.skip_next(), None);
        assert_eq!(q.current_index(), Some(1));
    }

    #[test]
    fn step_back_stops_at_start() {
        let mut q = queue(3, RepeatMode::None);
        q.set_current_index(1);
        assert_eq!(q.step_back(), Some(0));
        assert!(q.at_start());
        assert_eq!(q.step_back(), None);
    }

    #[test]
    fn shuffle_keeps_played_prefix() {
        let mut q = queue(10, RepeatMode::None);
        q.set_current_index(3);
        q.shuffle_remaining_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(&q.order()[..4], &[0, 1, 2, 3]);
        assert_eq!(q.current_index(), Some(3));
        let mut rest = q.upcoming_indices();
        rest.sort_unstable();
        assert_eq!(rest, (4..10).collect::<Vec<_>>());
    }

    #[test]
    fn unshuffle_restores_library_order_at_current_track() {
        let mut q = queue(10, RepeatMode::None);
        q.shuffle_remaining_with(&mut StdRng::seed_from_u64(1));
        q.skip_next();
        let current = q.current_index();
        q.unshuffle();
        assert!(!q.is_shuffled());
        assert_eq!(q.order(), (0..10).collect::<Vec<_>>().as_slice());
        assert_eq!(q.current_index(), current);
        assert_eq!(q.cursor_pos(), current);
    }

    #[test]
    fn upcoming_excludes_current() {
        let mut q = queue(3, RepeatMode::None);
        q.set_current_index(1);
        assert_eq!(q.upcoming_indices(), vec![2]);
    }

    #[test]
    fn restore_rejects_bad_order() {
        let mut q = PlayQueue::new(RepeatMode::None);
        let tracks = vec![Track::default(), Track::default()];
        q.restore(tracks, vec![0, 0], Some(1), true);
        assert_eq!(q.order(), &[0, 1]);
        assert!(!q.is_shuffled());
        assert_eq!(q.cursor_pos(), Some(1));
    }
}

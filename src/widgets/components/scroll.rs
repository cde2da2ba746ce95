/// Host-side window over the visible candidate list.
///
/// The widget only asks for a row to be brought into view; hosts that render
/// a bounded list keep one of these and apply the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListViewport {
    pub offset: usize,
    pub max_visible: Option<usize>,
}

impl ListViewport {
    pub fn new(max_visible: Option<usize>) -> Self {
        Self {
            offset: 0,
            max_visible: max_visible.filter(|max| *max > 0),
        }
    }

    /// Scrolls the minimum needed so `index` is on screen. `align_top` pins a
    /// newly revealed row to the top edge, otherwise to the bottom edge.
    pub fn scroll_into_view(&mut self, index: usize, align_top: bool, total: usize) {
        let Some(max) = self.max_visible else {
            return;
        };
        if total <= max {
            self.offset = 0;
            return;
        }
        let index = index.min(total - 1);
        let last = self.offset.saturating_add(max).saturating_sub(1);
        if index >= self.offset && index <= last {
            return;
        }
        self.offset = if align_top {
            index
        } else {
            (index + 1).saturating_sub(max)
        };
        self.offset = self.offset.min(total - max);
    }

    pub fn clamp(&mut self, total: usize) {
        match self.max_visible {
            Some(max) if total > max => self.offset = self.offset.min(total - max),
            _ => self.offset = 0,
        }
    }

    pub fn visible_range(&self, total: usize) -> (usize, usize) {
        match self.max_visible {
            Some(limit) => {
                let start = self.offset.min(total);
                let end = (start + limit).min(total);
                (start, end)
            }
            None => (0, total),
        }
    }

    pub fn footer(&self, total: usize) -> Option<String> {
        let max = self.max_visible?;
        if total <= max {
            return None;
        }
        let (start, end) = self.visible_range(total);
        let arrow = match (start > 0, end < total) {
            (true, true) => " ↑↓",
            (true, false) => " ↑",
            (false, true) => " ↓",
            (false, false) => "",
        };
        Some(format!("[{}-{} of {}]{}", start + 1, end, total, arrow))
    }
}

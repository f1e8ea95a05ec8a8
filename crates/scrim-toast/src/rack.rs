#![forbid(unsafe_code)]

//! The toast rack: bounded admission, FIFO backlog, stacked layout.

use std::collections::VecDeque;
use std::time::Duration;

use scrim_core::pool::InstancePool;
use tracing::{debug, warn};

use crate::data::{KindColors, ToastData, ToastKind};
use crate::item::{ToastId, ToastItem, ToastView};

/// Pool key all toast views are leased under.
pub const TOAST_TEMPLATE_KEY: &str = "toast-item";

/// Screen edge the rack hangs from. Toasts stack away from this edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    TopLeft,
    #[default]
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Whether this anchor hangs from the top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight)
    }
}

/// Rack-wide configuration, fixed at construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RackConfig {
    /// Edge the stack hangs from.
    pub anchor: Anchor,
    /// Gap between stacked toasts, in points.
    pub spacing: f32,
    /// Inset of the first toast from the anchored edge, in points.
    pub edge_padding: f32,
    /// Upper bound on simultaneously visible toasts.
    pub max_concurrent: usize,
    /// Show one toast at a time regardless of `max_concurrent`.
    pub sequential: bool,
    /// Entrance/exit slide travel, in points.
    pub slide_distance: f32,
    /// Entrance transition length.
    pub enter: Duration,
    /// Exit transition length.
    pub exit: Duration,
    /// Kind→background color table.
    pub colors: KindColors,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::TopCenter,
            spacing: 10.0,
            edge_padding: 50.0,
            max_concurrent: 5,
            sequential: false,
            slide_distance: 50.0,
            enter: Duration::from_millis(200),
            exit: Duration::from_millis(150),
            colors: KindColors::default(),
        }
    }
}

/// Bounded toast display over an instance pool.
///
/// At most `max_concurrent` toasts (one, in sequential mode) are visible;
/// the rest wait in a FIFO backlog. A toast occupies its display slot until
/// its exit transition finishes and the view is returned to the pool, at
/// which point backlog entries are promoted into the freed capacity.
pub struct ToastRack<P: InstancePool<dyn ToastView>> {
    pool: P,
    config: RackConfig,
    visible: Vec<ToastItem>,
    backlog: VecDeque<(ToastId, ToastData)>,
    next_id: u64,
}

impl<P: InstancePool<dyn ToastView>> ToastRack<P> {
    /// Create a rack over `pool` with default configuration.
    pub fn new(pool: P) -> Self {
        Self::with_config(pool, RackConfig::default())
    }

    /// Create a rack over `pool` with explicit configuration.
    pub fn with_config(pool: P, config: RackConfig) -> Self {
        Self {
            pool,
            config,
            visible: Vec::new(),
            backlog: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Show a toast with an auto-dismiss countdown of `seconds`
    /// (`<= 0` persists until manually dismissed).
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, seconds: f32) -> Option<ToastId> {
        self.show_data(ToastData::new(message, kind, seconds))
    }

    /// Show a fully specified toast.
    ///
    /// Returns the toast's id, or `None` when the request was rejected:
    /// empty message, no registered template, or a spawn failure on
    /// immediate admission. The id is assigned even when the toast goes to
    /// the backlog, so it can be cancelled before it ever shows.
    pub fn show_data(&mut self, data: ToastData) -> Option<ToastId> {
        if data.message.is_empty() {
            debug!("ignoring toast with empty message");
            return None;
        }
        if self.pool.find_template(TOAST_TEMPLATE_KEY).is_none() {
            warn!(key = TOAST_TEMPLATE_KEY, "no toast template registered, dropping toast");
            return None;
        }
        let id = ToastId::new(self.next_id);
        self.next_id += 1;
        if self.visible.len() < self.capacity() {
            if !self.admit(id, data) {
                return None;
            }
        } else {
            debug!(id = id.0, backlog = self.backlog.len() + 1, "toast queued");
            self.backlog.push_back((id, data));
        }
        Some(id)
    }

    /// Start the exit transition for a visible toast, or cancel a backlogged
    /// one. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: ToastId) {
        if let Some(item) = self.visible.iter_mut().find(|item| item.id() == id) {
            item.dismiss();
        } else if let Some(pos) = self.backlog.iter().position(|(queued, _)| *queued == id) {
            self.backlog.remove(pos);
        }
    }

    /// Drop the backlog and start the exit transition for every visible
    /// toast.
    pub fn dismiss_all(&mut self) {
        self.backlog.clear();
        for item in &mut self.visible {
            item.dismiss();
        }
    }

    /// Invoke the action callback of a visible toast. Returns whether a
    /// callback ran. The toast stays up.
    pub fn activate_action(&mut self, id: ToastId) -> bool {
        self.visible
            .iter_mut()
            .find(|item| item.id() == id)
            .is_some_and(|item| item.activate_action())
    }

    /// Advance all visible toasts, reclaim finished ones, and promote
    /// backlog entries into freed capacity.
    pub fn tick(&mut self, dt: Duration) {
        let mut idx = 0;
        let mut reclaimed = false;
        while idx < self.visible.len() {
            if self.visible[idx].tick(dt) {
                // Order-preserving removal so the stack never reshuffles.
                let item = self.visible.remove(idx);
                debug!(id = item.id().0, "toast reclaimed");
                self.pool.despawn(TOAST_TEMPLATE_KEY, item.into_view());
                reclaimed = true;
            } else {
                idx += 1;
            }
        }
        while self.visible.len() < self.capacity()
            && let Some((id, data)) = self.backlog.pop_front()
        {
            self.admit(id, data);
        }
        if reclaimed {
            self.relayout();
        }
    }

    /// Number of currently visible toasts, exiting ones included.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Number of toasts waiting in the backlog.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Whether nothing is visible or queued.
    pub fn is_idle(&self) -> bool {
        self.visible.is_empty() && self.backlog.is_empty()
    }

    /// A visible toast by id.
    pub fn get(&self, id: ToastId) -> Option<&ToastItem> {
        self.visible.iter().find(|item| item.id() == id)
    }

    /// The rack's configuration.
    pub fn config(&self) -> &RackConfig {
        &self.config
    }

    /// The backing pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// The backing pool, mutably.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    fn capacity(&self) -> usize {
        if self.config.sequential {
            1
        } else {
            self.config.max_concurrent
        }
    }

    fn admit(&mut self, id: ToastId, data: ToastData) -> bool {
        let Some(view) = self.pool.spawn(TOAST_TEMPLATE_KEY) else {
            warn!(key = TOAST_TEMPLATE_KEY, "pool failed to spawn a toast view, dropping toast");
            return false;
        };
        debug!(id = id.0, kind = ?data.kind, "toast shown");
        self.visible.push(ToastItem::new(id, view, data, &self.config));
        self.relayout();
        true
    }

    fn relayout(&mut self) {
        let mut offset = self.config.edge_padding;
        for item in &mut self.visible {
            item.set_base_offset(offset);
            offset += item.height() + self.config.spacing;
        }
    }
}

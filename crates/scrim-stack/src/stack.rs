#![forbid(unsafe_code)]

//! The popup stack manager.
//!
//! [`PopupStack`] owns the ordered list of live overlay entries (oldest
//! first; the topmost entry is last) plus the shared [`ScrimState`]. Every
//! mutation of the list synchronously recomputes the scrim target, so
//! dim/block state always reflects the latest bookkeeping even while an
//! older entry's exit fade is still playing.
//!
//! Entries leave the authoritative list the moment a dismiss is requested;
//! the unit then fades out on a side list and is only returned to the pool
//! once its exit completes. A second dismiss of the same id finds no entry
//! and is a no-op, so nothing is ever reclaimed twice.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use scrim_core::animation::{Animation, Fade};
use scrim_core::pool::InstancePool;
use tracing::{debug, warn};

use crate::scrim::ScrimState;
use crate::unit::{GestureOutcome, OverlayConfig, OverlayUnit, Payload};

/// Unique identifier for a presented overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

impl OverlayId {
    /// Create an overlay ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Stack-wide configuration, fixed at construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackConfig {
    /// Duration of the scrim fade toward a new dim target.
    pub dim_fade: Duration,
    /// Whether a modal entry's dim also blocks input behind the scrim.
    pub block_input_when_dimmed: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            dim_fade: Duration::from_millis(150),
            block_input_when_dimmed: true,
        }
    }
}

/// Errors surfaced by [`PopupStack::present`] and friends.
///
/// A failed present is reported once and never retried by the stack.
#[derive(Debug)]
pub enum PresentError {
    /// No template is registered under the requested kind.
    TemplateNotFound(String),
    /// The pool had a template but could not produce an instance.
    SpawnFailed(String),
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::TemplateNotFound(kind) => {
                write!(f, "no overlay template registered for kind '{kind}'")
            }
            PresentError::SpawnFailed(kind) => {
                write!(f, "overlay instance spawn failed for kind '{kind}'")
            }
        }
    }
}

impl std::error::Error for PresentError {}

enum EntryPhase {
    Entering(Fade),
    Visible,
}

/// One live entry, owned exclusively by the stack.
struct Entry {
    id: OverlayId,
    kind: String,
    unit: Box<dyn OverlayUnit>,
    /// Snapshot taken at present time; never re-read from the unit.
    config: OverlayConfig,
    dedup_key: Option<String>,
    phase: EntryPhase,
    alpha: f32,
}

/// A dismissed unit fading out before reclaim.
struct Exiting {
    kind: String,
    unit: Box<dyn OverlayUnit>,
    fade: Fade,
    start_alpha: f32,
}

/// A `dismiss_all` participant waiting for (or playing) its turn.
struct Closing {
    kind: String,
    unit: Box<dyn OverlayUnit>,
    exit: Duration,
    start_alpha: f32,
    /// `None` until this entry reaches the front of the drain queue.
    fade: Option<Fade>,
}

/// Ordered stack of live popups with shared background dim.
pub struct PopupStack<P: InstancePool<dyn OverlayUnit>> {
    pool: P,
    config: StackConfig,
    entries: Vec<Entry>,
    exiting: Vec<Exiting>,
    draining: VecDeque<Closing>,
    scrim: ScrimState,
    next_id: u64,
}

impl<P: InstancePool<dyn OverlayUnit>> PopupStack<P> {
    /// Create a stack over `pool` with explicit configuration.
    pub fn new(pool: P, config: StackConfig) -> Self {
        Self {
            pool,
            config,
            entries: Vec::new(),
            exiting: Vec::new(),
            draining: VecDeque::new(),
            scrim: ScrimState::new(),
            next_id: 0,
        }
    }

    /// Present a popup of `kind` with no payload.
    pub fn present(&mut self, kind: &str) -> Result<OverlayId, PresentError> {
        self.present_inner(kind, None, None)
    }

    /// Present a popup of `kind`, injecting `payload` before the entrance.
    pub fn present_with(&mut self, kind: &str, payload: Payload) -> Result<OverlayId, PresentError> {
        self.present_inner(kind, Some(payload), None)
    }

    /// Present with a dedup key: if a live entry already carries the same
    /// non-empty key, its id is returned and no new entrance is played.
    pub fn present_deduped(
        &mut self,
        kind: &str,
        payload: Option<Payload>,
        dedup_key: &str,
    ) -> Result<OverlayId, PresentError> {
        self.present_inner(kind, payload, Some(dedup_key))
    }

    fn present_inner(
        &mut self,
        kind: &str,
        payload: Option<Payload>,
        dedup_key: Option<&str>,
    ) -> Result<OverlayId, PresentError> {
        if let Some(key) = dedup_key
            && !key.is_empty()
            && let Some(existing) = self
                .entries
                .iter()
                .find(|e| e.dedup_key.as_deref() == Some(key))
        {
            debug!(kind, key, id = existing.id.0, "dedup hit, returning existing overlay");
            return Ok(existing.id);
        }

        if self.pool.find_template(kind).is_none() {
            warn!(kind, "overlay template not found");
            return Err(PresentError::TemplateNotFound(kind.to_string()));
        }
        let Some(mut unit) = self.pool.spawn(kind) else {
            warn!(kind, "overlay spawn failed");
            return Err(PresentError::SpawnFailed(kind.to_string()));
        };

        let mut config = unit.config();
        config.dim = config.dim.clamp(0.0, 1.0);

        unit.on_before_present(payload);
        unit.set_alpha(0.0);
        unit.set_interactable(false);

        let id = OverlayId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            kind: kind.to_string(),
            unit,
            config,
            dedup_key: dedup_key.filter(|k| !k.is_empty()).map(str::to_string),
            phase: EntryPhase::Entering(Fade::new(config.enter)),
            alpha: 0.0,
        });
        debug!(kind, id = id.0, modal = config.modal, "overlay presented");
        self.recompute_scrim();
        Ok(id)
    }

    /// Dismiss a specific overlay. Unknown or already-dismissed ids are a
    /// no-op. The entry leaves the stack before its exit fade starts.
    pub fn dismiss(&mut self, id: OverlayId) {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return;
        };
        let mut entry = self.entries.remove(index);
        debug!(id = id.0, kind = %entry.kind, "overlay dismissed");
        self.recompute_scrim();

        entry.unit.set_interactable(false);
        self.exiting.push(Exiting {
            kind: entry.kind,
            unit: entry.unit,
            fade: Fade::new(entry.config.exit),
            start_alpha: entry.alpha,
        });
    }

    /// Dismiss the topmost overlay, if any.
    pub fn dismiss_top(&mut self) {
        if let Some(entry) = self.entries.last() {
            let id = entry.id;
            self.dismiss(id);
        }
    }

    /// Dismiss every overlay, topmost first.
    ///
    /// The list is cleared synchronously; exits then play one at a time in
    /// top-to-bottom order, each completing (and being reclaimed) before the
    /// next starts.
    pub fn dismiss_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        debug!(count = self.entries.len(), "dismissing all overlays");
        while let Some(mut entry) = self.entries.pop() {
            entry.unit.set_interactable(false);
            self.draining.push_back(Closing {
                kind: entry.kind,
                unit: entry.unit,
                exit: entry.config.exit,
                start_alpha: entry.alpha,
                fade: None,
            });
        }
        self.recompute_scrim();
    }

    /// Route the back/cancel gesture: topmost entry first, then downward
    /// until one consumes it. Returns whether any unit consumed it.
    pub fn handle_back(&mut self) -> bool {
        self.route_gesture(|unit| unit.on_back())
    }

    /// Route a tap on the dimmed background the same way.
    pub fn handle_scrim_tap(&mut self) -> bool {
        self.route_gesture(|unit| unit.on_scrim_tap())
    }

    fn route_gesture(&mut self, mut offer: impl FnMut(&mut dyn OverlayUnit) -> GestureOutcome) -> bool {
        // Snapshot the order: a Dismiss outcome mutates the list mid-walk.
        let ids: Vec<OverlayId> = self.entries.iter().rev().map(|e| e.id).collect();
        for id in ids {
            let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
                continue;
            };
            match offer(&mut *entry.unit) {
                GestureOutcome::Pass => {}
                GestureOutcome::Consumed => return true,
                GestureOutcome::Dismiss => {
                    self.dismiss(id);
                    return true;
                }
            }
        }
        false
    }

    /// Advance fades by one frame of unscaled time.
    pub fn tick(&mut self, dt: Duration) {
        self.scrim.tick(dt);
        self.tick_entrances(dt);
        self.tick_exits(dt);
        self.tick_drain(dt);
    }

    fn tick_entrances(&mut self, dt: Duration) {
        for entry in &mut self.entries {
            if let EntryPhase::Entering(fade) = &mut entry.phase {
                fade.tick(dt);
                entry.alpha = fade.value();
                let complete = fade.is_complete();
                entry.unit.set_alpha(entry.alpha);
                if complete {
                    entry.alpha = 1.0;
                    entry.unit.set_alpha(1.0);
                    entry.unit.set_interactable(true);
                    entry.phase = EntryPhase::Visible;
                }
            }
        }
    }

    fn tick_exits(&mut self, dt: Duration) {
        let mut index = 0;
        while index < self.exiting.len() {
            let exiting = &mut self.exiting[index];
            exiting.fade.tick(dt);
            let alpha = exiting.start_alpha * (1.0 - exiting.fade.value());
            exiting.unit.set_alpha(alpha);
            if exiting.fade.is_complete() {
                let done = self.exiting.swap_remove(index);
                debug!(kind = %done.kind, "overlay reclaimed");
                self.pool.despawn(&done.kind, done.unit);
            } else {
                index += 1;
            }
        }
    }

    fn tick_drain(&mut self, dt: Duration) {
        let mut finished = false;
        if let Some(front) = self.draining.front_mut() {
            let exit = front.exit;
            let fade = front.fade.get_or_insert_with(|| Fade::new(exit));
            fade.tick(dt);
            let value = fade.value();
            finished = fade.is_complete();
            front.unit.set_alpha(front.start_alpha * (1.0 - value));
        }
        if finished
            && let Some(done) = self.draining.pop_front()
        {
            debug!(kind = %done.kind, "overlay reclaimed");
            self.pool.despawn(&done.kind, done.unit);
        }
    }

    fn recompute_scrim(&mut self) {
        // First modal from the top decides the dim; none means clear.
        let mut target = 0.0;
        let mut block = false;
        for entry in self.entries.iter().rev() {
            if entry.config.modal {
                target = entry.config.dim;
                block = true;
                break;
            }
        }
        self.scrim
            .retarget(target, block && self.config.block_input_when_dimmed, self.config.dim_fade);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack has no live entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id of the topmost entry, if any.
    pub fn top(&self) -> Option<OverlayId> {
        self.entries.last().map(|e| e.id)
    }

    /// Whether `id` refers to a live entry.
    pub fn contains(&self, id: OverlayId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Whether any live entry was presented under `kind`.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Access a live unit.
    pub fn get(&self, id: OverlayId) -> Option<&dyn OverlayUnit> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &*e.unit)
    }

    /// Mutably access a live unit.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut dyn OverlayUnit> {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(e) => Some(e.unit.as_mut()),
            None => None,
        }
    }

    /// The shared background dim state.
    pub fn scrim(&self) -> &ScrimState {
        &self.scrim
    }

    /// Whether every exit fade has finished and been reclaimed.
    pub fn is_idle(&self) -> bool {
        self.exiting.is_empty() && self.draining.is_empty()
    }

    /// The underlying instance pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Mutable access to the underlying instance pool.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }
}

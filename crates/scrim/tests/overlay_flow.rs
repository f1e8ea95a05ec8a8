//! End-to-end popup stack scenarios driven through the public facade.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use scrim::prelude::*;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const DIM_FADE: Duration = Duration::from_millis(150);
const ENTER: Duration = Duration::from_millis(150);
const EXIT: Duration = Duration::from_millis(120);

/// Shared observable state of one spawned dialog instance.
#[derive(Clone, Default)]
struct DialogState {
    alpha: Rc<Cell<f32>>,
    interactable: Rc<Cell<bool>>,
    title: Rc<RefCell<String>>,
}

struct Dialog {
    cfg: OverlayConfig,
    state: DialogState,
}

impl OverlayUnit for Dialog {
    fn config(&self) -> OverlayConfig {
        self.cfg
    }

    fn on_before_present(&mut self, payload: Option<Payload>) {
        if let Some(title) = payload.and_then(|p| p.downcast::<String>().ok()) {
            *self.state.title.borrow_mut() = *title;
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha.set(alpha);
    }

    fn set_interactable(&mut self, on: bool) {
        self.state.interactable.set(on);
    }
}

type Spawned = Rc<RefCell<Vec<DialogState>>>;

fn register(pool: &mut PoolRegistry<dyn OverlayUnit>, kind: &str, cfg: OverlayConfig) -> Spawned {
    let spawned: Spawned = Rc::new(RefCell::new(Vec::new()));
    let log = spawned.clone();
    pool.register(TemplateSpec::new(kind, 320.0, 240.0), move || {
        let state = DialogState::default();
        log.borrow_mut().push(state.clone());
        Box::new(Dialog { cfg, state })
    });
    spawned
}

#[test]
fn modal_dialog_full_lifecycle() {
    init_tracing();
    let mut pool: PoolRegistry<dyn OverlayUnit> = PoolRegistry::new();
    let spawned = register(&mut pool, "confirm", OverlayConfig::default());
    let mut stack = PopupStack::new(pool, StackConfig::default());

    let id = stack
        .present_with("confirm", Box::new(String::from("Delete file?")))
        .unwrap();
    let dialog = spawned.borrow()[0].clone();
    assert_eq!(*dialog.title.borrow(), "Delete file?");

    // Scrim starts clear and fades toward the dialog's dim.
    assert_eq!(stack.scrim().alpha(), 0.0);
    assert!(!stack.scrim().blocks_input());
    stack.tick(DIM_FADE / 2);
    assert!(stack.scrim().alpha() > 0.0);
    assert!(stack.scrim().blocks_input());

    stack.tick(DIM_FADE);
    assert_eq!(stack.scrim().alpha(), 0.6);
    assert!(dialog.interactable.get(), "entrance finished by now");
    assert_eq!(dialog.alpha.get(), 1.0);

    // Back gesture dismisses; the stack empties synchronously while the
    // dialog fades out, then the instance is reclaimed for reuse.
    assert!(stack.handle_back());
    assert!(stack.is_empty());
    assert!(!dialog.interactable.get());
    assert_eq!(stack.scrim().target(), 0.0);

    stack.tick(EXIT.max(DIM_FADE));
    assert_eq!(dialog.alpha.get(), 0.0);
    assert_eq!(stack.scrim().alpha(), 0.0);
    assert_eq!(stack.pool().idle_count("confirm"), 1);
    assert!(stack.is_idle());
    assert!(!stack.contains(id));

    // Presenting again reuses the pooled instance.
    stack.present("confirm").unwrap();
    assert_eq!(spawned.borrow().len(), 1);
}

#[test]
fn sheet_under_dialog_keeps_its_own_gestures() {
    init_tracing();
    let mut pool: PoolRegistry<dyn OverlayUnit> = PoolRegistry::new();
    register(
        &mut pool,
        "sheet",
        OverlayConfig {
            modal: false,
            close_on_scrim_tap: false,
            consume_back: false,
            ..OverlayConfig::default()
        },
    );
    register(
        &mut pool,
        "confirm",
        OverlayConfig {
            dim: 0.8,
            ..OverlayConfig::default()
        },
    );
    let mut stack = PopupStack::new(pool, StackConfig::default());

    stack.present("sheet").unwrap();
    assert_eq!(stack.scrim().target(), 0.0);

    stack.present("confirm").unwrap();
    assert_eq!(stack.scrim().target(), 0.8);

    // The tap lands on the dialog and dismisses only it; the passive sheet
    // stays and the scrim clears because no modal remains.
    assert!(stack.handle_scrim_tap());
    assert_eq!(stack.len(), 1);
    assert!(stack.has_kind("sheet"));
    assert_eq!(stack.scrim().target(), 0.0);

    // With only the passive sheet left, nothing wants the gestures.
    assert!(!stack.handle_scrim_tap());
    assert!(!stack.handle_back());
    assert_eq!(stack.len(), 1);
}

#[test]
fn dedup_key_collapses_repeat_presents() {
    init_tracing();
    let mut pool: PoolRegistry<dyn OverlayUnit> = PoolRegistry::new();
    let spawned = register(&mut pool, "settings", OverlayConfig::default());
    let mut stack = PopupStack::new(pool, StackConfig::default());

    let first = stack.present_deduped("settings", None, "settings").unwrap();
    let second = stack.present_deduped("settings", None, "settings").unwrap();
    assert_eq!(first, second);
    assert_eq!(spawned.borrow().len(), 1);

    // Once the original is gone, the key is free again.
    stack.dismiss(first);
    stack.tick(EXIT);
    let third = stack.present_deduped("settings", None, "settings").unwrap();
    assert_ne!(first, third);
}

#[test]
fn dismiss_all_reclaims_everything_in_order() {
    init_tracing();
    let mut pool: PoolRegistry<dyn OverlayUnit> = PoolRegistry::new();
    let spawned = register(&mut pool, "confirm", OverlayConfig::default());
    let mut stack = PopupStack::new(pool, StackConfig::default());

    for _ in 0..3 {
        stack.present("confirm").unwrap();
    }
    stack.tick(ENTER);
    stack.dismiss_all();
    assert!(stack.is_empty());

    // Exits drain sequentially, topmost first.
    stack.tick(EXIT);
    assert_eq!(stack.pool().idle_count("confirm"), 1);
    assert_eq!(spawned.borrow()[2].alpha.get(), 0.0);
    assert_eq!(spawned.borrow()[0].alpha.get(), 1.0);

    stack.tick(EXIT);
    stack.tick(EXIT);
    assert_eq!(stack.pool().idle_count("confirm"), 3);
    assert!(stack.is_idle());
}

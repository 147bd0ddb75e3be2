#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod grid;
mod hero;
mod reveal;
mod style;

/// Everything running on the page; dropped on [`teardown`].
#[derive(Default)]
struct Mounts {
    grid: Option<grid::GridMount>,
    hero: Option<hero::HeroMount>,
    reveal: Option<reveal::RevealMount>,
}

impl Mounts {
    fn teardown(&self) {
        if let Some(g) = &self.grid {
            g.teardown();
        }
        if let Some(h) = &self.hero {
            h.teardown();
        }
        if let Some(r) = &self.reveal {
            r.teardown();
        }
    }
}

thread_local! {
    static MOUNTS: RefCell<Option<Mounts>> = const { RefCell::new(None) };
}

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop every frame loop, detach all listeners and kill scroll observers.
///
/// Safe to call more than once; a later [`remount`] starts fresh.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(m) = MOUNTS.with(|cell| cell.borrow_mut().take()) {
        m.teardown();
        log::info!("[app] torn down");
    }
    STARTED.store(false, Ordering::SeqCst);
}

/// Tear down and mount again, e.g. after a client-side navigation.
#[wasm_bindgen]
pub fn remount() {
    teardown();
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("remount error: {:?}", e);
        }
    });
}

async fn init() -> anyhow::Result<()> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let grid = grid::mount(&window, &document);
    let hero = match hero::mount(&window, &document) {
        Ok(h) => h,
        Err(e) => {
            if let Some(g) = &grid {
                g.teardown();
            }
            STARTED.store(false, Ordering::SeqCst);
            return Err(e);
        }
    };
    let reveal = reveal::mount(&window, &document);
    log::info!(
        "[app] mounted grid={} hero={} reveal={}",
        grid.is_some(),
        hero.is_some(),
        reveal.is_some()
    );

    MOUNTS.with(|cell| {
        *cell.borrow_mut() = Some(Mounts { grid, hero, reveal });
    });
    Ok(())
}

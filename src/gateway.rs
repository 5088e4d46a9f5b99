//! Debounced analysis requests with local fallback.
//!
//! Input events go through a [`Debouncer`]; once the text settles the remote
//! endpoint is asked, and any [`AnalysisError`] is answered by the local
//! heuristic instead. Results are handed to a callback in completion order, so
//! a slow older response may overwrite a newer one (last write wins).

use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::analyzer::{EmotionDescriptor, analyze};
use crate::remote::RemoteAnalysis;

/// Deferred one-shot tasks that can be cancelled before they run.
pub trait TaskScheduler {
    type Handle;
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;
    fn cancel(&self, handle: Self::Handle);
}

/// Keeps at most one pending task: scheduling a new one cancels the old one.
pub struct Debouncer<S: TaskScheduler> {
    scheduler: S,
    window_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: TaskScheduler> Debouncer<S> {
    pub fn new(scheduler: S, window_ms: u32) -> Self {
        Self { scheduler, window_ms, pending: None }
    }

    pub fn call(&mut self, task: impl FnOnce() + 'static) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.pending = self.scheduler.schedule(self.window_ms, Box::new(task));
        if self.pending.is_none() {
            tracing::warn!("debounce timer could not be scheduled");
        }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}

/// Remote result, or the local heuristic when the remote is unavailable.
pub async fn resolve<R: RemoteAnalysis + ?Sized>(remote: &R, text: &str) -> EmotionDescriptor {
    match remote.analyze(text).await {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::debug!(%err, "remote analysis unavailable, using local heuristic");
            analyze(text)
        }
    }
}

pub struct AnalysisGateway<R, S: TaskScheduler, Sp> {
    remote: Rc<R>,
    spawner: Sp,
    debouncer: Debouncer<S>,
}

impl<R, S, Sp> AnalysisGateway<R, S, Sp>
where
    R: RemoteAnalysis + 'static,
    S: TaskScheduler,
    Sp: LocalSpawn + Clone + 'static,
{
    pub fn new(remote: Rc<R>, scheduler: S, spawner: Sp, window_ms: u32) -> Self {
        Self {
            remote,
            spawner,
            debouncer: Debouncer::new(scheduler, window_ms),
        }
    }

    /// Queue `text` for analysis. Only the last request inside the debounce
    /// window runs; `on_result` always receives a descriptor.
    pub fn request(
        &mut self,
        text: impl Into<String>,
        on_result: impl FnOnce(EmotionDescriptor) + 'static,
    ) {
        let text = text.into();
        let remote = Rc::clone(&self.remote);
        let spawner = self.spawner.clone();
        self.debouncer.call(move || {
            let work = async move {
                let descriptor = resolve(&*remote, &text).await;
                on_result(descriptor);
            };
            if let Err(err) = spawner.spawn_local(work) {
                tracing::warn!(%err, "analysis task could not be spawned");
            }
        });
    }
}

// --- Browser bindings ---------------------------------------------------------

/// `window.setTimeout` / `clearTimeout`.
pub struct TimeoutScheduler;

/// Timer id plus the JS callback it refers to; dropping the handle frees the callback.
pub struct TimeoutHandle {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl TaskScheduler for TimeoutScheduler {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
        let win = web_sys::window()?;
        let callback = Closure::once(task);
        let id = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .ok()?;
        Some(TimeoutHandle { id, _callback: callback })
    }

    fn cancel(&self, handle: TimeoutHandle) {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(handle.id);
        }
    }
}

/// Runs futures on the browser microtask queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(
        &self,
        future: futures::task::LocalFutureObj<'static, ()>,
    ) -> Result<(), futures::task::SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::style::Emotion;
    use futures::future::LocalBoxFuture;
    use std::cell::RefCell;

    /// Tasks are only run when the test fires them.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        slots: Rc<RefCell<Vec<Option<Box<dyn FnOnce()>>>>>,
    }

    impl ManualScheduler {
        fn fire_all(&self) {
            let tasks: Vec<_> = self.slots.borrow_mut().iter_mut().filter_map(Option::take).collect();
            for t in tasks {
                t();
            }
        }
    }

    impl TaskScheduler for ManualScheduler {
        type Handle = usize;
        fn schedule(&self, _delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<usize> {
            let mut slots = self.slots.borrow_mut();
            slots.push(Some(task));
            Some(slots.len() - 1)
        }
        fn cancel(&self, handle: usize) {
            self.slots.borrow_mut()[handle] = None;
        }
    }

    struct Unreachable;

    impl RemoteAnalysis for Unreachable {
        fn analyze(&self, _text: &str) -> LocalBoxFuture<'static, Result<EmotionDescriptor, AnalysisError>> {
            Box::pin(futures::future::ready(Err(AnalysisError::Transport("offline".into()))))
        }
    }

    #[test]
    fn debouncer_cancels_previous_task() {
        let sched = ManualScheduler::default();
        let ran = Rc::new(RefCell::new(Vec::new()));
        let mut d = Debouncer::new(sched.clone(), 120);
        for n in 1..=3 {
            let ran = Rc::clone(&ran);
            d.call(move || ran.borrow_mut().push(n));
        }
        sched.fire_all();
        assert_eq!(*ran.borrow(), vec![3]);
        assert_eq!(d.window_ms(), 120);
    }

    #[test]
    fn tasks_after_firing_run_again() {
        let sched = ManualScheduler::default();
        let count = Rc::new(RefCell::new(0));
        let mut d = Debouncer::new(sched.clone(), 120);
        let c = Rc::clone(&count);
        d.call(move || *c.borrow_mut() += 1);
        sched.fire_all();
        let c = Rc::clone(&count);
        d.call(move || *c.borrow_mut() += 1);
        sched.fire_all();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn resolve_falls_back_to_local() {
        let d = futures::executor::block_on(resolve(&Unreachable, "I feel joy and warmth"));
        assert_eq!(d, analyze("I feel joy and warmth"));
        assert_eq!(d.emotion, Emotion::Joy);
    }
}

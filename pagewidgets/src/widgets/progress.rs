//! Progress bar with an optional kill switch.

use pagedom::{generate_id, handler, Element, EventKind, Handler, HandlerRegistry};

use crate::state::State;

const MAX: u32 = 100;

/// A percentage progress bar.
///
/// # Example
///
/// ```
/// use pagewidgets::widgets::ProgressBar;
///
/// let bar = ProgressBar::new();
/// bar.update_progress(40);
/// bar.update_progress(140); // ignored
/// bar.increment_progress(80);
/// assert_eq!(bar.value(), 100);
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    id: String,
    value: State<u32>,
    animated: bool,
    kill_switch: bool,
    stopped: State<bool>,
    on_stop: Option<Handler>,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            id: generate_id("progress"),
            value: State::new(0),
            animated: false,
            kill_switch: false,
            stopped: State::new(false),
            on_stop: None,
        }
    }

    /// Use the striped, animated bar style.
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Show a "Stop" button next to the bar.
    pub fn with_kill_switch(mut self) -> Self {
        self.kill_switch = true;
        self
    }

    /// Handler run when the stop button is clicked. Implies a kill switch.
    pub fn on_stop(mut self, handler: Handler) -> Self {
        self.kill_switch = true;
        self.on_stop = Some(handler);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stop_id(&self) -> String {
        format!("{}-stop", self.id)
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Whether the stop button was clicked.
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Set the progress. Values above 100 are ignored.
    pub fn update_progress(&self, value: u32) {
        if value <= MAX {
            self.value.set(value);
        }
    }

    /// Advance the progress, stopping at 100.
    pub fn increment_progress(&self, delta: u32) {
        self.value.update(|v| *v = v.saturating_add(delta).min(MAX));
    }

    pub fn build(&self, registry: &HandlerRegistry) -> Element {
        let value = self.value();

        let mut bar = Element::div()
            .id(format!("{}-bar", self.id))
            .class("progress-bar")
            .attr("role", "progressbar")
            .attr("aria-valuemin", "0")
            .attr("aria-valuemax", MAX.to_string())
            .attr("aria-valuenow", value.to_string())
            .attr("style", format!("width: {value}%"));
        if self.animated {
            bar = bar.class("progress-bar-striped progress-bar-animated");
        }

        let mut root = Element::div().id(&self.id).class("progress-container");
        if self.kill_switch {
            root = root.child(self.stop_button(registry));
        }
        root.child(Element::div().class("progress").child(bar))
    }

    fn stop_button(&self, registry: &HandlerRegistry) -> Element {
        let id = self.stop_id();
        let stopped = self.stopped.clone();
        let on_stop = self.on_stop.clone();
        registry.register(
            &id,
            EventKind::Click,
            handler(move |event, page| {
                let stopped = stopped.clone();
                let on_stop = on_stop.clone();
                async move {
                    stopped.set(true);
                    match on_stop {
                        Some(on_stop) => on_stop(event, page).await,
                        None => Ok(()),
                    }
                }
            }),
        );
        Element::button("Stop")
            .id(id)
            .class("button is-danger")
            .disabled(self.is_stopped())
    }
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("id", &self.id)
            .field("value", &self.value())
            .field("animated", &self.animated)
            .field("kill_switch", &self.kill_switch)
            .finish()
    }
}

//! Test utilities for driving states against simulated animations.
//!
//! [`AnimatedElement`] stands in for a rendered element with CSS animations.
//! It watches a driver's class name and, whenever a scripted class appears,
//! plays the matching animation: `animationstart` one frame later and
//! `animationend` after the scripted duration.
//!
//! # Example
//! ```ignore
//! let (driver, mut rx) = StateDriver::channel(CollapseState::new(options, 1));
//! let _element = AnimatedElement::attach(&driver, 1, vec![
//!     ScriptedAnimation::new(CollapsePhase::Expanding.class(), "panel-expanding", Duration::from_millis(900)),
//! ]);
//! ```

use std::time::Duration;

use statecss::ClassName;
use tokio::task::JoinHandle;

use crate::driver::{PhaseMachine, StateDriver};
use crate::tracker::{AnimationEvent, ElementId, EventTarget};

/// Delay between a class name change and the animation starting.
pub const FRAME: Duration = Duration::from_millis(16);

/// An animation played while an element carries `class`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedAnimation {
    pub class: ClassName,
    pub name: String,
    pub duration: Duration,
}

impl ScriptedAnimation {
    /// `class` is a full class name such as `is-expanding`.
    pub fn new(class: &str, name: impl Into<String>, duration: Duration) -> Self {
        Self {
            class: ClassName::state(class.trim_start_matches("is-")),
            name: name.into(),
            duration,
        }
    }
}

/// Simulated element bound to a driver. Stops playing when dropped.
pub struct AnimatedElement {
    task: JoinHandle<()>,
}

impl AnimatedElement {
    pub fn attach<M: PhaseMachine>(
        driver: &StateDriver<M>,
        element: ElementId,
        script: Vec<ScriptedAnimation>,
    ) -> Self {
        let driver = driver.clone();
        let mut classes = driver.classname_watch();
        let target = EventTarget::new(element, "div");

        let task = tokio::spawn(async move {
            loop {
                let class = classes.borrow_and_update().clone();
                if let Some(animation) = script.iter().find(|a| a.class == class) {
                    tokio::time::sleep(FRAME).await;
                    driver.animation_event(&AnimationEvent::start(&animation.name, target.clone()));
                    tokio::time::sleep(animation.duration).await;
                    driver.animation_event(&AnimationEvent::end(&animation.name, target.clone()));
                }
                if !driver.is_live() || classes.changed().await.is_err() {
                    break;
                }
            }
        });

        Self { task }
    }
}

impl Drop for AnimatedElement {
    fn drop(&mut self) {
        self.task.abort();
    }
}

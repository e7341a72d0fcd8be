//! Style sheets for the interaction states.
//!
//! A [`StateStyles`] is set up once by the host and passed to whatever
//! computes component styles. It owns the animation registry every state
//! registers its `--{name}-anim` property in, and caches each state's sheet.

use std::sync::Arc;

use statecss::{AnimationRegistry, OptionsCache, StateSheet};

use crate::binary::{BinaryKind, BinaryState};
use crate::view::ViewState;

const VIEW_KEY: &str = "view";

#[derive(Debug, Default)]
pub struct StateStyles {
    registry: AnimationRegistry,
    cache: OptionsCache<&'static str, StateSheet>,
}

impl StateStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sheet for a binary state kind, computed on first use.
    pub fn sheet_for<K: BinaryKind>(&mut self) -> Arc<StateSheet> {
        let registry = &mut self.registry;
        self.cache
            .get_or_insert_with(K::NAME, |_| BinaryState::<K>::style_sheet(registry))
    }

    pub fn view_sheet(&mut self) -> Arc<StateSheet> {
        let registry = &mut self.registry;
        self.cache
            .get_or_insert_with(VIEW_KEY, |_| ViewState::style_sheet(registry))
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// Drops every cached sheet. Registered animations stay registered.
    pub fn clear_cache(&mut self) {
        self.cache.clear_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::active::ActiveKind;
    use crate::states::collapse::CollapseKind;

    #[test]
    fn test_sheets_are_cached() {
        let mut styles = StateStyles::new();
        let first = styles.sheet_for::<ActiveKind>();
        let second = styles.sheet_for::<ActiveKind>();
        assert!(Arc::ptr_eq(&first, &second));

        styles.sheet_for::<CollapseKind>();
        styles.view_sheet();
        assert_eq!(
            styles.registry().compose(),
            "var(--active-anim), var(--expanded-anim), var(--view-anim)"
        );

        styles.clear_cache();
        let third = styles.sheet_for::<ActiveKind>();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(styles.registry().len(), 3);
    }
}

//! Integration tests for state rule rendering and registries.

use statecss::{
    AnimationRegistry, ClassName, CssError, OptionsCache, StateRule, StateSheet, VarScope,
    validate_selector,
};

// ============================================================================
// STATE SHEETS
// ============================================================================

fn activation_sheet() -> StateSheet {
    let scope = VarScope::new("act").unwrap();
    let anim = scope.var("anim").unwrap();
    let on = scope.var("on").unwrap();

    StateSheet::new()
        .with(StateRule::new(ClassName::state("activating")).set(&anim, "var(--act-anim-in)"))
        .with(StateRule::new(ClassName::state("active")).set(&on, "1"))
        .with(StateRule::new(ClassName::state("deactivating")).set(&anim, "var(--act-anim-out)"))
        .with(StateRule::new(ClassName::state("inactive")).set(&on, "0"))
}

#[test]
fn test_sheet_renders_one_block_per_class() {
    insta::assert_snapshot!(activation_sheet().to_css(), @r"
    .is-activating {
        --act-anim: var(--act-anim-in);
    }
    .is-active {
        --act-on: 1;
    }
    .is-deactivating {
        --act-anim: var(--act-anim-out);
    }
    .is-inactive {
        --act-on: 0;
    }
    ");
}

#[test]
fn test_sheet_lookup_by_class() {
    let sheet = activation_sheet();
    let rule = sheet.rule_for(&ClassName::state("active")).unwrap();
    assert_eq!(rule.declarations.len(), 1);
    assert!(sheet.rule_for(&ClassName::state("pressed")).is_none());
}

// ============================================================================
// REGISTRIES AND CACHES
// ============================================================================

#[test]
fn test_registry_feeds_animation_shorthand() {
    let scope = VarScope::new("check").unwrap();
    let mut registry = AnimationRegistry::new();
    registry.register(scope.var("anim").unwrap());
    registry.register(scope.var("anim-focus").unwrap());

    let shorthand = format!("animation: {};", registry.compose());
    assert_eq!(
        shorthand,
        "animation: var(--check-anim), var(--check-anim-focus);"
    );
}

#[test]
fn test_cache_keyed_by_options() {
    let mut cache: OptionsCache<(&str, bool), StateSheet> = OptionsCache::new();
    let a = cache.get_or_insert_with(("act", true), |_| activation_sheet());
    let b = cache.get_or_insert_with(("act", true), |_| StateSheet::new());
    assert_eq!(a.rules().len(), 4);
    assert_eq!(b.rules().len(), 4);

    cache.clear_cache();
    let c = cache.get_or_insert_with(("act", true), |_| StateSheet::new());
    assert!(c.rules().is_empty());
}

// ============================================================================
// FILTER VALIDATION
// ============================================================================

#[test]
fn test_invalid_filters_fail_fast() {
    for source in ["", ".a > .b", ".a .b", "#", "[=x]", ".a,"] {
        let result = validate_selector(source);
        assert!(
            matches!(result, Err(CssError::InvalidSelector { .. })),
            "expected {source:?} to be rejected"
        );
    }
}

#[test]
fn test_valid_filters_accepted() {
    for source in ["*", ".indicator", "button.thumb", "#knob, .knob", "[data-part=track]"] {
        assert!(validate_selector(source).is_ok(), "expected {source:?} to parse");
    }
}

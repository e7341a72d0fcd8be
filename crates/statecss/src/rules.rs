//! State rules: "set variable X to Y when state class Z is present".
//!
//! This is the only thing the interaction states need from a styling
//! backend. A [`StateSheet`] collects one [`StateRule`] per class and renders
//! plain CSS text, which a host hands to its own CSS-in-JS engine or injects
//! as a `<style>` element.

use std::fmt;

use crate::class::ClassName;
use crate::style::StyleMap;
use crate::vars::CssVar;

/// Custom property assignments that apply while `class` is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateRule {
    pub class: ClassName,
    pub declarations: StyleMap,
}

impl StateRule {
    pub fn new(class: ClassName) -> Self {
        Self {
            class,
            declarations: StyleMap::new(),
        }
    }

    pub fn set(mut self, var: &CssVar, value: impl Into<String>) -> Self {
        self.declarations.set(var, value);
        self
    }
}

impl fmt::Display for StateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.class.selector())?;
        for (var, value) in self.declarations.iter() {
            writeln!(f, "    {var}: {value};")?;
        }
        write!(f, "}}")
    }
}

/// An ordered set of state rules. Later rules for the same class merge into
/// the earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateSheet {
    rules: Vec<StateRule>,
}

impl StateSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: StateRule) {
        match self.rules.iter_mut().find(|r| r.class == rule.class) {
            Some(existing) => {
                for (var, value) in rule.declarations.iter() {
                    existing.declarations.set(var, value);
                }
            }
            None => self.rules.push(rule),
        }
    }

    pub fn with(mut self, rule: StateRule) -> Self {
        self.push(rule);
        self
    }

    pub fn rules(&self) -> &[StateRule] {
        &self.rules
    }

    pub fn rule_for(&self, class: &ClassName) -> Option<&StateRule> {
        self.rules.iter().find(|r| &r.class == class)
    }

    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

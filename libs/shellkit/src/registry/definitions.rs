//! Capability definitions contributed by modules.

use serde::{Deserialize, Serialize};

use super::component::ComponentRef;

/// Where an action is offered in entity views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPosition {
    /// Per-record action in list rows.
    Row,
    /// Toolbar action acting on the whole list.
    Global,
    #[default]
    Both,
}

impl ActionPosition {
    /// Whether an action placed at `self` shows up for a `requested` placement.
    ///
    /// Requesting `Both` matches everything.
    #[must_use]
    pub fn satisfies(self, requested: ActionPosition) -> bool {
        match requested {
            ActionPosition::Both => true,
            ActionPosition::Row | ActionPosition::Global => {
                self == requested || self == ActionPosition::Both
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDefinition {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

impl ModuleDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionDefinition {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub entity_types: Vec<String>,
    pub position: ActionPosition,
    pub component: ComponentRef,
}

impl ActionDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            entity_types: Vec::new(),
            position: ActionPosition::default(),
            component,
        }
    }

    #[must_use]
    pub fn for_entities<I, S>(mut self, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_types = entity_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn at(mut self, position: ActionPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TabDefinition {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub entity_types: Vec<String>,
    /// Placement among the entity's tabs; `None` sorts as `0`.
    pub order: Option<i32>,
    pub component: ComponentRef,
}

impl TabDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            entity_types: Vec::new(),
            order: None,
            component,
        }
    }

    #[must_use]
    pub fn for_entities<I, S>(mut self, entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_types = entity_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn sort_key(&self) -> i32 {
        self.order.unwrap_or(0)
    }
}

/// A way of presenting a record list (table, calendar, board).
#[derive(Debug, Clone, Serialize)]
pub struct ViewTypeDefinition {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub component: ComponentRef,
}

impl ViewTypeDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            component,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Body used when a single record is opened.
#[derive(Debug, Clone, Serialize)]
pub struct DetailComponentDefinition {
    pub id: String,
    pub component: ComponentRef,
}

impl DetailComponentDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            id: id.into(),
            component,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::ActionPosition::{Both, Global, Row};

    #[test]
    fn position_matrix() {
        assert!(Row.satisfies(Row));
        assert!(!Row.satisfies(Global));
        assert!(Both.satisfies(Row));
        assert!(Both.satisfies(Global));
        assert!(Global.satisfies(Both));
        assert!(!Global.satisfies(Row));
    }
}

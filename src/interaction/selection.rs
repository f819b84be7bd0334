use std::cell::RefCell;
use std::rc::Rc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SelectHandler;
use crate::core::XValue;

/// `{label, value}` pair inside a column selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: Option<String>,
    pub value: f64,
}

/// One selected element, serialized with the keys hosts already consume.
///
/// Variant order matters for untagged decoding: the most specific shapes
/// come first. Equality is structural with `NaN` equal to itself, so a
/// missing value still toggles off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionItem {
    /// A scatter dot.
    Point {
        dataset_index: usize,
        point_index: usize,
        label: Option<String>,
        x: XValue,
        y: f64,
    },
    /// Every dataset's value at one label (line, radar).
    Column {
        index: usize,
        label: String,
        values: Vec<LabeledValue>,
    },
    /// One stacked-bar segment.
    Segment {
        index: usize,
        label: String,
        #[serde(deserialize_with = "Option::deserialize")]
        dataset: Option<String>,
        value: f64,
    },
    /// One bar or pie slice.
    Category {
        index: usize,
        label: String,
        value: f64,
    },
}

fn same_number(a: f64, b: f64) -> bool {
    OrderedFloat(a) == OrderedFloat(b)
}

fn same_x(a: &XValue, b: &XValue) -> bool {
    match (a, b) {
        (XValue::Number(a), XValue::Number(b)) => same_number(*a, *b),
        (XValue::Text(a), XValue::Text(b)) => a == b,
        _ => false,
    }
}

impl PartialEq for LabeledValue {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && same_number(self.value, other.value)
    }
}

impl PartialEq for SelectionItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                SelectionItem::Point {
                    dataset_index,
                    point_index,
                    label,
                    x,
                    y,
                },
                SelectionItem::Point {
                    dataset_index: other_dataset_index,
                    point_index: other_point_index,
                    label: other_label,
                    x: other_x,
                    y: other_y,
                },
            ) => {
                dataset_index == other_dataset_index
                    && point_index == other_point_index
                    && label == other_label
                    && same_x(x, other_x)
                    && same_number(*y, *other_y)
            }
            (
                SelectionItem::Column {
                    index,
                    label,
                    values,
                },
                SelectionItem::Column {
                    index: other_index,
                    label: other_label,
                    values: other_values,
                },
            ) => index == other_index && label == other_label && values == other_values,
            (
                SelectionItem::Segment {
                    index,
                    label,
                    dataset,
                    value,
                },
                SelectionItem::Segment {
                    index: other_index,
                    label: other_label,
                    dataset: other_dataset,
                    value: other_value,
                },
            ) => {
                index == other_index
                    && label == other_label
                    && dataset == other_dataset
                    && same_number(*value, *other_value)
            }
            (
                SelectionItem::Category {
                    index,
                    label,
                    value,
                },
                SelectionItem::Category {
                    index: other_index,
                    label: other_label,
                    value: other_value,
                },
            ) => index == other_index && label == other_label && same_number(*value, *other_value),
            _ => false,
        }
    }
}

/// What a gesture hands to the select callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionPayload {
    Single(SelectionItem),
    /// Box selection; never empty when dispatched.
    Many(Vec<SelectionItem>),
}

impl SelectionPayload {
    #[must_use]
    pub fn items(&self) -> &[SelectionItem] {
        match self {
            SelectionPayload::Single(item) => std::slice::from_ref(item),
            SelectionPayload::Many(items) => items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Removes every incoming element already present (structural equality)
/// and appends the rest, in incoming order.
pub fn toggle_items<T: PartialEq + Clone>(current: &mut Vec<T>, incoming: &[T]) {
    for item in incoming {
        if let Some(position) = current.iter().position(|existing| existing == item) {
            current.remove(position);
        } else {
            current.push(item.clone());
        }
    }
}

/// Host-side selection set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    items: Vec<SelectionItem>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the set with `payload`, or toggles each item when `additive`.
    pub fn apply(&mut self, payload: &SelectionPayload, additive: bool) {
        if additive {
            toggle_items(&mut self.items, payload.items());
        } else {
            self.items = payload.items().to_vec();
        }
    }
}

/// Keeps a [`Selection`] in sync with a chart's select callback.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Rc<RefCell<Selection>>,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback to install as `Options::on_select`.
    #[must_use]
    pub fn handler(&self) -> SelectHandler {
        let selection = Rc::clone(&self.selection);
        SelectHandler::new(move |payload, additive| {
            let mut selection = selection.borrow_mut();
            selection.apply(payload, additive);
            debug!(
                incoming = payload.len(),
                additive,
                selected = selection.len(),
                "selection updated"
            );
        })
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection.borrow().clone()
    }

    pub fn clear(&self) {
        self.selection.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionItem, same_number, toggle_items};
    use crate::core::XValue;

    #[test]
    fn toggling_twice_restores_the_original_set() {
        let mut current = vec![1, 2];
        toggle_items(&mut current, &[3, 1]);
        assert_eq!(current, vec![2, 3]);
        toggle_items(&mut current, &[3, 1]);
        assert_eq!(current, vec![2, 1]);
    }

    #[test]
    fn nan_values_compare_equal_to_themselves() {
        assert!(same_number(f64::NAN, f64::NAN));
        assert!(!same_number(f64::NAN, 0.0));
        let point = SelectionItem::Point {
            dataset_index: 0,
            point_index: 1,
            label: None,
            x: XValue::Number(f64::NAN),
            y: 2.0,
        };
        assert_eq!(point, point.clone());
    }
}

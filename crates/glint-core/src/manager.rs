//! Widget set manager.
//!
//! Owns the live collection of widget sets for the process lifetime and
//! keeps the property store in sync through the codec. All operations match
//! sets structurally (runtime ids never persist, so there is no stable
//! identity to match on): operations that add mutate *every* structural
//! match, removal stops at the *first* match. Callers holding a stale copy
//! refresh it with [`WidgetSetManager::updated_widget_set`].
//!
//! Single-owner by contract: nothing here locks, and no operation is atomic
//! across its match-mutate-save sequence.

use crate::codec;
use crate::kind::WidgetKind;
use crate::set::{PlacedWidget, WidgetSet};
use crate::storage::PropertyStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// The store key the widget set tree persists under.
pub const WIDGET_PROPERTIES_KEY: &str = "widgetProperties";

/// Errors from widget set mutations.
///
/// Only programmer-detectable misuse is an error; a mutation aimed at a set
/// or widget that no longer matches anything is a silent no-op.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("widget index {index} out of range for set with {len} widgets")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Manages the live widget set collection and its persistence.
pub struct WidgetSetManager<S: PropertyStore> {
    /// The live collection, in render/list order.
    sets: Vec<WidgetSet>,
    /// Storage backend.
    store: Arc<S>,
}

impl<S: PropertyStore> WidgetSetManager<S> {
    /// Create a manager populated from the store's current contents.
    pub fn new(store: Arc<S>) -> Self {
        let mut manager = Self::with_sets(store, Vec::new());
        manager.sets = manager.load();
        manager
    }

    /// Create a manager with an explicit starting collection.
    pub fn with_sets(store: Arc<S>, sets: Vec<WidgetSet>) -> Self {
        Self { sets, store }
    }

    /// The current widget sets, in order.
    pub fn sets(&self) -> &[WidgetSet] {
        &self.sets
    }

    /// Get the number of widget sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if there are no widget sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Decode the store's current contents.
    ///
    /// Does not touch the in-memory collection; exposed for explicit
    /// refresh.
    pub fn load(&self) -> Vec<WidgetSet> {
        match self.store.get(WIDGET_PROPERTIES_KEY) {
            Ok(tree) => codec::decode_sets(tree.as_ref()),
            Err(e) => {
                log::warn!("Failed to load widget sets: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist the in-memory collection.
    ///
    /// An empty collection removes the key entirely instead of writing an
    /// empty array. Store write failures are logged, not propagated; the
    /// in-memory collection remains the source of truth.
    pub fn save(&self) {
        let result = if self.sets.is_empty() {
            self.store.remove(WIDGET_PROPERTIES_KEY)
        } else {
            self.store
                .set(WIDGET_PROPERTIES_KEY, &codec::encode_sets(&self.sets))
        };
        if let Err(e) = result {
            log::warn!("Failed to persist widget sets: {}", e);
        }
    }

    /// Append a freshly constructed widget to every set matching `set`.
    ///
    /// Returns the constructed widget whether or not anything matched.
    pub fn add_widget(
        &mut self,
        set: &WidgetSet,
        kind: WidgetKind,
        config: Map<String, Value>,
        save: bool,
    ) -> PlacedWidget {
        let widget = PlacedWidget::new(kind, config);
        for s in self.sets.iter_mut().filter(|s| **s == *set) {
            s.widgets.push(widget.clone());
        }
        if save {
            self.save();
        }
        widget
    }

    /// Remove the widget at `index` from every set matching `set`.
    ///
    /// Errors on an index past a matched set's current length (checked per
    /// match, not against the caller's possibly stale view). Unlike
    /// [`WidgetSetManager::remove_widget`], this is a hard error rather
    /// than a no-op.
    pub fn remove_widget_at(
        &mut self,
        set: &WidgetSet,
        index: usize,
        save: bool,
    ) -> Result<(), ManagerError> {
        for s in self.sets.iter_mut().filter(|s| **s == *set) {
            if index >= s.widgets.len() {
                return Err(ManagerError::IndexOutOfRange {
                    index,
                    len: s.widgets.len(),
                });
            }
            s.widgets.remove(index);
        }
        if save {
            self.save();
        }
        Ok(())
    }

    /// Remove the first widget with `widget`'s id from sets matching `set`.
    ///
    /// Silent no-op when the widget is not in the `set` snapshot.
    pub fn remove_widget(&mut self, set: &WidgetSet, widget: &PlacedWidget, save: bool) {
        if let Some(index) = set.widgets.iter().position(|w| w.id == widget.id) {
            // Matched sets mirror the snapshot's widget list, so the
            // derived index is in range for every match.
            let _ = self.remove_widget_at(set, index, save);
        }
    }

    /// Replace the config of the widget with `widget`'s id in the first set
    /// matching `set`.
    ///
    /// Silent no-op when either the set or the widget no longer matches.
    pub fn update_widget_config(
        &mut self,
        set: &WidgetSet,
        widget: &PlacedWidget,
        new_config: Map<String, Value>,
        save: bool,
    ) {
        let Some(set_index) = self.sets.iter().position(|s| s == set) else {
            return;
        };
        let Some(widget_index) = self.sets[set_index]
            .widgets
            .iter()
            .position(|w| w.id == widget.id)
        else {
            return;
        };
        self.sets[set_index].widgets[widget_index].config = new_config;
        if save {
            self.save();
        }
    }

    /// Append a widget set. New sets always list last.
    pub fn add_widget_set(&mut self, set: WidgetSet, save: bool) {
        self.sets.push(set);
        if save {
            self.save();
        }
    }

    /// Remove the first set matching `set`.
    pub fn remove_widget_set(&mut self, set: &WidgetSet, save: bool) {
        if let Some(index) = self.sets.iter().position(|s| s == set) {
            self.sets.remove(index);
        }
        if save {
            self.save();
        }
    }

    /// Create and append a widget set with the default bundle.
    pub fn create_widget_set(&mut self, title: &str, anchor: i64, save: bool) {
        self.add_widget_set(WidgetSet::new(title, anchor), save);
    }

    /// Overwrite every field except the widget list in the first set
    /// matching `set` with the values from `new_details`.
    pub fn edit_widget_set(&mut self, set: &WidgetSet, new_details: &WidgetSet, save: bool) {
        if let Some(s) = self.sets.iter_mut().find(|s| **s == *set) {
            s.title = new_details.title.clone();

            s.anchor = new_details.anchor;
            s.anchor_y = new_details.anchor_y;
            s.offset_x = new_details.offset_x;
            s.offset_y = new_details.offset_y;

            s.auto_resizes = new_details.auto_resizes;
            s.scale = new_details.scale;
            s.scale_y = new_details.scale_y;

            s.blur = new_details.blur.clone();
            s.color = new_details.color.clone();

            s.text_bold = new_details.text_bold;
            s.text_alignment = new_details.text_alignment;
            s.font_size = new_details.font_size;
            s.text_alpha = new_details.text_alpha;
            // The widget list stays as it is, even if new_details carries
            // a different one.
        }
        if save {
            self.save();
        }
    }

    /// Get the current state of the first set matching `set`, for callers
    /// holding a stale copy. `None` if the set has since been removed or
    /// changed.
    pub fn updated_widget_set(&self, set: &WidgetSet) -> Option<WidgetSet> {
        self.sets.iter().find(|s| **s == *set).cloned()
    }
}

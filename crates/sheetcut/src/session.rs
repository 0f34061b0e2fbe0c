//! Editing state of a single cutting job.
//!
//! A [`CutSession`] owns the sheet, the element list and the placements of
//! the last optimizer run. Parts are never stored: [`CutSession::parts`]
//! projects them on every call.

use log::{debug, info, warn};

use sheetcut_core::{
    element::{Category, Dimension, ElementId, ElementSpec, Sheet},
    placement::{Part, Placement},
};

use crate::{
    export::svg::Diagram,
    layout,
    optimizer::{CutRequest, CutResponse, Optimizer, OptimizerError, RequestElement},
};

/// Width of a newly added element.
pub const NEW_ELEMENT_WIDTH: f32 = 100.0;
/// Height of a newly added element.
pub const NEW_ELEMENT_HEIGHT: f32 = 50.0;

/// Smallest value a dimension can be decremented to.
const MIN_DIMENSION: f32 = 1.0;

/// Sheet, elements and placements being edited together.
#[derive(Debug, Clone)]
pub struct CutSession {
    sheet: Sheet,
    elements: Vec<ElementSpec>,
    placements: Vec<Placement>,
    loading: bool,
    error_message: Option<String>,
    next_id: u64,
}

impl CutSession {
    /// Creates an empty session on a default sheet.
    pub fn new() -> Self {
        Self::with_sheet(Sheet::default())
    }

    /// Creates an empty session on the given sheet.
    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheet,
            elements: Vec::new(),
            placements: Vec::new(),
            loading: false,
            error_message: None,
            next_id: 1,
        }
    }

    /// Creates a session from previously defined elements.
    ///
    /// New elements continue numbering after the largest id present.
    pub fn from_elements(sheet: Sheet, elements: Vec<ElementSpec>) -> Self {
        let next_id = elements
            .iter()
            .map(|element| element.id().value())
            .max()
            .map_or(1, |max| max + 1);

        Self {
            elements,
            next_id,
            ..Self::with_sheet(sheet)
        }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheet
    }

    pub fn elements(&self) -> &[ElementSpec] {
        &self.elements
    }

    /// Returns the element at `index` for in-place editing.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut ElementSpec> {
        self.elements.get_mut(index)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Replaces the placements wholesale.
    pub fn set_placements(&mut self, placements: Vec<Placement>) {
        self.placements = placements;
    }

    /// Returns true while an optimizer call is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the message of the last failed optimizer call.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Appends a new `panel` element with the default size and returns its id.
    pub fn add_element(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        self.elements.push(
            ElementSpec::new(id, NEW_ELEMENT_WIDTH, NEW_ELEMENT_HEIGHT)
                .with_category(Category::Panel),
        );
        debug!(id = id.value(); "Element added");
        id
    }

    /// Removes the element at `index`. Its id is never handed out again.
    pub fn remove_element(&mut self, index: usize) -> Option<ElementSpec> {
        if index >= self.elements.len() {
            return None;
        }
        let removed = self.elements.remove(index);
        debug!(id = removed.id().value(); "Element removed");
        Some(removed)
    }

    pub fn inc_sheet(&mut self, dimension: Dimension) {
        let value = increment(self.sheet.dimension(dimension));
        self.sheet.set_dimension(dimension, value);
    }

    /// Decrements a sheet dimension, never going below 1.
    pub fn dec_sheet(&mut self, dimension: Dimension) {
        let value = decrement(self.sheet.dimension(dimension));
        self.sheet.set_dimension(dimension, value);
    }

    pub fn inc_element(&mut self, index: usize, dimension: Dimension) {
        if let Some(element) = self.elements.get_mut(index) {
            let value = increment(element.dimension(dimension));
            element.set_dimension(dimension, value);
        }
    }

    /// Decrements an element dimension, never going below 1.
    pub fn dec_element(&mut self, index: usize, dimension: Dimension) {
        if let Some(element) = self.elements.get_mut(index) {
            let value = decrement(element.dimension(dimension));
            element.set_dimension(dimension, value);
        }
    }

    /// Returns true when the sheet and every element have usable dimensions.
    pub fn is_valid(&self) -> bool {
        let usable = |value: f32| value.is_finite() && value >= MIN_DIMENSION;

        usable(self.sheet.width())
            && usable(self.sheet.height())
            && self
                .elements
                .iter()
                .all(|element| usable(element.width()) && usable(element.height()))
    }

    /// Builds the optimizer request from the current sheet and elements.
    ///
    /// Categories stay local; the optimizer only sees ids and sizes.
    pub fn build_request(&self) -> CutRequest {
        CutRequest {
            sheet_width: self.sheet.width(),
            sheet_height: self.sheet.height(),
            elements: self
                .elements
                .iter()
                .map(|element| RequestElement {
                    id: element.id(),
                    width: element.width(),
                    height: element.height(),
                })
                .collect(),
        }
    }

    /// Starts an optimizer run and returns the request to send.
    ///
    /// Returns `None` and leaves the state untouched when the session is
    /// invalid or has no elements. Otherwise the session is loading until
    /// [`finish_optimize`](Self::finish_optimize) is called.
    pub fn begin_optimize(&mut self) -> Option<CutRequest> {
        if !self.is_valid() || self.elements.is_empty() {
            debug!(
                valid = self.is_valid(),
                elements = self.elements.len();
                "Skipping optimization"
            );
            return None;
        }

        self.loading = true;
        self.error_message = None;
        Some(self.build_request())
    }

    /// Completes the run started by [`begin_optimize`](Self::begin_optimize).
    ///
    /// The placements are replaced by the response, or cleared and the error
    /// message set when the call failed.
    pub fn finish_optimize(&mut self, result: Result<CutResponse, OptimizerError>) {
        match result {
            Ok(response) => {
                info!(placements = response.placements.len(); "Optimization finished");
                self.placements = response.placements;
                let overflowing = self.overflowing_placements().count();
                if overflowing > 0 {
                    warn!(overflowing; "Optimizer placed parts beyond the sheet");
                }
            }
            Err(err) => {
                warn!(err:%; "Optimization failed");
                self.error_message = Some(err.user_message().to_string());
                self.placements.clear();
            }
        }

        self.loading = false;
    }

    /// Runs the optimizer over the current sheet and elements.
    ///
    /// Returns `false` when nothing was sent. See
    /// [`begin_optimize`](Self::begin_optimize); callers that need to observe
    /// [`is_loading`](Self::is_loading) while the call is in flight drive
    /// the two halves themselves.
    pub async fn optimize<O: Optimizer>(&mut self, optimizer: &O) -> bool {
        let Some(request) = self.begin_optimize() else {
            return false;
        };

        let result = optimizer.optimize(&request).await;
        self.finish_optimize(result);
        true
    }

    /// Returns the placements that do not lie entirely on the sheet.
    pub fn overflowing_placements(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.placements
            .iter()
            .filter(|placement| !self.sheet.fits(placement.bounds()))
    }

    /// Projects the current placements onto drawable parts.
    pub fn parts(&self) -> Vec<Part> {
        layout::project(&self.placements, &self.elements)
    }

    /// Returns the diagram for the current sheet and parts.
    pub fn diagram(&self) -> Diagram {
        Diagram::new(self.sheet, self.parts())
    }
}

impl Default for CutSession {
    fn default() -> Self {
        Self::new()
    }
}

fn current(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

fn increment(value: f32) -> f32 {
    current(value) + 1.0
}

fn decrement(value: f32) -> f32 {
    (current(value) - 1.0).max(MIN_DIMENSION)
}

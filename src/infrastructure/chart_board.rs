// Chart board - Publishes live chart descriptions for dashboard clients
//
// The board is the rendering engine behind the HTTP surface: rendering a chart
// binds its description to the quantity's slot, and releasing the handle frees
// the slot again.
use crate::application::chart_controller::{ChartHandle, ChartRenderer, RenderError};
use crate::domain::chart::ChartSpec;
use crate::domain::quantity::Quantity;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Serialize)]
pub struct PublishedChart {
    pub id: u64,
    #[serde(flatten)]
    pub spec: ChartSpec,
}

#[derive(Debug, Default)]
struct Slots {
    next_id: u64,
    charts: BTreeMap<Quantity, PublishedChart>,
}

#[derive(Debug, Clone, Default)]
pub struct ChartBoard {
    slots: Arc<RwLock<Slots>>,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live charts, in quantity order
    pub fn charts(&self) -> Vec<PublishedChart> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.charts.values().cloned().collect()
    }

    /// A renderer that may only draw into the given quantities' slots
    pub fn renderer(&self, targets: &[Quantity]) -> BoardRenderer {
        BoardRenderer {
            board: self.clone(),
            targets: targets.iter().copied().collect(),
        }
    }

    fn publish(&self, spec: ChartSpec) -> Result<BoardHandle, RenderError> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let quantity = spec.quantity;
        if slots.charts.contains_key(&quantity) {
            return Err(RenderError::Engine(format!(
                "{} slot is still bound to a live chart",
                quantity
            )));
        }

        let id = slots.next_id;
        slots.next_id += 1;
        slots.charts.insert(quantity, PublishedChart { id, spec });

        Ok(BoardHandle {
            board: self.clone(),
            quantity,
            id,
        })
    }

    fn withdraw(&self, quantity: Quantity, id: u64) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots.charts.get(&quantity).is_some_and(|chart| chart.id == id) {
            slots.charts.remove(&quantity);
        }
    }
}

pub struct BoardRenderer {
    board: ChartBoard,
    targets: BTreeSet<Quantity>,
}

impl ChartRenderer for BoardRenderer {
    fn render(&mut self, spec: ChartSpec) -> Result<Box<dyn ChartHandle>, RenderError> {
        if !self.targets.contains(&spec.quantity) {
            return Err(RenderError::TargetMissing(spec.quantity));
        }
        Ok(Box::new(self.board.publish(spec)?))
    }
}

pub struct BoardHandle {
    board: ChartBoard,
    quantity: Quantity,
    id: u64,
}

impl ChartHandle for BoardHandle {
    fn release(self: Box<Self>) {
        self.board.withdraw(self.quantity, self.id);
    }
}

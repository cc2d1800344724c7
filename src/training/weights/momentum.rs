use super::WeightChanges;
use crate::{NetErr, Result};

/// The weight changes of the last training pass, kept to add momentum to the next one.
///
/// There is one slot per layer transition. During a pass every transition enqueues its changes
/// exactly once; [`commit`](MomentumHistory::commit) then makes them the previous pass's changes,
/// which are looked up by transition, never by enqueue order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MomentumHistory {
    pending: Vec<Option<WeightChanges>>,
    previous: Vec<Option<WeightChanges>>,
}

impl MomentumHistory {
    /// Creates a new, empty `MomentumHistory`.
    ///
    /// # Arguments
    /// * `transitions` - The amount of layer transitions of the network, its layers minus one.
    pub fn new(transitions: usize) -> Self {
        Self {
            pending: vec![None; transitions],
            previous: vec![None; transitions],
        }
    }

    pub fn transitions(&self) -> usize {
        self.pending.len()
    }

    /// Stores the changes a transition made during the current pass.
    ///
    /// # Errors
    /// `MomentumMismatch` if the transition does not exist or already enqueued this pass.
    pub fn enqueue(&mut self, transition: usize, changes: WeightChanges) -> Result<()> {
        let expected = self.transitions();
        let queued = self.queued();

        let Some(slot) = self.pending.get_mut(transition) else {
            return Err(NetErr::MomentumMismatch {
                got: transition + 1,
                expected,
            });
        };

        if slot.is_some() {
            return Err(NetErr::MomentumMismatch {
                got: queued + 1,
                expected,
            });
        }

        *slot = Some(changes);
        Ok(())
    }

    /// The changes the given transition made during the previous pass.
    pub fn dequeue(&self, transition: usize) -> Option<&WeightChanges> {
        self.previous.get(transition)?.as_ref()
    }

    /// The amount of changes enqueued during the current pass.
    pub fn queued(&self) -> usize {
        self.pending.iter().flatten().count()
    }

    /// The amount of changes available from the previous pass.
    pub fn available(&self) -> usize {
        self.previous.iter().flatten().count()
    }

    /// Ends the current pass.
    ///
    /// # Errors
    /// `MomentumMismatch` if some transition did not enqueue its changes.
    pub fn commit(&mut self) -> Result<()> {
        let got = self.queued();
        let expected = self.transitions();
        if got != expected {
            return Err(NetErr::MomentumMismatch { got, expected });
        }

        self.previous = std::mem::replace(&mut self.pending, vec![None; expected]);
        Ok(())
    }

    /// Drops the changes enqueued during an unfinished pass, the previous pass stays available.
    pub fn discard_pending(&mut self) {
        self.pending.iter_mut().for_each(|slot| *slot = None);
    }
}

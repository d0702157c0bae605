//! Hints: stage a ready triple into the tray.
//!
//! The hint looks for the first id (in board order) with at least three
//! selectable tiles and picks its first three tiles one at a time. Each
//! pick waits for the previous tile to land and for its match resolution
//! to run. The board stays locked for the whole sequence.

use log::{debug, info, warn};
use smallvec::SmallVec;

use super::engine::{Engine, PickOrigin, MATCH_SIZE};
use super::events::RejectReason;
use super::outcome::{HintOutcome, PickOutcome};
use super::state::Activity;
use crate::board::{selectable_tiles, Board};
use crate::core::TileHandle;

/// First three selectable tiles of the first id that has at least three.
#[must_use]
pub fn find_hint(board: &Board) -> Option<[TileHandle; 3]> {
    let mut groups: Vec<(i32, SmallVec<[TileHandle; 3]>)> = Vec::new();
    for handle in selectable_tiles(board) {
        let Some(id) = board.get(handle).map(|t| t.id) else {
            continue;
        };
        match groups.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, members)) => members.push(handle),
            None => groups.push((id, SmallVec::from_elem(handle, 1))),
        }
    }
    groups
        .into_iter()
        .find(|(_, members)| members.len() >= MATCH_SIZE)
        .map(|(_, members)| [members[0], members[1], members[2]])
}

impl Engine {
    /// Start a hint sequence.
    pub fn hint(&mut self) -> HintOutcome {
        if !self.is_idle() {
            debug!("hint rejected: board is {:?}", self.state());
            return HintOutcome::Rejected(RejectReason::Busy);
        }
        let Some(staged) = find_hint(&self.board) else {
            debug!("hint found no selectable triple");
            return HintOutcome::NoMatch;
        };
        let needed = self.slots_needed(staged[0]);
        let free = self.tray.capacity() - self.tray.len();
        if free < needed {
            debug!("hint needs {} free tray slots, {} available", needed, free);
            return HintOutcome::Rejected(RejectReason::TrayFull);
        }

        info!("hint staging {:?}", staged);
        self.activity = Activity::HintRunning {
            queued: SmallVec::from_slice(&staged[1..]),
        };
        let outcome = match self.pick_from(staged[0], PickOrigin::Hint) {
            PickOutcome::Accepted(_) => HintOutcome::Started(staged),
            PickOutcome::Rejected(reason) => {
                self.activity = Activity::Idle;
                HintOutcome::Rejected(reason)
            }
        };
        self.refresh_selectability();
        outcome
    }

    /// Tray slots that must be free for a staged triple to reach its match:
    /// tray tiles sharing the staged id complete the triple early.
    fn slots_needed(&self, staged: TileHandle) -> usize {
        let Some(id) = self.board.get(staged).map(|t| t.id) else {
            return MATCH_SIZE;
        };
        let in_tray = self
            .tray
            .tiles()
            .iter()
            .filter(|&&h| self.board.get(h).is_some_and(|t| t.id == id))
            .count();
        MATCH_SIZE.saturating_sub(in_tray).max(1)
    }

    /// Pick the next staged tile, or release the lock when none remain.
    pub(crate) fn advance_hint(&mut self) {
        let next = match &mut self.activity {
            Activity::HintRunning { queued } if !queued.is_empty() => Some(queued.remove(0)),
            Activity::HintRunning { .. } => None,
            _ => return,
        };

        match next {
            None => {
                self.activity = Activity::Idle;
                debug!("hint finished");
            }
            Some(tile) => {
                if let PickOutcome::Rejected(reason) = self.pick_from(tile, PickOrigin::Hint) {
                    warn!("hint abandoned at {}: {:?}", tile, reason);
                    self.activity = Activity::Idle;
                }
            }
        }
    }
}

//! Pure cue classification: what the discovered neighbours of a frontier cell say about it.

use crate::grid::Cell;
use crate::types::Risk;

/// Cue reading of a single discovered neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborCue {
    Clear,
    WindyOnly,
    SmellyOnly,
    Both,
}

impl NeighborCue {
    pub fn of(cell: &Cell) -> Self {
        match (cell.windy, cell.smelly) {
            (false, false) => NeighborCue::Clear,
            (true, false) => NeighborCue::WindyOnly,
            (false, true) => NeighborCue::SmellyOnly,
            (true, true) => NeighborCue::Both,
        }
    }

    fn is_cue(self) -> bool {
        self != NeighborCue::Clear
    }
}

/// Summary of a set of neighbour cues.
///
/// `Mixed(n)` covers every non-unanimous reading and counts the cue-bearing neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueClass {
    None,
    AllWindy,
    AllSmelly,
    Mixed(u8),
}

pub fn classify(cues: &[NeighborCue]) -> CueClass {
    let bearing = cues.iter().filter(|cue| cue.is_cue()).count();
    if bearing == 0 {
        CueClass::None
    } else if cues.iter().all(|cue| *cue == NeighborCue::WindyOnly) {
        CueClass::AllWindy
    } else if cues.iter().all(|cue| *cue == NeighborCue::SmellyOnly) {
        CueClass::AllSmelly
    } else {
        CueClass::Mixed(bearing as u8)
    }
}

/// Risk of a frontier cell with `k` discovered neighbours summarised by `class`.
///
/// Full-coverage mixed readings share the all-smelly tier for their `k`.
///
/// # Panics
///
/// Panics if `k` is outside `1..=4` while `class` carries a cue; an orthogonal grid
/// never gives a cell more than four neighbours.
pub fn risk_for(k: usize, class: CueClass) -> Risk {
    let tenths = match (k, class) {
        (_, CueClass::None) => 0,
        (1, CueClass::AllWindy) => 3,
        (1, CueClass::AllSmelly | CueClass::Mixed(_)) => 2,
        (2, CueClass::Mixed(1)) => 4,
        (2, CueClass::AllSmelly | CueClass::Mixed(_)) => 5,
        (2, CueClass::AllWindy) => 6,
        (3, CueClass::Mixed(1)) => 5,
        (3, CueClass::Mixed(2)) => 6,
        (3, CueClass::AllSmelly | CueClass::Mixed(_)) => 7,
        (3, CueClass::AllWindy) => 8,
        (4, CueClass::Mixed(1)) => 4,
        (4, CueClass::Mixed(2)) => 6,
        (4, CueClass::AllSmelly | CueClass::Mixed(_)) => 8,
        (4, CueClass::AllWindy) => 10,
        _ => unreachable!("{k} discovered neighbours reported for an orthogonal grid"),
    };
    Risk::from_tenths(tenths)
}

/// Classifies `cues` and looks up the matching risk.
///
/// # Panics
///
/// Panics if more than four cues are given and at least one of them is not clear.
pub fn risk_of(cues: &[NeighborCue]) -> Risk {
    risk_for(cues.len(), classify(cues))
}

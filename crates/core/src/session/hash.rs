//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from turn control code.
//! It does not decide what counts as equal runs beyond the hashed fields.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.level);
        hasher.write_u64(self.turn);
        hasher.write_i64(self.score);
        hasher.write_i32(self.agent.row);
        hasher.write_i32(self.agent.col);

        let frontier = self.explorer.frontier();
        hasher.write_usize(frontier.discovered().len());
        for pos in frontier.discovered() {
            hasher.write_i32(pos.row);
            hasher.write_i32(pos.col);
        }
        for (risk, cells) in frontier.frontier_cells() {
            hasher.write_u8(risk.tenths());
            hasher.write_usize(cells.len());
            for pos in cells {
                hasher.write_i32(pos.row);
                hasher.write_i32(pos.col);
            }
        }
        hasher.finish()
    }
}

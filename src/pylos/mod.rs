/*
 *  The rules-facing half of the Pylos engine: lattice, board, moves and simulation.
 */

pub(crate) mod board;
pub(crate) mod consts;
pub mod coords;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod simulator;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, Layout},
        consts::*,
        coords::{self, *},
        movegen::{generate, legal_moves},
        moves::{Action, Move},
        notation::*,
        simulator::Simulator,
    };
}

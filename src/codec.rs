//! Binary snapshots of positions
//!
//! A snapshot is a 4 byte header followed by one tag byte per cell:
//!
//! | bytes | content                                  |
//! |-------|------------------------------------------|
//! | 0     | board width                              |
//! | 1     | board height                             |
//! | 2..4  | number of stones played, big endian      |
//! | 4..   | cells in column-major order, top first   |
//!
//! Cell tags are 0 for an empty cell, 1 for Red and 2 for Yellow.

use anyhow::{anyhow, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use std::io::{Read, Write};

use crate::{Board, GameState, Stone};

/// Writes a snapshot of `state`
pub fn write_state<W: Write>(writer: &mut W, state: &GameState) -> Result<()> {
    let width = u8::try_from(state.width())
        .map_err(|_| anyhow!("board width {} does not fit in a snapshot", state.width()))?;
    let height = u8::try_from(state.height())
        .map_err(|_| anyhow!("board height {} does not fit in a snapshot", state.height()))?;

    writer.write_u8(width)?;
    writer.write_u8(height)?;
    writer.write_u16::<BigEndian>(state.turns() as u16)?;
    for stone in crate::serialize(state) {
        writer.write_u8(stone.to_tag())?;
    }
    Ok(())
}

/// Reads a snapshot, checking that it describes a reachable position
pub fn read_state<R: Read>(reader: &mut R) -> Result<GameState> {
    let width = reader.read_u8()? as usize;
    let height = reader.read_u8()? as usize;
    if width == 0 || height == 0 {
        return Err(anyhow!("invalid board size {}x{}", width, height));
    }
    let turns = reader.read_u16::<BigEndian>()? as usize;

    let mut cells = Vec::with_capacity(width * height);
    for _ in 0..width * height {
        let tag = reader.read_u8()?;
        let stone = Stone::from_tag(tag).ok_or_else(|| anyhow!("invalid cell tag {}", tag))?;
        cells.push(stone);
    }

    let state = GameState::from_board(Board::from_cells(width, height, cells))?;
    if state.turns() != turns {
        return Err(anyhow!(
            "snapshot claims {} turns but holds {} stones",
            turns,
            state.turns()
        ));
    }
    Ok(state)
}

pub fn to_bytes(state: &GameState) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(4 + state.width() * state.height());
    write_state(&mut bytes, state)?;
    Ok(bytes)
}

pub fn from_bytes(mut bytes: &[u8]) -> Result<GameState> {
    let state = read_state(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(anyhow!("{} trailing bytes after snapshot", bytes.len()));
    }
    Ok(state)
}

//! The board: a row-major arena of optional pieces.

use crate::error::{GameError, GameResult};
use crate::game::rules::{MIN_HEIGHT, MIN_WIDTH};
use crate::game::{ActionType, Piece, PieceType, Position, Surroundings};

/// Fixed-size board of slots, each holding at most one piece.
#[derive(Debug)]
pub struct Grid {
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Slots stored in row-major order.
    slots: Vec<Option<Piece>>,
}

impl Grid {
    /// Create an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Dimension`] if either side is below the minimum.
    /// Nothing is allocated in that case.
    pub fn new(width: u16, height: u16) -> GameResult<Self> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(GameError::Dimension {
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
                width,
                height,
            });
        }

        let size = usize::from(width) * usize::from(height);
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);

        Ok(Self {
            width,
            height,
            slots,
        })
    }

    /// Width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the board has no slots. Always false for a constructed grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Row-major slot index of an in-bounds position.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(usize::from(pos.row) * usize::from(self.width) + usize::from(pos.col))
        } else {
            None
        }
    }

    /// Position of a slot index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // idx < width * height, so both fit in u16
    pub fn position_of(&self, idx: usize) -> Position {
        let width = usize::from(self.width);
        Position::new((idx / width) as u16, (idx % width) as u16)
    }

    fn checked_index(&self, pos: Position) -> GameResult<usize> {
        self.index_of(pos).ok_or(GameError::OutOfBounds {
            width: self.width,
            height: self.height,
            row: pos.row,
            col: pos.col,
        })
    }

    /// Piece at `pos`, if any, without error reporting.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.index_of(pos).and_then(|idx| self.slots[idx].as_ref())
    }

    /// Piece at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] for an off-board position and
    /// [`GameError::EmptySlot`] if the slot is empty.
    pub fn piece(&self, pos: Position) -> GameResult<&Piece> {
        let idx = self.checked_index(pos)?;
        self.slots[idx].as_ref().ok_or(GameError::EmptySlot {
            row: pos.row,
            col: pos.col,
        })
    }

    /// Place a piece at its own stored position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] for an off-board position and
    /// [`GameError::Occupied`] if the slot already holds a piece.
    pub fn insert(&mut self, piece: Piece) -> GameResult<()> {
        let pos = piece.position();
        let idx = self.checked_index(pos)?;
        let slot = &mut self.slots[idx];
        if slot.is_some() {
            return Err(GameError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        *slot = Some(piece);
        Ok(())
    }

    /// Check that the slot at `pos` is on the board and empty.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::insert`].
    pub fn check_vacant(&self, pos: Position) -> GameResult<()> {
        let idx = self.checked_index(pos)?;
        if self.slots[idx].is_some() {
            return Err(GameError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(())
    }

    /// Slot contents by index.
    #[must_use]
    pub fn slot(&self, idx: usize) -> Option<&Piece> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Mutable slot contents by index.
    #[must_use]
    pub fn slot_mut(&mut self, idx: usize) -> Option<&mut Piece> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Mutable access to two distinct occupied slots at once.
    #[must_use]
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Piece, &mut Piece)> {
        if a == b || a >= self.slots.len() || b >= self.slots.len() {
            return None;
        }
        let (first, second) = if a < b {
            let (head, tail) = self.slots.split_at_mut(b);
            (&mut head[a], &mut tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(a);
            (&mut tail[0], &mut head[b])
        };
        Some((first.as_mut()?, second.as_mut()?))
    }

    /// Exchange the contents of two slots.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Remove and return the piece in a slot.
    pub fn take(&mut self, idx: usize) -> Option<Piece> {
        self.slots.get_mut(idx).and_then(Option::take)
    }

    /// Remove and return the piece in a slot if it matches `pred`.
    pub fn take_if(&mut self, idx: usize, pred: impl FnOnce(&Piece) -> bool) -> Option<Piece> {
        self.slots
            .get_mut(idx)
            .and_then(|slot| slot.take_if(|piece| pred(piece)))
    }

    /// Iterate over occupied slots as `(index, piece)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|piece| (idx, piece)))
    }

    /// Iterate over all slots in row-major order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Piece>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Neighborhood of `center` as seen by the piece standing there.
    ///
    /// Off-board cells are [`PieceType::Inaccessible`], empty cells
    /// [`PieceType::Empty`]; the center is always [`PieceType::Observer`]
    /// whatever actually occupies it.
    #[must_use]
    pub fn surroundings(&self, center: Position) -> Surroundings {
        let mut cells = [PieceType::Inaccessible; 9];
        for (idx, action) in ActionType::BY_INDEX.iter().enumerate() {
            if let Some(pos) = center.step(*action, self.width, self.height) {
                cells[idx] = self.get(pos).map_or(PieceType::Empty, Piece::piece_type);
            }
        }
        Surroundings::new(cells)
    }

    /// Whether `action` keeps a piece at `pos` on the board.
    #[must_use]
    pub fn is_legal(&self, action: ActionType, pos: Position) -> bool {
        pos.step(action, self.width, self.height).is_some()
    }

    /// Destination of `action` from `pos`; an off-board move leaves the
    /// position unchanged.
    #[must_use]
    pub fn move_from(&self, pos: Position, action: ActionType) -> Position {
        pos.step(action, self.width, self.height).unwrap_or(pos)
    }

    /// Action leading from `from` to the adjacent (or equal) position `to`.
    /// Non-adjacent pairs map to [`ActionType::Stay`].
    #[must_use]
    pub fn reach_surroundings(from: Position, to: Position) -> ActionType {
        let d_row = i32::from(to.row) - i32::from(from.row);
        let d_col = i32::from(to.col) - i32::from(from.col);
        ActionType::from_delta(d_row, d_col).unwrap_or(ActionType::Stay)
    }
}

//! Plain-text board rendering.
//!
//! Output format:
//! ```text
//! Round 3:
//! [T0   ][     ][F2   ]
//! [     ][S1   ][     ]
//! [D3   ][     ][     ]
//! Status: Playing...
//! ```

use std::fmt;

use crate::game::Game;

/// Width every cell token is padded to.
pub const CELL_WIDTH: usize = 5;

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round {}:", self.round_number())?;

        let width = usize::from(self.width());
        for (idx, slot) in self.grid().slots().enumerate() {
            let token = slot.map(crate::game::Piece::token).unwrap_or_default();
            write!(f, "[{token:<CELL_WIDTH$}]")?;
            if (idx + 1) % width == 0 {
                writeln!(f)?;
            }
        }

        writeln!(f, "Status: {}", self.status())
    }
}

//! Scoring module - per-tile points with an escalating combo multiplier
//!
//! Every tile removed during a cascade is worth `base_score * combo`, where
//! `combo` is 1 for the first iteration of a swap's cascade and goes up by one
//! for each further iteration that finds matches. All arithmetic saturates so
//! the running score can only grow.

/// Points for one removed tile
pub fn tile_points(base_score: u32, combo: u32) -> u32 {
    base_score.saturating_mul(combo)
}

/// Points for one cascade iteration removing `tiles` tiles
pub fn cascade_points(tiles: usize, base_score: u32, combo: u32) -> u32 {
    let tiles = u32::try_from(tiles).unwrap_or(u32::MAX);
    tile_points(base_score, combo).saturating_mul(tiles)
}

/// Multiplier for the iteration after `combo`
pub fn next_combo(combo: u32) -> u32 {
    combo.saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BASE_SCORE;

    #[test]
    fn test_three_match_first_tier() {
        assert_eq!(cascade_points(3, BASE_SCORE, 1), 30);
    }

    #[test]
    fn test_combo_escalates() {
        assert_eq!(tile_points(BASE_SCORE, 1), 10);
        assert_eq!(tile_points(BASE_SCORE, 2), 20);
        assert_eq!(cascade_points(4, BASE_SCORE, 3), 120);
        assert_eq!(next_combo(1), 2);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(tile_points(u32::MAX, 2), u32::MAX);
        assert_eq!(cascade_points(usize::MAX, 10, 1), u32::MAX);
        assert_eq!(next_combo(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_zero_tiles_zero_points() {
        assert_eq!(cascade_points(0, BASE_SCORE, 5), 0);
    }
}

/// Reward for each position in a game; later positions reuse the top tier.
pub const PRIZE_LADDER: [u32; 5] = [100, 200, 500, 1000, 2000];

pub fn prize_for(index: usize) -> u32 {
    PRIZE_LADDER[index.min(PRIZE_LADDER.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_by_position() {
        let prizes: Vec<u32> = (0..5).map(prize_for).collect();
        assert_eq!(prizes, vec![100, 200, 500, 1000, 2000]);
    }

    #[test]
    fn test_clamps_to_top_tier() {
        assert_eq!(prize_for(5), 2000);
        assert_eq!(prize_for(49), 2000);
    }
}

/// Extra draws granted to the length-weighted sentence sampler when it keeps
/// hitting sentences with fewer than two phrases.
pub const MAX_SENTENCE_DRAW_TRIALS: usize = 10;

/// Extra shuffles granted to the permutation operator when the shuffle comes
/// out equal to the original run.
pub const MAX_SHUFFLE_TRIALS: usize = 10;

/// Probability of moving a block rightward when `right-move-preference` is
/// not configured.
pub const DEFAULT_RIGHT_MOVE_PREFERENCE: f64 = 0.5;

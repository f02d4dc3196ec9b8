/// Most units a single `add_units` driver command may create.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Row index into a tableau (one row per output variable).
pub type Row = usize;

/// Column index into a tableau (one column per button, plus the target).
pub type Col = usize;

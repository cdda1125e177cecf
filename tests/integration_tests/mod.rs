// Repositories are created with `git init`, so these need git on PATH.
// Output is compared after pinning the clock, the width and colors.

pub mod discovery;
pub mod help;
pub mod list;

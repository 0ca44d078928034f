//! Unit tests mirroring the `src` module tree

mod io;
mod spatial;

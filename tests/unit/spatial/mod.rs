mod basis;
mod tiles;

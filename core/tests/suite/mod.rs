mod artifacts;
mod export;

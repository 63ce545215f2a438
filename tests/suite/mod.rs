mod config;
mod export;
mod flow;

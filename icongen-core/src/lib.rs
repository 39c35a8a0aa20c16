pub mod config;
pub mod generator;
pub mod icons;
pub mod inkscape;

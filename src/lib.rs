//! Turn an uploaded PNG logo into favicon-ready assets: inspect its
//! background, crop it to its visible content, center it on a square
//! transparent canvas and pack it into a `.ico`.

pub mod asset;
pub mod commands;
pub mod crop;
pub mod favicon;
pub mod inspect;
pub mod report;
pub mod square;

// Presentation side: plain-text rendering, the interactive session and exports.

pub mod export;
pub mod render;
pub mod session;

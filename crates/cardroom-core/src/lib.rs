pub mod bootstrap;
pub mod controls;
pub mod felt;
pub mod frame_queue;
pub mod geometry;
pub mod protocol;
pub mod replay;
pub mod style;

mod robots;

pub use robots::*;

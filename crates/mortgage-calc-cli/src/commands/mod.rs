pub mod mortgage;
pub mod theme;
